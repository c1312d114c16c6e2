//! Directory HTTP client tests against a mock Xubio API.

use invoice_client_lookup::models::ClientId;
use invoice_client_lookup::{Directory, DirectoryClient, DirectoryError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> DirectoryClient {
    DirectoryClient::new(reqwest::Client::new(), server.uri(), "secret-token")
}

#[tokio::test]
async fn email_search_sends_bearer_token_and_encoded_email() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clienteBean"))
        .and(query_param("email", "ana+shop@example.com"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "cliente_id": 12, "nombre": "Ana" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let clients = client_for(&server)
        .search_clients_by_email("ana+shop@example.com")
        .await
        .unwrap();

    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].client_id(), Some(ClientId::Number(12.into())));
}

#[tokio::test]
async fn ledger_query_carries_point_of_sale_and_letter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/talonario"))
        .and(query_param("puntoDeVenta", "00002"))
        .and(query_param("letraComprobante", "A"))
        .and(query_param("tipoComprobante", "Facturas de Venta A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ultimoUtilizado": "318" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let entries = client_for(&server)
        .list_ledger_entries("00002", "A")
        .await
        .unwrap();

    assert_eq!(entries[0].last_used(), 318);
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/puntoVentaBean"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "puntoVentaId": 3, "codigo": "00007" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let directory = DirectoryClient::new(reqwest::Client::new(), format!("{}/", server.uri()), "t");
    let points = directory.list_points_of_sale().await.unwrap();

    assert_eq!(points[0].code(), "00007");
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clienteBean"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).list_clients().await.unwrap_err();

    match err {
        DirectoryError::Status { status, url } => {
            assert_eq!(status.as_u16(), 401);
            assert!(url.ends_with("/clienteBean"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn non_array_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clienteBean"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "oops" })))
        .mount(&server)
        .await;

    let err = client_for(&server).list_clients().await.unwrap_err();

    assert!(matches!(err, DirectoryError::Decode { .. }));
}

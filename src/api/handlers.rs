use crate::models::{CustomerRecord, RetryOutcome};
use crate::service::LookupService;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// 请求体: 客户记录 + access token
#[derive(Debug, Deserialize)]
pub struct ClientLookupRequest {
    pub access_token: String,
    #[serde(flatten)]
    pub record: CustomerRecord,
}

/// 请求体: 之前的查找结果，可能只含部分字段，原样回传
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryLookupRequest {
    #[serde(default)]
    pub lookup_data: Value,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 客户查找 + 开票准备接口
pub async fn lookup_client(
    State(service): State<Arc<LookupService>>,
    Json(req): Json<ClientLookupRequest>,
) -> Response {
    let result = service.lookup_client(&req.record, &req.access_token).await;
    (StatusCode::OK, Json(result)).into_response()
}

/// 重复客户报错后的重试查找接口
///
/// 致命失败同样返回 200，由响应体中的 `fatalError` 决定流水线走向。
pub async fn retry_lookup(
    State(service): State<Arc<LookupService>>,
    Json(req): Json<RetryLookupRequest>,
) -> Response {
    let outcome: RetryOutcome = service.retry_lookup(req.lookup_data).await;
    (StatusCode::OK, Json(outcome)).into_response()
}

//! 内存中的目录服务，记录调用次数

use crate::directory::{Directory, DirectoryError};
use crate::models::{ClientRecord, LedgerEntry, PointOfSale};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeDirectory {
    email_results: Vec<Value>,
    clients: Vec<Value>,
    points_of_sale: Vec<Value>,
    ledger: Vec<Value>,
    fail_email: bool,
    fail_list_remaining: AtomicUsize,
    fail_numbering: bool,
    email_calls: AtomicUsize,
    list_calls: AtomicUsize,
    ledger_requests: Mutex<Vec<(String, String)>>,
}

fn decode<T: DeserializeOwned>(values: &[Value]) -> Vec<T> {
    values
        .iter()
        .map(|v| serde_json::from_value(v.clone()).expect("fixture must decode"))
        .collect()
}

fn unavailable(path: &str) -> DirectoryError {
    DirectoryError::Status {
        status: StatusCode::SERVICE_UNAVAILABLE,
        url: format!("fake://{}", path),
    }
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email_results(mut self, results: Vec<Value>) -> Self {
        self.email_results = results;
        self
    }

    pub fn with_clients(mut self, clients: Vec<Value>) -> Self {
        self.clients = clients;
        self
    }

    pub fn with_points_of_sale(mut self, points: Vec<Value>) -> Self {
        self.points_of_sale = points;
        self
    }

    pub fn with_ledger(mut self, entries: Vec<Value>) -> Self {
        self.ledger = entries;
        self
    }

    pub fn failing_email(mut self) -> Self {
        self.fail_email = true;
        self
    }

    pub fn failing_list_once(self) -> Self {
        self.fail_list_remaining.store(1, Ordering::SeqCst);
        self
    }

    pub fn failing_numbering(mut self) -> Self {
        self.fail_numbering = true;
        self
    }

    pub fn email_calls(&self) -> usize {
        self.email_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn ledger_requests(&self) -> Vec<(String, String)> {
        self.ledger_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn search_clients_by_email(
        &self,
        _email: &str,
    ) -> Result<Vec<ClientRecord>, DirectoryError> {
        self.email_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_email {
            return Err(unavailable("/clienteBean?email"));
        }
        Ok(decode(&self.email_results))
    }

    async fn list_clients(&self) -> Result<Vec<ClientRecord>, DirectoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .fail_list_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(unavailable("/clienteBean"));
        }
        Ok(decode(&self.clients))
    }

    async fn list_points_of_sale(&self) -> Result<Vec<PointOfSale>, DirectoryError> {
        if self.fail_numbering {
            return Err(unavailable("/puntoVentaBean"));
        }
        Ok(decode(&self.points_of_sale))
    }

    async fn list_ledger_entries(
        &self,
        point_of_sale_code: &str,
        letter: &str,
    ) -> Result<Vec<LedgerEntry>, DirectoryError> {
        self.ledger_requests
            .lock()
            .unwrap()
            .push((point_of_sale_code.to_string(), letter.to_string()));
        if self.fail_numbering {
            return Err(unavailable("/talonario"));
        }
        Ok(decode(&self.ledger))
    }
}

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use fisam_ledger::{
    domain::{Competencia, EntryKind, EntryStatus, LedgerEntry},
    errors::{LedgerError, Result},
    sync::{Transport, TransportResponse},
};
use once_cell::sync::Lazy;
use serde_json::Value;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh directory usable as `FISAM_LEDGER_HOME`.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn march() -> Competencia {
    Competencia::new(2025, 3).expect("valid period")
}

pub fn entry(id: &str, tipo: EntryKind, valor: f64) -> LedgerEntry {
    LedgerEntry {
        id: id.into(),
        competencia: march(),
        data: NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date"),
        tipo,
        licitacao: format!("PE {}/2025", id),
        status: EntryStatus::in_progress(),
        categoria: "geral".into(),
        fornecedor: None,
        descricao: None,
        valor,
        comprovante_url: None,
    }
}

/// A request the fake transport received.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Get(Vec<(String, String)>),
    Post(Value),
}

/// In-memory transport replaying canned responses in order.
///
/// An empty queue answers `200` with an empty `rows` list.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<TransportResponse>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Ok(TransportResponse::new(status, body)));
        self
    }

    pub fn unreachable(self) -> Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Err(LedgerError::Network("connection refused".into())));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn posts(&self) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter_map(|request| match request {
                Recorded::Post(body) => Some(body),
                Recorded::Get(_) => None,
            })
            .collect()
    }

    fn next(&self) -> Result<TransportResponse> {
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Ok(TransportResponse::new(200, r#"{"rows":[]}"#)))
    }
}

impl Transport for FakeTransport {
    fn get(&self, query: &[(&str, &str)]) -> Result<TransportResponse> {
        let params = query
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        self.requests
            .lock()
            .expect("requests lock")
            .push(Recorded::Get(params));
        self.next()
    }

    fn post_json(&self, body: &Value) -> Result<TransportResponse> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(Recorded::Post(body.clone()));
        self.next()
    }

    fn base_url(&self) -> &str {
        "https://script.example/exec"
    }
}

/// `list` response body holding `entries`.
pub fn rows_body(entries: &[LedgerEntry]) -> String {
    serde_json::json!({ "rows": entries }).to_string()
}

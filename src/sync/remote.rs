use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{Competencia, LedgerEntry};
use crate::errors::{LedgerError, Result};
use crate::ledger::EntryStore;

use super::protocol::{ApiRequest, CloseMonthResponse, ListResponse};
use super::transport::{HttpTransport, Transport, TransportResponse};
use super::{CloseMonthReceipt, SyncEffect, SyncGateway};

/// Gateway talking to the spreadsheet-backed API.
///
/// Mutations never touch the store; they report `SyncEffect::RefreshRequired`
/// so the caller reloads the period and picks up server-assigned state.
pub struct RemoteGateway<T: Transport = HttpTransport> {
    transport: T,
}

impl RemoteGateway<HttpTransport> {
    pub fn http(base_url: impl Into<String>) -> Self {
        Self::new(HttpTransport::new(base_url))
    }
}

impl<T: Transport> RemoteGateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    fn post(&self, request: &ApiRequest, failure: &str) -> Result<TransportResponse> {
        debug!(op = request.op(), "posting to remote api");
        let body = serde_json::to_value(request)?;
        let response = self.transport.post_json(&body)?;
        ensure_success(response, failure)
    }
}

fn ensure_success(response: TransportResponse, failure: &str) -> Result<TransportResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        warn!(status = response.status, "remote api rejected request");
        Err(LedgerError::Network(format!(
            "{} (HTTP {})",
            failure, response.status
        )))
    }
}

fn row_payload(entry: &LedgerEntry, editing_id: Option<&str>) -> Result<Value> {
    let mut row = serde_json::to_value(entry)?;
    if let Value::Object(fields) = &mut row {
        match editing_id {
            Some(id) => {
                fields.insert("id".into(), Value::String(id.to_string()));
            }
            None => {
                fields.remove("id");
            }
        }
    }
    Ok(row)
}

impl<T: Transport> SyncGateway for RemoteGateway<T> {
    fn describe(&self) -> String {
        format!("remote ({})", self.transport.base_url())
    }

    fn list(&self, competencia: &Competencia) -> Result<Vec<LedgerEntry>> {
        let period = competencia.to_string();
        let response = self
            .transport
            .get(&[("op", "list"), ("competencia", period.as_str())])?;
        let response = ensure_success(response, "failed to load entries from the API")?;
        let entries = serde_json::from_str::<ListResponse>(&response.body)
            .and_then(|parsed| parsed.into_entries(competencia))
            .map_err(|err| {
                LedgerError::Network(format!("invalid list response from the API: {}", err))
            })?;
        info!(%competencia, rows = entries.len(), "loaded entries from remote api");
        Ok(entries)
    }

    fn save(
        &self,
        _store: &mut EntryStore,
        entry: LedgerEntry,
        editing_id: Option<&str>,
    ) -> Result<SyncEffect> {
        let row = row_payload(&entry, editing_id)?;
        let request = match editing_id {
            Some(_) => ApiRequest::Update { row },
            None => ApiRequest::Add { row },
        };
        self.post(&request, "failed to save entry to the API")?;
        info!(op = request.op(), "entry saved remotely");
        Ok(SyncEffect::RefreshRequired)
    }

    fn delete(&self, _store: &mut EntryStore, id: &str) -> Result<SyncEffect> {
        let request = ApiRequest::Delete { id: id.to_string() };
        self.post(&request, "failed to delete entry from the API")?;
        info!(%id, "entry deleted remotely");
        Ok(SyncEffect::RefreshRequired)
    }

    fn close_month(&self, competencia: &Competencia) -> Result<CloseMonthReceipt> {
        let request = ApiRequest::CloseMonth {
            competencia: *competencia,
        };
        let response = self.post(&request, "failed to close the month")?;
        let parsed = if response.body.trim().is_empty() {
            CloseMonthResponse::default()
        } else {
            serde_json::from_str::<CloseMonthResponse>(&response.body).map_err(|err| {
                LedgerError::Network(format!("invalid close-month response from the API: {}", err))
            })?
        };
        info!(%competencia, invoice = ?parsed.invoice_pdf_url, "month closed remotely");
        Ok(CloseMonthReceipt {
            competencia: *competencia,
            invoice_pdf_url: parsed.invoice_pdf_url,
            simulated: false,
            effect: SyncEffect::RefreshRequired,
        })
    }
}

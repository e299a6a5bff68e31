//! Request and response bodies of the spreadsheet-backed API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Competencia, LedgerEntry};

/// Body of every `POST` sent to the API, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ApiRequest {
    Add { row: Value },
    Update { row: Value },
    Delete { id: String },
    CloseMonth { competencia: Competencia },
}

impl ApiRequest {
    pub fn op(&self) -> &'static str {
        match self {
            ApiRequest::Add { .. } => "add",
            ApiRequest::Update { .. } => "update",
            ApiRequest::Delete { .. } => "delete",
            ApiRequest::CloseMonth { .. } => "closeMonth",
        }
    }
}

/// Rows are kept loose until [`ListResponse::into_entries`] so that sheet
/// quirks (numeric ids, a missing period column) can be normalized first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub rows: Vec<Value>,
}

impl ListResponse {
    pub fn into_entries(
        self,
        competencia: &Competencia,
    ) -> Result<Vec<LedgerEntry>, serde_json::Error> {
        self.rows
            .into_iter()
            .map(|row| serde_json::from_value(normalize_row(row, competencia)))
            .collect()
    }
}

fn normalize_row(mut row: Value, competencia: &Competencia) -> Value {
    if let Value::Object(fields) = &mut row {
        if let Some(Value::Number(id)) = fields.get("id") {
            let id = id.to_string();
            fields.insert("id".into(), Value::String(id));
        }
        let period_missing = match fields.get("competencia") {
            None | Some(Value::Null) => true,
            Some(Value::String(text)) => text.trim().is_empty(),
            Some(_) => false,
        };
        if period_missing {
            fields.insert("competencia".into(), Value::String(competencia.to_string()));
        }
    }
    row
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloseMonthResponse {
    #[serde(rename = "invoicePdfUrl", default)]
    pub invoice_pdf_url: Option<String>,
}

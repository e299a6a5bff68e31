use std::sync::Arc;

use serde_json::Value;

use crate::errors::{LedgerError, Result};

/// Status and raw body of an API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Wire access to the API base URL.
///
/// Non-success statuses are returned as responses, not errors; only failures
/// to reach the server at all surface as `LedgerError::Network`.
pub trait Transport: Send + Sync {
    fn get(&self, query: &[(&str, &str)]) -> Result<TransportResponse>;
    fn post_json(&self, body: &Value) -> Result<TransportResponse>;
    fn base_url(&self) -> &str;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn get(&self, query: &[(&str, &str)]) -> Result<TransportResponse> {
        (**self).get(query)
    }

    fn post_json(&self, body: &Value) -> Result<TransportResponse> {
        (**self).post_json(body)
    }

    fn base_url(&self) -> &str {
        (**self).base_url()
    }
}

/// Blocking HTTP transport backed by `ureq`.
pub struct HttpTransport {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, query: &[(&str, &str)]) -> Result<TransportResponse> {
        let mut request = self.agent.get(&self.base_url);
        for (name, value) in query {
            request = request.query(name, value);
        }
        into_response(request.call())
    }

    fn post_json(&self, body: &Value) -> Result<TransportResponse> {
        into_response(self.agent.post(&self.base_url).send_json(body))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn into_response(
    result: std::result::Result<ureq::Response, ureq::Error>,
) -> Result<TransportResponse> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(err)) => return Err(LedgerError::Network(err.to_string())),
    };
    let status = response.status();
    let body = response
        .into_string()
        .map_err(|err| LedgerError::Network(err.to_string()))?;
    Ok(TransportResponse { status, body })
}

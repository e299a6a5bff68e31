//! Gateways that load and persist entries, either locally or through the remote API.

pub mod local;
pub mod protocol;
pub mod remote;
pub mod transport;

use crate::config::{Config, SyncMode};
use crate::domain::{Competencia, LedgerEntry};
use crate::errors::Result;
use crate::ledger::EntryStore;

pub use local::{sample_entries, LocalGateway};
pub use remote::RemoteGateway;
pub use transport::{HttpTransport, Transport, TransportResponse};

/// What the caller must do after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEffect {
    /// The store already reflects the change.
    Applied,
    /// The period must be listed again to reconcile with the server.
    RefreshRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseMonthReceipt {
    pub competencia: Competencia,
    pub invoice_pdf_url: Option<String>,
    /// `true` when no API was called.
    pub simulated: bool,
    pub effect: SyncEffect,
}

/// Abstraction over the two data sources selected by configuration.
pub trait SyncGateway: Send + Sync {
    fn describe(&self) -> String;
    fn list(&self, competencia: &Competencia) -> Result<Vec<LedgerEntry>>;
    fn save(
        &self,
        store: &mut EntryStore,
        entry: LedgerEntry,
        editing_id: Option<&str>,
    ) -> Result<SyncEffect>;
    fn delete(&self, store: &mut EntryStore, id: &str) -> Result<SyncEffect>;
    fn close_month(&self, competencia: &Competencia) -> Result<CloseMonthReceipt>;
}

/// Builds the gateway matching `config`.
pub fn gateway_for(config: &Config) -> Box<dyn SyncGateway> {
    match config.sync_mode() {
        SyncMode::Local => Box::new(LocalGateway::new()),
        SyncMode::Remote(base_url) => Box::new(RemoteGateway::http(base_url)),
    }
}

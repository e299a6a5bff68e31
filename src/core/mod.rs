pub mod services;
pub mod session;

pub use session::{LedgerView, Session, SyncPhase};

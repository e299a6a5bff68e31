//! In-memory ledger state for the active competency period.

pub mod store;

pub use store::EntryStore;

pub mod common;
pub mod competencia;
pub mod entry;

pub use common::Displayable;
pub use competencia::Competencia;
pub use entry::{
    EntryDraft, EntryKind, EntryStatus, LedgerEntry, STATUS_IN_PROGRESS, STATUS_LOST, STATUS_WON,
    STATUS_WILDCARD,
};

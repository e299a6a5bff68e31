pub mod export_service;
pub mod filter_service;
pub mod summary_service;

pub use export_service::{export_file_name, to_csv, write_csv, CSV_HEADER};
pub use filter_service::{filter_entries, EntryFilter, StatusFilter};
pub use summary_service::{Summary, SummaryService};

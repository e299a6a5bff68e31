//! Derives the visible subset of entries from the search box and status selector.

use std::{fmt, str::FromStr};

use crate::domain::{EntryStatus, LedgerEntry, STATUS_WILDCARD};
use crate::errors::ValidationError;

/// Status selector; `All` is the filter-only wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(EntryStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: &EntryStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(STATUS_WILDCARD) {
            Ok(StatusFilter::All)
        } else {
            EntryStatus::new(trimmed).map(StatusFilter::Only)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(STATUS_WILDCARD),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub query: String,
    pub status: StatusFilter,
}

impl EntryFilter {
    pub fn new(query: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.status == StatusFilter::All
    }

    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if !self.status.matches(&entry.status) {
            return false;
        }
        let needle = self.query.trim().to_lowercase();
        needle.is_empty() || entry.search_text().contains(&needle)
    }
}

/// Entries passing `filter`, in input order.
pub fn filter_entries<'a, I>(entries: I, filter: &EntryFilter) -> Vec<&'a LedgerEntry>
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    entries
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .collect()
}

mod common;

use std::str::FromStr;

use common::entry;
use fisam_ledger::{
    core::services::{filter_entries, EntryFilter, StatusFilter, SummaryService},
    domain::{EntryKind, EntryStatus, LedgerEntry},
    ledger::EntryStore,
};

fn ledger() -> Vec<LedgerEntry> {
    let mut won = entry("1", EntryKind::Receita, 7800.0);
    won.status = EntryStatus::won();
    won.licitacao = "Processo 11/2025 • Órgão X".into();

    let mut fee = entry("2", EntryKind::Despesa, 450.5);
    fee.fornecedor = Some("Operadora".into());

    let commission = entry("3", EntryKind::Receita, 3200.0);
    vec![won, fee, commission]
}

fn ids<'a>(entries: &[&'a LedgerEntry]) -> Vec<&'a str> {
    entries.iter().map(|entry| entry.id.as_str()).collect()
}

#[test]
fn empty_filter_keeps_everything_in_order() {
    let entries = ledger();
    let visible = filter_entries(&entries, &EntryFilter::default());
    assert_eq!(ids(&visible), vec!["1", "2", "3"]);
}

#[test]
fn query_is_trimmed_and_case_insensitive() {
    let entries = ledger();
    let filter = EntryFilter::new("  ÓRGÃO x ", StatusFilter::All);
    assert_eq!(ids(&filter_entries(&entries, &filter)), vec!["1"]);

    let filter = EntryFilter::new("operadora", StatusFilter::All);
    assert_eq!(ids(&filter_entries(&entries, &filter)), vec!["2"]);
}

#[test]
fn query_matches_tipo_label() {
    let entries = ledger();
    let filter = EntryFilter::new("despesa", StatusFilter::All);
    assert_eq!(ids(&filter_entries(&entries, &filter)), vec!["2"]);
}

#[test]
fn status_and_query_combine() {
    let entries = ledger();
    let in_progress = StatusFilter::from_str("em_andamento").unwrap();
    let filter = EntryFilter::new("pe", in_progress);
    assert_eq!(ids(&filter_entries(&entries, &filter)), vec!["2", "3"]);
}

#[test]
fn filtering_is_idempotent() {
    let entries = ledger();
    let filter = EntryFilter::new("2025", StatusFilter::from_str("ganho").unwrap());
    let once = filter_entries(&entries, &filter);
    let twice = filter_entries(once.iter().copied(), &filter);
    assert_eq!(once, twice);
}

#[test]
fn all_is_a_filter_not_a_status() {
    assert_eq!(StatusFilter::from_str("all").unwrap(), StatusFilter::All);
    assert!(EntryStatus::new("all").is_err());
}

#[test]
fn summary_over_visible_subset() {
    let entries = ledger();
    let summary = SummaryService::summarize(&entries);
    assert_eq!(summary.total_revenue, 11000.0);
    assert_eq!(summary.total_expense, 450.5);
    assert_eq!(summary.balance, 10549.5);

    let filter = EntryFilter::new("", StatusFilter::Only(EntryStatus::won()));
    let summary = SummaryService::summarize(filter_entries(&entries, &filter));
    assert_eq!(summary.total_revenue, 7800.0);
    assert_eq!(summary.total_expense, 0.0);
}

#[test]
fn store_upsert_and_remove() {
    let mut store = EntryStore::with_entries(ledger());

    let id = store.upsert(entry("", EntryKind::Despesa, 10.0), None);
    assert_eq!(store.entries()[0].id, id);
    assert!(!["1", "2", "3"].contains(&id.as_str()));

    let kept = store.upsert(entry("", EntryKind::Despesa, 99.0), Some("2"));
    assert_eq!(kept, "2");
    assert_eq!(store.get("2").map(|entry| entry.valor), Some(99.0));
    assert_eq!(store.len(), 4);

    assert!(store.remove("missing").is_none());
    assert!(store.remove("1").is_some());
    assert_eq!(store.ids(), vec![id.as_str(), "2", "3"]);
}

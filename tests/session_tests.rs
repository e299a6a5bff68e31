mod common;

use std::sync::Arc;

use common::{entry, march, rows_body, temp_home, FakeTransport};
use fisam_ledger::{
    core::{Session, SyncPhase},
    domain::{Competencia, EntryKind},
    errors::LedgerError,
    sync::{LocalGateway, RemoteGateway, SyncEffect},
};

fn remote_session(transport: FakeTransport) -> (Arc<FakeTransport>, Session) {
    let transport = Arc::new(transport);
    let gateway = RemoteGateway::new(Arc::clone(&transport));
    (transport, Session::with_gateway(Box::new(gateway), march()))
}

#[test]
fn remote_submit_refreshes_from_server() {
    let server_rows = vec![
        entry("srv-1", EntryKind::Receita, 100.0),
        entry("srv-2", EntryKind::Despesa, 40.0),
    ];
    let (transport, mut session) = remote_session(
        FakeTransport::new()
            .respond(200, &rows_body(&server_rows[1..]))
            .respond(200, "")
            .respond(200, &rows_body(&server_rows)),
    );
    session.refresh().unwrap();

    let mut draft = session.begin_create();
    draft.licitacao = "PE 1/2025".into();
    draft.categoria = "geral".into();
    draft.valor = "100".into();
    let effect = session.submit(&draft).unwrap();

    assert_eq!(effect, SyncEffect::RefreshRequired);
    assert_eq!(session.store().ids(), vec!["srv-1", "srv-2"]);
    assert_eq!(session.phase(), SyncPhase::Idle);
    assert_eq!(transport.posts().len(), 1);
    assert_eq!(session.summary().balance, 60.0);
}

#[test]
fn failed_save_keeps_store_and_reports() {
    let rows = vec![entry("1", EntryKind::Receita, 10.0)];
    let (_, mut session) = remote_session(
        FakeTransport::new()
            .respond(200, &rows_body(&rows))
            .respond(500, "boom"),
    );
    session.refresh().unwrap();
    let draft = session.begin_edit("1").unwrap();

    let err = session.submit(&draft).unwrap_err();

    assert!(matches!(err, LedgerError::Network(_)));
    assert_eq!(session.store().entries(), rows.as_slice());
    assert_eq!(session.phase(), SyncPhase::Idle);
    assert_eq!(session.editing_id(), Some("1"));
    assert!(session.last_failure().is_some());
}

#[test]
fn failed_refresh_keeps_previous_entries() {
    let rows = vec![entry("1", EntryKind::Receita, 10.0)];
    let (_, mut session) = remote_session(
        FakeTransport::new()
            .respond(200, &rows_body(&rows))
            .unreachable(),
    );
    session.refresh().unwrap();

    assert!(session.refresh().is_err());
    assert_eq!(session.store().len(), 1);
}

#[test]
fn success_clears_last_failure() {
    let (_, mut session) = remote_session(FakeTransport::new().respond(502, ""));
    assert!(session.refresh().is_err());
    assert!(session.last_failure().is_some());
    session.refresh().unwrap();
    assert_eq!(session.last_failure(), None);
}

#[test]
fn failed_period_switch_keeps_loaded_period() {
    let rows = vec![entry("1", EntryKind::Receita, 10.0)];
    let (_, mut session) = remote_session(
        FakeTransport::new()
            .respond(200, &rows_body(&rows))
            .respond(500, "boom"),
    );
    session.refresh().unwrap();
    session.begin_edit("1").unwrap();

    let april = Competencia::new(2025, 4).unwrap();
    assert!(session.set_competencia(april).is_err());

    assert_eq!(session.competencia(), march());
    assert_eq!(session.store().entries(), rows.as_slice());
    assert_eq!(session.editing_id(), Some("1"));
    assert_eq!(session.export_file_name(), "fisam_lancamentos_2025-03.csv");
    assert_eq!(session.view().competencia, march());
    assert!(session.last_failure().is_some());
}

#[test]
fn accepted_submit_survives_failed_reload() {
    let rows = vec![entry("1", EntryKind::Receita, 10.0)];
    let (transport, mut session) = remote_session(
        FakeTransport::new()
            .respond(200, &rows_body(&rows))
            .respond(200, "")
            .respond(500, "boom"),
    );
    session.refresh().unwrap();
    let mut draft = session.begin_edit("1").unwrap();
    draft.valor = "25".into();

    let effect = session.submit(&draft).unwrap();

    assert_eq!(effect, SyncEffect::RefreshRequired);
    assert_eq!(transport.posts().len(), 1);
    assert_eq!(session.editing_id(), None);
    assert_eq!(session.store().entries(), rows.as_slice());
    assert_eq!(session.phase(), SyncPhase::Idle);
    assert!(session
        .last_failure()
        .is_some_and(|reason| reason.contains("HTTP 500")));
}

#[test]
fn close_month_keeps_receipt_when_reload_fails() {
    let (transport, mut session) = remote_session(
        FakeTransport::new()
            .respond(200, r#"{"invoicePdfUrl":"https://docs.example/f.pdf"}"#)
            .unreachable(),
    );

    let receipt = session.close_month().unwrap();

    assert_eq!(
        receipt.invoice_pdf_url.as_deref(),
        Some("https://docs.example/f.pdf")
    );
    assert_eq!(transport.posts().len(), 1);
    assert!(session.last_failure().is_some());
}

#[test]
fn remote_close_month_reloads_period() {
    let (transport, mut session) = remote_session(
        FakeTransport::new()
            .respond(200, r#"{"invoicePdfUrl":"https://docs.example/f.pdf"}"#),
    );

    let receipt = session.close_month().unwrap();

    assert_eq!(
        receipt.invoice_pdf_url.as_deref(),
        Some("https://docs.example/f.pdf")
    );
    assert_eq!(transport.requests().len(), 2);
    assert_eq!(session.last_failure(), None);
}

#[test]
fn export_writes_visible_entries() {
    let mut session = Session::with_gateway(Box::new(LocalGateway::new()), march());
    session.refresh().unwrap();
    session.set_query("passagens");

    let path = session.export_to(&temp_home()).unwrap();

    assert!(path.ends_with("fisam_lancamentos_2025-03.csv"));
    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("\"7800\""));
}

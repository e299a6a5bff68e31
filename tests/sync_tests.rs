mod common;

use std::sync::Arc;

use common::{entry, march, rows_body, FakeTransport, Recorded};
use fisam_ledger::{
    domain::EntryKind,
    ledger::EntryStore,
    sync::{RemoteGateway, SyncEffect, SyncGateway},
};
use serde_json::json;

fn gateway(transport: FakeTransport) -> (Arc<FakeTransport>, RemoteGateway<Arc<FakeTransport>>) {
    let transport = Arc::new(transport);
    (Arc::clone(&transport), RemoteGateway::new(transport))
}

#[test]
fn list_queries_period_and_parses_rows() {
    let rows = vec![entry("a", EntryKind::Receita, 10.0)];
    let (transport, gateway) = gateway(FakeTransport::new().respond(200, &rows_body(&rows)));

    let listed = gateway.list(&march()).unwrap();

    assert_eq!(listed, rows);
    assert_eq!(
        transport.requests(),
        vec![Recorded::Get(vec![
            ("op".into(), "list".into()),
            ("competencia".into(), "2025-03".into()),
        ])]
    );
}

#[test]
fn list_without_rows_is_empty() {
    let (_, gateway) = gateway(FakeTransport::new().respond(200, "{}"));
    assert!(gateway.list(&march()).unwrap().is_empty());
}

#[test]
fn list_accepts_sheet_rows_with_numeric_id_and_no_period() {
    let body = json!({
        "rows": [{
            "id": 41,
            "competencia": "",
            "data": "2025-03-10",
            "tipo": "receita",
            "licitacao": "PE 52/2025",
            "status": "em_andamento",
            "categoria": "taxas",
            "fornecedor": "",
            "valor": 3200
        }]
    })
    .to_string();
    let (_, gateway) = gateway(FakeTransport::new().respond(200, &body));

    let listed = gateway.list(&march()).unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "41");
    assert_eq!(listed[0].competencia, march());
    assert_eq!(listed[0].fornecedor, None);
}

#[test]
fn list_failure_status_is_network_error() {
    let (_, gateway) = gateway(FakeTransport::new().respond(500, "boom"));
    let err = gateway.list(&march()).unwrap_err();
    assert!(err.is_network());
    assert!(err.to_string().contains("HTTP 500"), "{err}");
}

#[test]
fn invalid_list_body_is_network_error() {
    let (_, gateway) = gateway(FakeTransport::new().respond(200, "<html>"));
    assert!(gateway.list(&march()).unwrap_err().is_network());
}

#[test]
fn add_omits_id_and_requires_refresh() {
    let (transport, gateway) = gateway(FakeTransport::new().respond(200, ""));
    let mut store = EntryStore::new();

    let effect = gateway
        .save(&mut store, entry("", EntryKind::Despesa, 450.5), None)
        .unwrap();

    assert_eq!(effect, SyncEffect::RefreshRequired);
    assert!(store.is_empty());
    let posts = transport.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["op"], "add");
    assert!(posts[0]["row"].get("id").is_none());
    assert_eq!(posts[0]["row"]["tipo"], "despesa");
    assert_eq!(posts[0]["row"]["valor"], 450.5);
    assert_eq!(posts[0]["row"]["fornecedor"], "");
}

#[test]
fn update_carries_edited_id() {
    let (transport, gateway) = gateway(FakeTransport::new().respond(200, ""));
    let mut store = EntryStore::new();

    gateway
        .save(&mut store, entry("", EntryKind::Receita, 1.0), Some("42"))
        .unwrap();

    let posts = transport.posts();
    assert_eq!(posts[0]["op"], "update");
    assert_eq!(posts[0]["row"]["id"], "42");
}

#[test]
fn delete_posts_id() {
    let (transport, gateway) = gateway(FakeTransport::new().respond(204, ""));
    let mut store = EntryStore::with_entries(vec![entry("7", EntryKind::Receita, 1.0)]);

    let effect = gateway.delete(&mut store, "7").unwrap();

    assert_eq!(effect, SyncEffect::RefreshRequired);
    assert_eq!(store.len(), 1);
    assert_eq!(transport.posts(), vec![json!({ "op": "delete", "id": "7" })]);
}

#[test]
fn rejected_mutation_leaves_store_untouched() {
    let (_, gateway) = gateway(FakeTransport::new().respond(403, "denied"));
    let mut store = EntryStore::with_entries(vec![entry("7", EntryKind::Receita, 1.0)]);
    let before = store.entries().to_vec();

    let err = gateway.delete(&mut store, "7").unwrap_err();

    assert!(err.is_network());
    assert_eq!(store.entries(), before.as_slice());
}

#[test]
fn close_month_returns_invoice_url() {
    let (transport, gateway) = gateway(
        FakeTransport::new().respond(200, r#"{"invoicePdfUrl":"https://docs.example/f.pdf"}"#),
    );

    let receipt = gateway.close_month(&march()).unwrap();

    assert!(!receipt.simulated);
    assert_eq!(
        receipt.invoice_pdf_url.as_deref(),
        Some("https://docs.example/f.pdf")
    );
    assert_eq!(
        transport.posts(),
        vec![json!({ "op": "closeMonth", "competencia": "2025-03" })]
    );
}

#[test]
fn close_month_without_body_has_no_invoice() {
    let (_, gateway) = gateway(FakeTransport::new().respond(200, ""));
    assert_eq!(gateway.close_month(&march()).unwrap().invoice_pdf_url, None);
}

#[test]
fn unreachable_api_is_network_error() {
    let (_, gateway) = gateway(FakeTransport::new().unreachable());
    assert!(gateway.list(&march()).unwrap_err().is_network());
}

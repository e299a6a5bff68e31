use tracing::{debug, info};

use crate::domain::{
    Competencia, EntryKind, EntryStatus, LedgerEntry, STATUS_IN_PROGRESS, STATUS_WON,
};
use crate::errors::Result;
use crate::ledger::EntryStore;

use super::{CloseMonthReceipt, SyncEffect, SyncGateway};

/// Offline gateway: serves a fixed sample and applies mutations to the store directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalGateway;

impl LocalGateway {
    pub fn new() -> Self {
        Self
    }
}

impl SyncGateway for LocalGateway {
    fn describe(&self) -> String {
        "local (sample data)".into()
    }

    fn list(&self, competencia: &Competencia) -> Result<Vec<LedgerEntry>> {
        debug!(%competencia, "serving sample entries");
        Ok(sample_entries(competencia))
    }

    fn save(
        &self,
        store: &mut EntryStore,
        entry: LedgerEntry,
        editing_id: Option<&str>,
    ) -> Result<SyncEffect> {
        let id = store.upsert(entry, editing_id);
        info!(%id, edited = editing_id.is_some(), "entry saved locally");
        Ok(SyncEffect::Applied)
    }

    fn delete(&self, store: &mut EntryStore, id: &str) -> Result<SyncEffect> {
        let removed = store.remove(id).is_some();
        info!(%id, removed, "entry deleted locally");
        Ok(SyncEffect::Applied)
    }

    fn close_month(&self, competencia: &Competencia) -> Result<CloseMonthReceipt> {
        info!(%competencia, "simulated month close");
        Ok(CloseMonthReceipt {
            competencia: *competencia,
            invoice_pdf_url: None,
            simulated: true,
            effect: SyncEffect::Applied,
        })
    }
}

struct SampleRow {
    id: &'static str,
    day: u32,
    tipo: EntryKind,
    licitacao: &'static str,
    status: &'static str,
    categoria: &'static str,
    fornecedor: &'static str,
    descricao: &'static str,
    valor: f64,
}

const SAMPLE_ROWS: [SampleRow; 3] = [
    SampleRow {
        id: "1",
        day: 3,
        tipo: EntryKind::Receita,
        licitacao: "PE 52/2025 • Licitação Turismo",
        status: STATUS_IN_PROGRESS,
        categoria: "comissão",
        fornecedor: "—",
        descricao: "Comissão estimada do mês",
        valor: 3200.0,
    },
    SampleRow {
        id: "2",
        day: 8,
        tipo: EntryKind::Despesa,
        licitacao: "PE 52/2025 • Licitação Turismo",
        status: STATUS_IN_PROGRESS,
        categoria: "taxas",
        fornecedor: "Operadora",
        descricao: "Taxas operacionais",
        valor: 450.5,
    },
    SampleRow {
        id: "3",
        day: 14,
        tipo: EntryKind::Receita,
        licitacao: "Processo 11/2025 • Órgão X",
        status: STATUS_WON,
        categoria: "passagens",
        fornecedor: "—",
        descricao: "Emissão de passagens (faturado)",
        valor: 7800.0,
    },
];

/// Three illustrative entries dated inside `competencia`.
pub fn sample_entries(competencia: &Competencia) -> Vec<LedgerEntry> {
    SAMPLE_ROWS
        .iter()
        .filter_map(|row| {
            Some(LedgerEntry {
                id: row.id.into(),
                competencia: *competencia,
                data: competencia.day(row.day)?,
                tipo: row.tipo,
                licitacao: row.licitacao.into(),
                status: EntryStatus::new(row.status).ok()?,
                categoria: row.categoria.into(),
                fornecedor: Some(row.fornecedor.into()),
                descricao: Some(row.descricao.into()),
                valor: row.valor,
                comprovante_url: None,
            })
        })
        .collect()
}

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::services::{
    export_file_name, filter_entries, to_csv, write_csv, EntryFilter, StatusFilter, Summary,
    SummaryService,
};
use crate::domain::{Competencia, EntryDraft, LedgerEntry};
use crate::errors::{LedgerError, Result};
use crate::ledger::EntryStore;
use crate::sync::{gateway_for, CloseMonthReceipt, SyncEffect, SyncGateway};

/// Where the session is in a gateway round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Requesting,
    Refreshing,
}

/// Render-ready snapshot of the filtered period.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    pub competencia: Competencia,
    pub rows: Vec<LedgerEntry>,
    pub count: usize,
    pub summary: Summary,
}

/// Owns everything the shell manipulates: the selected period, the loaded
/// entries, the active filter and the entry being edited.
pub struct Session {
    gateway: Box<dyn SyncGateway>,
    competencia: Competencia,
    store: EntryStore,
    filter: EntryFilter,
    editing_id: Option<String>,
    phase: SyncPhase,
    last_failure: Option<String>,
}

impl Session {
    /// Session on the current month using the gateway selected by `config`.
    /// Nothing is loaded until [`Session::refresh`] is called.
    pub fn new(config: &Config) -> Self {
        Self::with_gateway(gateway_for(config), Competencia::current())
    }

    pub fn with_gateway(gateway: Box<dyn SyncGateway>, competencia: Competencia) -> Self {
        Self {
            gateway,
            competencia,
            store: EntryStore::new(),
            filter: EntryFilter::default(),
            editing_id: None,
            phase: SyncPhase::Idle,
            last_failure: None,
        }
    }

    pub fn gateway(&self) -> &dyn SyncGateway {
        self.gateway.as_ref()
    }

    pub fn competencia(&self) -> Competencia {
        self.competencia
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn filter(&self) -> &EntryFilter {
        &self.filter
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Reloads the period from the gateway and replaces the store wholesale.
    pub fn refresh(&mut self) -> Result<usize> {
        let entries = self.load(self.competencia)?;
        Ok(self.install(entries))
    }

    /// Switches to `competencia` once its entries have been listed. On failure
    /// the previous period, its entries and the edit target are kept.
    pub fn set_competencia(&mut self, competencia: Competencia) -> Result<usize> {
        let entries = self.load(competencia)?;
        self.competencia = competencia;
        self.editing_id = None;
        Ok(self.install(entries))
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn begin_create(&mut self) -> EntryDraft {
        self.editing_id = None;
        EntryDraft::new_for(Local::now().date_naive())
    }

    pub fn begin_edit(&mut self, id: &str) -> Result<EntryDraft> {
        let entry = self
            .store
            .get(id)
            .ok_or_else(|| LedgerError::NotFound(format!("entry `{}`", id)))?;
        let draft = EntryDraft::from_entry(entry);
        self.editing_id = Some(id.to_string());
        Ok(draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
    }

    /// Validates `draft` and persists it through the gateway, as an update
    /// when an edit is in progress and as a new entry otherwise.
    ///
    /// A validation failure leaves everything untouched, including the edit
    /// target. A gateway failure leaves the store unchanged. When the gateway
    /// accepts the entry but the reload fails, the call still succeeds and
    /// [`Session::last_failure`] reports the reload error.
    pub fn submit(&mut self, draft: &EntryDraft) -> Result<SyncEffect> {
        let entry = draft.validate(self.competencia)?;
        self.enter(SyncPhase::Requesting);
        let editing_id = self.editing_id.clone();
        let outcome = self
            .gateway
            .save(&mut self.store, entry, editing_id.as_deref());
        let effect = match outcome {
            Ok(effect) => effect,
            Err(err) => return Err(self.fail(err)),
        };
        self.editing_id = None;
        info!(edited = editing_id.is_some(), "entry submitted");
        Ok(self.settle(effect))
    }

    pub fn delete(&mut self, id: &str) -> Result<SyncEffect> {
        self.enter(SyncPhase::Requesting);
        let effect = match self.gateway.delete(&mut self.store, id) {
            Ok(effect) => effect,
            Err(err) => return Err(self.fail(err)),
        };
        if self.editing_id.as_deref() == Some(id) {
            self.editing_id = None;
        }
        Ok(self.settle(effect))
    }

    /// The receipt is returned once the gateway closes the month, even if the
    /// reload that follows fails.
    pub fn close_month(&mut self) -> Result<CloseMonthReceipt> {
        self.enter(SyncPhase::Requesting);
        let receipt = match self.gateway.close_month(&self.competencia) {
            Ok(receipt) => receipt,
            Err(err) => return Err(self.fail(err)),
        };
        self.settle(receipt.effect);
        Ok(receipt)
    }

    pub fn visible_entries(&self) -> Vec<&LedgerEntry> {
        filter_entries(self.store.entries(), &self.filter)
    }

    pub fn summary(&self) -> Summary {
        SummaryService::summarize(self.visible_entries())
    }

    pub fn view(&self) -> LedgerView {
        let rows: Vec<LedgerEntry> = self.visible_entries().into_iter().cloned().collect();
        let summary = SummaryService::summarize(&rows);
        LedgerView {
            competencia: self.competencia,
            count: rows.len(),
            rows,
            summary,
        }
    }

    pub fn export_csv(&self) -> Result<String> {
        to_csv(self.visible_entries())
    }

    pub fn export_file_name(&self) -> String {
        export_file_name(&self.competencia)
    }

    /// Writes the visible entries into `dir` under the period's export name.
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.export_file_name());
        write_csv(&path, self.visible_entries())?;
        Ok(path)
    }

    fn load(&mut self, competencia: Competencia) -> Result<Vec<LedgerEntry>> {
        self.enter(SyncPhase::Refreshing);
        match self.gateway.list(&competencia) {
            Ok(entries) => Ok(entries),
            Err(err) => Err(self.fail(err)),
        }
    }

    fn install(&mut self, entries: Vec<LedgerEntry>) -> usize {
        let count = entries.len();
        self.store.replace_all(entries);
        self.succeed();
        info!(competencia = %self.competencia, count, "period refreshed");
        count
    }

    /// A failed reload after an accepted mutation stays in `last_failure`; the
    /// store keeps its last listed state.
    fn settle(&mut self, effect: SyncEffect) -> SyncEffect {
        match effect {
            SyncEffect::Applied => self.succeed(),
            SyncEffect::RefreshRequired => {
                if let Err(err) = self.refresh() {
                    warn!(error = %err, "mutation accepted but the period could not be reloaded");
                }
            }
        }
        effect
    }

    fn enter(&mut self, phase: SyncPhase) {
        debug!(from = ?self.phase, to = ?phase, "sync phase");
        self.phase = phase;
    }

    fn succeed(&mut self) {
        self.enter(SyncPhase::Idle);
        self.last_failure = None;
    }

    fn fail(&mut self, err: LedgerError) -> LedgerError {
        warn!(phase = ?self.phase, error = %err, "gateway call failed");
        self.enter(SyncPhase::Idle);
        self.last_failure = Some(err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryKind, EntryStatus};
    use crate::sync::LocalGateway;

    fn session() -> Session {
        let mut session = Session::with_gateway(
            Box::new(LocalGateway::new()),
            Competencia::new(2025, 3).unwrap(),
        );
        session.refresh().unwrap();
        session
    }

    fn draft(licitacao: &str, valor: &str) -> EntryDraft {
        let mut draft = EntryDraft::new_for(chrono::NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        draft.licitacao = licitacao.into();
        draft.categoria = "taxas".into();
        draft.valor = valor.into();
        draft
    }

    #[test]
    fn refresh_loads_sample_for_period() {
        let session = session();
        assert_eq!(session.store().len(), 3);
        assert_eq!(session.phase(), SyncPhase::Idle);
        assert!(session
            .store()
            .entries()
            .iter()
            .all(|entry| entry.competencia == session.competencia()));
    }

    #[test]
    fn submit_new_entry_prepends_with_fresh_id() {
        let mut session = session();
        session.begin_create();
        session.submit(&draft("PE 9/2025", "1.000,00")).unwrap();

        let first = &session.store().entries()[0];
        assert_eq!(session.store().len(), 4);
        assert_eq!(first.licitacao, "PE 9/2025");
        assert_eq!(first.valor, 1000.0);
        assert!(!first.id.is_empty());
        assert_eq!(first.competencia, session.competencia());
    }

    #[test]
    fn submit_edit_replaces_in_place() {
        let mut session = session();
        let mut form = session.begin_edit("2").unwrap();
        assert_eq!(session.editing_id(), Some("2"));
        form.valor = "500,00".into();
        session.submit(&form).unwrap();

        assert_eq!(session.editing_id(), None);
        assert_eq!(session.store().len(), 3);
        let edited = session.store().get("2").unwrap();
        assert_eq!(edited.valor, 500.0);
        assert_eq!(edited.tipo, EntryKind::Despesa);
        assert_eq!(session.store().entries()[1].id, "2");
    }

    #[test]
    fn invalid_draft_persists_nothing() {
        let mut session = session();
        let before = session.store().entries().to_vec();
        let err = session.submit(&draft("", "10")).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(session.store().entries(), before.as_slice());
        assert_eq!(session.last_failure(), None);
    }

    #[test]
    fn edit_of_unknown_id_is_not_found() {
        let mut session = session();
        assert!(matches!(
            session.begin_edit("missing"),
            Err(LedgerError::NotFound(_))
        ));
        assert_eq!(session.editing_id(), None);
    }

    #[test]
    fn delete_removes_and_missing_id_is_noop() {
        let mut session = session();
        session.delete("1").unwrap();
        assert_eq!(session.store().len(), 2);
        session.delete("1").unwrap();
        assert_eq!(session.store().len(), 2);
    }

    #[test]
    fn view_follows_filter() {
        let mut session = session();
        session.set_query("  OPERADORA ");
        let view = session.view();
        assert_eq!(view.count, 1);
        assert_eq!(view.summary.total_expense, 450.5);
        assert_eq!(view.summary.balance, -450.5);

        session.set_query("");
        session.set_status_filter(StatusFilter::Only(EntryStatus::won()));
        let view = session.view();
        assert_eq!(view.count, 1);
        assert_eq!(view.summary.total_revenue, 7800.0);
    }

    #[test]
    fn period_change_clears_edit_target() {
        let mut session = session();
        session.begin_edit("1").unwrap();
        session
            .set_competencia(Competencia::new(2025, 4).unwrap())
            .unwrap();
        assert_eq!(session.editing_id(), None);
        assert_eq!(session.export_file_name(), "fisam_lancamentos_2025-04.csv");
    }

    #[test]
    fn local_close_month_is_simulated() {
        let mut session = session();
        let receipt = session.close_month().unwrap();
        assert!(receipt.simulated);
        assert_eq!(receipt.invoice_pdf_url, None);
        assert_eq!(session.store().len(), 3);
    }
}

//! CSV export of the visible entries.

use std::{fs, path::Path};

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::{Competencia, LedgerEntry};
use crate::errors::{LedgerError, Result};

pub const CSV_HEADER: [&str; 9] = [
    "data",
    "licitacao",
    "status",
    "tipo",
    "categoria",
    "fornecedor",
    "descricao",
    "valor",
    "comprovante_url",
];

/// Download name for the export of `competencia`.
pub fn export_file_name(competencia: &Competencia) -> String {
    format!("fisam_lancamentos_{}.csv", competencia)
}

fn record(entry: &LedgerEntry) -> [String; 9] {
    [
        entry.data.format("%Y-%m-%d").to_string(),
        entry.licitacao.clone(),
        entry.status.to_string(),
        entry.tipo.to_string(),
        entry.categoria.clone(),
        entry.fornecedor.clone().unwrap_or_default(),
        entry.descricao.clone().unwrap_or_default(),
        entry.valor.to_string(),
        entry.comprovante_url.clone().unwrap_or_default(),
    ]
}

/// Bare header line followed by one fully quoted row per entry, joined by `\n`.
pub fn to_csv<'a, I>(entries: I) -> Result<String>
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for entry in entries {
        writer.write_record(record(entry))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| LedgerError::Storage(err.to_string()))?;
    let rows = String::from_utf8(bytes).map_err(|err| LedgerError::Storage(err.to_string()))?;

    let mut out = CSV_HEADER.join(",");
    if let Some(rows) = rows.strip_suffix('\n') {
        out.push('\n');
        out.push_str(rows);
    }
    Ok(out)
}

/// Writes the CSV text of `entries` to `path` as UTF-8.
pub fn write_csv<'a, I>(path: &Path, entries: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    let entries: Vec<&LedgerEntry> = entries.into_iter().collect();
    let text = to_csv(entries.iter().copied())?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, text)?;
    tracing::info!(path = %path.display(), rows = entries.len(), "exported entries to csv");
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryKind, EntryStatus};
    use chrono::NaiveDate;

    fn entry(descricao: Option<&str>) -> LedgerEntry {
        LedgerEntry {
            id: "1".into(),
            competencia: Competencia::new(2025, 3).unwrap(),
            data: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
            tipo: EntryKind::Despesa,
            licitacao: "PE 52/2025 • Licitação Turismo".into(),
            status: EntryStatus::in_progress(),
            categoria: "taxas".into(),
            fornecedor: Some("Operadora".into()),
            descricao: descricao.map(str::to_string),
            valor: 450.5,
            comprovante_url: None,
        }
    }

    #[test]
    fn doubles_embedded_quotes() {
        let csv = to_csv(&[entry(Some("He said \"hi\""))]).unwrap();
        assert!(csv.contains(r#","He said ""hi""","#), "unexpected csv: {csv}");
    }

    #[test]
    fn header_only_for_empty_view() {
        let csv = to_csv(&Vec::new()).unwrap();
        assert_eq!(csv, CSV_HEADER.join(","));
    }

    #[test]
    fn rows_are_quoted_with_empty_optionals() {
        let csv = to_csv(&[entry(None)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            r#""2025-03-08","PE 52/2025 • Licitação Turismo","em_andamento","despesa","taxas","Operadora","","450.5","""#
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn file_name_embeds_period() {
        let period = Competencia::new(2025, 3).unwrap();
        assert_eq!(export_file_name(&period), "fisam_lancamentos_2025-03.csv");
    }
}

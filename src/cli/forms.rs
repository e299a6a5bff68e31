//! Filling an [`EntryDraft`] from `key=value` arguments or interactive prompts.

use crate::domain::{EntryDraft, EntryKind, STATUS_IN_PROGRESS, STATUS_LOST, STATUS_WON};

use super::core::{CliMode, CommandError, ShellContext};
use super::io as cli_io;

const FIELD_LABELS: [(&str, &str); 9] = [
    ("data", "Data (AAAA-MM-DD)"),
    ("tipo", "Tipo"),
    ("licitacao", "Licitação"),
    ("status", "Status"),
    ("categoria", "Categoria"),
    ("fornecedor", "Fornecedor"),
    ("descricao", "Descrição"),
    ("valor", "Valor"),
    ("comprovante_url", "URL do comprovante"),
];

/// Splits `key=value` tokens; anything else is rejected.
pub fn parse_assignments<'a>(args: &[&'a str]) -> Result<Vec<(&'a str, &'a str)>, CommandError> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(key, value)| (key.trim(), value))
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "expected `campo=valor`, got `{}`",
                        arg
                    ))
                })
        })
        .collect()
}

pub fn apply_assignments(draft: &mut EntryDraft, args: &[&str]) -> Result<(), CommandError> {
    for (key, value) in parse_assignments(args)? {
        draft.set_field(key, value)?;
    }
    Ok(())
}

/// Completes `draft` for submission.
///
/// Arguments always win. With no arguments an interactive shell walks every
/// field; script mode submits the draft as given.
pub fn fill_draft(
    context: &ShellContext,
    draft: &mut EntryDraft,
    args: &[&str],
) -> Result<(), CommandError> {
    if !args.is_empty() {
        return apply_assignments(draft, args);
    }
    if context.mode == CliMode::Script {
        return Ok(());
    }
    prompt_fields(context, draft)
}

fn prompt_fields(context: &ShellContext, draft: &mut EntryDraft) -> Result<(), CommandError> {
    for (field, label) in FIELD_LABELS {
        let current = draft.field(field).unwrap_or_default().to_string();
        let answer = match field {
            "tipo" => cli_io::prompt_choice(
                &context.theme,
                label,
                &[EntryKind::Receita.as_str(), EntryKind::Despesa.as_str()],
                &current,
            )?,
            "status" => {
                let mut options = vec![STATUS_IN_PROGRESS, STATUS_WON, STATUS_LOST];
                if !current.is_empty() && !options.contains(&current.as_str()) {
                    options.push(current.as_str());
                }
                cli_io::prompt_choice(&context.theme, label, &options, &current)?
            }
            _ => cli_io::prompt_text(&context.theme, label, &current)?,
        };
        draft.set_field(field, answer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn assignments_fill_named_fields() {
        let mut draft = EntryDraft::new_for(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        apply_assignments(
            &mut draft,
            &["licitacao=PE 1/2025", "valor=1.234,56", "tipo=despesa"],
        )
        .unwrap();
        assert_eq!(draft.licitacao, "PE 1/2025");
        assert_eq!(draft.valor, "1.234,56");
        assert_eq!(draft.tipo, "despesa");
    }

    #[test]
    fn bare_tokens_and_unknown_fields_are_rejected() {
        let mut draft = EntryDraft::default();
        assert!(matches!(
            apply_assignments(&mut draft, &["valor"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            apply_assignments(&mut draft, &["cor=azul"]),
            Err(CommandError::Core(_))
        ));
    }
}

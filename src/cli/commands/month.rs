use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::domain::Competencia;
use crate::utils::paths::exports_dir;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "period",
            "Show or switch the accounting period",
            "period [YYYY-MM]",
            cmd_period,
        ),
        CommandEntry::new(
            "export",
            "Write the filtered entries to a CSV file",
            "export [dir]",
            cmd_export,
        ),
        CommandEntry::new(
            "close-month",
            "Close the current period",
            "close-month",
            cmd_close_month,
        ),
    ]
}

fn cmd_period(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            io::print_info(format!("Competência: {}", context.session.competencia()));
            Ok(())
        }
        [value] => {
            let competencia = Competencia::from_str(value)?;
            let count = context.session.set_competencia(competencia)?;
            io::print_success(format!("Switched to {} ({} entries).", competencia, count));
            let view = context.session.view();
            context.render_view(&view);
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: period [YYYY-MM]".into(),
        )),
    }
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let dir = match args {
        [] => exports_dir(),
        [dir] => PathBuf::from(*dir),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: export [dir]".into(),
            ))
        }
    };
    let count = context.session.visible_entries().len();
    let path = context.session.export_to(&dir)?;
    io::print_success(format!("Exported {} entries to {}", count, path.display()));
    Ok(())
}

fn cmd_close_month(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let competencia = context.session.competencia();
    if !context.confirm(&format!("Fechar a competência {}?", competencia))? {
        io::print_info("Close cancelled.");
        return Ok(());
    }
    let receipt = context.session.close_month()?;
    if receipt.simulated {
        io::print_success(format!("Month {} closed (simulated, local mode).", competencia));
    } else {
        io::print_success(format!("Month {} closed.", competencia));
    }
    if let Some(url) = receipt.invoice_pdf_url {
        io::print_info(format!("Invoice PDF: {}", url));
    }
    context.warn_reload_failure();
    Ok(())
}

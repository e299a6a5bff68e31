use std::str::FromStr;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::services::StatusFilter;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("list", "Show the filtered entries and totals", "list", cmd_list),
        CommandEntry::new("summary", "Show revenue, expense and balance", "summary", cmd_summary),
        CommandEntry::new(
            "search",
            "Filter entries by text; no argument clears the search",
            "search [text]",
            cmd_search,
        ),
        CommandEntry::new(
            "status",
            "Filter entries by status",
            "status <all|em_andamento|ganho|perdido|...>",
            cmd_status,
        ),
        CommandEntry::new("refresh", "Reload the current period", "refresh", cmd_refresh),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let view = context.session.view();
    context.render_view(&view);
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let view = context.session.view();
    context.render_summary(&view);
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    context.session.set_query(query.as_str());
    if query.trim().is_empty() {
        io::print_info("Search cleared.");
    }
    cmd_list(context, &[])
}

fn cmd_status(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [value] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: status <all|status>".into(),
        ));
    };
    let filter = StatusFilter::from_str(value)?;
    context.session.set_status_filter(filter);
    cmd_list(context, &[])
}

fn cmd_refresh(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let count = context.session.refresh()?;
    io::print_success(format!("Loaded {} entries.", count));
    cmd_list(context, &[])
}

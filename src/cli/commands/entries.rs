use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms::fill_draft;
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::sync::SyncEffect;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "new",
            "Create an entry in the current period",
            "new [campo=valor ...]",
            cmd_new,
        ),
        CommandEntry::new(
            "edit",
            "Edit an entry; unspecified fields keep their values",
            "edit <id> [campo=valor ...]",
            cmd_edit,
        ),
        CommandEntry::new("delete", "Delete an entry", "delete <id>", cmd_delete),
    ]
}

fn cmd_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut draft = context.session.begin_create();
    fill_draft(context, &mut draft, args)?;
    let effect = context.session.submit(&draft)?;
    report_saved(context, effect);
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((id, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: edit <id> [campo=valor ...]".into(),
        ));
    };
    let mut draft = context.session.begin_edit(id)?;
    let outcome = fill_draft(context, &mut draft, rest)
        .and_then(|()| context.session.submit(&draft).map_err(CommandError::from));
    match outcome {
        Ok(effect) => {
            report_saved(context, effect);
            Ok(())
        }
        Err(err) => {
            // A failed edit never stays pending.
            context.session.cancel_edit();
            Err(err)
        }
    }
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };
    if !context.session.store().contains(id) {
        io::print_warning(format!("No entry with id `{}` in this period.", id));
        return Ok(());
    }
    if !context.confirm("Excluir este lançamento?")? {
        io::print_info("Deletion cancelled.");
        return Ok(());
    }
    context.session.delete(id)?;
    io::print_success(format!("Entry `{}` deleted.", id));
    context.warn_reload_failure();
    let view = context.session.view();
    context.render_summary(&view);
    Ok(())
}

fn report_saved(context: &ShellContext, effect: SyncEffect) {
    match (effect, context.session.last_failure()) {
        (SyncEffect::RefreshRequired, None) => {
            io::print_success("Entry saved and period reloaded.")
        }
        _ => io::print_success("Entry saved."),
    }
    context.warn_reload_failure();
    let view = context.session.view();
    context.render_summary(&view);
}

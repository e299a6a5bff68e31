use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::{Config, SyncMode};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change the data source and display preferences",
        "config [show|set <api_url|use_mock|locale|currency> <value>|unset api_url]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show_config(context);
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            let value = value.join(" ");
            update_config(context, |config| set_value(config, key, value.trim()))
        }
        ["unset", "api_url"] => update_config(context, |config| {
            config.api_url = None;
            Ok(())
        }),
        _ => Err(CommandError::InvalidArguments(
            "usage: config [show|set <key> <value>|unset api_url]".into(),
        )),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    io::print_info(format!(
        "  API URL  : {}",
        config.api_url.as_deref().unwrap_or("(none)")
    ));
    io::print_info(format!("  Use mock : {}", config.use_mock));
    io::print_info(format!(
        "  Mode     : {}",
        match config.sync_mode() {
            SyncMode::Local => "local".to_string(),
            SyncMode::Remote(url) => format!("remote ({})", url),
        }
    ));
    io::print_info(format!("  Locale   : {}", config.locale));
    io::print_info(format!("  Currency : {}", config.currency));
    io::print_info(format!(
        "  File     : {}",
        context.config_manager.path().display()
    ));
}

fn set_value(config: &mut Config, key: &str, value: &str) -> Result<(), CommandError> {
    match key {
        "api_url" => config.api_url = Some(value.to_string()).filter(|url| !url.is_empty()),
        "use_mock" => {
            config.use_mock = match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "use_mock expects true or false, got `{}`",
                        other
                    )))
                }
            }
        }
        "locale" => config.locale = value.to_string(),
        "currency" => config.currency = value.to_ascii_uppercase(),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{}`",
                other
            )))
        }
    }
    Ok(())
}

/// Edits the stored file (not the env-overridden view), then reapplies the
/// overrides and reconnects.
fn update_config<F>(context: &mut ShellContext, edit: F) -> CommandResult
where
    F: FnOnce(&mut Config) -> Result<(), CommandError>,
{
    let mut stored = context.config_manager.load()?;
    edit(&mut stored)?;
    context.config_manager.save(&stored)?;

    let previous_mode = context.config.sync_mode();
    stored.apply_env_overrides();
    context.config = stored;
    io::print_success("Configuration saved.");

    if context.config.sync_mode() != previous_mode {
        context.rebuild_session();
    }
    Ok(())
}

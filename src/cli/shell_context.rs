use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::Session,
    sync::gateway_for,
};

use super::commands;
use super::core::CliError;
use super::io as cli_io;
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: Session,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let mut config = config_manager.load()?;
        config.apply_env_overrides();
        Ok(Self::with_config(mode, config_manager, config))
    }

    pub fn with_config(mode: CliMode, config_manager: ConfigManager, config: Config) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let session = Session::new(&config);

        Self {
            mode,
            registry,
            session,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            running: true,
        }
    }

    /// Loads the current period; a failure is reported and the shell starts empty.
    pub fn load_initial(&mut self) {
        cli_io::print_info(format!(
            "Data source: {}",
            self.session.gateway().describe()
        ));
        if let Err(err) = self.session.refresh() {
            cli_io::print_warning(format!("Could not load entries: {}", err));
        }
    }

    /// Swaps the gateway after a configuration change, keeping the period and
    /// the active filter.
    pub fn rebuild_session(&mut self) {
        let competencia = self.session.competencia();
        let filter = self.session.filter().clone();
        self.session = Session::with_gateway(gateway_for(&self.config), competencia);
        self.session.set_query(filter.query);
        self.session.set_status_filter(filter.status);
        self.load_initial();
    }

    pub fn prompt(&self) -> String {
        format!("fisam [{}]> ", self.session.competencia())
    }
}

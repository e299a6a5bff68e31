use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::currency::{CurrencyCode, LocaleConfig};
use crate::errors::{LedgerError, Result};
use crate::utils::paths::{app_data_dir, config_file_in, ensure_dir};

pub const API_URL_ENV: &str = "FISAM_API_URL";
pub const USE_MOCK_ENV: &str = "FISAM_USE_MOCK";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Base URL of the spreadsheet API; absent means local mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Forces local mode even when `api_url` is set.
    #[serde(default)]
    pub use_mock: bool,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_locale() -> String {
    "pt-BR".into()
}

fn default_currency() -> String {
    "BRL".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            use_mock: false,
            locale: default_locale(),
            currency: default_currency(),
        }
    }
}

/// Data source selected by the two configuration toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncMode {
    Local,
    Remote(String),
}

impl Config {
    pub fn sync_mode(&self) -> SyncMode {
        match self.api_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() && !self.use_mock => SyncMode::Remote(url.to_string()),
            _ => SyncMode::Local,
        }
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::from_tag(&self.locale)
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(self.currency.as_str())
    }

    /// Applies `FISAM_API_URL` / `FISAM_USE_MOCK` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            env::var(API_URL_ENV).ok(),
            env::var(USE_MOCK_ENV).ok(),
        );
    }

    pub fn apply_overrides(&mut self, api_url: Option<String>, use_mock: Option<String>) {
        if let Some(url) = api_url {
            let url = url.trim();
            self.api_url = if url.is_empty() {
                None
            } else {
                Some(url.to_string())
            };
        }
        if let Some(flag) = use_mock {
            self.use_mock = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| {
                LedgerError::Config(format!("{}: {}", self.path.display(), err))
            })
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

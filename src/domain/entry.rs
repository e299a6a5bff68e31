use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::currency::{format_amount_input, parse_money, LocaleConfig};
use crate::domain::common::Displayable;
use crate::domain::competencia::Competencia;
use crate::errors::ValidationError;

pub const STATUS_IN_PROGRESS: &str = "em_andamento";
pub const STATUS_WON: &str = "ganho";
pub const STATUS_LOST: &str = "perdido";
/// Filter-only wildcard; never a valid entry status.
pub const STATUS_WILDCARD: &str = "all";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Revenue or expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Receita,
    Despesa,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Receita => "receita",
            EntryKind::Despesa => "despesa",
        }
    }

    pub fn is_revenue(&self) -> bool {
        matches!(self, EntryKind::Receita)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "receita" => Ok(EntryKind::Receita),
            "despesa" => Ok(EntryKind::Despesa),
            other => Err(ValidationError::InvalidField {
                field: "tipo",
                reason: format!("expected `receita` or `despesa`, got `{}`", other),
            }),
        }
    }
}

/// Status of the bidding process an entry belongs to.
///
/// The set is open: `em_andamento`, `ganho` and `perdido` are the recognized
/// values, anything else coming back from the remote sheet is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryStatus(String);

impl EntryStatus {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(ValidationError::MissingFields(vec!["status"]));
        }
        if value.eq_ignore_ascii_case(STATUS_WILDCARD) {
            return Err(ValidationError::InvalidField {
                field: "status",
                reason: "`all` is only valid as a filter".into(),
            });
        }
        Ok(Self(value))
    }

    pub fn in_progress() -> Self {
        Self(STATUS_IN_PROGRESS.into())
    }

    pub fn won() -> Self {
        Self(STATUS_WON.into())
    }

    pub fn lost() -> Self {
        Self(STATUS_LOST.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryStatus {
    fn default() -> Self {
        Self::in_progress()
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Displayable for EntryStatus {
    fn display_label(&self) -> String {
        match self.0.as_str() {
            STATUS_IN_PROGRESS => "Em andamento".into(),
            STATUS_WON => "Ganho".into(),
            STATUS_LOST => "Perdido".into(),
            other => other.to_string(),
        }
    }
}

/// A single revenue or expense record ("lançamento").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(default)]
    pub id: String,
    pub competencia: Competencia,
    pub data: NaiveDate,
    pub tipo: EntryKind,
    pub licitacao: String,
    #[serde(default)]
    pub status: EntryStatus,
    pub categoria: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        serialize_with = "none_as_empty"
    )]
    pub fornecedor: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        serialize_with = "none_as_empty"
    )]
    pub descricao: Option<String>,
    pub valor: f64,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        serialize_with = "none_as_empty"
    )]
    pub comprovante_url: Option<String>,
}

impl LedgerEntry {
    pub fn is_revenue(&self) -> bool {
        self.tipo.is_revenue()
    }

    /// Lowercased text searched by the free-text filter.
    pub fn search_text(&self) -> String {
        [
            Some(self.licitacao.as_str()),
            Some(self.tipo.as_str()),
            Some(self.categoria.as_str()),
            self.fornecedor.as_deref(),
            self.descricao.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}

impl Displayable for LedgerEntry {
    fn display_label(&self) -> String {
        format!("{} • {} ({})", self.licitacao, self.categoria, self.tipo)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

fn none_as_empty<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

/// Raw text of the create/edit form, validated into a [`LedgerEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub data: String,
    pub tipo: String,
    pub licitacao: String,
    pub status: String,
    pub categoria: String,
    pub fornecedor: String,
    pub descricao: String,
    pub valor: String,
    pub comprovante_url: String,
}

impl EntryDraft {
    /// Blank form with the defaults used for new entries.
    pub fn new_for(today: NaiveDate) -> Self {
        Self {
            data: today.format(DATE_FORMAT).to_string(),
            tipo: EntryKind::Receita.as_str().into(),
            status: STATUS_IN_PROGRESS.into(),
            ..Self::default()
        }
    }

    /// Form pre-filled from an existing entry.
    pub fn from_entry(entry: &LedgerEntry) -> Self {
        Self {
            data: entry.data.format(DATE_FORMAT).to_string(),
            tipo: entry.tipo.as_str().into(),
            licitacao: entry.licitacao.clone(),
            status: entry.status.as_str().into(),
            categoria: entry.categoria.clone(),
            fornecedor: entry.fornecedor.clone().unwrap_or_default(),
            descricao: entry.descricao.clone().unwrap_or_default(),
            valor: format_amount_input(&LocaleConfig::pt_br(), entry.valor),
            comprovante_url: entry.comprovante_url.clone().unwrap_or_default(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "data" => &self.data,
            "tipo" => &self.tipo,
            "licitacao" => &self.licitacao,
            "status" => &self.status,
            "categoria" => &self.categoria,
            "fornecedor" => &self.fornecedor,
            "descricao" => &self.descricao,
            "valor" => &self.valor,
            "comprovante_url" => &self.comprovante_url,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), ValidationError> {
        let slot = match name {
            "data" => &mut self.data,
            "tipo" => &mut self.tipo,
            "licitacao" => &mut self.licitacao,
            "status" => &mut self.status,
            "categoria" => &mut self.categoria,
            "fornecedor" => &mut self.fornecedor,
            "descricao" => &mut self.descricao,
            "valor" => &mut self.valor,
            "comprovante_url" => &mut self.comprovante_url,
            other => {
                return Err(ValidationError::InvalidField {
                    field: "campo",
                    reason: format!("unknown field `{}`", other),
                })
            }
        };
        *slot = value.into();
        Ok(())
    }

    /// Checks required fields and builds an entry without an id.
    pub fn validate(&self, competencia: Competencia) -> Result<LedgerEntry, ValidationError> {
        let required = [
            ("data", &self.data),
            ("tipo", &self.tipo),
            ("licitacao", &self.licitacao),
            ("categoria", &self.categoria),
            ("valor", &self.valor),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let data = NaiveDate::parse_from_str(self.data.trim(), DATE_FORMAT).map_err(|_| {
            ValidationError::InvalidField {
                field: "data",
                reason: format!("expected YYYY-MM-DD, got `{}`", self.data.trim()),
            }
        })?;
        let tipo: EntryKind = self.tipo.parse()?;
        let status = if self.status.trim().is_empty() {
            EntryStatus::default()
        } else {
            EntryStatus::new(self.status.as_str())?
        };
        let valor = parse_money(Some(&self.valor));
        if valor < 0.0 {
            return Err(ValidationError::InvalidField {
                field: "valor",
                reason: "amount must not be negative".into(),
            });
        }

        Ok(LedgerEntry {
            id: String::new(),
            competencia,
            data,
            tipo,
            licitacao: self.licitacao.trim().to_string(),
            status,
            categoria: self.categoria.trim().to_string(),
            fornecedor: optional(&self.fornecedor),
            descricao: optional(&self.descricao),
            valor,
            comprovante_url: optional(&self.comprovante_url),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

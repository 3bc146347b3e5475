//! Configuração
//!
//! Ordem de carga: valores padrão, arquivo TOML opcional e variáveis de
//! ambiente com prefixo `TRIAGE` (ex.: `TRIAGE_LOGGING__LEVEL=debug`).

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Result, TriageError};

/// Configuração completa da recepção
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Regras de cadastro
    pub intake: IntakeSettings,
    /// Configuração de logs
    pub logging: LoggingConfig,
}

/// Regras de cadastro
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeSettings {
    /// Formato (strftime) da data de nascimento recebida no cadastro
    pub birth_date_format: String,
}

impl IntakeSettings {
    /// Formato da data de nascimento sem espaços nas pontas
    pub fn birth_date_format(&self) -> &str {
        self.birth_date_format.trim()
    }
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            birth_date_format: "%d/%m/%Y".to_string(),
        }
    }
}

/// Configuração de logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filtro no formato do `EnvFilter` (ex.: `info,triage_intake=debug`)
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
        }
    }
}

/// Formato de saída dos logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    Compact,
}

impl IntakeConfig {
    /// Carrega a configuração do arquivo (opcional) e do ambiente
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix("TRIAGE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| TriageError::Config(e.to_string()))?;

        let config: IntakeConfig = settings
            .try_deserialize()
            .map_err(|e| TriageError::Config(e.to_string()))?;
        config.validate()?;

        info!(
            "Configuration loaded from {}",
            config_path.unwrap_or("defaults and environment")
        );
        Ok(config)
    }

    /// Carrega a configuração a partir de um texto TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .map_err(|e| TriageError::Config(e.to_string()))?;

        let config: IntakeConfig = settings
            .try_deserialize()
            .map_err(|e| TriageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Valida a configuração
    pub fn validate(&self) -> Result<()> {
        let format = self.intake.birth_date_format();
        if format.is_empty() {
            return Err(TriageError::Config(
                "intake.birth_date_format cannot be empty".into(),
            ));
        }

        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(TriageError::Config(format!(
                "intake.birth_date_format is not a valid date format: {}",
                format
            )));
        }

        // o formato precisa representar dia, mês e ano sem perda
        let sample = NaiveDate::from_ymd_opt(1987, 4, 20)
            .ok_or_else(|| TriageError::Internal("invalid sample date".into()))?;
        let mut rendered = String::new();
        write!(rendered, "{}", sample.format(format)).map_err(|_| {
            TriageError::Config(format!("cannot render dates with format {}", format))
        })?;
        match NaiveDate::parse_from_str(&rendered, format) {
            Ok(parsed) if parsed == sample => {}
            _ => {
                return Err(TriageError::Config(format!(
                    "intake.birth_date_format must carry day, month and year: {}",
                    format
                )))
            }
        }

        if self.logging.level.trim().is_empty() {
            return Err(TriageError::Config("logging.level cannot be empty".into()));
        }

        debug!("Configuration validated");
        Ok(())
    }
}

//! # Triage Core
//!
//! Núcleo do pronto-socorro: modelos de dados, erros, configuração e relógio.

pub mod clock;
pub mod config;
pub mod error;
pub mod models;

pub use clock::{Clock, FixedClock, SystemClock};
pub use crate::config::{IntakeConfig, IntakeSettings, LogFormat, LoggingConfig};
pub use error::{PatientField, Result, TriageError};
pub use models::*;

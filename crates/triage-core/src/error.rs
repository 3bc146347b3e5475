//! Definição de erros

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Campo do cadastro de paciente que falhou na validação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientField {
    Name,
    IdentityNumber,
    Email,
    BirthDate,
}

impl fmt::Display for PatientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientField::Name => write!(f, "nome"),
            PatientField::IdentityNumber => write!(f, "CPF"),
            PatientField::Email => write!(f, "E-mail"),
            PatientField::BirthDate => write!(f, "Data de nascimento"),
        }
    }
}

/// Erro unificado do pronto-socorro
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriageError {
    #[error("{message}")]
    Validation { field: PatientField, message: String },

    #[error("CPF já cadastrado: {0}")]
    DuplicateIdentity(String),

    #[error("Paciente não cadastrado: {0}")]
    PatientNotRegistered(String),

    #[error("Não há pacientes na fila de atendimento")]
    EmptyQueue,

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro interno: {0}")]
    Internal(String),
}

impl TriageError {
    /// Cria um erro de validação para o campo informado
    pub fn validation(field: PatientField, message: impl Into<String>) -> Self {
        TriageError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Campo inválido, quando o erro é de validação
    pub fn field(&self) -> Option<PatientField> {
        match self {
            TriageError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Resultado unificado do pronto-socorro
pub type Result<T> = std::result::Result<T, TriageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        let err = TriageError::validation(PatientField::IdentityNumber, "O CPF não pode ser vazio");
        assert_eq!(err.to_string(), "O CPF não pode ser vazio");
        assert_eq!(err.field(), Some(PatientField::IdentityNumber));

        assert!(TriageError::EmptyQueue.to_string().contains("fila de atendimento"));
        assert!(TriageError::PatientNotRegistered("22222222222".into())
            .to_string()
            .contains("Paciente não cadastrado"));
        assert_eq!(TriageError::DuplicateIdentity("1".into()).field(), None);
    }
}

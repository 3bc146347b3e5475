//! Validação de identidade do paciente
//!
//! Confere nome, CPF, e-mail e data de nascimento e recusa CPF já
//! cadastrado. Não altera nenhum repositório.

use std::sync::Arc;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;
use triage_core::{Clock, IntakeSettings, Patient, PatientField, Result, TriageError};

use crate::patient_store::PatientStore;

const CPF_LENGTH: usize = 11;
const NAME_PATTERN: &str = r"^[\p{L} ]+$";
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$";

/// Validador de identidade
#[derive(Debug)]
pub struct IdentityValidator {
    name_pattern: Regex,
    email_pattern: Regex,
    birth_date_format: String,
    clock: Arc<dyn Clock>,
}

impl IdentityValidator {
    /// Cria o validador com as regras de cadastro e a fonte da data corrente
    pub fn new(settings: &IntakeSettings, clock: Arc<dyn Clock>) -> Result<Self> {
        let name_pattern = Regex::new(NAME_PATTERN)
            .map_err(|e| TriageError::Internal(format!("invalid name pattern: {}", e)))?;
        let email_pattern = Regex::new(EMAIL_PATTERN)
            .map_err(|e| TriageError::Internal(format!("invalid email pattern: {}", e)))?;

        Ok(Self {
            name_pattern,
            email_pattern,
            birth_date_format: settings.birth_date_format().to_string(),
            clock,
        })
    }

    /// Valida os dados e devolve o paciente pronto para cadastro
    ///
    /// Os campos são conferidos na ordem nome, CPF, e-mail e data de
    /// nascimento; o CPF duplicado só é verificado com todos os campos válidos.
    pub fn validate(
        &self,
        patients: &PatientStore,
        name: &str,
        identity_number: &str,
        email: &str,
        birth_date: &str,
    ) -> Result<Patient> {
        self.validate_name(name)?;
        self.validate_identity_number(identity_number)?;
        self.validate_email(email)?;
        let birth_date = self.parse_birth_date(birth_date)?;

        if patients.exists(identity_number) {
            debug!("Identity number {} already registered", identity_number);
            return Err(TriageError::DuplicateIdentity(identity_number.to_string()));
        }

        debug!("Patient data for {} validated", identity_number);
        Ok(Patient::new(name, identity_number, email, birth_date))
    }

    fn validate_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(TriageError::validation(
                PatientField::Name,
                "O nome não pode ser vazio",
            ));
        }
        if !self.name_pattern.is_match(name) {
            return Err(TriageError::validation(
                PatientField::Name,
                "O nome deve conter apenas letras e espaços",
            ));
        }
        Ok(())
    }

    fn validate_identity_number(&self, identity_number: &str) -> Result<()> {
        if identity_number.is_empty() {
            return Err(TriageError::validation(
                PatientField::IdentityNumber,
                "O CPF não pode ser vazio",
            ));
        }
        if identity_number.chars().count() != CPF_LENGTH {
            return Err(TriageError::validation(
                PatientField::IdentityNumber,
                format!("O CPF deve conter exatamente {} dígitos", CPF_LENGTH),
            ));
        }
        if !identity_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(TriageError::validation(
                PatientField::IdentityNumber,
                "O CPF deve conter apenas números",
            ));
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(TriageError::validation(
                PatientField::Email,
                "O E-mail não pode ser vazio",
            ));
        }
        if !self.email_pattern.is_match(email) {
            return Err(TriageError::validation(PatientField::Email, "E-mail inválido"));
        }
        Ok(())
    }

    fn parse_birth_date(&self, birth_date: &str) -> Result<NaiveDate> {
        let date = NaiveDate::parse_from_str(birth_date.trim(), &self.birth_date_format)
            .map_err(|_| {
                TriageError::validation(PatientField::BirthDate, "Data de nascimento inválida")
            })?;

        if date > self.clock.today() {
            return Err(TriageError::validation(
                PatientField::BirthDate,
                "A data de nascimento não pode ser futura",
            ));
        }
        Ok(date)
    }
}

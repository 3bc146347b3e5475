//! Repositório de pacientes

use std::collections::HashMap;

use triage_core::{Patient, Result, TriageError};

/// Pacientes cadastrados, indexados por CPF
#[derive(Debug, Default)]
pub struct PatientStore {
    patients: HashMap<String, Patient>,
    registration_order: Vec<String>, // CPFs na ordem de cadastro
}

impl PatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cadastra o paciente; falha se o CPF já existir
    pub fn register(&mut self, patient: Patient) -> Result<Patient> {
        let cpf = patient.identity_number().to_string();
        if self.patients.contains_key(&cpf) {
            tracing::warn!("Rejected duplicate registration for {}", cpf);
            return Err(TriageError::DuplicateIdentity(cpf));
        }

        self.patients.insert(cpf.clone(), patient.clone());
        self.registration_order.push(cpf.clone());

        tracing::info!("Registered patient {}", cpf);
        Ok(patient)
    }

    pub fn exists(&self, identity_number: &str) -> bool {
        self.patients.contains_key(identity_number)
    }

    /// Busca o paciente pelo CPF
    pub fn get(&self, identity_number: &str) -> Result<&Patient> {
        self.patients
            .get(identity_number)
            .ok_or_else(|| TriageError::PatientNotRegistered(identity_number.to_string()))
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Pacientes na ordem de cadastro
    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.registration_order
            .iter()
            .filter_map(|cpf| self.patients.get(cpf))
    }
}

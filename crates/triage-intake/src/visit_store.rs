//! Repositório de atendimentos
//!
//! Guarda os atendimentos registrados e o histórico por paciente. Todo
//! atendimento referencia um paciente já cadastrado.

use std::collections::HashMap;

use triage_core::{Patient, Result, TriageError, Visit};
use uuid::Uuid;

use crate::patient_store::PatientStore;

/// Repositório de atendimentos
#[derive(Debug, Default)]
pub struct VisitStore {
    visits: HashMap<Uuid, Visit>,
    patient_visits: HashMap<String, Vec<Uuid>>, // CPF -> ids em ordem de inserção
    next_sequence: u64,
}

impl VisitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Armazena o atendimento e devolve a cópia armazenada (com sequência)
    ///
    /// Falha com `PatientNotRegistered` se o paciente não estiver cadastrado
    /// ou se os dados não forem os do cadastro; nesse caso o repositório não
    /// é alterado.
    pub fn insert(&mut self, patients: &PatientStore, visit: Visit) -> Result<Visit> {
        let cpf = visit.patient().identity_number().to_string();
        if let Err(err) = ensure_registered(patients, visit.patient()) {
            tracing::warn!("Rejected visit {} for patient {} not matching the registry", visit.id(), cpf);
            return Err(err);
        }

        if let Some(stored) = self.visits.get(&visit.id()) {
            tracing::debug!("Visit {} already stored", visit.id());
            return Ok(stored.clone());
        }

        self.next_sequence += 1;
        let stored = visit.with_sequence(self.next_sequence);
        let visit_id = stored.id();

        self.patient_visits
            .entry(cpf.clone())
            .or_default()
            .push(visit_id);
        self.visits.insert(visit_id, stored.clone());

        tracing::info!(
            "Recorded visit {} (#{}) for patient {} with risk {}",
            visit_id,
            stored.sequence(),
            cpf,
            stored.risk()
        );
        Ok(stored)
    }

    /// Histórico de atendimentos do paciente, na ordem de registro
    pub fn history_for(&self, patients: &PatientStore, patient: &Patient) -> Result<Vec<Visit>> {
        ensure_registered(patients, patient)?;
        let cpf = patient.identity_number();

        Ok(self
            .patient_visits
            .get(cpf)
            .map(|ids| ids.iter().filter_map(|id| self.visits.get(id)).cloned().collect())
            .unwrap_or_default())
    }

    pub fn get(&self, visit_id: Uuid) -> Option<&Visit> {
        self.visits.get(&visit_id)
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

/// Confere se o paciente é exatamente o cadastrado com o mesmo CPF
fn ensure_registered(patients: &PatientStore, patient: &Patient) -> Result<()> {
    let registered = patients.get(patient.identity_number())?;
    if registered != patient {
        return Err(TriageError::PatientNotRegistered(
            patient.identity_number().to_string(),
        ));
    }
    Ok(())
}

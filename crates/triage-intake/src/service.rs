//! Serviço de recepção
//!
//! Coordena validação, repositórios, classificação e fila de atendimento.
//! Registrar um atendimento e colocá-lo na fila são passos separados: o
//! atendimento aparece no histórico mesmo antes de entrar na fila.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use triage_core::{
    Clock, IntakeConfig, Patient, Result, RiskLevel, SeverityAssessment, SystemClock, Visit,
};

use crate::{
    classifier,
    patient_store::PatientStore,
    queue::TriageQueue,
    validator::IdentityValidator,
    visit_store::VisitStore,
};

/// Serviço de recepção do pronto-socorro
#[derive(Debug)]
pub struct IntakeService {
    validator: IdentityValidator,
    patients: PatientStore,
    visits: VisitStore,
    queue: TriageQueue,
    clock: Arc<dyn Clock>,
}

impl IntakeService {
    /// Cria o serviço usando o relógio do sistema
    pub fn new(config: &IntakeConfig) -> Result<Self> {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Cria o serviço com uma fonte de data específica
    pub fn with_clock(config: &IntakeConfig, clock: Box<dyn Clock>) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::from(clock);
        Ok(Self {
            validator: IdentityValidator::new(&config.intake, Arc::clone(&clock))?,
            patients: PatientStore::new(),
            visits: VisitStore::new(),
            queue: TriageQueue::new(),
            clock,
        })
    }

    /// Valida e cadastra um paciente
    pub fn register_patient(
        &mut self,
        name: &str,
        identity_number: &str,
        email: &str,
        birth_date: &str,
    ) -> Result<Patient> {
        let patient = self
            .validator
            .validate(&self.patients, name, identity_number, email, birth_date)?;
        self.patients.register(patient)
    }

    /// Classifica a ficha de análise
    pub fn classify_risk(&self, assessment: &SeverityAssessment) -> RiskLevel {
        classifier::classify(assessment)
    }

    /// Registra um atendimento (sem colocar na fila)
    pub fn record_visit(&mut self, patient: &Patient, risk: RiskLevel) -> Result<Visit> {
        self.visits
            .insert(&self.patients, Visit::at(patient.clone(), risk, self.clock.now()))
    }

    /// Classifica a ficha e registra o atendimento (sem colocar na fila)
    pub fn triage(&mut self, patient: &Patient, assessment: &SeverityAssessment) -> Result<Visit> {
        let risk = self.classify_risk(assessment);
        tracing::debug!("Assessment for {} classified as {}", patient.identity_number(), risk);
        self.record_visit(patient, risk)
    }

    /// Coloca o atendimento na fila; devolve o número de chegada
    pub fn enqueue(&mut self, visit: Visit) -> u64 {
        self.queue.insert(visit)
    }

    /// Chama o próximo paciente da fila
    pub fn call_next(&mut self) -> Result<Visit> {
        self.queue.call_next()
    }

    /// Histórico de atendimentos do paciente
    pub fn history(&self, patient: &Patient) -> Result<Vec<Visit>> {
        self.visits.history_for(&self.patients, patient)
    }

    /// Busca um paciente cadastrado pelo CPF
    pub fn find_patient(&self, identity_number: &str) -> Result<&Patient> {
        self.patients.get(identity_number)
    }

    pub fn queue(&self) -> &TriageQueue {
        &self.queue
    }

    pub fn queue_size(&self) -> usize {
        self.queue.size()
    }

    /// Visão geral da recepção
    pub fn overview(&self) -> IntakeOverview {
        IntakeOverview {
            registered_patients: self.patients.len(),
            recorded_visits: self.visits.len(),
            pending_visits: self.queue.size(),
            pending_by_risk: self.queue.count_by_risk(),
            next_risk: self.queue.peek().map(|visit| visit.risk()),
        }
    }
}

/// Visão geral da recepção
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeOverview {
    pub registered_patients: usize,
    pub recorded_visits: usize,
    pub pending_visits: usize,
    pub pending_by_risk: BTreeMap<RiskLevel, usize>,
    pub next_risk: Option<RiskLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use triage_core::{FixedClock, TriageError};

    fn service() -> IntakeService {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        IntakeService::with_clock(&IntakeConfig::default(), Box::new(FixedClock(today))).unwrap()
    }

    #[test]
    fn test_register_then_find() {
        let mut ps = service();
        let carlos = ps
            .register_patient("Carlos", "11111111111", "carlos@teste.com", "15/06/1990")
            .unwrap();

        assert_eq!(ps.find_patient("11111111111").unwrap(), &carlos);
    }

    #[test]
    fn test_duplicate_registration_with_different_fields() {
        let mut ps = service();
        ps.register_patient("Maria", "11111111111", "maria@teste.com", "21/03/2002")
            .unwrap();

        let result = ps.register_patient("João", "11111111111", "joao@teste.com", "21/03/2000");
        assert!(matches!(result, Err(TriageError::DuplicateIdentity(_))));
        assert_eq!(ps.find_patient("11111111111").unwrap().name(), "Maria");
        assert_eq!(ps.overview().registered_patients, 1);
    }

    #[test]
    fn test_invalid_registration_stores_nothing() {
        let mut ps = service();
        let result = ps.register_patient("Maria", "11111111111", "maria.com", "21/03/2002");
        assert!(matches!(result, Err(TriageError::Validation { .. })));
        assert!(matches!(
            ps.find_patient("11111111111"),
            Err(TriageError::PatientNotRegistered(_))
        ));
    }

    #[test]
    fn test_recorded_visit_is_in_history_before_queue() {
        let mut ps = service();
        let paciente = ps
            .register_patient("Eduardo", "88888888888", "eduardo@teste.com", "11/03/1985")
            .unwrap();

        let visit = ps.record_visit(&paciente, RiskLevel::Green).unwrap();
        assert_eq!(ps.history(&paciente).unwrap(), vec![visit.clone()]);
        assert_eq!(ps.queue_size(), 0);

        ps.enqueue(visit.clone());
        assert_eq!(ps.call_next().unwrap(), visit);
        assert_eq!(ps.queue_size(), 0);
    }

    #[test]
    fn test_triage_classifies_and_records() {
        let mut ps = service();
        let paciente = ps
            .register_patient("Lucas", "55555555555", "lucas@teste.com", "15/08/1993")
            .unwrap();

        let visit = ps
            .triage(&paciente, &SeverityAssessment::none().with_moderate_severity())
            .unwrap();
        assert_eq!(visit.risk(), RiskLevel::Orange);
        assert_eq!(ps.history(&paciente).unwrap().len(), 1);
    }

    #[test]
    fn test_classify_risk() {
        let ps = service();
        assert_eq!(ps.classify_risk(&SeverityAssessment::none()), RiskLevel::Blue);
        assert_eq!(
            ps.classify_risk(&SeverityAssessment::none().with_life_risk().with_low_severity()),
            RiskLevel::Red
        );
    }

    #[test]
    fn test_overview() {
        let mut ps = service();
        let a = ps
            .register_patient("Carlos", "44444444444", "carlos@teste.com", "10/01/1980")
            .unwrap();
        let b = ps
            .register_patient("Bruna", "55555555555", "bruna@teste.com", "23/09/1995")
            .unwrap();

        let va = ps.record_visit(&a, RiskLevel::Red).unwrap();
        let vb = ps.record_visit(&b, RiskLevel::Blue).unwrap();
        ps.record_visit(&b, RiskLevel::Green).unwrap();
        ps.enqueue(vb);
        ps.enqueue(va);

        let overview = ps.overview();
        assert_eq!(overview.registered_patients, 2);
        assert_eq!(overview.recorded_visits, 3);
        assert_eq!(overview.pending_visits, 2);
        assert_eq!(overview.next_risk, Some(RiskLevel::Red));
        assert_eq!(overview.pending_by_risk.get(&RiskLevel::Blue), Some(&1));
    }

    #[test]
    fn test_visit_timestamp_comes_from_clock() {
        let mut ps = service();
        let paciente = ps
            .register_patient("Carlos", "11111111111", "carlos@teste.com", "10/01/1980")
            .unwrap();

        let visit = ps.record_visit(&paciente, RiskLevel::Yellow).unwrap();
        assert_eq!(visit.recorded_at().to_rfc3339(), "2025-03-10T00:00:00+00:00");
    }

    #[test]
    fn test_visit_for_altered_patient_is_rejected() {
        let mut ps = service();
        ps.register_patient("Carlos", "11111111111", "carlos@teste.com", "10/01/1980")
            .unwrap();
        let impostor = Patient::new(
            "Impostor",
            "11111111111",
            "impostor@teste.com",
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        );

        let result = ps.record_visit(&impostor, RiskLevel::Red);
        assert!(matches!(result, Err(TriageError::PatientNotRegistered(_))));
        assert_eq!(ps.overview().recorded_visits, 0);
        assert!(ps.history(&impostor).is_err());
    }
}

//! Sessão roteirizada de recepção
//!
//! Um roteiro é um array JSON de passos identificados por `op`. Cada passo
//! gera um resultado; passos com erro não interrompem a sessão.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use triage_core::{Result, RiskLevel, SeverityAssessment, TriageError, Visit};
use triage_intake::IntakeService;

/// Passo do roteiro
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Register {
        name: String,
        cpf: String,
        email: String,
        birth_date: String,
    },
    Triage {
        cpf: String,
        #[serde(default)]
        assessment: SeverityAssessment,
        #[serde(default)]
        enqueue: bool,
    },
    Visit {
        cpf: String,
        risk: RiskLevel,
        #[serde(default)]
        enqueue: bool,
    },
    CallNext,
    History {
        cpf: String,
    },
    Overview,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Register { .. } => "register",
            Step::Triage { .. } => "triage",
            Step::Visit { .. } => "visit",
            Step::CallNext => "call_next",
            Step::History { .. } => "history",
            Step::Overview => "overview",
        }
    }
}

/// Resultado de um passo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub step: usize,
    pub op: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Lê o roteiro a partir do texto JSON
pub fn parse_script(content: &str) -> serde_json::Result<Vec<Step>> {
    serde_json::from_str(content)
}

/// Executa todos os passos na ordem
pub fn run_script(service: &mut IntakeService, steps: &[Step]) -> Vec<Outcome> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let step_number = index + 1;
            match run_step(service, step) {
                Ok(data) => Outcome {
                    step: step_number,
                    op: step.name(),
                    ok: true,
                    data: Some(data),
                    error: None,
                },
                Err(err) => {
                    tracing::warn!("Step {} ({}) failed: {}", step_number, step.name(), err);
                    Outcome {
                        step: step_number,
                        op: step.name(),
                        ok: false,
                        data: None,
                        error: Some(err.to_string()),
                    }
                }
            }
        })
        .collect()
}

fn run_step(service: &mut IntakeService, step: &Step) -> Result<Value> {
    match step {
        Step::Register {
            name,
            cpf,
            email,
            birth_date,
        } => {
            let patient = service.register_patient(name, cpf, email, birth_date)?;
            to_value(&patient)
        }
        Step::Triage {
            cpf,
            assessment,
            enqueue,
        } => {
            let patient = service.find_patient(cpf)?.clone();
            let visit = service.triage(&patient, assessment)?;
            visit_value(service, visit, *enqueue)
        }
        Step::Visit { cpf, risk, enqueue } => {
            let patient = service.find_patient(cpf)?.clone();
            let visit = service.record_visit(&patient, *risk)?;
            visit_value(service, visit, *enqueue)
        }
        Step::CallNext => {
            let visit = to_value(&service.call_next()?)?;
            Ok(serde_json::json!({
                "visit": visit,
                "remaining": service.queue_size(),
            }))
        }
        Step::History { cpf } => {
            let patient = service.find_patient(cpf)?.clone();
            to_value(&service.history(&patient)?)
        }
        Step::Overview => to_value(&service.overview()),
    }
}

fn visit_value(service: &mut IntakeService, visit: Visit, enqueue: bool) -> Result<Value> {
    let visit_json = to_value(&visit)?;
    let mut value = serde_json::json!({ "visit": visit_json });
    if enqueue {
        let arrival = service.enqueue(visit);
        value["arrival"] = Value::from(arrival);
    }
    Ok(value)
}

fn to_value<T: Serialize>(data: &T) -> Result<Value> {
    serde_json::to_value(data)
        .map_err(|e| TriageError::Internal(format!("failed to serialize step output: {}", e)))
}

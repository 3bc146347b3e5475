//! # Recepção do pronto-socorro
//!
//! Fluxo de entrada de pacientes:
//! - Validação de identidade: confere os dados do cadastro e CPF duplicado
//! - Repositórios de pacientes e de atendimentos
//! - Classificação de risco a partir da ficha de análise
//! - Fila de atendimento por prioridade de risco e ordem de chegada
//! - Serviço de recepção que coordena as etapas acima

pub mod classifier;
pub mod patient_store;
pub mod queue;
pub mod service;
pub mod validator;
pub mod visit_store;

// Reexporta os tipos principais
pub use classifier::classify;
pub use patient_store::PatientStore;
pub use queue::TriageQueue;
pub use service::{IntakeOverview, IntakeService};
pub use validator::IdentityValidator;
pub use visit_store::VisitStore;

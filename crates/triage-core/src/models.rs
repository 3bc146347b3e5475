//! Modelos de dados do pronto-socorro

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Paciente cadastrado
///
/// Imutável após a criação. `Patient::new` não valida os campos; o cadastro
/// passa pelo validador de identidade do serviço de recepção.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    name: String,
    identity_number: String, // CPF, 11 dígitos
    email: String,
    birth_date: NaiveDate,
}

impl Patient {
    pub fn new(
        name: impl Into<String>,
        identity_number: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            identity_number: identity_number.into(),
            email: email.into(),
            birth_date,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identity_number(&self) -> &str {
        &self.identity_number
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }
}

/// Ficha de análise preenchida na triagem
///
/// As flags não são mutuamente exclusivas; a classificação segue precedência fixa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityAssessment {
    pub life_risk: bool,
    pub high_severity: bool,
    pub moderate_severity: bool,
    pub low_severity: bool,
}

impl SeverityAssessment {
    /// Ficha sem nenhum critério de gravidade
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_life_risk(mut self) -> Self {
        self.life_risk = true;
        self
    }

    pub fn with_high_severity(mut self) -> Self {
        self.high_severity = true;
        self
    }

    pub fn with_moderate_severity(mut self) -> Self {
        self.moderate_severity = true;
        self
    }

    pub fn with_low_severity(mut self) -> Self {
        self.low_severity = true;
        self
    }
}

/// Classificação de risco (Manchester)
///
/// A ordem é dada por `rank()`, não pela ordem de declaração.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Red,    // emergência
    Orange, // muito urgente
    Yellow, // urgente
    Green,  // pouco urgente
    Blue,   // não urgente
}

impl RiskLevel {
    /// Peso numérico de urgência (maior = mais urgente)
    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::Red => 5,
            RiskLevel::Orange => 4,
            RiskLevel::Yellow => 3,
            RiskLevel::Green => 2,
            RiskLevel::Blue => 1,
        }
    }

    /// Nome da cor exibido no painel
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Red => "VERMELHO",
            RiskLevel::Orange => "LARANJA",
            RiskLevel::Yellow => "AMARELO",
            RiskLevel::Green => "VERDE",
            RiskLevel::Blue => "AZUL",
        }
    }

    /// Todos os níveis, do mais urgente ao menos urgente
    pub fn all() -> [RiskLevel; 5] {
        [
            RiskLevel::Red,
            RiskLevel::Orange,
            RiskLevel::Yellow,
            RiskLevel::Green,
            RiskLevel::Blue,
        ]
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, RiskLevel::Red | RiskLevel::Orange)
    }
}

impl Ord for RiskLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for RiskLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color())
    }
}

/// Atendimento registrado para um paciente
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    id: Uuid,
    patient: Patient,
    risk: RiskLevel,
    sequence: u64, // atribuído pelo repositório de atendimentos
    recorded_at: DateTime<Utc>,
}

impl Visit {
    /// Cria um atendimento ainda não armazenado (sequência 0)
    pub fn new(patient: Patient, risk: RiskLevel) -> Self {
        Self::at(patient, risk, Utc::now())
    }

    /// Cria um atendimento registrado no instante informado
    pub fn at(patient: Patient, risk: RiskLevel, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient,
            risk,
            sequence: 0,
            recorded_at,
        }
    }

    /// Cópia do atendimento com a sequência do repositório
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    pub fn risk(&self) -> RiskLevel {
        self.risk
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

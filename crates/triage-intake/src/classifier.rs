//! Classificação de risco
//!
//! Converte a ficha de análise em um nível de risco. A primeira flag
//! verdadeira, na ordem abaixo, decide o resultado.

use triage_core::{RiskLevel, SeverityAssessment};

/// Classifica a ficha de análise
pub fn classify(assessment: &SeverityAssessment) -> RiskLevel {
    if assessment.life_risk {
        RiskLevel::Red
    } else if assessment.high_severity {
        RiskLevel::Yellow
    } else if assessment.moderate_severity {
        RiskLevel::Orange
    } else if assessment.low_severity {
        RiskLevel::Green
    } else {
        RiskLevel::Blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flags() {
        let none = SeverityAssessment::none();
        assert_eq!(classify(&none), RiskLevel::Blue);
        assert_eq!(classify(&none.with_low_severity()), RiskLevel::Green);
        assert_eq!(classify(&none.with_moderate_severity()), RiskLevel::Orange);
        assert_eq!(classify(&none.with_high_severity()), RiskLevel::Yellow);
        assert_eq!(classify(&none.with_life_risk()), RiskLevel::Red);
    }

    #[test]
    fn test_precedence_over_all_combinations() {
        // (vida, alta, moderada, baixa) => risco esperado
        let table = [
            ((false, false, false, false), RiskLevel::Blue),
            ((false, false, false, true), RiskLevel::Green),
            ((false, false, true, false), RiskLevel::Orange),
            ((false, false, true, true), RiskLevel::Orange),
            ((false, true, false, false), RiskLevel::Yellow),
            ((false, true, false, true), RiskLevel::Yellow),
            ((false, true, true, false), RiskLevel::Yellow),
            ((false, true, true, true), RiskLevel::Yellow),
            ((true, false, false, false), RiskLevel::Red),
            ((true, false, false, true), RiskLevel::Red),
            ((true, false, true, false), RiskLevel::Red),
            ((true, false, true, true), RiskLevel::Red),
            ((true, true, false, false), RiskLevel::Red),
            ((true, true, false, true), RiskLevel::Red),
            ((true, true, true, false), RiskLevel::Red),
            ((true, true, true, true), RiskLevel::Red),
        ];

        for ((life_risk, high_severity, moderate_severity, low_severity), expected) in table {
            let assessment = SeverityAssessment {
                life_risk,
                high_severity,
                moderate_severity,
                low_severity,
            };
            assert_eq!(classify(&assessment), expected, "{:?}", assessment);
        }
    }

    #[test]
    fn test_high_severity_wins_over_moderate() {
        let ficha = SeverityAssessment::none()
            .with_moderate_severity()
            .with_high_severity();
        assert_eq!(classify(&ficha), RiskLevel::Yellow);
    }
}

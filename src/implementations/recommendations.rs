use crate::models::common::{ ClauseType, RiskLevel };

/// Clause-specific directives for High risk findings
const HIGH_RISK_DIRECTIVES: [(ClauseType, &str); 4] = [
    (ClauseType::LeverageRatio, "Negotiate a tighter leverage cap or add a margin ratchet."),
    (ClauseType::InterestCover, "Request a higher interest cover floor or limit EBITDA add-backs."),
    (ClauseType::GracePeriod, "Reduce the grace period to 3 business days for administrative errors only."),
    (ClauseType::CrossDefault, "Lower or remove the cross-default threshold."),
];

const MEDIUM_RISK_ADVICE: &str = "Monitor closely and consider tightening in the next amendment.";

const LOW_RISK_ADVICE: &str = "Acceptable; complies with the LMA standard.";

/// Recommendation for a finding, looked up by risk level and clause
pub fn recommendation(level: RiskLevel, clause: ClauseType) -> &'static str {
    match level {
        RiskLevel::High =>
            HIGH_RISK_DIRECTIVES.iter()
                .find(|(c, _)| *c == clause)
                .map(|(_, text)| *text)
                .unwrap_or(MEDIUM_RISK_ADVICE),
        RiskLevel::Medium => MEDIUM_RISK_ADVICE,
        RiskLevel::Low => LOW_RISK_ADVICE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_clause_has_a_high_risk_directive() {
        for clause in ClauseType::ALL {
            assert!(HIGH_RISK_DIRECTIVES.iter().any(|(c, _)| *c == clause), "{} has no directive", clause);
        }
    }

    #[test]
    fn test_lookup() {
        assert!(recommendation(RiskLevel::High, ClauseType::LeverageRatio).contains("margin ratchet"));
        assert!(recommendation(RiskLevel::High, ClauseType::GracePeriod).contains("3 business days"));
        assert_eq!(recommendation(RiskLevel::Medium, ClauseType::CrossDefault), MEDIUM_RISK_ADVICE);
        assert_eq!(recommendation(RiskLevel::Low, ClauseType::InterestCover), LOW_RISK_ADVICE);
    }
}

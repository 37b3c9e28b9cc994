//! Static threshold tables for the four quantitative covenants.
//!
//! Each table lists its tiers in the risk-increasing direction. A value lands
//! in the first tier whose bound it satisfies; anything past the last bound
//! takes the table's `beyond` tier.

use crate::models::assessment::{ DeviationMetric, RiskAssessment };
use crate::models::common::{ ClauseType, RiskLevel };

/// Which side of a bound is the safe side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Caps: lower is better (`value <= bound`)
    AtMost,
    /// Floors: higher is better (`value >= bound`)
    AtLeast,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub bound: f64,
    pub level: RiskLevel,
    pub score: u32,
    pub severity: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    pub clause: ClauseType,
    pub standard: f64,
    pub direction: Direction,
    pub tiers: &'static [Tier],
    /// Applies when no tier bound is satisfied. `bound` is unused.
    pub beyond: Tier,
}

const fn tier(bound: f64, level: RiskLevel, score: u32, severity: &'static str) -> Tier {
    Tier { bound, level, score, severity }
}

pub const LEVERAGE_TABLE: ThresholdTable = ThresholdTable {
    clause: ClauseType::LeverageRatio,
    standard: 3.0,
    direction: Direction::AtMost,
    tiers: &[
        tier(3.0, RiskLevel::Low, 0, "in line with the LMA standard"),
        tier(4.5, RiskLevel::Medium, 4, "slightly looser than the market standard"),
        tier(5.5, RiskLevel::High, 7, "significantly looser than the LMA standard"),
    ],
    beyond: tier(f64::INFINITY, RiskLevel::High, 9, "far looser than the LMA standard"),
};

pub const INTEREST_COVER_TABLE: ThresholdTable = ThresholdTable {
    clause: ClauseType::InterestCover,
    standard: 4.0,
    direction: Direction::AtLeast,
    tiers: &[
        tier(4.0, RiskLevel::Low, 0, "meets or exceeds the LMA standard"),
        tier(3.5, RiskLevel::Medium, 3, "below the LMA standard"),
        tier(2.5, RiskLevel::High, 7, "well below the LMA standard"),
    ],
    beyond: tier(f64::NEG_INFINITY, RiskLevel::High, 9, "very weak protection for lenders"),
};

pub const GRACE_PERIOD_TABLE: ThresholdTable = ThresholdTable {
    clause: ClauseType::GracePeriod,
    standard: 3.0,
    direction: Direction::AtMost,
    tiers: &[
        tier(3.0, RiskLevel::Low, 0, "in line with the LMA standard"),
        tier(5.0, RiskLevel::Medium, 3, "longer than the LMA standard"),
    ],
    beyond: tier(f64::INFINITY, RiskLevel::High, 6, "an excessive cure period"),
};

pub const CROSS_DEFAULT_TABLE: ThresholdTable = ThresholdTable {
    clause: ClauseType::CrossDefault,
    standard: 0.0,
    direction: Direction::AtMost,
    tiers: &[
        tier(0.0, RiskLevel::Low, 0, "the zero-floor standard"),
        tier(1_000_000.0, RiskLevel::Low, 1, "a modest threshold above the zero-floor standard"),
        tier(5_000_000.0, RiskLevel::Medium, 4, "higher than the typical zero-floor standard"),
    ],
    beyond: tier(f64::INFINITY, RiskLevel::High, 7, "a high threshold that hides material defaults"),
};

impl ThresholdTable {
    pub fn for_clause(clause: ClauseType) -> &'static ThresholdTable {
        match clause {
            ClauseType::LeverageRatio => &LEVERAGE_TABLE,
            ClauseType::InterestCover => &INTEREST_COVER_TABLE,
            ClauseType::GracePeriod => &GRACE_PERIOD_TABLE,
            ClauseType::CrossDefault => &CROSS_DEFAULT_TABLE,
        }
    }

    /// Tier for `value`. NaN satisfies no bound and lands in `beyond`.
    pub fn classify(&self, value: f64) -> &Tier {
        self.tiers
            .iter()
            .find(|t| match self.direction {
                Direction::AtMost => value <= t.bound,
                Direction::AtLeast => value >= t.bound,
            })
            .unwrap_or(&self.beyond)
    }

    fn deviation(&self, value: f64) -> DeviationMetric {
        match self.clause {
            ClauseType::LeverageRatio | ClauseType::InterestCover => {
                DeviationMetric::Percentage(((value - self.standard) / self.standard) * 100.0)
            }
            ClauseType::GracePeriod => DeviationMetric::Days((value - self.standard).round() as i64),
            ClauseType::CrossDefault => DeviationMetric::NotApplicable,
        }
    }

    pub fn assess(&self, value: f64) -> RiskAssessment {
        let tier = self.classify(value);
        RiskAssessment {
            clause_type: self.clause,
            extracted_value: value,
            standard_value: self.standard,
            risk_level: tier.level,
            risk_score: tier.score,
            severity: tier.severity.to_string(),
            deviation: self.deviation(value),
        }
    }
}

pub fn score_leverage(ratio: f64) -> RiskAssessment {
    LEVERAGE_TABLE.assess(ratio)
}

pub fn score_interest_cover(ratio: f64) -> RiskAssessment {
    INTEREST_COVER_TABLE.assess(ratio)
}

pub fn score_grace_period(days: u64) -> RiskAssessment {
    GRACE_PERIOD_TABLE.assess(days as f64)
}

pub fn score_cross_default(threshold_eur: f64) -> RiskAssessment {
    CROSS_DEFAULT_TABLE.assess(threshold_eur)
}

/// Score any quantitative clause by type
pub fn score(clause: ClauseType, value: f64) -> RiskAssessment {
    ThresholdTable::for_clause(clause).assess(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn level_and_score(assessment: RiskAssessment) -> (RiskLevel, u32) {
        (assessment.risk_level, assessment.risk_score)
    }

    #[test]
    fn test_leverage_boundaries() {
        assert_eq!(level_and_score(score_leverage(3.0)), (RiskLevel::Low, 0));
        assert_eq!(level_and_score(score_leverage(3.01)), (RiskLevel::Medium, 4));
        assert_eq!(level_and_score(score_leverage(4.5)), (RiskLevel::Medium, 4));
        assert_eq!(level_and_score(score_leverage(4.75)), (RiskLevel::High, 7));
        assert_eq!(level_and_score(score_leverage(5.5)), (RiskLevel::High, 7));
        assert_eq!(level_and_score(score_leverage(5.51)), (RiskLevel::High, 9));
    }

    #[test]
    fn test_interest_cover_boundaries() {
        assert_eq!(level_and_score(score_interest_cover(4.0)), (RiskLevel::Low, 0));
        assert_eq!(level_and_score(score_interest_cover(3.99)), (RiskLevel::Medium, 3));
        assert_eq!(level_and_score(score_interest_cover(3.5)), (RiskLevel::Medium, 3));
        assert_eq!(level_and_score(score_interest_cover(3.0)), (RiskLevel::High, 7));
        assert_eq!(level_and_score(score_interest_cover(2.5)), (RiskLevel::High, 7));
        assert_eq!(level_and_score(score_interest_cover(2.49)), (RiskLevel::High, 9));
    }

    #[test]
    fn test_grace_period_boundaries() {
        assert_eq!(level_and_score(score_grace_period(0)), (RiskLevel::Low, 0));
        assert_eq!(level_and_score(score_grace_period(3)), (RiskLevel::Low, 0));
        assert_eq!(level_and_score(score_grace_period(4)), (RiskLevel::Medium, 3));
        assert_eq!(level_and_score(score_grace_period(5)), (RiskLevel::Medium, 3));
        assert_eq!(level_and_score(score_grace_period(7)), (RiskLevel::High, 6));
        assert_eq!(level_and_score(score_grace_period(5_000_000_000)), (RiskLevel::High, 6));
    }

    #[test]
    fn test_cross_default_boundaries() {
        assert_eq!(level_and_score(score_cross_default(0.0)), (RiskLevel::Low, 0));
        assert_eq!(level_and_score(score_cross_default(1.0)), (RiskLevel::Low, 1));
        assert_eq!(level_and_score(score_cross_default(1_000_000.0)), (RiskLevel::Low, 1));
        assert_eq!(level_and_score(score_cross_default(1_000_001.0)), (RiskLevel::Medium, 4));
        assert_eq!(level_and_score(score_cross_default(5_000_000.0)), (RiskLevel::Medium, 4));
        assert_eq!(level_and_score(score_cross_default(10_000_000.0)), (RiskLevel::High, 7));
    }

    #[test]
    fn test_deviation_metrics() {
        assert_eq!(score_leverage(4.5).deviation, DeviationMetric::Percentage(50.0));
        assert_eq!(score_interest_cover(3.0).deviation, DeviationMetric::Percentage(-25.0));
        assert_eq!(score_grace_period(7).deviation, DeviationMetric::Days(4));
        assert_eq!(score_grace_period(1).deviation, DeviationMetric::Days(-2));
        assert_eq!(score_cross_default(2_000_000.0).deviation, DeviationMetric::NotApplicable);
    }

    #[test]
    fn test_assessment_carries_standard_and_severity() {
        let assessment = score_leverage(4.75);
        assert_eq!(assessment.clause_type, ClauseType::LeverageRatio);
        assert_eq!(assessment.extracted_value, 4.75);
        assert_eq!(assessment.standard_value, 3.0);
        assert_eq!(assessment.severity, "significantly looser than the LMA standard");
    }

    #[test]
    fn test_dispatch_matches_dedicated_functions() {
        assert_eq!(score(ClauseType::GracePeriod, 4.0), score_grace_period(4));
        assert_eq!(score(ClauseType::CrossDefault, 3e6), score_cross_default(3e6));
    }

    proptest! {
        #[test]
        fn leverage_tiers_hold(v in 0.0f64..20.0) {
            let expected = if v <= 3.0 {
                (RiskLevel::Low, 0)
            } else if v <= 4.5 {
                (RiskLevel::Medium, 4)
            } else if v <= 5.5 {
                (RiskLevel::High, 7)
            } else {
                (RiskLevel::High, 9)
            };
            prop_assert_eq!(level_and_score(score_leverage(v)), expected);
        }

        #[test]
        fn interest_cover_tiers_hold(v in 0.0f64..10.0) {
            let expected = if v >= 4.0 {
                (RiskLevel::Low, 0)
            } else if v >= 3.5 {
                (RiskLevel::Medium, 3)
            } else if v >= 2.5 {
                (RiskLevel::High, 7)
            } else {
                (RiskLevel::High, 9)
            };
            prop_assert_eq!(level_and_score(score_interest_cover(v)), expected);
        }

        /// Moving a value in the risky direction never lowers its score
        #[test]
        fn scores_are_monotonic(a in 0.0f64..1e7, b in 0.0f64..1e7) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            for table in [&LEVERAGE_TABLE, &GRACE_PERIOD_TABLE, &CROSS_DEFAULT_TABLE] {
                prop_assert!(table.assess(lo).risk_score <= table.assess(hi).risk_score);
                prop_assert!(table.assess(lo).risk_level <= table.assess(hi).risk_level);
            }
            prop_assert!(
                INTEREST_COVER_TABLE.assess(hi).risk_score <= INTEREST_COVER_TABLE.assess(lo).risk_score
            );
        }
    }
}

use rust_decimal::Decimal;

use crate::types::{Metric, Percent};

/// Unweighted arithmetic mean of child percentages.
///
/// The single rollup policy shared by the objective, pillar and company
/// levels. An empty set folds to zero; exclusion of silent children happens
/// upstream, in the has-data gate.
pub fn mean(percentages: &[Percent]) -> Percent {
    if percentages.is_empty() {
        return Decimal::ZERO;
    }
    percentages.iter().sum::<Decimal>() / Decimal::from(percentages.len() as i64)
}

/// Objective percentage from its contributing KRs' percentages.
pub fn rollup_objective(kr_percentages: &[Percent]) -> Percent {
    mean(kr_percentages)
}

/// Pillar percentage from its objectives' percentages.
pub fn rollup_pillar(objective_percentages: &[Percent]) -> Percent {
    mean(objective_percentages)
}

/// Company score from its pillars' percentages.
pub fn rollup_company(pillar_percentages: &[Percent]) -> Percent {
    mean(pillar_percentages)
}

/// Weight-aware mean over (percentage, weight) pairs, the opt-in alternative
/// to [`mean`]. Non-positive weights are skipped; zero total weight folds to
/// zero like an empty set.
pub fn weighted_mean(pairs: &[(Percent, Metric)]) -> Percent {
    let mut total_weight = Decimal::ZERO;
    let mut weighted_sum = Decimal::ZERO;
    for (percentage, weight) in pairs {
        if *weight <= Decimal::ZERO {
            continue;
        }
        total_weight += weight;
        weighted_sum += percentage * weight;
    }
    if total_weight.is_zero() {
        Decimal::ZERO
    } else {
        weighted_sum / total_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_objective_rollup_is_mean() {
        assert_eq!(rollup_objective(&[dec!(80), dec!(100)]), dec!(90));
    }

    #[test]
    fn test_all_levels_share_one_policy() {
        let children = [dec!(60), dec!(90), dec!(120)];
        let expected = dec!(90);
        assert_eq!(rollup_objective(&children), expected);
        assert_eq!(rollup_pillar(&children), expected);
        assert_eq!(rollup_company(&children), expected);
    }

    #[test]
    fn test_empty_set_folds_to_zero() {
        assert_eq!(mean(&[]), dec!(0));
    }

    #[test]
    fn test_weighted_mean() {
        let pairs = [(dec!(80), dec!(1)), (dec!(100), dec!(3))];
        assert_eq!(weighted_mean(&pairs), dec!(95));
    }

    #[test]
    fn test_weighted_mean_skips_non_positive_weights() {
        let pairs = [(dec!(100), dec!(-1)), (dec!(50), dec!(1))];
        assert_eq!(weighted_mean(&pairs), dec!(50));
        assert_eq!(weighted_mean(&[(dec!(100), dec!(0))]), dec!(0));
    }
}

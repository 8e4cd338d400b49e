use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::types::{AggregationType, Metric, MonthKey};

/// Collapse a window's values into a single number.
///
/// Callers pass only the values whose month-key exists in the source map
/// (see [`window_values`]); zeros that exist in the map are real values and
/// participate in every mode. An empty window aggregates to zero.
pub fn aggregate(values: &[Metric], mode: AggregationType) -> Metric {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    match mode {
        AggregationType::Sum => values.iter().sum(),
        AggregationType::Average => {
            values.iter().sum::<Decimal>() / Decimal::from(values.len() as i64)
        }
        AggregationType::Min => values.iter().copied().min().unwrap_or(Decimal::ZERO),
        AggregationType::Max => values.iter().copied().max().unwrap_or(Decimal::ZERO),
    }
}

/// Pull the present values of `keys` out of a monthly series, in window order.
///
/// A key missing from the map is absent, not zero; the distinction feeds the
/// has-data gate one layer up in the rollup.
pub fn window_values(series: &BTreeMap<MonthKey, Metric>, keys: &[MonthKey]) -> Vec<Metric> {
    keys.iter().filter_map(|k| series.get(k).copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sum_is_additive() {
        let values = vec![dec!(1.5), dec!(2), dec!(-0.5)];
        assert_eq!(aggregate(&values, AggregationType::Sum), dec!(3));
    }

    #[test]
    fn test_empty_window_is_zero_for_every_mode() {
        for mode in [
            AggregationType::Sum,
            AggregationType::Average,
            AggregationType::Min,
            AggregationType::Max,
        ] {
            assert_eq!(aggregate(&[], mode), Decimal::ZERO);
        }
    }

    #[test]
    fn test_average_includes_present_zeros() {
        let values = vec![dec!(0), dec!(10)];
        assert_eq!(aggregate(&values, AggregationType::Average), dec!(5));
    }

    #[test]
    fn test_min_max_over_present_values() {
        let values = vec![dec!(4), dec!(9), dec!(2)];
        assert_eq!(aggregate(&values, AggregationType::Min), dec!(2));
        assert_eq!(aggregate(&values, AggregationType::Max), dec!(9));
    }

    #[test]
    fn test_window_values_skips_absent_keys() {
        let mut series = BTreeMap::new();
        series.insert("2024-01".to_string(), dec!(10));
        series.insert("2024-03".to_string(), dec!(0));
        series.insert("2024-12".to_string(), dec!(99));

        let keys: Vec<String> = vec!["2024-01".into(), "2024-02".into(), "2024-03".into()];
        let values = window_values(&series, &keys);
        assert_eq!(values, vec![dec!(10), dec!(0)]);
    }
}

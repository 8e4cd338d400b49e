use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::achievement::achievement;
use crate::aggregate::{aggregate, window_values};
use crate::classify::{classify, PerformanceBand};
use crate::period::{resolve_month_keys_on, PeriodSelection};
use crate::rollup;
use crate::types::{
    with_metadata, ComputationOutput, KeyResult, Metric, MonthKey, Objective, Percent, Pillar,
};
use crate::OkrResult;

/// Outcome of scoring one node of the hierarchy (KR, objective, pillar, or
/// the company total).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelResult {
    /// Unclamped achievement percentage; zero when the node has no data
    pub percentage: Percent,
    /// None when the node is silent for the window; renders as a dash, not red
    pub band: Option<PerformanceBand>,
    pub has_data: bool,
}

impl LevelResult {
    fn scored(percentage: Percent) -> Self {
        LevelResult {
            percentage,
            band: Some(classify(percentage)),
            has_data: true,
        }
    }

    fn no_data() -> Self {
        LevelResult {
            percentage: Decimal::ZERO,
            band: None,
            has_data: false,
        }
    }
}

/// Entity snapshot plus the selected window.
///
/// Entities are immutable for the duration of one computation; the hierarchy
/// is stitched together by `pillarId` / `objectiveId` references.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardInput {
    pub pillars: Vec<Pillar>,
    pub objectives: Vec<Objective>,
    pub key_results: Vec<KeyResult>,
    pub period: PeriodSelection,
    /// Honor per-KR weights in the objective mean instead of the default
    /// unweighted rollup
    #[serde(default)]
    pub use_weights: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResultScore {
    pub id: String,
    pub name: String,
    /// Aggregated target over the window (or the scalar fallback)
    pub aggregated_target: Metric,
    /// Aggregated actual over the window (or the scalar fallback)
    pub aggregated_actual: Metric,
    pub result: LevelResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveScore {
    pub id: String,
    pub name: String,
    pub result: LevelResult,
    pub key_results: Vec<KeyResultScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarScore {
    pub id: String,
    pub name: String,
    pub result: LevelResult,
    pub objectives: Vec<ObjectiveScore>,
}

/// Count of leaf KRs per band, for the dashboard's filter chips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandTally {
    pub critical: usize,
    pub attention: usize,
    pub on_target: usize,
    pub excellent: usize,
    pub no_data: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyScorecard {
    pub period_label: String,
    /// The resolved window, in calendar order
    pub months: Vec<MonthKey>,
    pub result: LevelResult,
    pub pillars: Vec<PillarScore>,
    pub key_result_bands: BandTally,
}

/// Score one KR against a resolved window.
///
/// The has-data gate: a KR contributes only with at least one present target
/// and one present actual inside the window. A KR that never carried monthly
/// series at all falls back to its scalar target/current pair.
pub fn evaluate_key_result(kr: &KeyResult, months: &[MonthKey]) -> KeyResultScore {
    if kr.monthly_targets.is_empty() && kr.monthly_actual.is_empty() {
        let has_data = !kr.target_value.is_zero() || !kr.current_value.is_zero();
        let result = if has_data {
            LevelResult::scored(achievement(
                kr.target_value,
                kr.current_value,
                kr.target_direction,
            ))
        } else {
            LevelResult::no_data()
        };
        return KeyResultScore {
            id: kr.id.clone(),
            name: kr.name.clone(),
            aggregated_target: kr.target_value,
            aggregated_actual: kr.current_value,
            result,
        };
    }

    let targets = window_values(&kr.monthly_targets, months);
    let actuals = window_values(&kr.monthly_actual, months);

    if targets.is_empty() || actuals.is_empty() {
        return KeyResultScore {
            id: kr.id.clone(),
            name: kr.name.clone(),
            aggregated_target: Decimal::ZERO,
            aggregated_actual: Decimal::ZERO,
            result: LevelResult::no_data(),
        };
    }

    let target = aggregate(&targets, kr.aggregation_type);
    let actual = aggregate(&actuals, kr.aggregation_type);
    let percentage = achievement(target, actual, kr.target_direction);

    KeyResultScore {
        id: kr.id.clone(),
        name: kr.name.clone(),
        aggregated_target: target,
        aggregated_actual: actual,
        result: LevelResult::scored(percentage),
    }
}

/// Score an objective as the mean of its contributing KRs.
///
/// KRs silent for the window are excluded from the mean, not folded in as
/// zero, so objectives whose KRs start later in the year are not punished.
pub fn evaluate_objective(
    objective: &Objective,
    key_results: &[&KeyResult],
    months: &[MonthKey],
    use_weights: bool,
) -> ObjectiveScore {
    let scores: Vec<KeyResultScore> = key_results
        .iter()
        .map(|kr| evaluate_key_result(kr, months))
        .collect();

    let contributing: Vec<(&KeyResult, &KeyResultScore)> = key_results
        .iter()
        .copied()
        .zip(scores.iter())
        .filter(|(_, score)| score.result.has_data)
        .collect();

    let result = if contributing.is_empty() {
        LevelResult::no_data()
    } else if use_weights {
        let pairs: Vec<(Percent, Metric)> = contributing
            .iter()
            .map(|(kr, score)| (score.result.percentage, kr.weight))
            .collect();
        LevelResult::scored(rollup::weighted_mean(&pairs))
    } else {
        let percentages: Vec<Percent> = contributing
            .iter()
            .map(|(_, score)| score.result.percentage)
            .collect();
        LevelResult::scored(rollup::rollup_objective(&percentages))
    };

    ObjectiveScore {
        id: objective.id.clone(),
        name: objective.name.clone(),
        result,
        key_results: scores,
    }
}

/// Score a pillar as the mean of its objectives.
///
/// Unlike the KR gate, silent objectives fold into the pillar mean as zero;
/// that is the product's current reading of "no data" above the leaf level.
pub fn evaluate_pillar(
    pillar: &Pillar,
    objectives: &[&Objective],
    key_results: &[KeyResult],
    months: &[MonthKey],
    use_weights: bool,
) -> PillarScore {
    let scores: Vec<ObjectiveScore> = objectives
        .iter()
        .map(|objective| {
            let owned: Vec<&KeyResult> = key_results
                .iter()
                .filter(|kr| kr.objective_id == objective.id)
                .collect();
            evaluate_objective(objective, &owned, months, use_weights)
        })
        .collect();

    let percentages: Vec<Percent> = scores.iter().map(|s| s.result.percentage).collect();
    let has_data = scores.iter().any(|s| s.result.has_data);

    let result = if has_data {
        LevelResult::scored(rollup::rollup_pillar(&percentages))
    } else {
        LevelResult::no_data()
    };

    PillarScore {
        id: pillar.id.clone(),
        name: pillar.name.clone(),
        result,
        objectives: scores,
    }
}

/// Build the full company scorecard for one period selection.
pub fn build_scorecard(input: &ScorecardInput) -> OkrResult<ComputationOutput<CompanyScorecard>> {
    build_scorecard_on(input, Local::now().date_naive())
}

/// Deterministic variant: `today` anchors YTD resolution and the period label.
pub fn build_scorecard_on(
    input: &ScorecardInput,
    today: NaiveDate,
) -> OkrResult<ComputationOutput<CompanyScorecard>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let months = resolve_month_keys_on(&input.period, today)?;
    let period_label = input.period.label_on(today);

    let pillar_scores: Vec<PillarScore> = input
        .pillars
        .iter()
        .map(|pillar| {
            let owned: Vec<&Objective> = input
                .objectives
                .iter()
                .filter(|objective| objective.pillar_id == pillar.id)
                .collect();
            evaluate_pillar(pillar, &owned, &input.key_results, &months, input.use_weights)
        })
        .collect();

    let percentages: Vec<Percent> = pillar_scores.iter().map(|s| s.result.percentage).collect();
    let has_data = pillar_scores.iter().any(|s| s.result.has_data);

    let result = if has_data {
        LevelResult::scored(rollup::rollup_company(&percentages))
    } else {
        LevelResult::no_data()
    };

    let mut tally = BandTally::default();
    for pillar in &pillar_scores {
        for objective in &pillar.objectives {
            for kr in &objective.key_results {
                match kr.result.band {
                    Some(PerformanceBand::Critical) => tally.critical += 1,
                    Some(PerformanceBand::Attention) => tally.attention += 1,
                    Some(PerformanceBand::OnTarget) => tally.on_target += 1,
                    Some(PerformanceBand::Excellent) => tally.excellent += 1,
                    None => tally.no_data += 1,
                }
            }
        }
    }

    if !has_data {
        warnings.push(format!(
            "no key result carries data inside {period_label}; the scorecard reads as no data"
        ));
    }

    let scorecard = CompanyScorecard {
        period_label,
        months: months.clone(),
        result,
        pillars: pillar_scores,
        key_result_bands: tally,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "OKR scorecard rollup (windowed series aggregation, directional achievement, mean rollup)",
        &serde_json::json!({
            "period": scorecard.period_label,
            "months_in_window": months.len(),
            "use_weights": input.use_weights,
        }),
        warnings,
        elapsed,
        scorecard,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AggregationType, TargetDirection};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn series(entries: &[(&str, Decimal)]) -> BTreeMap<MonthKey, Metric> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect()
    }

    fn kr(
        id: &str,
        objective_id: &str,
        direction: TargetDirection,
        targets: &[(&str, Decimal)],
        actuals: &[(&str, Decimal)],
    ) -> KeyResult {
        KeyResult {
            id: id.to_string(),
            name: id.to_string(),
            objective_id: objective_id.to_string(),
            target_value: Decimal::ZERO,
            current_value: Decimal::ZERO,
            monthly_targets: series(targets),
            monthly_actual: series(actuals),
            aggregation_type: AggregationType::Sum,
            target_direction: direction,
            weight: Decimal::ONE,
        }
    }

    fn objective(id: &str, pillar_id: &str) -> Objective {
        Objective {
            id: id.to_string(),
            name: id.to_string(),
            pillar_id: pillar_id.to_string(),
        }
    }

    fn q1_months() -> Vec<MonthKey> {
        vec!["2024-01".into(), "2024-02".into(), "2024-03".into()]
    }

    #[test]
    fn test_ytd_with_partial_year_data() {
        // Absent February actual counts as zero once the KR has data.
        let kr = kr(
            "kr-1",
            "obj-1",
            TargetDirection::Maximize,
            &[("2024-01", dec!(10)), ("2024-02", dec!(10))],
            &[("2024-01", dec!(12))],
        );
        let months = vec!["2024-01".to_string(), "2024-02".to_string()];
        let score = evaluate_key_result(&kr, &months);

        assert_eq!(score.aggregated_target, dec!(20));
        assert_eq!(score.aggregated_actual, dec!(12));
        assert_eq!(score.result.percentage, dec!(60));
        assert!(score.result.has_data);
    }

    #[test]
    fn test_average_aggregation_uses_present_months_only() {
        let mut kr = kr(
            "kr-avg",
            "obj-1",
            TargetDirection::Maximize,
            &[("2024-01", dec!(10)), ("2024-02", dec!(10))],
            &[("2024-01", dec!(12))],
        );
        kr.aggregation_type = AggregationType::Average;
        let score = evaluate_key_result(&kr, &q1_months());

        assert_eq!(score.aggregated_target, dec!(10));
        assert_eq!(score.aggregated_actual, dec!(12));
        assert_eq!(score.result.percentage, dec!(120));
    }

    #[test]
    fn test_kr_without_actuals_in_window_sits_out() {
        let kr = kr(
            "kr-silent",
            "obj-1",
            TargetDirection::Maximize,
            &[("2024-01", dec!(10))],
            &[("2024-07", dec!(8))],
        );
        let score = evaluate_key_result(&kr, &q1_months());

        assert!(!score.result.has_data);
        assert_eq!(score.result.band, None);
        assert_eq!(score.result.percentage, dec!(0));
    }

    #[test]
    fn test_scalar_fallback_when_no_series_exist() {
        let mut kr = kr("kr-scalar", "obj-1", TargetDirection::Maximize, &[], &[]);
        kr.target_value = dec!(100);
        kr.current_value = dec!(50);
        let score = evaluate_key_result(&kr, &q1_months());

        assert!(score.result.has_data);
        assert_eq!(score.result.percentage, dec!(50));
        assert_eq!(score.aggregated_target, dec!(100));
    }

    #[test]
    fn test_scalar_fallback_with_zero_scalars_is_no_data() {
        let kr = kr("kr-empty", "obj-1", TargetDirection::Maximize, &[], &[]);
        let score = evaluate_key_result(&kr, &q1_months());
        assert!(!score.result.has_data);
        assert_eq!(score.result.band, None);
    }

    #[test]
    fn test_silent_kr_does_not_shift_objective_mean() {
        let obj = objective("obj-1", "pillar-1");
        let a = kr(
            "kr-a",
            "obj-1",
            TargetDirection::Maximize,
            &[("2024-01", dec!(100))],
            &[("2024-01", dec!(80))],
        );
        let b = kr(
            "kr-b",
            "obj-1",
            TargetDirection::Maximize,
            &[("2024-01", dec!(100))],
            &[("2024-01", dec!(100))],
        );
        let silent = kr("kr-c", "obj-1", TargetDirection::Maximize, &[], &[]);

        let with_silent =
            evaluate_objective(&obj, &[&a, &b, &silent], &q1_months(), false);
        let without_silent = evaluate_objective(&obj, &[&a, &b], &q1_months(), false);

        assert_eq!(with_silent.result.percentage, dec!(90));
        assert_eq!(
            with_silent.result.percentage,
            without_silent.result.percentage
        );
    }

    #[test]
    fn test_weighted_objective_rollup() {
        let obj = objective("obj-1", "pillar-1");
        let mut a = kr(
            "kr-a",
            "obj-1",
            TargetDirection::Maximize,
            &[("2024-01", dec!(100))],
            &[("2024-01", dec!(80))],
        );
        a.weight = dec!(1);
        let mut b = kr(
            "kr-b",
            "obj-1",
            TargetDirection::Maximize,
            &[("2024-01", dec!(100))],
            &[("2024-01", dec!(100))],
        );
        b.weight = dec!(3);

        let unweighted = evaluate_objective(&obj, &[&a, &b], &q1_months(), false);
        let weighted = evaluate_objective(&obj, &[&a, &b], &q1_months(), true);

        assert_eq!(unweighted.result.percentage, dec!(90));
        assert_eq!(weighted.result.percentage, dec!(95));
    }

    #[test]
    fn test_quarterly_pillar_rollup_scenario() {
        let input = ScorecardInput {
            pillars: vec![Pillar {
                id: "pillar-1".into(),
                name: "Growth".into(),
            }],
            objectives: vec![objective("obj-1", "pillar-1"), objective("obj-2", "pillar-1")],
            key_results: vec![
                kr(
                    "kr-1",
                    "obj-1",
                    TargetDirection::Maximize,
                    &[("2024-01", dec!(100))],
                    &[("2024-01", dec!(80))],
                ),
                kr(
                    "kr-2",
                    "obj-1",
                    TargetDirection::Maximize,
                    &[("2024-01", dec!(100))],
                    &[("2024-01", dec!(120))],
                ),
                kr(
                    "kr-3",
                    "obj-2",
                    TargetDirection::Minimize,
                    &[("2024-01", dec!(10))],
                    &[("2024-01", dec!(20))],
                ),
            ],
            period: PeriodSelection::Quarterly {
                year: 2024,
                quarter: 1,
            },
            use_weights: false,
        };

        let today = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        let output = build_scorecard_on(&input, today).unwrap();
        let card = &output.result;

        let pillar = &card.pillars[0];
        assert_eq!(pillar.objectives[0].result.percentage, dec!(100));
        assert_eq!(pillar.objectives[1].result.percentage, dec!(50));
        assert_eq!(pillar.result.percentage, dec!(75));
        assert_eq!(card.result.percentage, dec!(75));
        assert_eq!(card.period_label, "Q1 2024");
        assert_eq!(card.months, q1_months());
        assert_eq!(
            card.key_result_bands,
            BandTally {
                critical: 1,
                attention: 1,
                on_target: 0,
                excellent: 1,
                no_data: 0,
            }
        );
    }

    #[test]
    fn test_silent_objective_folds_into_pillar_mean_as_zero() {
        let pillar = Pillar {
            id: "pillar-1".into(),
            name: "Ops".into(),
        };
        let scored = objective("obj-1", "pillar-1");
        let childless = objective("obj-2", "pillar-1");
        let krs = vec![kr(
            "kr-1",
            "obj-1",
            TargetDirection::Maximize,
            &[("2024-01", dec!(100))],
            &[("2024-01", dec!(100))],
        )];

        let score = evaluate_pillar(
            &pillar,
            &[&scored, &childless],
            &krs,
            &q1_months(),
            false,
        );

        assert_eq!(score.objectives[1].result.band, None);
        assert!(!score.objectives[1].result.has_data);
        assert_eq!(score.result.percentage, dec!(50));
    }

    #[test]
    fn test_empty_scorecard_warns_and_reads_no_data() {
        let input = ScorecardInput {
            pillars: vec![Pillar {
                id: "pillar-1".into(),
                name: "Empty".into(),
            }],
            objectives: vec![],
            key_results: vec![],
            period: PeriodSelection::Yearly { year: 2024 },
            use_weights: false,
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let output = build_scorecard_on(&input, today).unwrap();

        assert!(!output.result.result.has_data);
        assert_eq!(output.result.result.band, None);
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_period_propagates() {
        let input = ScorecardInput {
            pillars: vec![],
            objectives: vec![],
            key_results: vec![],
            period: PeriodSelection::Monthly {
                year: 2024,
                month: 0,
            },
            use_weights: false,
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(build_scorecard_on(&input, today).is_err());
    }
}

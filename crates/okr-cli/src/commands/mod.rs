pub mod achievement;
pub mod aggregate;
pub mod classify;
pub mod period;
pub mod score;

use okr_core::PeriodSelection;

/// Build a period selection from the shared CLI flags.
pub(crate) fn parse_period(
    period: &str,
    year: Option<i32>,
    month: Option<u32>,
    quarter: Option<u32>,
) -> Result<PeriodSelection, Box<dyn std::error::Error>> {
    match period.to_lowercase().as_str() {
        "ytd" => Ok(PeriodSelection::Ytd),
        "monthly" => {
            let year = year.ok_or("--year is required for monthly periods")?;
            let month = month.ok_or("--month is required for monthly periods")?;
            Ok(PeriodSelection::Monthly { year, month })
        }
        "quarterly" => {
            let year = year.ok_or("--year is required for quarterly periods")?;
            let quarter = quarter.ok_or("--quarter is required for quarterly periods")?;
            Ok(PeriodSelection::Quarterly { year, quarter })
        }
        "yearly" => {
            let year = year.ok_or("--year is required for yearly periods")?;
            Ok(PeriodSelection::Yearly { year })
        }
        other => Err(format!(
            "Unknown period '{}'. Use: ytd, monthly, quarterly, yearly",
            other
        )
        .into()),
    }
}

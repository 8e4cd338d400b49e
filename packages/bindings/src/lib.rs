use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[napi]
pub fn build_scorecard(input_json: String) -> NapiResult<String> {
    let input: okr_core::scorecard::ScorecardInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = okr_core::scorecard::build_scorecard(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn key_result_score(kr_json: String, period_json: String) -> NapiResult<String> {
    let kr: okr_core::types::KeyResult =
        serde_json::from_str(&kr_json).map_err(to_napi_error)?;
    let period: okr_core::PeriodSelection =
        serde_json::from_str(&period_json).map_err(to_napi_error)?;
    let months = okr_core::period::resolve_month_keys(&period).map_err(to_napi_error)?;
    let score = okr_core::scorecard::evaluate_key_result(&kr, &months);
    serde_json::to_string(&score).map_err(to_napi_error)
}

#[napi]
pub fn resolve_period(period_json: String) -> NapiResult<String> {
    let period: okr_core::PeriodSelection =
        serde_json::from_str(&period_json).map_err(to_napi_error)?;
    let months = okr_core::period::resolve_month_keys(&period).map_err(to_napi_error)?;
    serde_json::to_string(&months).map_err(to_napi_error)
}

#[napi]
pub fn classify_percentage(percentage: String) -> NapiResult<String> {
    let pct: rust_decimal::Decimal = percentage.parse().map_err(to_napi_error)?;
    let band = okr_core::classify::classify(pct);
    serde_json::to_string(&band).map_err(to_napi_error)
}

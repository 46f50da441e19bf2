use rocket::serde::{Deserialize, Serialize};

use crate::catalog::{FormField, RouteSetup};
use crate::engine::format::MetricsView;
use crate::engine::samples::SampleRow;
use crate::models::{InputField, PnlMetrics, RawEstimateParams};

/// Query-string form of an estimate request. Every field is optional and
/// falls back to the configured defaults.
#[derive(Debug, Default, Deserialize, rocket::FromForm)]
pub struct EstimateQuery {
    pub price_a: Option<String>,
    pub price_b: Option<String>,
    pub trade_size: Option<String>,
    pub fee_bps_a: Option<String>,
    pub fee_bps_b: Option<String>,
    pub slippage_pct: Option<String>,
    pub gas_cost: Option<String>,

    pub dex_a: Option<String>,
    pub dex_b: Option<String>,
    pub pair: Option<String>,

    /// Exchange venues A and B (DEX, price and fee) after applying overrides.
    pub swap: Option<bool>,
}

/// A JSON input value: either a number or the raw text a user typed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    pub fn into_text(self) -> String {
        match self {
            NumericInput::Number(n) => n.to_string(),
            NumericInput::Text(s) => s,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RouteOverride {
    pub dex_a: Option<String>,
    pub dex_b: Option<String>,
    pub pair: Option<String>,
}

/// JSON body of `POST /api/v1/estimate`.
#[derive(Debug, Default, Deserialize)]
pub struct EstimateRequest {
    pub price_a: Option<NumericInput>,
    pub price_b: Option<NumericInput>,
    pub trade_size: Option<NumericInput>,
    pub fee_bps_a: Option<NumericInput>,
    pub fee_bps_b: Option<NumericInput>,
    pub slippage_pct: Option<NumericInput>,
    pub gas_cost: Option<NumericInput>,
    #[serde(default)]
    pub route: RouteOverride,
    #[serde(default)]
    pub swap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstimateStatus {
    Ok,
    Indeterminate,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub timestamp_utc: String,
    pub route: RouteSetup,
    pub inputs: RawEstimateParams,
    pub status: EstimateStatus,
    pub metrics: Option<PnlMetrics>,
    pub display: MetricsView,
    pub invalid_field: Option<InputField>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub route: RouteSetup,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub dexes: Vec<&'static str>,
    pub pairs: Vec<&'static str>,
    pub default_route: RouteSetup,
}

#[derive(Debug, Serialize)]
pub struct SamplesResponse {
    pub pair: String,
    pub seed: u64,
    pub generated_at_utc: String,
    pub rows: Vec<SampleRow>,
    pub disclaimer: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

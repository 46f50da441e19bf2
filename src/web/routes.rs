use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{catch, get, post, Request, State};
use std::sync::Arc;

use crate::bootstrap::AppState;
use crate::catalog::{form_fields, RouteError, RouteSetup, DEXES, PAIRS};
use crate::engine::calculator::Calculator;
use crate::engine::format::MetricsView;
use crate::engine::samples::DISCLAIMER;
use crate::models::{InputField, RawEstimateParams};
use crate::web::dto::{
    ErrorResponse, EstimateQuery, EstimateRequest, EstimateResponse, EstimateStatus, FormResponse,
    RoutesResponse, SamplesResponse,
};

pub type ApiError = Custom<Json<ErrorResponse>>;

fn bad_request(e: RouteError) -> ApiError {
    log::warn!("Rejected route: {}", e);
    Custom(Status::BadRequest, Json(ErrorResponse { error: e.to_string() }))
}

fn resolve_route(
    defaults: &RouteSetup,
    dex_a: Option<String>,
    dex_b: Option<String>,
    pair: Option<String>,
) -> Result<RouteSetup, ApiError> {
    let route = RouteSetup {
        dex_a: dex_a.unwrap_or_else(|| defaults.dex_a.clone()),
        dex_b: dex_b.unwrap_or_else(|| defaults.dex_b.clone()),
        pair: pair.unwrap_or_else(|| defaults.pair.clone()),
    };
    route.validate().map_err(bad_request)?;
    Ok(route)
}

fn respond(route: RouteSetup, inputs: RawEstimateParams, swap: bool) -> Json<EstimateResponse> {
    let mut calculator = Calculator::new(inputs);
    let route = if swap {
        calculator.swap_venues();
        route.swapped()
    } else {
        route
    };

    let (status, metrics, invalid_field, error) = match calculator.result() {
        Ok(metrics) => (EstimateStatus::Ok, Some(*metrics), None, None),
        Err(e) => {
            log::debug!("Indeterminate estimate: {}", e);
            (EstimateStatus::Indeterminate, None, Some(e.field()), Some(e.to_string()))
        }
    };

    Json(EstimateResponse {
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        display: MetricsView::render(metrics.as_ref(), &route),
        route,
        inputs: calculator.inputs().clone(),
        status,
        metrics,
        invalid_field,
        error,
    })
}

#[get("/api/v1/estimate?<query..>")]
pub fn estimate(
    query: EstimateQuery,
    app_state: &State<Arc<AppState>>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let route = resolve_route(&app_state.default_route, query.dex_a, query.dex_b, query.pair)?;

    let mut inputs = app_state.default_inputs.clone();
    let overrides = [
        (InputField::PriceA, query.price_a),
        (InputField::PriceB, query.price_b),
        (InputField::TradeSize, query.trade_size),
        (InputField::FeeBpsA, query.fee_bps_a),
        (InputField::FeeBpsB, query.fee_bps_b),
        (InputField::SlippagePct, query.slippage_pct),
        (InputField::GasCost, query.gas_cost),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            inputs.set(field, value);
        }
    }

    Ok(respond(route, inputs, query.swap.unwrap_or(false)))
}

#[post("/api/v1/estimate", format = "json", data = "<body>")]
pub fn estimate_json(
    body: Json<EstimateRequest>,
    app_state: &State<Arc<AppState>>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let body = body.into_inner();
    let route = resolve_route(
        &app_state.default_route,
        body.route.dex_a,
        body.route.dex_b,
        body.route.pair,
    )?;

    let mut inputs = app_state.default_inputs.clone();
    let overrides = [
        (InputField::PriceA, body.price_a),
        (InputField::PriceB, body.price_b),
        (InputField::TradeSize, body.trade_size),
        (InputField::FeeBpsA, body.fee_bps_a),
        (InputField::FeeBpsB, body.fee_bps_b),
        (InputField::SlippagePct, body.slippage_pct),
        (InputField::GasCost, body.gas_cost),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            inputs.set(field, value.into_text());
        }
    }

    Ok(respond(route, inputs, body.swap))
}

#[get("/api/v1/form?<dex_a>&<dex_b>&<pair>")]
pub fn form(
    dex_a: Option<String>,
    dex_b: Option<String>,
    pair: Option<String>,
    app_state: &State<Arc<AppState>>,
) -> Result<Json<FormResponse>, ApiError> {
    let route = resolve_route(&app_state.default_route, dex_a, dex_b, pair)?;
    let fields = form_fields(&route, &app_state.default_inputs);
    Ok(Json(FormResponse { route, fields }))
}

#[get("/api/v1/routes")]
pub fn route_catalog(app_state: &State<Arc<AppState>>) -> Json<RoutesResponse> {
    Json(RoutesResponse {
        dexes: DEXES.to_vec(),
        pairs: PAIRS.to_vec(),
        default_route: app_state.default_route.clone(),
    })
}

#[get("/api/v1/samples?<pair>")]
pub async fn samples(
    pair: Option<String>,
    app_state: &State<Arc<AppState>>,
) -> Result<Json<SamplesResponse>, ApiError> {
    let pair = pair.unwrap_or_else(|| app_state.default_pair.to_string());
    if !PAIRS.contains(&pair.as_str()) {
        return Err(bad_request(RouteError::UnknownPair(pair)));
    }

    let batch = app_state.samples.current().await;
    Ok(Json(SamplesResponse {
        rows: batch.for_pair(&pair),
        pair,
        seed: batch.seed,
        generated_at_utc: batch.generated_at.to_rfc3339(),
        disclaimer: DISCLAIMER,
    }))
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}

#[catch(default)]
pub fn default_catcher(status: Status, _req: &Request<'_>) -> ApiError {
    Custom(
        status,
        Json(ErrorResponse {
            error: status.reason().unwrap_or("error").to_string(),
        }),
    )
}

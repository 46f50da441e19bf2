// src/engine/estimator.rs
// ============================================================================
// Two-venue spread PnL estimator.
//
// Buy on the cheaper venue, sell on the dearer one. Slippage and taker fee both
// move each leg's execution price against us:
//   eff_buy  = buy  * (1 + slip) * (1 + fee_buy)
//   eff_sell = sell * (1 - slip) * (1 - fee_sell)
//   pnl      = trade_size / eff_buy * eff_sell - trade_size - gas
//
// Pure and synchronous. Either every metric is produced or InvalidInput is
// returned; never a partial result.
// ============================================================================

use thiserror::Error;

use crate::models::{EstimateParams, InputField, PnlMetrics, RawEstimateParams, Venue};

const BPS_PER_UNIT: f64 = 10_000.0;
const PCT_PER_UNIT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Unparseable,
    NonFinite,
    NotPositive,
    /// Effective buy or sell price collapsed to zero or below.
    Degenerate,
    /// Finite inputs whose products overflow `f64`.
    OutOfRange,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            InvalidReason::Unparseable => "not a number",
            InvalidReason::NonFinite => "not a finite number",
            InvalidReason::NotPositive => "must be greater than zero",
            InvalidReason::Degenerate => "leaves a non-positive effective price",
            InvalidReason::OutOfRange => "is too large to estimate",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput {
        field: InputField,
        reason: InvalidReason,
    },
}

impl EstimateError {
    fn invalid(field: InputField, reason: InvalidReason) -> Self {
        EstimateError::InvalidInput { field, reason }
    }

    pub fn field(&self) -> InputField {
        match self {
            EstimateError::InvalidInput { field, .. } => *field,
        }
    }
}

fn parse_field(raw: &RawEstimateParams, field: InputField) -> Result<f64, EstimateError> {
    let value: f64 = raw
        .get(field)
        .trim()
        .parse()
        .map_err(|_| EstimateError::invalid(field, InvalidReason::Unparseable))?;
    if !value.is_finite() {
        return Err(EstimateError::invalid(field, InvalidReason::NonFinite));
    }
    Ok(value)
}

/// Parse form text into numeric inputs. Fails on the first field (in
/// declaration order) that is not a finite number.
pub fn parse_params(raw: &RawEstimateParams) -> Result<EstimateParams, EstimateError> {
    Ok(EstimateParams {
        price_a: parse_field(raw, InputField::PriceA)?,
        price_b: parse_field(raw, InputField::PriceB)?,
        trade_size: parse_field(raw, InputField::TradeSize)?,
        fee_bps_a: parse_field(raw, InputField::FeeBpsA)?,
        fee_bps_b: parse_field(raw, InputField::FeeBpsB)?,
        slippage_pct: parse_field(raw, InputField::SlippagePct)?,
        gas_cost: parse_field(raw, InputField::GasCost)?,
    })
}

fn validate(params: &EstimateParams) -> Result<(), EstimateError> {
    for field in InputField::ALL {
        if !params.get(field).is_finite() {
            return Err(EstimateError::invalid(field, InvalidReason::NonFinite));
        }
    }
    // Prices and size are divisors below.
    for field in [InputField::PriceA, InputField::PriceB, InputField::TradeSize] {
        if params.get(field) <= 0.0 {
            return Err(EstimateError::invalid(field, InvalidReason::NotPositive));
        }
    }
    Ok(())
}

/// Estimate net PnL and the derived spread metrics for one trade.
pub fn estimate(params: &EstimateParams) -> Result<PnlMetrics, EstimateError> {
    validate(params)?;

    let slip = params.slippage_pct / PCT_PER_UNIT;

    // Ties buy on A.
    let buy_venue = if params.price_a <= params.price_b { Venue::A } else { Venue::B };
    let sell_venue = buy_venue.other();
    let buy_price = params.price(buy_venue);
    let sell_price = params.price(sell_venue);
    let buy_fee = params.fee_bps(buy_venue) / BPS_PER_UNIT;
    let sell_fee = params.fee_bps(sell_venue) / BPS_PER_UNIT;

    let eff_buy = buy_price * (1.0 + slip) * (1.0 + buy_fee);
    let eff_sell = sell_price * (1.0 - slip) * (1.0 - sell_fee);
    if !(eff_buy.is_finite() && eff_buy > 0.0) {
        let culprit = if 1.0 + slip <= 0.0 {
            InputField::SlippagePct
        } else {
            match buy_venue {
                Venue::A => InputField::FeeBpsA,
                Venue::B => InputField::FeeBpsB,
            }
        };
        return Err(EstimateError::invalid(culprit, InvalidReason::Degenerate));
    }
    // A non-positive sell price would make extra costs raise pnl.
    if 1.0 - slip <= 0.0 {
        return Err(EstimateError::invalid(InputField::SlippagePct, InvalidReason::Degenerate));
    }
    if 1.0 - sell_fee <= 0.0 {
        let culprit = match sell_venue {
            Venue::A => InputField::FeeBpsA,
            Venue::B => InputField::FeeBpsB,
        };
        return Err(EstimateError::invalid(culprit, InvalidReason::Degenerate));
    }

    let size = params.trade_size;
    let units_bought = size / eff_buy;
    let gross_proceeds = units_bought * eff_sell;
    let pnl = gross_proceeds - size - params.gas_cost;

    let spread_pct = (sell_price - buy_price) / buy_price * PCT_PER_UNIT;
    let net_spread_pct = (eff_sell - eff_buy) / eff_buy * PCT_PER_UNIT;
    let roi_pct = pnl / size * PCT_PER_UNIT;

    // Linear approximation: both fee legs, one slippage move per leg, gas as a
    // fraction of size. Cross terms are ignored.
    let breakeven_pct = (buy_fee + sell_fee + 2.0 * slip + params.gas_cost / size) * PCT_PER_UNIT;

    let metrics = PnlMetrics {
        buy_venue,
        sell_venue,
        eff_buy,
        eff_sell,
        units_bought,
        pnl,
        spread_pct,
        net_spread_pct,
        roi_pct,
        breakeven_pct,
    };
    if !metrics_finite(&metrics) {
        return Err(EstimateError::invalid(largest_input(params), InvalidReason::OutOfRange));
    }
    Ok(metrics)
}

fn metrics_finite(m: &PnlMetrics) -> bool {
    [
        m.eff_buy,
        m.eff_sell,
        m.units_bought,
        m.pnl,
        m.spread_pct,
        m.net_spread_pct,
        m.roi_pct,
        m.breakeven_pct,
    ]
    .iter()
    .all(|v| v.is_finite())
}

/// Field with the largest magnitude; blamed when the arithmetic overflows.
fn largest_input(params: &EstimateParams) -> InputField {
    InputField::ALL
        .into_iter()
        .max_by(|a, b| params.get(*a).abs().total_cmp(&params.get(*b).abs()))
        .unwrap_or(InputField::TradeSize)
}

/// Parse then estimate.
pub fn estimate_raw(raw: &RawEstimateParams) -> Result<PnlMetrics, EstimateError> {
    estimate(&parse_params(raw)?)
}

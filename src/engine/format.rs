// Display strings for estimator output. The estimator never rounds; all
// rounding for presentation happens here.

use rust_decimal::prelude::*;
use serde::Serialize;

use crate::catalog::RouteSetup;
use crate::models::PnlMetrics;

/// Shown in place of any value while the estimate is indeterminate.
pub const PLACEHOLDER: &str = "-";

const USD_MIN_FRACTION: usize = 2;
const USD_MAX_FRACTION: u32 = 6;

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// en-US currency formatting: `$1,234.56`, `-$8.00`, up to six fraction digits.
pub fn format_usd(n: f64) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let (text, negative) = match Decimal::from_f64(n) {
        Some(value) => {
            let rounded = value.round_dp_with_strategy(USD_MAX_FRACTION, RoundingStrategy::MidpointAwayFromZero);
            (rounded.abs().to_string(), rounded.is_sign_negative() && !rounded.is_zero())
        }
        // outside Decimal's range
        None => (format!("{:.*}", USD_MIN_FRACTION, n.abs()), n < 0.0),
    };

    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < USD_MIN_FRACTION {
        frac.push('0');
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, group_thousands(int_part), frac)
}

/// Fixed-point text with ties rounded away from zero: `2.5` at zero places
/// is `3`, not `2`.
pub fn format_fixed(n: f64, decimals: usize) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let value = match (u32::try_from(decimals), Decimal::from_f64(n)) {
        (Ok(dp), Some(value)) => value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        _ => {
            let n = if n == 0.0 { 0.0 } else { n };
            return format!("{:.*}", decimals, n);
        }
    };
    // no "-0.000"
    let value = if value.is_zero() { Decimal::ZERO } else { value };
    format!("{:.*}", decimals, value)
}

pub fn format_percent(n: f64, decimals: usize) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{}%", format_fixed(n, decimals))
}

/// A displayed value with an optional caption (venue name, token symbol).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub value: String,
    pub subtitle: String,
}

impl Stat {
    fn new(value: String, subtitle: impl Into<String>) -> Self {
        Self { value, subtitle: subtitle.into() }
    }

    fn placeholder() -> Self {
        Self::new(PLACEHOLDER.to_string(), "")
    }
}

/// Everything the calculator panel shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsView {
    pub gross_spread: Stat,
    pub net_spread: Stat,
    pub breakeven_spread: Stat,
    pub effective_buy: Stat,
    pub effective_sell: Stat,
    pub units_traded: Stat,
    pub net_pnl: Stat,
    pub roi: Stat,
    pub profitable: bool,
}

impl MetricsView {
    pub fn render(metrics: Option<&PnlMetrics>, route: &RouteSetup) -> Self {
        let Some(m) = metrics else {
            return Self {
                gross_spread: Stat::placeholder(),
                net_spread: Stat::placeholder(),
                breakeven_spread: Stat::placeholder(),
                effective_buy: Stat::placeholder(),
                effective_sell: Stat::placeholder(),
                units_traded: Stat::placeholder(),
                net_pnl: Stat::placeholder(),
                roi: Stat::placeholder(),
                profitable: false,
            };
        };

        Self {
            gross_spread: Stat::new(format_percent(m.spread_pct, 3), ""),
            net_spread: Stat::new(format_percent(m.net_spread_pct, 3), ""),
            breakeven_spread: Stat::new(format_percent(m.breakeven_pct, 3), ""),
            effective_buy: Stat::new(format_usd(m.eff_buy), route.venue_name(m.buy_venue)),
            effective_sell: Stat::new(format_usd(m.eff_sell), route.venue_name(m.sell_venue)),
            units_traded: Stat::new(format_fixed(m.units_bought, 6), route.token_pair().base),
            net_pnl: Stat::new(format_usd(m.pnl), ""),
            roi: Stat::new(format_percent(m.roi_pct, 2), ""),
            profitable: m.is_profitable(),
        }
    }
}

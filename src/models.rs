use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two venues being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    A,
    B,
}

impl Venue {
    pub fn other(self) -> Self {
        match self {
            Venue::A => Venue::B,
            Venue::B => Venue::A,
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::A => f.write_str("A"),
            Venue::B => f.write_str("B"),
        }
    }
}

/// Numeric estimator inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateParams {
    pub price_a: f64,       // quote per base unit on venue A
    pub price_b: f64,       // quote per base unit on venue B
    pub trade_size: f64,    // quote committed to the buy leg
    pub fee_bps_a: f64,     // taker fee, basis points
    pub fee_bps_b: f64,
    pub slippage_pct: f64,  // symmetric, percent
    pub gas_cost: f64,      // quote (USD), charged once
}

impl EstimateParams {
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::PriceA => self.price_a,
            InputField::PriceB => self.price_b,
            InputField::TradeSize => self.trade_size,
            InputField::FeeBpsA => self.fee_bps_a,
            InputField::FeeBpsB => self.fee_bps_b,
            InputField::SlippagePct => self.slippage_pct,
            InputField::GasCost => self.gas_cost,
        }
    }

    /// Price on the given venue.
    pub fn price(&self, venue: Venue) -> f64 {
        match venue {
            Venue::A => self.price_a,
            Venue::B => self.price_b,
        }
    }

    /// Taker fee on the given venue, in basis points.
    pub fn fee_bps(&self, venue: Venue) -> f64 {
        match venue {
            Venue::A => self.fee_bps_a,
            Venue::B => self.fee_bps_b,
        }
    }
}

/// Estimator inputs as the form layer hands them over: unparsed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEstimateParams {
    pub price_a: String,
    pub price_b: String,
    pub trade_size: String,
    pub fee_bps_a: String,
    pub fee_bps_b: String,
    pub slippage_pct: String,
    pub gas_cost: String,
}

impl Default for RawEstimateParams {
    fn default() -> Self {
        Self {
            price_a: "3000".to_string(),
            price_b: "3012".to_string(),
            trade_size: "1000".to_string(), // quote currency, e.g. USDC
            fee_bps_a: "30".to_string(),    // 0.30%
            fee_bps_b: "30".to_string(),
            slippage_pct: "0.20".to_string(),
            gas_cost: "8".to_string(),      // USD
        }
    }
}

impl RawEstimateParams {
    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::PriceA => &self.price_a,
            InputField::PriceB => &self.price_b,
            InputField::TradeSize => &self.trade_size,
            InputField::FeeBpsA => &self.fee_bps_a,
            InputField::FeeBpsB => &self.fee_bps_b,
            InputField::SlippagePct => &self.slippage_pct,
            InputField::GasCost => &self.gas_cost,
        }
    }

    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        let slot = match field {
            InputField::PriceA => &mut self.price_a,
            InputField::PriceB => &mut self.price_b,
            InputField::TradeSize => &mut self.trade_size,
            InputField::FeeBpsA => &mut self.fee_bps_a,
            InputField::FeeBpsB => &mut self.fee_bps_b,
            InputField::SlippagePct => &mut self.slippage_pct,
            InputField::GasCost => &mut self.gas_cost,
        };
        *slot = value.into();
    }
}

impl From<EstimateParams> for RawEstimateParams {
    fn from(p: EstimateParams) -> Self {
        Self {
            price_a: p.price_a.to_string(),
            price_b: p.price_b.to_string(),
            trade_size: p.trade_size.to_string(),
            fee_bps_a: p.fee_bps_a.to_string(),
            fee_bps_b: p.fee_bps_b.to_string(),
            slippage_pct: p.slippage_pct.to_string(),
            gas_cost: p.gas_cost.to_string(),
        }
    }
}

/// Names of the seven estimator inputs, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    PriceA,
    PriceB,
    TradeSize,
    FeeBpsA,
    FeeBpsB,
    SlippagePct,
    GasCost,
}

impl InputField {
    pub const ALL: [InputField; 7] = [
        InputField::PriceA,
        InputField::PriceB,
        InputField::TradeSize,
        InputField::FeeBpsA,
        InputField::FeeBpsB,
        InputField::SlippagePct,
        InputField::GasCost,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InputField::PriceA => "price_a",
            InputField::PriceB => "price_b",
            InputField::TradeSize => "trade_size",
            InputField::FeeBpsA => "fee_bps_a",
            InputField::FeeBpsB => "fee_bps_b",
            InputField::SlippagePct => "slippage_pct",
            InputField::GasCost => "gas_cost",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Full set of derived metrics for one estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlMetrics {
    pub buy_venue: Venue,
    pub sell_venue: Venue,
    pub eff_buy: f64,        // after slippage + fee, moves up
    pub eff_sell: f64,       // after slippage + fee, moves down
    pub units_bought: f64,   // base asset
    pub pnl: f64,            // quote, net of gas
    pub spread_pct: f64,
    pub net_spread_pct: f64,
    pub roi_pct: f64,
    pub breakeven_pct: f64,
}

impl PnlMetrics {
    pub fn is_profitable(&self) -> bool {
        self.pnl >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_field_names_match_serde() {
        for field in InputField::ALL {
            let json = serde_json::to_string(&field).expect("Failed to serialize field");
            assert_eq!(json, format!("\"{}\"", field.name()));
        }
    }

    #[test]
    fn test_raw_params_set_and_get() {
        let mut raw = RawEstimateParams::default();
        assert_eq!(raw.get(InputField::SlippagePct), "0.20");

        raw.set(InputField::GasCost, "12.5");
        assert_eq!(raw.gas_cost, "12.5");
        assert_eq!(raw.get(InputField::GasCost), "12.5");
    }

    #[test]
    fn test_venue_serializes_as_letter() {
        let json = serde_json::to_string(&Venue::B).expect("Failed to serialize venue");
        assert_eq!(json, "\"B\"");
        assert_eq!(Venue::A.other(), Venue::B);
    }

    #[test]
    fn test_params_venue_lookup() {
        let params = EstimateParams {
            price_a: 100.0,
            price_b: 101.0,
            trade_size: 10.0,
            fee_bps_a: 5.0,
            fee_bps_b: 7.0,
            slippage_pct: 0.1,
            gas_cost: 1.0,
        };
        assert_eq!(params.price(Venue::B), 101.0);
        assert_eq!(params.fee_bps(Venue::A), 5.0);
        assert_eq!(params.get(InputField::TradeSize), 10.0);
    }
}

use std::env;

use anyhow::{Context, Result};

use crate::catalog::RouteSetup;
use crate::models::{InputField, RawEstimateParams};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,

    // Synthetic sample table
    pub sample_refresh_secs: u64,

    // Calculator defaults (form values when a request leaves a field out)
    pub default_route: RouteSetup,
    pub default_inputs: RawEstimateParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_address: "0.0.0.0".to_string(),
            sample_refresh_secs: 5,
            default_route: RouteSetup::default(),
            default_inputs: RawEstimateParams::default(),
        }
    }
}

fn default_input_var(field: InputField) -> &'static str {
    match field {
        InputField::PriceA => "DEFAULT_PRICE_A",
        InputField::PriceB => "DEFAULT_PRICE_B",
        InputField::TradeSize => "DEFAULT_TRADE_SIZE",
        InputField::FeeBpsA => "DEFAULT_FEE_BPS_A",
        InputField::FeeBpsB => "DEFAULT_FEE_BPS_B",
        InputField::SlippagePct => "DEFAULT_SLIPPAGE_PCT",
        InputField::GasCost => "DEFAULT_GAS_COST",
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Local overrides first, then the generic .env
        dotenv::from_filename("config.env").ok();
        dotenv::dotenv().ok();

        let defaults = Config::default();

        let mut default_inputs = defaults.default_inputs;
        for field in InputField::ALL {
            if let Ok(value) = env::var(default_input_var(field)) {
                default_inputs.set(field, value);
            }
        }

        let config = Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(defaults.port),
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            sample_refresh_secs: env::var("SAMPLE_REFRESH_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse::<u64>()
                .unwrap_or(defaults.sample_refresh_secs)
                .max(1),
            default_route: RouteSetup {
                dex_a: env::var("DEFAULT_DEX_A").unwrap_or(defaults.default_route.dex_a),
                dex_b: env::var("DEFAULT_DEX_B").unwrap_or(defaults.default_route.dex_b),
                pair: env::var("DEFAULT_PAIR").unwrap_or(defaults.default_route.pair),
            },
            default_inputs,
        };

        config
            .default_route
            .validate()
            .context("DEFAULT_DEX_A / DEFAULT_DEX_B / DEFAULT_PAIR must name catalog entries")?;

        Ok(config)
    }
}

use chrono::Utc;

use crate::catalog::{RouteError, RouteSetup, TokenPair};
use crate::config::Config;
use crate::engine::samples::{clock_seed, SampleBatch, SampleBoard};
use crate::models::RawEstimateParams;

pub struct AppState {
    pub default_route: RouteSetup,
    pub default_pair: TokenPair,
    pub default_inputs: RawEstimateParams,

    // Synthetic sample table
    pub samples: SampleBoard,
    pub sample_refresh_secs: u64,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, RouteError> {
        let default_pair = config.default_route.validate()?;

        // Seed a batch up front so the table is never empty before the first tick
        let samples = SampleBoard::new(SampleBatch::generate(clock_seed(), Utc::now()));

        Ok(AppState {
            default_route: config.default_route.clone(),
            default_pair,
            default_inputs: config.default_inputs.clone(),
            samples,
            sample_refresh_secs: config.sample_refresh_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_from_default_config() {
        let state = AppState::new(&Config::default()).expect("Failed to build app state");
        assert_eq!(state.default_pair.base, "ETH");
        assert_eq!(state.default_inputs, RawEstimateParams::default());
    }

    #[test]
    fn test_app_state_rejects_bad_route() {
        let mut config = Config::default();
        config.default_route.dex_a = "Nowhere".to_string();
        assert!(AppState::new(&config).is_err());
    }
}

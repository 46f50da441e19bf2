use crate::engine::estimator::{estimate_raw, EstimateError};
use crate::models::{InputField, PnlMetrics, RawEstimateParams};

/// Holds the current form inputs and the latest estimate.
///
/// Every change replaces the stored result with a fresh call to the estimator;
/// nothing is carried over from the previous result.
#[derive(Debug, Clone)]
pub struct Calculator {
    inputs: RawEstimateParams,
    result: Result<PnlMetrics, EstimateError>,
}

impl Calculator {
    pub fn new(inputs: RawEstimateParams) -> Self {
        let result = estimate_raw(&inputs);
        Self { inputs, result }
    }

    pub fn inputs(&self) -> &RawEstimateParams {
        &self.inputs
    }

    pub fn result(&self) -> &Result<PnlMetrics, EstimateError> {
        &self.result
    }

    /// `None` while any input is invalid.
    pub fn metrics(&self) -> Option<&PnlMetrics> {
        self.result.as_ref().ok()
    }

    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        self.inputs.set(field, value);
        self.recompute();
    }

    /// Swap venue A and B inputs (price and fee) so they follow a route swap.
    pub fn swap_venues(&mut self) {
        std::mem::swap(&mut self.inputs.price_a, &mut self.inputs.price_b);
        std::mem::swap(&mut self.inputs.fee_bps_a, &mut self.inputs.fee_bps_b);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.result = estimate_raw(&self.inputs);
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(RawEstimateParams::default())
    }
}

pub mod calculator;
pub mod estimator;
pub mod format;
pub mod samples;

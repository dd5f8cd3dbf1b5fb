//! Completed conversions and their display form

use std::fmt;
use serde::{Deserialize, Serialize};
use unitwise_core::{Category, Unit};

/// Message shown when the engine has no conversion for a request
pub const FAILURE_MESSAGE: &str = "Conversion not possible!";

/// Digits kept from user input
const INPUT_DECIMALS: i32 = 2;

/// A successful conversion, as recorded by a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub value: f64,
    pub category: Category,
    pub from: Unit,
    pub to: Unit,
    /// Unrounded engine result
    pub result: f64,
}

impl Conversion {
    /// `"5.00 Meters = 16.4042 Feet"`
    pub fn summary(&self) -> String {
        format!("{:.2} {} = {:.4} {}", self.value, self.from, self.result, self.to)
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Magnitude from which an `f64` has no fractional digits left
const INTEGRAL_THRESHOLD: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round user input to the input precision.
///
/// Values too large to carry fractional digits are returned unchanged, so
/// scaling never overflows a finite input to infinity.
pub fn normalize_input(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= INTEGRAL_THRESHOLD {
        return value;
    }
    let scale = 10f64.powi(INPUT_DECIMALS);
    (value * scale).round() / scale
}

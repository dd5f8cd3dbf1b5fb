//! Unitwise Units - Unit conversion engine
//!
//! Converts values between units of the same category using a sparse table
//! of direct rules. Only pairs with a stored rule convert; there is no
//! multi-hop composition.
//!
//! Categories:
//! - Length (Meters, Kilometers, Miles, Feet, Centimeters)
//! - Weight (Kilograms, Grams, Pounds, Ounces)
//! - Temperature (Celsius, Fahrenheit, Kelvin) - non-linear transforms

mod rule;
mod table;
mod engine;

pub use rule::Rule;
pub use table::{RuleTable, RULES};
pub use engine::ConversionEngine;

pub use unitwise_core::{Category, ConversionError, Unit};

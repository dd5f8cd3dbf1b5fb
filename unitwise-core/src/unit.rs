//! Unit representation

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::{Category, ConversionError};

/// A named unit, member of exactly one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    // Length
    Meters,
    Kilometers,
    Miles,
    Feet,
    Centimeters,
    // Weight
    Kilograms,
    Grams,
    Pounds,
    Ounces,
    // Temperature
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl Unit {
    pub const ALL: [Unit; 12] = [
        Unit::Meters,
        Unit::Kilometers,
        Unit::Miles,
        Unit::Feet,
        Unit::Centimeters,
        Unit::Kilograms,
        Unit::Grams,
        Unit::Pounds,
        Unit::Ounces,
        Unit::Celsius,
        Unit::Fahrenheit,
        Unit::Kelvin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Meters => "Meters",
            Unit::Kilometers => "Kilometers",
            Unit::Miles => "Miles",
            Unit::Feet => "Feet",
            Unit::Centimeters => "Centimeters",
            Unit::Kilograms => "Kilograms",
            Unit::Grams => "Grams",
            Unit::Pounds => "Pounds",
            Unit::Ounces => "Ounces",
            Unit::Celsius => "Celsius",
            Unit::Fahrenheit => "Fahrenheit",
            Unit::Kelvin => "Kelvin",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Unit::Meters | Unit::Kilometers | Unit::Miles | Unit::Feet | Unit::Centimeters => {
                Category::Length
            }
            Unit::Kilograms | Unit::Grams | Unit::Pounds | Unit::Ounces => Category::Weight,
            Unit::Celsius | Unit::Fahrenheit | Unit::Kelvin => Category::Temperature,
        }
    }

    /// Resolve a unit name within a category.
    ///
    /// A name that exists but belongs to another category is unknown here.
    pub fn parse_in(name: &str, category: Category) -> Result<Unit, ConversionError> {
        category.unit(name).ok_or_else(|| ConversionError::UnknownUnit {
            unit: name.to_string(),
            category: category.name().to_string(),
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

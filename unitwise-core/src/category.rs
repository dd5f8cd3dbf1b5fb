//! Unit categories

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::{ConversionError, Unit};

/// A domain of commensurable units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Length,
    Weight,
    Temperature,
}

impl Category {
    /// All categories, in presentation order
    pub const ALL: [Category; 3] = [Category::Length, Category::Weight, Category::Temperature];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Temperature => "Temperature",
        }
    }

    /// Units belonging to this category, in presentation order
    pub fn units(&self) -> &'static [Unit] {
        match self {
            Category::Length => &[
                Unit::Meters,
                Unit::Kilometers,
                Unit::Miles,
                Unit::Feet,
                Unit::Centimeters,
            ],
            Category::Weight => &[Unit::Kilograms, Unit::Grams, Unit::Pounds, Unit::Ounces],
            Category::Temperature => &[Unit::Celsius, Unit::Fahrenheit, Unit::Kelvin],
        }
    }

    /// Look up a unit of this category by name
    pub fn unit(&self, name: &str) -> Option<Unit> {
        self.units().iter().copied().find(|u| u.name() == name)
    }

    pub fn contains(&self, unit: Unit) -> bool {
        unit.category() == *self
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ConversionError::UnknownCategory(s.to_string()))
    }
}

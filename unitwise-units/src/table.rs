//! Rule table - the direct conversions between units of a category

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use crate::{Category, Rule, Unit};

/// Global table of standard conversion rules
pub static RULES: LazyLock<Arc<RuleTable>> = LazyLock::new(|| Arc::new(RuleTable::standard()));

/// Rules keyed by (category, from unit), then by target unit.
///
/// The table is sparse and not symmetric: a missing entry means the
/// conversion is undefined, even when the reverse pair exists.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<Category, HashMap<Unit, HashMap<Unit, Rule>>>,
}

impl RuleTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table of length, weight and temperature rules
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.register_length_rules();
        table.register_weight_rules();
        table.register_temperature_rules();
        table
    }

    /// Builder: add or replace a rule.
    ///
    /// Both units are expected to belong to `category`; rules across
    /// categories are never looked up.
    pub fn with_rule(mut self, category: Category, from: Unit, to: Unit, rule: Rule) -> Self {
        self.insert(category, from, to, rule);
        self
    }

    /// Outgoing rules of a unit, if it has any entry in this category
    pub fn rules_from(&self, category: Category, from: Unit) -> Option<&HashMap<Unit, Rule>> {
        self.rules.get(&category)?.get(&from)
    }

    /// The direct rule for a pair, if one is stored
    pub fn get(&self, category: Category, from: Unit, to: Unit) -> Option<&Rule> {
        self.rules_from(category, from)?.get(&to)
    }

    /// Number of stored rules
    pub fn len(&self) -> usize {
        self.rules
            .values()
            .flat_map(|by_from| by_from.values())
            .map(|targets| targets.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, category: Category, from: Unit, to: Unit, rule: Rule) {
        self.rules
            .entry(category)
            .or_default()
            .entry(from)
            .or_default()
            .insert(to, rule);
    }

    fn linear(&mut self, category: Category, from: Unit, to: Unit, factor: f64) {
        self.insert(category, from, to, Rule::Linear(factor));
    }

    fn transform(&mut self, category: Category, from: Unit, to: Unit, g: fn(f64) -> f64) {
        self.insert(category, from, to, Rule::Transform(g));
    }

    fn register_length_rules(&mut self) {
        use Unit::*;
        let c = Category::Length;

        self.linear(c, Meters, Kilometers, 0.001);
        self.linear(c, Meters, Centimeters, 100.0);
        self.linear(c, Meters, Feet, 3.28084);

        self.linear(c, Kilometers, Meters, 1000.0);
        self.linear(c, Kilometers, Miles, 0.621371);

        self.linear(c, Miles, Kilometers, 1.60934);
        self.linear(c, Miles, Meters, 1609.34);

        self.linear(c, Feet, Meters, 0.3048);
        self.linear(c, Feet, Centimeters, 30.48);

        self.linear(c, Centimeters, Meters, 0.01);
        self.linear(c, Centimeters, Feet, 0.0328084);
    }

    fn register_weight_rules(&mut self) {
        use Unit::*;
        let c = Category::Weight;

        self.linear(c, Kilograms, Grams, 1000.0);
        self.linear(c, Kilograms, Pounds, 2.20462);

        // Grams has no path back to Pounds or Ounces
        self.linear(c, Grams, Kilograms, 0.001);

        self.linear(c, Pounds, Kilograms, 0.453592);
        self.linear(c, Pounds, Ounces, 16.0);

        self.linear(c, Ounces, Pounds, 0.0625);
    }

    fn register_temperature_rules(&mut self) {
        use Unit::*;
        let c = Category::Temperature;

        self.transform(c, Celsius, Fahrenheit, celsius_to_fahrenheit);
        self.transform(c, Celsius, Kelvin, celsius_to_kelvin);

        self.transform(c, Fahrenheit, Celsius, fahrenheit_to_celsius);
        self.transform(c, Fahrenheit, Kelvin, fahrenheit_to_kelvin);

        self.transform(c, Kelvin, Celsius, kelvin_to_celsius);
        self.transform(c, Kelvin, Fahrenheit, kelvin_to_fahrenheit);
    }
}

fn celsius_to_fahrenheit(c: f64) -> f64 {
    (c * 9.0 / 5.0) + 32.0
}

fn celsius_to_kelvin(c: f64) -> f64 {
    c + 273.15
}

fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

fn fahrenheit_to_kelvin(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0 + 273.15
}

fn kelvin_to_celsius(k: f64) -> f64 {
    k - 273.15
}

fn kelvin_to_fahrenheit(k: f64) -> f64 {
    (k - 273.15) * 9.0 / 5.0 + 32.0
}

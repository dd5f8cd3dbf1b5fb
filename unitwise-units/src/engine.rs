//! Conversion engine

use std::sync::Arc;
use crate::{Category, ConversionError, RuleTable, Unit, RULES};

/// Converts values using a shared, read-only rule table.
///
/// The engine is stateless: every call is a pure function of its inputs,
/// so a single engine can be cloned and shared across threads freely.
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    table: Arc<RuleTable>,
}

impl ConversionEngine {
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    /// Engine over the built-in rule table
    pub fn standard() -> Self {
        Self::new(RULES.clone())
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Convert `value` from one unit to another, or `None` when no
    /// conversion is defined for the request.
    pub fn convert(&self, value: f64, from: &str, to: &str, category: &str) -> Option<f64> {
        self.try_convert(value, from, to, category).ok()
    }

    /// Like [`convert`](Self::convert), reporting why a conversion is undefined.
    pub fn try_convert(
        &self,
        value: f64,
        from: &str,
        to: &str,
        category: &str,
    ) -> Result<f64, ConversionError> {
        // Identity wins over lookup, even for names the table has never seen
        if from == to {
            return Ok(value);
        }

        let category: Category = category.parse()?;
        let from = Unit::parse_in(from, category)?;
        let to = Unit::parse_in(to, category)?;

        self.apply(value, from, to, category)
    }

    /// Typed entry point
    pub fn convert_units(
        &self,
        value: f64,
        from: Unit,
        to: Unit,
        category: Category,
    ) -> Result<f64, ConversionError> {
        if from == to {
            return Ok(value);
        }

        for unit in [from, to] {
            if !category.contains(unit) {
                return Err(ConversionError::UnknownUnit {
                    unit: unit.name().to_string(),
                    category: category.name().to_string(),
                });
            }
        }

        self.apply(value, from, to, category)
    }

    /// Categories in presentation order
    pub fn list_categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    pub fn category_names(&self) -> Vec<&'static str> {
        Category::ALL.iter().map(|c| c.name()).collect()
    }

    /// Unit names of a category, in presentation order
    pub fn list_units(&self, category: &str) -> Result<Vec<&'static str>, ConversionError> {
        let category: Category = category.parse()?;
        Ok(category.units().iter().map(|u| u.name()).collect())
    }

    /// Units directly reachable from `from`, in presentation order
    pub fn targets(&self, from: Unit, category: Category) -> Vec<Unit> {
        match self.table.rules_from(category, from) {
            Some(rules) => category
                .units()
                .iter()
                .copied()
                .filter(|u| rules.contains_key(u))
                .collect(),
            None => Vec::new(),
        }
    }

    fn apply(
        &self,
        value: f64,
        from: Unit,
        to: Unit,
        category: Category,
    ) -> Result<f64, ConversionError> {
        // Presence in the table decides; a stored factor of 0 still applies
        match self.table.get(category, from, to) {
            Some(rule) => Ok(rule.apply(value)),
            None => Err(ConversionError::NoRuleDefined {
                from: from.name().to_string(),
                to: to.name().to_string(),
                category: category.name().to_string(),
            }),
        }
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::standard()
    }
}

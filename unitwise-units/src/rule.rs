//! Conversion rules

/// A directed conversion from one unit to another
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// `to = value * factor`
    Linear(f64),
    /// `to = g(value)`, for scales with different zero points
    Transform(fn(f64) -> f64),
}

impl Rule {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Rule::Linear(factor) => value * factor,
            Rule::Transform(g) => g(value),
        }
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, Rule::Linear(_))
    }

    /// The stored factor, if this is a linear rule
    pub fn factor(&self) -> Option<f64> {
        match self {
            Rule::Linear(factor) => Some(*factor),
            Rule::Transform(_) => None,
        }
    }
}

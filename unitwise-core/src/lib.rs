//! Unitwise Core - Fundamental types
//!
//! This crate provides the core types used throughout Unitwise:
//! - `Category`: The fixed set of unit categories
//! - `Unit`: The closed set of units, each owned by one category
//! - `ConversionError`: Why a conversion is undefined

mod category;
mod unit;
mod error;

pub use category::Category;
pub use unit::Unit;
pub use error::{ConversionError, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Category, Unit, ConversionError};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_unit_listed_under_its_category() {
        for category in Category::ALL {
            for unit in category.units() {
                assert_eq!(unit.category(), category);
            }
        }
    }

    #[test]
    fn test_unit_count() {
        let total: usize = Category::ALL.iter().map(|c| c.units().len()).sum();
        assert_eq!(total, Unit::ALL.len());
    }
}

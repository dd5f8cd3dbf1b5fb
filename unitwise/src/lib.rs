//! Unitwise - Unit conversion sessions
//!
//! The presentation layer around the conversion engine. A [`Session`]
//! collects conversion requests, keeps the most recent result and the
//! selected theme, formats results for display and exports the last
//! conversion as CSV.

mod config;
mod conversion;
mod error;
mod export;
mod session;
mod theme;

pub use config::{ShellConfig, ENV_EXPORT_DIR, ENV_THEME};
pub use conversion::{Conversion, normalize_input, FAILURE_MESSAGE};
pub use error::{codes, ErrorReport, ShellError};
pub use export::{to_csv, write_csv, CSV_HEADER, DEFAULT_FILE_NAME};
pub use session::Session;
pub use theme::Theme;

pub use unitwise_core::{Category, ConversionError, Unit};
pub use unitwise_units::ConversionEngine;

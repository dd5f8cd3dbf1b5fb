//! Conversion session
//!
//! Holds the per-user state the presentation layer needs between requests:
//! the selected theme and the most recent successful conversion. The engine
//! itself stays stateless, so a session can be reset or replaced at will.

use std::path::PathBuf;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info};
use unitwise_core::{Category, Unit};
use unitwise_units::ConversionEngine;
use crate::{normalize_input, to_csv, write_csv, Conversion, ShellConfig, ShellError, Theme};

#[derive(Debug, Clone)]
pub struct Session {
    engine: ConversionEngine,
    config: ShellConfig,
    theme: Theme,
    last: Option<Conversion>,
}

impl Session {
    pub fn new(engine: ConversionEngine, config: ShellConfig) -> Self {
        let theme = config.theme;
        Self {
            engine,
            config,
            theme,
            last: None,
        }
    }

    /// Session over the standard rule table, configured from the environment
    pub fn from_env() -> Self {
        Self::new(ConversionEngine::standard(), ShellConfig::from_env())
    }

    pub fn engine(&self) -> &ConversionEngine {
        &self.engine
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Convert a user-entered value and remember it as the last conversion.
    ///
    /// The value must be finite and non-negative; it is rounded to the input
    /// precision before conversion. A result that overflows to infinity is
    /// rejected. A failed request leaves the previous last conversion
    /// untouched.
    pub fn convert(
        &mut self,
        value: f64,
        category: &str,
        from: &str,
        to: &str,
    ) -> Result<&Conversion, ShellError> {
        if !value.is_finite() {
            return Err(ShellError::InvalidValue(format!("{} is not a finite number", value)));
        }
        if value < 0.0 {
            return Err(ShellError::InvalidValue(format!("{} is below the minimum of 0", value)));
        }
        let value = normalize_input(value);

        let category: Category = category.parse()?;
        let from = Unit::parse_in(from, category)?;
        let to = Unit::parse_in(to, category)?;

        let result = match self.engine.convert_units(value, from, to, category) {
            Ok(result) => result,
            Err(e) => {
                debug!("{} {} -> {} ({}): {}", value, from, to, category, e);
                return Err(e.into());
            }
        };
        if !result.is_finite() {
            return Err(ShellError::InvalidValue(format!(
                "{} {} is out of range in {}",
                value, from, to
            )));
        }

        let conversion = Conversion {
            value,
            category,
            from,
            to,
            result,
        };
        debug!("{}", conversion);

        Ok(self.last.insert(conversion))
    }

    pub fn last(&self) -> Option<&Conversion> {
        self.last.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Theme {
        if theme != self.theme {
            debug!("Theme: {} -> {}", self.theme, theme);
        }
        self.theme = theme;
        theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled())
    }

    /// Forget the last conversion and restore the configured theme
    pub fn reset(&mut self) {
        self.last = None;
        self.theme = self.config.theme;
    }

    /// Unit targets reachable from `from`, used to suggest alternatives
    pub fn suggestions(&self, category: &str, from: &str) -> Vec<&'static str> {
        let Ok(category) = category.parse::<Category>() else {
            return Vec::new();
        };
        match Unit::parse_in(from, category) {
            Ok(from) => self
                .engine
                .targets(from, category)
                .into_iter()
                .map(|u| u.name())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// CSV text of the last conversion
    pub fn export_csv(&self) -> Result<String, ShellError> {
        self.last.as_ref().map(to_csv).ok_or(ShellError::NothingToExport)
    }

    /// Write the last conversion into the configured export directory
    pub fn write_export(&self) -> Result<PathBuf, ShellError> {
        let conversion = self.last.as_ref().ok_or(ShellError::NothingToExport)?;
        let path = write_csv(conversion, &self.config.export_dir)?;
        info!("Exported last conversion to {}", path.display());
        Ok(path)
    }

    /// Current state for display
    pub fn snapshot(&self) -> JsonValue {
        json!({
            "theme": self.theme,
            "css": self.theme.css(),
            "last": self.last,
            "summary": self.last.as_ref().map(Conversion::summary),
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ConversionEngine::standard(), ShellConfig::default())
    }
}

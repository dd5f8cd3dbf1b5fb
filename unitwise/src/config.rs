//! Session configuration from the environment

use std::env;
use std::path::PathBuf;
use tracing::warn;
use crate::Theme;

/// Directory where exported CSV files are written
pub const ENV_EXPORT_DIR: &str = "UNITWISE_EXPORT_DIR";

/// Initial theme, `Light` or `Dark`
pub const ENV_THEME: &str = "UNITWISE_THEME";

#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub export_dir: PathBuf,
    pub theme: Theme,
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self::from_vars(env::var(ENV_EXPORT_DIR).ok(), env::var(ENV_THEME).ok())
    }

    fn from_vars(export_dir: Option<String>, theme: Option<String>) -> Self {
        let export_dir = export_dir
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let theme = match theme {
            Some(name) => name.parse::<Theme>().unwrap_or_else(|e| {
                warn!("{}; using {}", e, Theme::default());
                Theme::default()
            }),
            None => Theme::default(),
        };

        Self { export_dir, theme }
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::from_vars(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn test_from_vars() {
        let config = ShellConfig::from_vars(Some("/tmp/out".into()), Some("dark".into()));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn test_invalid_theme_falls_back() {
        let config = ShellConfig::from_vars(Some("  ".into()), Some("neon".into()));
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.theme, Theme::Light);
    }
}

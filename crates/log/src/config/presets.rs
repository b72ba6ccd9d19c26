//! Configuration presets for common scenarios

use super::{Config, FORMAT_ENV, Format, LEVEL_ENV};

impl Config {
    /// Create configuration from environment variables
    ///
    /// Unknown format names fall back to [`Format::Compact`].
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Parse CUSTODIAN_LOG or RUST_LOG
        if let Ok(level) = std::env::var(LEVEL_ENV) {
            config.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            config.level = level;
        }

        if let Ok(format) = std::env::var(FORMAT_ENV) {
            config.format = format.parse().unwrap_or_default();
        }

        // https://no-color.org
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.colors = false;
        }

        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_owned(),
            format: Format::Pretty,
            colors: true,
            target: true,
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_owned(),
            format: Format::Json,
            colors: false,
            target: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_is_machine_readable() {
        let config = Config::production();
        assert_eq!(config.format, Format::Json);
        assert!(!config.colors);
    }

    #[test]
    fn development_is_verbose() {
        let config = Config::development();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, Format::Pretty);
    }
}

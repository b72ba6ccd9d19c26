//! Logger configuration

mod presets;

use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;

use crate::error::LogError;

/// Environment variable holding the filter directive.
pub const LEVEL_ENV: &str = "CUSTODIAN_LOG";

/// Environment variable holding the output format name.
pub const FORMAT_ENV: &str = "CUSTODIAN_LOG_FORMAT";

/// Output format of diagnostic lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Single-line, human readable
    #[default]
    Compact,
    /// Multi-line, human readable
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for Format {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(LogError::Format(other.to_owned())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        })
    }
}

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `EnvFilter` directive, e.g. `warn` or `custodian_resource=debug`
    pub level: String,
    /// Output format
    pub format: Format,
    /// ANSI colors; defaults to whether stderr is a terminal
    pub colors: bool,
    /// Include the event target (module path)
    pub target: bool,
    /// Service name attached to a root span, if any
    pub service: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: Format::Compact,
            colors: std::io::stderr().is_terminal(),
            target: false,
            service: None,
        }
    }
}

impl Config {
    /// Override the filter directive.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Override the output format.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Attach a service name to every event through a root span.
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("compact", Format::Compact)]
    #[case("Pretty", Format::Pretty)]
    #[case(" JSON ", Format::Json)]
    fn format_parses_case_insensitively(#[case] input: &str, #[case] expected: Format) {
        assert_eq!(input.parse::<Format>(), Ok(expected));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert_eq!(
            "xml".parse::<Format>(),
            Err(LogError::Format("xml".to_owned()))
        );
    }

    #[test]
    fn default_is_quiet_compact() {
        let config = Config::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, Format::Compact);
        assert!(config.service.is_none());
    }

    #[test]
    fn colors_follow_stderr_terminal() {
        assert_eq!(Config::default().colors, std::io::stderr().is_terminal());
    }

    #[test]
    fn builders_override_fields() {
        let config = Config::default()
            .with_level("debug")
            .with_format(Format::Json)
            .with_service("custodian");
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, Format::Json);
        assert_eq!(config.service.as_deref(), Some("custodian"));
    }
}

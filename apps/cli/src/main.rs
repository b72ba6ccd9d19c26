//! Narrates the lifecycle of managed resources on stdout.

mod demo;

use anyhow::Context as _;
use clap::Parser;
use custodian_log::{Config, Format, LoggerBuilder};

#[derive(Debug, Parser)]
#[command(name = "custodian", version, about)]
struct Cli {
    /// Also demonstrate a resource whose acquisition fails
    #[arg(long)]
    inject_failure: bool,

    /// Log filter directive (overrides CUSTODIAN_LOG / RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Log output format: compact, pretty or json (overrides CUSTODIAN_LOG_FORMAT)
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<Format>,
}

impl Cli {
    fn log_config(&self) -> Config {
        let mut config = Config::from_env().with_service("custodian");
        if let Some(level) = &self.log_level {
            config = config.with_level(level.clone());
        }
        if let Some(format) = self.log_format {
            config = config.with_format(format);
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _log = LoggerBuilder::from_config(cli.log_config())
        .build()
        .context("failed to initialise logging")?;

    demo::run(&demo::Options {
        inject_failure: cli.inject_failure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_log_config() {
        let cli = Cli::parse_from([
            "custodian",
            "--log-level",
            "custodian_resource=debug",
            "--log-format",
            "json",
        ]);
        let config = cli.log_config();
        assert_eq!(config.level, "custodian_resource=debug");
        assert_eq!(config.format, Format::Json);
        assert!(!cli.inject_failure);
    }
}

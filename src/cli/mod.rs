//! Command-line interface.

pub mod analyze;
pub mod serve;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// 5W1H topic analysis service.
#[derive(Parser, Debug)]
#[command(name = "fivewh", version, about)]
pub struct Cli {
    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Bind address (overrides FIVEWH_BIND)
        #[arg(long)]
        bind: Option<String>,
        /// Port (overrides FIVEWH_PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Front-end directory served under /app (overrides FIVEWH_STATIC_DIR)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Analyze one topic and print the result as JSON
    Analyze {
        /// Profession to tailor the explanation to
        #[arg(long)]
        profession: String,
        /// Topic to explain
        #[arg(long)]
        topic: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the default
/// `info` level.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["fivewh"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_serve_overrides() {
        let cli =
            Cli::try_parse_from(["fivewh", "serve", "--port", "9000", "--log-format", "json"])
                .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Some(Command::Serve { port, bind, .. }) => {
                assert_eq!(port, Some(9000));
                assert!(bind.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_analyze_requires_both_args() {
        assert!(Cli::try_parse_from(["fivewh", "analyze", "--profession", "Nurse"]).is_err());
        let cli = Cli::try_parse_from([
            "fivewh",
            "analyze",
            "--profession",
            "Nurse",
            "--topic",
            "sepsis",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Command::Analyze { .. })));
    }
}

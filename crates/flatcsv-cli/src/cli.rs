//! CLI argument definitions for flatcsv.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "flatcsv",
    version,
    about = "Consolidate sharded MIMIC demo CSV folders into single CSVs",
    long_about = "Consolidate sharded CSV export folders into single flat CSV files.\n\n\
                  Each known table that was exported as a folder of shard files is merged\n\
                  into one CSV under <OUT>/hosp or <OUT>/icu. Zero-byte shards carry their\n\
                  row in the filename. Tables that are already flat files are left alone."
)]
pub struct Cli {
    /// Path to the hosp module directory.
    #[arg(long = "hosp", value_name = "DIR")]
    pub hosp: PathBuf,

    /// Path to the icu module directory.
    #[arg(long = "icu", value_name = "DIR")]
    pub icu: PathBuf,

    /// Output directory for flat CSVs (created if missing).
    #[arg(long = "out", value_name = "DIR", default_value = "flat_csv")]
    pub out: PathBuf,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_out_defaults_to_flat_csv() {
        let cli = Cli::try_parse_from(["flatcsv", "--hosp", "data/hosp", "--icu", "data/icu"])
            .unwrap();
        assert_eq!(cli.hosp, PathBuf::from("data/hosp"));
        assert_eq!(cli.icu, PathBuf::from("data/icu"));
        assert_eq!(cli.out, PathBuf::from("flat_csv"));
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_module_dirs_are_required() {
        assert!(Cli::try_parse_from(["flatcsv", "--hosp", "data/hosp"]).is_err());
        assert!(Cli::try_parse_from(["flatcsv", "--icu", "data/icu"]).is_err());
    }
}

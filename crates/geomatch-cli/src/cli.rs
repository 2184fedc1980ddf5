//! CLI argument definitions for geomatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "geomatch",
    version,
    about = "Match survey records to raw image records by GPS proximity",
    long_about = "Match lateral survey records to raw event/image records by GPS\n\
                  proximity, then collect the matched image files into one folder.\n\n\
                  The match step appends a 'Matched Filename' column to the lateral\n\
                  table; the collect step copies those files out of a source tree\n\
                  with collision-safe renaming."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match lateral survey rows to the nearest raw rows and write the
    /// matched table.
    Match(MatchArgs),

    /// Copy the files named in a matched table out of a source tree.
    Collect(CollectArgs),
}

#[derive(Args)]
pub struct MatchArgs {
    /// Lateral survey CSV. Prompted for interactively when omitted.
    #[arg(
        long = "lateral-file",
        alias = "lateral_file",
        value_name = "PATH"
    )]
    pub lateral_file: Option<PathBuf>,

    /// Raw event/image CSV. Prompted for interactively when omitted.
    #[arg(long = "raw-file", alias = "raw_file", value_name = "PATH")]
    pub raw_file: Option<PathBuf>,

    /// Output CSV file, or a directory to receive matched_output.csv.
    #[arg(
        long = "output",
        aliases = ["output_file", "output-file"],
        value_name = "PATH"
    )]
    pub output: Option<PathBuf>,

    /// Candidate pool policy.
    #[arg(long = "policy", value_enum, default_value = "with-removal")]
    pub policy: PolicyArg,

    /// Latitude share of the acceptance gate, in degrees. A match is
    /// rejected when its distance score exceeds the lat and lon shares
    /// combined. Both shares must be given together.
    #[arg(
        long = "max-lat-diff",
        value_name = "DEGREES",
        requires = "max_lon_diff"
    )]
    pub max_lat_diff: Option<f64>,

    /// Longitude share of the acceptance gate, in degrees.
    #[arg(
        long = "max-lon-diff",
        value_name = "DEGREES",
        requires = "max_lat_diff"
    )]
    pub max_lon_diff: Option<f64>,

    /// Write a machine-readable JSON run report to this path.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

#[derive(Args)]
pub struct CollectArgs {
    /// Folder searched recursively for the matched files. Prompted for when
    /// omitted.
    #[arg(
        long = "source-folder",
        alias = "source_folder",
        value_name = "PATH"
    )]
    pub source_folder: Option<PathBuf>,

    /// Folder the matches are copied into; created when missing. Prompted
    /// for when omitted.
    #[arg(
        long = "destination-folder",
        alias = "destination_folder",
        value_name = "PATH"
    )]
    pub destination_folder: Option<PathBuf>,

    /// Folder whose CSV files are offered in a numbered menu.
    #[arg(
        long = "csv-folder",
        alias = "csv_folder",
        value_name = "PATH",
        conflicts_with = "csv_file"
    )]
    pub csv_folder: Option<PathBuf>,

    /// Matched CSV to read directly, skipping the menu.
    #[arg(long = "csv-file", alias = "csv_file", value_name = "PATH")]
    pub csv_file: Option<PathBuf>,
}

/// CLI pool policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// One-to-one: each matched candidate leaves the pool.
    WithRemoval,
    /// One-to-many: candidates may match any number of rows.
    WithoutRemoval,
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
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_snake_case_aliases_parse() {
        let cli = Cli::try_parse_from([
            "geomatch",
            "match",
            "--lateral_file",
            "lateral.csv",
            "--raw_file",
            "raw.csv",
            "--output_file",
            "out",
        ])
        .unwrap();
        let Command::Match(args) = cli.command else {
            panic!("expected match subcommand");
        };
        assert_eq!(args.lateral_file.unwrap().to_str(), Some("lateral.csv"));
        assert_eq!(args.raw_file.unwrap().to_str(), Some("raw.csv"));
        assert_eq!(args.output.unwrap().to_str(), Some("out"));
    }

    #[test]
    fn test_threshold_flags_must_come_in_pairs() {
        let result = Cli::try_parse_from([
            "geomatch",
            "match",
            "--lateral-file",
            "a.csv",
            "--raw-file",
            "b.csv",
            "--output",
            "c.csv",
            "--max-lat-diff",
            "0.001",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_csv_folder_and_csv_file_conflict() {
        let result = Cli::try_parse_from([
            "geomatch",
            "collect",
            "--csv-folder",
            "folder",
            "--csv-file",
            "file.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_policy_defaults_to_with_removal() {
        let cli = Cli::try_parse_from(["geomatch", "match"]).unwrap();
        let Command::Match(args) = cli.command else {
            panic!("expected match subcommand");
        };
        assert!(matches!(args.policy, PolicyArg::WithRemoval));
    }
}

//! Command-line interface

use crate::models::SimulationParams;
use crate::types::OutputFormat;
use clap::parser::ValueSource;
use clap::{ArgMatches, FromArgMatches, Parser};
use std::path::PathBuf;

/// Argument ids of the four simulation inputs
const SIM_ARG_IDS: [&str; 4] = ["blocks", "parallelism", "users", "tx_per_user"];

/// Synthetic DAG simulator - emits deterministic performance metrics as JSON
#[derive(Parser, Debug, Clone)]
#[command(name = "dag-sim")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of blocks in the simulated run
    #[arg(
        long,
        env = "SIM_BLOCKS",
        allow_negative_numbers = true,
        required_unless_present_any = ["from_file", "env_example"]
    )]
    pub blocks: Option<i64>,

    /// Block parallelism factor
    #[arg(
        long,
        env = "SIM_PARALLELISM",
        allow_negative_numbers = true,
        required_unless_present_any = ["from_file", "env_example"]
    )]
    pub parallelism: Option<i64>,

    /// Number of concurrent simulated users
    #[arg(
        long,
        env = "SIM_USERS",
        allow_negative_numbers = true,
        required_unless_present_any = ["from_file", "env_example"]
    )]
    pub users: Option<i64>,

    /// Transactions issued per user
    #[arg(
        long = "tx-per-user",
        env = "SIM_TX_PER_USER",
        allow_negative_numbers = true,
        required_unless_present_any = ["from_file", "env_example"]
    )]
    pub tx_per_user: Option<i64>,

    /// Also run the threshold analyzer and emit {"results", "insights"}
    #[arg(long)]
    pub insights: bool,

    /// Analyze a previously emitted record instead of simulating
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output on stderr
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output on stderr
    #[arg(long)]
    pub debug: bool,

    /// Print an example .env file and exit
    #[arg(long)]
    pub env_example: bool,

    /// Set by [`Cli::from_matches`] when a simulation input was typed on the command line
    #[arg(skip)]
    pub sim_flags_on_command_line: bool,
}

impl Cli {
    /// Build from parsed matches, recording where the simulation inputs came from.
    ///
    /// Values supplied through `SIM_*` variables do not count as command-line flags.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut cli = Self::from_arg_matches(matches)?;
        cli.sim_flags_on_command_line = SIM_ARG_IDS
            .iter()
            .any(|id| matches.value_source(id) == Some(ValueSource::CommandLine));
        Ok(cli)
    }

    /// Simulation parameters, when all four were given
    pub fn params(&self) -> Option<SimulationParams> {
        Some(SimulationParams::new(
            self.blocks?,
            self.parallelism?,
            self.users?,
            self.tx_per_user?,
        ))
    }

    /// Whether this run analyzes a stored record
    pub fn is_file_mode(&self) -> bool {
        self.from_file.is_some()
    }

    /// Whether the analyzer runs
    pub fn wants_insights(&self) -> bool {
        self.insights || self.is_file_mode()
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Configuration Summary:\n");
        match (&self.from_file, self.params()) {
            (Some(path), _) => summary.push_str(&format!("  Record file: {}\n", path.display())),
            (None, Some(params)) => summary.push_str(&format!("  Parameters: {}\n", params)),
            (None, None) => summary.push_str("  Parameters: incomplete\n"),
        }
        summary.push_str(&format!("  Insights: {}\n", self.wants_insights()));
        summary.push_str(&format!("  Format: {}\n", self.format.as_str()));
        summary.push_str(&format!("  Pretty: {}\n", self.pretty));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        summary
    }
}

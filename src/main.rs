//! dag-sim - synthetic DAG performance simulator
//!
//! Emits one deterministic JSON record per run for a test harness to analyze.

use clap::CommandFactory;
use dag_simulator::{
    app::App,
    cli::Cli,
    config::EnvManager,
    error::ErrorReporter,
};
use std::process;

fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    // .env must be in the environment before clap reads the SIM_* fallbacks
    if let Err(e) = EnvManager::load_env_file() {
        ErrorReporter::new(false, false).report_error(&e);
        process::exit(e.exit_code());
    }

    let matches = Cli::command()
        .after_long_help(EnvManager::display_env_help())
        .get_matches();
    let cli = Cli::from_matches(&matches).unwrap_or_else(|e| e.exit());

    let reporter = ErrorReporter::new(!cli.no_color, cli.verbose || cli.debug);

    match App::new(cli).run() {
        Ok(output) => println!("{}", output),
        Err(e) => {
            reporter.report_error(&e);
            process::exit(e.exit_code());
        }
    }
}

// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use crate::core::planner::{ExecutionMode, TierSelector};
use crate::infra::logging;

pub mod commands;

use commands::init::DEFAULT_CATALOG_FILE;
use commands::run::RunOptions;

pub fn build_cli() -> Command {
    Command::new("tier-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Runs external test tools in priority tiers and writes JSON and HTML pass/fail reports.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Run the commands of one tier (or all tiers) and write the session report.")
                .arg(
                    Arg::new("tier")
                        .short('t')
                        .long("tier")
                        .help("Which tier to run. 1, 2 and 3 are aliases for critical, important and secondary.")
                        .value_name("TIER")
                        .default_value("critical")
                        .value_parser(clap::value_parser!(TierSelector))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .help("Run the commands of each tier on a bounded worker pool (default).")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("sequential")
                        .long("sequential")
                        .help("Run commands one at a time, in catalog order. Takes precedence over --parallel.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Tier catalog (TOML). The built-in catalog is used when omitted.")
                        .value_name("CONFIG")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("project-dir")
                        .long("project-dir")
                        .help("Directory commands run from.")
                        .value_name("PROJECT_DIR")
                        .default_value(".")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("results-dir")
                        .long("results-dir")
                        .help("Where test-report.json and test-report.html are written. Overrides the catalog.")
                        .value_name("RESULTS_DIR")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .help("Abandon any command that runs longer than this many seconds.")
                        .value_name("SECS")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help("Cap the number of concurrent commands in every tier.")
                        .value_name("JOBS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("threshold")
                        .long("threshold")
                        .help("Overall success rate (percent) required for a zero exit code.")
                        .value_name("PERCENT")
                        .value_parser(clap::value_parser!(f64))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .help("Log command spawns, exits and timeouts to stderr.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("init")
                .about("Write the default tier catalog to a file for editing.")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Catalog file to create.")
                        .value_name("OUTPUT")
                        .default_value(DEFAULT_CATALOG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help("Never prompt; refuse to overwrite an existing file.")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn run_options(matches: &ArgMatches) -> RunOptions {
    RunOptions {
        selector: matches
            .get_one::<TierSelector>("tier")
            .copied()
            .unwrap_or_default(),
        mode: ExecutionMode::from_sequential_flag(matches.get_flag("sequential")),
        config: matches.get_one::<PathBuf>("config").cloned(),
        project_dir: matches
            .get_one::<PathBuf>("project-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        results_dir: matches.get_one::<PathBuf>("results-dir").cloned(),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        jobs: matches.get_one::<usize>("jobs").copied(),
        threshold: matches.get_one::<f64>("threshold").copied(),
    }
}

/// Parses the process arguments and runs the chosen subcommand.
///
/// Returns whether the process should exit successfully: for `run`, whether
/// the overall success rate cleared the threshold.
pub async fn run() -> Result<bool> {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            logging::init_tracing(run_matches.get_flag("verbose"));
            let session = commands::run::execute(run_options(run_matches)).await?;
            Ok(session.report.threshold_met())
        }
        Some(("init", init_matches)) => {
            logging::init_tracing(false);
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE));
            commands::init::run_init(&output, init_matches.get_flag("non-interactive"))?;
            Ok(true)
        }
        // `subcommand_required` makes clap print help and exit before we get here.
        _ => Ok(true),
    }
}

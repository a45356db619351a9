//! ect-sim - ECT closed-loop scenario runner
//!
//! Runs the built-in controller scenarios and prints per-cycle logs or a
//! JSON report.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ect_core::build_info::IDENTITY;
use ect_sim::{Preset, Scenario, SimError, load_controller_config, load_scenario};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ect-sim")]
#[command(about = "ECT scenario runner - drive the error-correction controller against simple plants")]
#[command(version)]
#[command(long_about = "
ect-sim runs the error-correction transform controller in closed loop
against simple plant models and prints every control cycle.

Use --config to replace a preset's controller with a JSON or YAML file, or
--scenario to run a complete scenario file. The \"scenario\" object of a
--json report is itself a valid scenario file.
Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in scenarios
    List,

    /// Run a preset or a scenario file
    Run {
        /// Scenario to run
        #[arg(value_enum, required_unless_present = "scenario")]
        preset: Option<Preset>,

        /// Scenario file (.json, .yaml or .yml) to run instead of a preset
        #[arg(long, value_name = "FILE", conflicts_with = "preset")]
        scenario: Option<PathBuf>,

        /// Override the number of control cycles
        #[arg(long)]
        steps: Option<u32>,

        /// Controller configuration file (.json, .yaml or .yml)
        #[arg(long, value_name = "FILE", env = "ECT_SIM_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the SDK build identity
    Identity,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("ect_sim={},ect_core={}", log_level, log_level).into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(exit_code(&e))
        }
    }
}

fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .downcast_ref::<SimError>()
        .map_or(1, SimError::exit_code)
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::List => {
            output::print_presets(cli.json);
            Ok(())
        }
        Commands::Run {
            preset,
            scenario,
            steps,
            config,
        } => {
            let scenario = match (preset, scenario) {
                (_, Some(path)) => load_scenario(path)
                    .with_context(|| format!("Failed to load scenario {}", path.display()))?,
                (Some(preset), None) => preset.scenario(),
                (None, None) => anyhow::bail!("Either a preset or --scenario is required"),
            };
            run_scenario(scenario, *steps, config.as_deref(), cli.json)
        }
        Commands::Identity => {
            output::print_identity(&IDENTITY, cli.json);
            Ok(())
        }
    }
}

fn run_scenario(
    mut scenario: Scenario,
    steps: Option<u32>,
    config: Option<&std::path::Path>,
    json: bool,
) -> Result<()> {
    if let Some(steps) = steps {
        scenario = scenario.with_steps(steps);
    }
    if let Some(path) = config {
        let controller = load_controller_config(path)
            .with_context(|| format!("Failed to load controller config {}", path.display()))?;
        info!(path = %path.display(), "Using controller configuration from file");
        scenario = scenario.with_controller(controller);
    }

    let report = scenario
        .run()
        .with_context(|| format!("Scenario {} failed", scenario.name))?;
    output::print_run(&scenario, &report, json);
    Ok(())
}

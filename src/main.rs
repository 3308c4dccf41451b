//! User API Suite - black-box tests for a user registration/login/profile service
//!
//! A CLI tool that drives a running service through a fixed matrix of
//! scenarios and reports which of them behave as expected.
//!
//! ## Features
//!
//! - 24 scenarios across health, registration, login and user lookup
//! - Explicit scenario dependencies, resolved into a stable run order
//! - Run subsets by group or scenario id; dependencies are pulled in
//! - Multiple output formats (Table, Summary, JSON)
//!
//! ## Usage
//!
//! ```bash
//! # Run the whole matrix against the configured service
//! user-api-suite run
//!
//! # Point at another instance
//! user-api-suite run --host 10.0.0.5 --port 8080
//!
//! # Run one scenario and whatever it depends on
//! user-api-suite run --scenario user.get
//!
//! # List scenarios
//! user-api-suite list --detailed
//!
//! # Write an example configuration
//! user-api-suite config init
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

mod cli;
mod config;
mod error;
mod executor;
mod http;
mod models;
mod output;
mod scenarios;
mod utils;

use cli::Args;
use config::ServiceConfig;
use executor::{Selection, SuiteRunner};
use models::ScenarioGroup;
use output::{OutputFormat, ResultFormatter};
use scenarios::Identity;
use utils::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(LogLevel::from_verbose(args.verbose));

    match args.command {
        cli::Command::Run(run_args) => {
            run_suite(run_args).await?;
        }
        cli::Command::List(list_args) => {
            list_scenarios(list_args);
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args)?;
        }
    }

    Ok(())
}

/// Resolve the configuration file: explicit path first, then the search locations
fn config_path(explicit: Option<&str>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(PathBuf::from(path)),
        None => ServiceConfig::find().ok_or_else(|| {
            anyhow::anyhow!(
                "No configuration file found. Run `user-api-suite config init` or pass --config."
            )
        }),
    }
}

fn load_config(explicit: Option<&str>) -> Result<ServiceConfig> {
    let path = config_path(explicit)?;
    let config = ServiceConfig::load(&path)?;
    info!("Using configuration {}", path.display());
    Ok(config)
}

async fn run_suite(args: cli::RunArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?
        .with_overrides(args.host.as_deref(), args.port)
        .context("Invalid host/port override")?;

    let groups = args
        .group
        .iter()
        .map(|g| {
            ScenarioGroup::from_str(g).ok_or_else(|| anyhow::anyhow!("Unknown group: {g}"))
        })
        .collect::<Result<Vec<_>>>()?;
    let selection = Selection {
        groups,
        ids: args.scenario.clone(),
    };

    let format = OutputFormat::from_str(&args.format)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {}", args.format))?;
    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }

    let identity = Identity::generate();
    info!("Generated test user {} <{}>", identity.username, identity.email);
    let matrix = scenarios::matrix(&identity);

    let runner = SuiteRunner::new(config)?;
    info!("Testing service at {}", runner.config().base_url());
    let summary = runner.run_selected(&matrix, &selection).await?;

    println!("{}", formatter.format_summary(&summary)?);

    if !summary.is_all_passed() {
        anyhow::bail!(
            "{} of {} scenarios did not pass",
            summary.total - summary.passed,
            summary.total
        );
    }

    Ok(())
}

fn list_scenarios(args: cli::ListArgs) {
    let matrix = scenarios::matrix(&Identity::with_username("<generated>"));

    println!("\nUser API Scenarios ({} total)\n", matrix.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for group in ScenarioGroup::all() {
        println!("\n{group} Scenarios:");
        println!("──────────────────────────────────────────────────────────────────────");

        for scenario in matrix.iter().filter(|s| s.group == group) {
            println!("  {:34} {}", scenario.id.as_str(), scenario.description);

            if args.detailed {
                println!(
                    "  {:34}   {} {} -> {}",
                    "",
                    scenario.action.method(),
                    scenario.action.endpoint(),
                    scenario.expect
                );
                if !scenario.depends_on.is_empty() {
                    let deps: Vec<&str> = scenario.depends_on.iter().map(|d| d.as_str()).collect();
                    println!("  {:34}   after: {}", "", deps.join(", "));
                }
                if let Some(note) = &scenario.known_issue {
                    println!("  {:34}   known issue: {}", "", note);
                }
            }
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

fn manage_config(args: cli::ConfigArgs) -> Result<()> {
    match args.action {
        cli::ConfigAction::Init { output, force } => {
            let path = Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {output}. Use --force to overwrite."
                );
            }

            ServiceConfig::example().save(path)?;
            println!("✓ Configuration file created: {output}");
            println!("\nEdit the host section to point at your service.");
        }

        cli::ConfigAction::Show { config, format } => {
            let config = load_config(config.as_deref())?;
            let output = match format.as_str() {
                "json" => serde_json::to_string_pretty(&config)?,
                "yaml" => serde_yaml::to_string(&config)?,
                other => anyhow::bail!("Unknown config format: {other}"),
            };
            println!("{output}");
        }

        cli::ConfigAction::Validate { config } => {
            let path = config_path(config.as_deref())?;

            match ServiceConfig::load(&path) {
                Ok(config) => {
                    println!("✓ Configuration file is valid: {}", path.display());
                    println!("  Service: {}", config.base_url());
                }
                Err(e) => {
                    println!("✗ Configuration file is invalid: {}", path.display());
                    println!("  Error: {e}");
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}

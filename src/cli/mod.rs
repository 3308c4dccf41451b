//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Black-box test suite for the user registration/login/profile service
#[derive(Parser, Debug)]
#[command(name = "user-api-suite")]
#[command(version = "0.1.0")]
#[command(about = "Run the user API scenario matrix against a live service")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run scenarios against the service
    Run(RunArgs),

    /// List the scenario matrix
    List(ListArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Configuration file (searched in default locations when omitted)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the service host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the service port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Run only these groups (health, registration, login, user)
    #[arg(short, long)]
    pub group: Vec<String>,

    /// Run only these scenario ids, plus what they depend on
    #[arg(short, long)]
    pub scenario: Vec<String>,

    /// Output format (table, summary, json, json-pretty)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show dependencies, expectations and known issues
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "./configuration.yaml")]
        output: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved configuration
    Show {
        /// Configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Check a configuration file
    Validate {
        /// Configuration file
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["user-api-suite", "list", "--detailed"]);
        match args.command {
            Command::List(list_args) => {
                assert!(list_args.detailed);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_run_args() {
        let args = Args::parse_from([
            "user-api-suite",
            "run",
            "--host",
            "10.0.0.5",
            "--port",
            "8080",
            "--group",
            "login",
            "--scenario",
            "user.get",
            "--scenario",
            "health.status",
            "-v",
        ]);
        assert!(args.verbose);
        match args.command {
            Command::Run(run_args) => {
                assert_eq!(run_args.host.as_deref(), Some("10.0.0.5"));
                assert_eq!(run_args.port, Some(8080));
                assert_eq!(run_args.group, vec!["login"]);
                assert_eq!(run_args.scenario, vec!["user.get", "health.status"]);
                assert_eq!(run_args.format, "table");
                assert!(!run_args.no_color);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_config_init_defaults() {
        let args = Args::parse_from(["user-api-suite", "config", "init"]);
        match args.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { output, force },
            }) => {
                assert_eq!(output, "./configuration.yaml");
                assert!(!force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}

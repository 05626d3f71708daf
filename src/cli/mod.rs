//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Payment gateway conformance harness
#[derive(Parser, Debug)]
#[command(name = "gateway-conformance")]
#[command(version)]
#[command(about = "Check payment gateway implementations against the gateway contract")]
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
    /// Run conformance scenarios against reference gateways
    Test(TestArgs),

    /// List scenarios and reference gateways
    List(ListArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for test command
#[derive(Parser, Debug)]
pub struct TestArgs {
    /// Gateway to test (dummy, manual, offsite, all)
    #[arg(short, long)]
    pub gateway: Option<String>,

    /// Specific scenario number to run (1-26)
    #[arg(short, long, conflicts_with = "profile")]
    pub scenario: Option<u8>,

    /// Scenario profile to run (all, baseline, capabilities, propagation, or custom)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Skip specific scenarios (comma-separated scenario numbers)
    #[arg(long)]
    pub skip: Option<String>,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Save results to file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show detailed scenario information
    #[arg(short, long)]
    pub detailed: bool,

    /// Show reference gateways
    #[arg(short, long)]
    pub gateways: bool,
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
        #[arg(short, long, default_value = "./gateway-conformance.yaml")]
        output: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the effective configuration
    Show {
        /// Show environment variables instead
        #[arg(short, long)]
        env: bool,

        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,

        /// Configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file (defaults to the first one found)
        file: Option<String>,
    },

    /// List scenario profiles
    Profiles {
        /// Show profile details
        #[arg(short, long)]
        detailed: bool,

        /// Configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Describe environment variables
    Env,
}

//! gateway-conformance - payment gateway conformance harness
//!
//! Runs the 26 conformance scenarios against the bundled reference gateways
//! and reports the results.
//!
//! ## Usage
//!
//! ```bash
//! # Run every scenario against every reference gateway
//! gateway-conformance test
//!
//! # Run one scenario against one gateway
//! gateway-conformance test --gateway offsite --scenario 21
//!
//! # Run a profile and save JSON results
//! gateway-conformance test --profile propagation --format json --output results.json
//!
//! # List scenarios and gateways
//! gateway-conformance list --detailed --gateways
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};

mod cli;

use cli::Args;
use gateway_conformance::config::{self, ConfigFile, EnvConfig, HarnessConfig};
use gateway_conformance::gateways::ReferenceGateway;
use gateway_conformance::models::{Scenario, SCENARIO_COUNT};
use gateway_conformance::output::{write_results_to_file, OutputFormat, ResultFormatter};
use gateway_conformance::utils::{init_logger, LogLevel};

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    match args.command {
        cli::Command::Test(test_args) => run_tests(test_args, args.verbose),
        cli::Command::List(list_args) => {
            init_logger(log_level(args.verbose, LogLevel::Warn));
            list_scenarios(list_args);
            Ok(ExitCode::SUCCESS)
        }
        cli::Command::Config(config_args) => {
            init_logger(log_level(args.verbose, LogLevel::Warn));
            manage_config(config_args)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn log_level(verbose: bool, configured: LogLevel) -> LogLevel {
    if verbose {
        LogLevel::Debug
    } else {
        configured
    }
}

/// Load the config file named on the command line, in the environment, or
/// found in a standard location, in that order
fn load_config_file(explicit: Option<&str>, env: &EnvConfig) -> Result<ConfigFile> {
    match explicit.or(env.config_file.as_deref()) {
        Some(path) => ConfigFile::load(path),
        None => ConfigFile::load_default(),
    }
}

fn run_tests(args: cli::TestArgs, verbose: bool) -> Result<ExitCode> {
    let env = EnvConfig::load();
    let file = load_config_file(args.config.as_deref(), &env)?;

    // CLI flag > env > config file > defaults
    let mut harness: HarnessConfig = file.harness.clone();
    env.apply_to(&mut harness)?;
    if let Some(format) = &args.format {
        harness.format = OutputFormat::from_str(format)
            .with_context(|| format!("Unknown output format: {format}"))?;
    }
    if let Some(skip) = &args.skip {
        harness.skip_scenarios =
            config::parse_scenario_list(skip).context("Invalid --skip value")?;
    }
    if args.no_color {
        harness.colorize = false;
    }

    init_logger(log_level(verbose, harness.log_level));
    debug!("Effective harness configuration: {:?}", harness);

    let selection = args
        .gateway
        .clone()
        .unwrap_or_else(|| harness.default_gateway.clone());
    let gateways = if selection.eq_ignore_ascii_case("all") {
        ReferenceGateway::all()
    } else {
        vec![ReferenceGateway::from_str(&selection)
            .with_context(|| format!("Unknown gateway: {selection}"))?]
    };

    // --scenario wins over --profile
    let (scenarios, profile) = match (args.scenario, &args.profile) {
        (Some(number), _) => {
            let scenario = Scenario::from_number(number).with_context(|| {
                format!("Invalid scenario number: {number}. Valid range: 1-{SCENARIO_COUNT}")
            })?;
            (vec![scenario], None)
        }
        (None, Some(name)) => {
            let profile = file
                .scenario_profile(name)
                .with_context(|| format!("Unknown scenario profile: {name}"))?;
            (profile.resolve(), Some(profile))
        }
        (None, None) => (Scenario::all(), None),
    };

    let summaries: Vec<_> = gateways
        .iter()
        .map(|gateway| {
            info!("Testing {} Gateway ({} scenarios)", gateway, scenarios.len());
            let run_config = harness
                .run_config()
                .with_parameters(file.gateway_parameters(*gateway));
            match &profile {
                Some(profile) => gateway.run_profile(run_config, profile),
                None => gateway.run(run_config, &scenarios),
            }
        })
        .collect();

    let formatter = ResultFormatter::new(harness.format).colorize(harness.colorize);
    match (args.scenario, summaries.as_slice()) {
        (Some(_), [summary])
            if matches!(harness.format, OutputFormat::Table | OutputFormat::Summary) =>
        {
            for result in &summary.results {
                println!("{}", formatter.format_result(result));
            }
        }
        _ => println!("{}", formatter.format_report(&summaries)),
    }

    if let Some(output) = &args.output {
        write_results_to_file(output, &summaries, harness.format)?;
        eprintln!("Results saved to {output}");
    }

    if summaries.iter().all(|s| s.is_conformant()) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn list_scenarios(args: cli::ListArgs) {
    println!("\nConformance Scenarios ({SCENARIO_COUNT} total)\n");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut current_category = "";

    for scenario in Scenario::all() {
        let category = scenario.category();
        if category != current_category {
            if !current_category.is_empty() {
                println!();
            }
            println!("\n{category} Scenarios:");
            println!("──────────────────────────────────────────────────────────────────────");
            current_category = category;
        }

        match (args.detailed, scenario.capability()) {
            (true, Some(capability)) => println!(
                "  {:2}. {:28} [{}() / {}()]",
                scenario.number(),
                scenario.name(),
                capability.support_flag(),
                capability.name()
            ),
            _ => println!("  {:2}. {}", scenario.number(), scenario.name()),
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    if args.gateways {
        println!("Reference Gateways:\n");
        for gateway in ReferenceGateway::all() {
            let info = gateway.info();
            let capabilities: Vec<_> = info.capabilities.iter().map(|c| c.name()).collect();
            println!("  - {:10} {} ({})", gateway.name(), info.name, info.short_name);
            println!("      Capabilities: {}", capabilities.join(", "));
            if args.detailed {
                for parameter in &info.parameters {
                    println!("      Parameter: {parameter}");
                }
            }
        }
        println!();
    }
}

fn manage_config(args: cli::ConfigArgs) -> Result<()> {
    use config::ProfileManager;

    match args.action {
        cli::ConfigAction::Init { output, force } => {
            let path = Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {output}. Use --force to overwrite."
                );
            }

            let config = ConfigFile::example();
            config.save(path)?;
            println!("✓ Configuration file created: {output}");
            println!("\nEdit the file to customize your settings.");
        }

        cli::ConfigAction::Show {
            env,
            format,
            config,
        } => {
            let env_config = EnvConfig::load();
            if env {
                env_config.print_summary();
            } else {
                let file = load_config_file(config.as_deref(), &env_config)?;
                let output = if format == "json" {
                    serde_json::to_string_pretty(&file)?
                } else {
                    serde_yaml::to_string(&file)?
                };
                println!("{output}");
            }
        }

        cli::ConfigAction::Validate { file } => {
            let path = match file {
                Some(path) => path,
                None => ConfigFile::find()
                    .map(|p| p.to_string_lossy().to_string())
                    .context("No configuration file found")?,
            };

            match ConfigFile::load(&path) {
                Ok(_) => {
                    println!("✓ Configuration file is valid: {path}");
                }
                Err(e) => {
                    println!("✗ Configuration file is invalid: {path}");
                    println!("  Error: {e:#}");
                    return Err(e);
                }
            }
        }

        cli::ConfigAction::Profiles { detailed, config } => {
            let manager = match config {
                Some(path) => ConfigFile::load(path)?.profile_manager(),
                None => ProfileManager::with_custom(
                    &load_config_file(None, &EnvConfig::load())?.scenario_profiles,
                ),
            };

            println!("Scenario Profiles:");
            println!("{:-<60}", "");
            for profile in manager.list() {
                if detailed {
                    println!("  {}", profile.name);
                    println!("    Description: {}", profile.description);
                    println!("    Scenarios: {:?}", profile.scenarios);
                    println!("    Tags: {:?}", profile.tags);
                    println!();
                } else {
                    println!(
                        "  {:20} - {} ({} scenarios)",
                        profile.name,
                        profile.description,
                        profile.scenarios.len()
                    );
                }
            }
        }

        cli::ConfigAction::Env => {
            config::print_env_help();
        }
    }

    Ok(())
}

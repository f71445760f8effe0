//! simplus-policies - inspect the policy registry
//!
//! ## Usage
//!
//! ```bash
//! # Every registered policy, grouped by family
//! simplus-policies list
//!
//! # Only one family, as JSON
//! simplus-policies --format json list --family vm-scheduler
//!
//! # Check that an alias resolves and constructs
//! simplus-policies resolve cloudlet-scheduler CompletelyFair
//! simplus-policies resolve resource-provisioner Simple --kind Pe
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use simplus_core::CapabilityFamily;
use simplus_loader::{CanonicalId, PolicyLoader, DEFAULT_KIND};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Simplus: resolve simulation policy aliases
#[derive(Parser)]
#[command(name = "simplus-policies")]
#[command(about = "Inspect and check the simulation policy registry", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, global = true, env = "SIMPLUS_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered policies
    List {
        /// Only list this family
        #[arg(long, value_enum)]
        family: Option<FamilyArg>,
    },

    /// Resolve an alias and construct the policy once
    Resolve {
        /// Policy family
        #[arg(value_enum)]
        family: FamilyArg,

        /// Alias as written in a scenario (e.g. TimeShared)
        alias: String,

        /// Provisioner kind prefix (e.g. Pe); empty for the generic provisioner
        #[arg(long, default_value = DEFAULT_KIND)]
        kind: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum FamilyArg {
    VmScheduler,
    VmAllocationPolicy,
    CloudletScheduler,
    ResourceProvisioner,
    UtilizationModel,
}

impl From<FamilyArg> for CapabilityFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::VmScheduler => CapabilityFamily::VmScheduler,
            FamilyArg::VmAllocationPolicy => CapabilityFamily::VmAllocationPolicy,
            FamilyArg::CloudletScheduler => CapabilityFamily::CloudletScheduler,
            FamilyArg::ResourceProvisioner => CapabilityFamily::ResourceProvisioner,
            FamilyArg::UtilizationModel => CapabilityFamily::UtilizationModel,
        }
    }
}

/// Registered policies of one family
#[derive(Serialize)]
struct FamilyListing<'a> {
    family: CapabilityFamily,
    identifiers: Vec<&'a CanonicalId>,
}

/// Outcome of a successful resolution
#[derive(Serialize)]
struct ResolutionReport {
    family: CapabilityFamily,
    alias: String,
    identifier: CanonicalId,
    policy: String,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simplus=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let loader = PolicyLoader::global();

    match cli.command {
        Commands::List { family } => {
            let families = match family {
                Some(f) => vec![CapabilityFamily::from(f)],
                None => CapabilityFamily::ALL.to_vec(),
            };
            let listings: Vec<_> = families
                .into_iter()
                .map(|family| FamilyListing {
                    family,
                    identifiers: loader.registry().identifiers(family),
                })
                .collect();
            debug!(families = listings.len(), "listing registry");

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listings)?),
                OutputFormat::Text => {
                    for listing in &listings {
                        println!("{}:", listing.family);
                        for identifier in &listing.identifiers {
                            println!("  {:<28} {}", identifier.type_name(), identifier);
                        }
                    }
                }
            }
        }

        Commands::Resolve { family, alias, kind } => {
            let family = CapabilityFamily::from(family);
            let resolution = loader
                .resolve(family, &kind, &alias)
                .with_context(|| format!("cannot resolve {family} alias '{alias}'"))?;
            info!(%family, %alias, identifier = %resolution.identifier, "alias resolved");

            let report = ResolutionReport {
                family,
                alias,
                policy: resolution.policy.name().to_string(),
                identifier: resolution.identifier,
            };
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => println!(
                    "{} '{}' -> {} ({})",
                    report.family, report.alias, report.identifier, report.policy
                ),
            }
        }
    }

    Ok(())
}

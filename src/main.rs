use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use version_range::catalog::{FileCatalog, VersionCatalog, machine_pool_versions};
use version_range::config::{self, AppConfig};
use version_range::logging::init_logging;
use version_range::version::{MinimalVersionPolicy, VersionRange, format_major_minor_patch};

#[derive(Parser)]
#[command(name = "version-range")]
#[command(version, about = "Release version range filtering and machine pool version resolution")]
struct Cli {
    /// Path to the config file (defaults to $XDG_CONFIG_HOME/version-range/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the versions within an inclusive range, in input order
    Filter {
        #[arg(long)]
        min: String,
        #[arg(long)]
        max: String,
        /// Read versions from a JSON catalog file instead of arguments
        #[arg(long, conflicts_with = "versions")]
        catalog: Option<PathBuf>,
        versions: Vec<String>,
    },
    /// Print the minimal machine pool version for a control plane version
    Minimal { control_plane_version: String },
    /// Print a version reduced to major.minor.patch
    Format { version: String },
    /// Print the catalog versions a machine pool may run for a control plane version
    Available {
        #[arg(long)]
        catalog: PathBuf,
        control_plane_version: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let app_config = AppConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let _guard = init_logging(
        &app_config.log,
        cli.log_level.as_deref(),
        &config::data_dir(),
    )
    .context("Failed to initialize logging")?;
    debug!("Using config {:?}", app_config);

    let policy = app_config
        .minimal_policy()
        .context("Invalid machine pool configuration")?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command, &policy))
}

async fn run(command: Command, policy: &MinimalVersionPolicy) -> anyhow::Result<()> {
    match command {
        Command::Filter {
            min,
            max,
            catalog,
            versions,
        } => {
            let range = VersionRange::parse(&min, &max).context("Invalid version format")?;
            let versions = match catalog {
                Some(path) => FileCatalog::new(path).fetch_versions().await?,
                None => versions,
            };
            let matched = range.filter(&versions).context("Invalid version format")?;
            print_versions(&matched, &min, &max);
        }
        Command::Minimal {
            control_plane_version,
        } => {
            let minimal = policy
                .resolve(&control_plane_version)
                .context("Invalid version format")?;
            if minimal.floor_reached() {
                info!(
                    "Minimal version clamped to lowest supported version {}",
                    policy.lowest_supported()
                );
            }
            println!("{minimal}");
        }
        Command::Format { version } => {
            let formatted = format_major_minor_patch(&version).context("Invalid version format")?;
            println!("{formatted}");
        }
        Command::Available {
            catalog,
            control_plane_version,
        } => {
            let catalog = FileCatalog::new(catalog);
            let available = machine_pool_versions(&catalog, &control_plane_version, policy)
                .await
                .with_context(|| {
                    format!("Failed to resolve versions from catalog '{}'", catalog.name())
                })?;
            print_versions(
                &available.versions,
                available.minimal.as_str(),
                &control_plane_version,
            );
        }
    }
    Ok(())
}

fn print_versions(versions: &[String], min: &str, max: &str) {
    if versions.is_empty() {
        eprintln!("No versions match the range [{min}, {max}]");
        return;
    }
    for version in versions {
        println!("{version}");
    }
}

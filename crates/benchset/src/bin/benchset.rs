use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use benchset::error::{ProvisionError, cause_chain};
use benchset::loaders::{Sources, load_raw};
use benchset::provisioner::Provisioner;
use benchset_core::catalog::{DEFAULT_SEED, DatasetName};
use benchset_core::config::Settings;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every dataset name in the catalog
    List,
    /// Make sure a dataset exists in the store, building it if needed
    Provision {
        /// Catalog name, e.g. `gsm8k`
        name: String,
        /// Use the small test-mode sample and the `_test` storage key
        #[arg(long)]
        test_mode: bool,
        /// Sampling seed, only used by seeded datasets
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Load and print the source records without touching the store
    Load {
        name: String,
        #[arg(long)]
        test_mode: bool,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "benchset=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    let result = match cli.command {
        Commands::List => {
            for name in DatasetName::all() {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Provision {
            name,
            test_mode,
            seed,
        } => provision(&settings, &name, test_mode, seed).await,
        Commands::Load {
            name,
            test_mode,
            seed,
        } => load(&settings, &name, test_mode, seed).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", cause_chain(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}

async fn provision(
    settings: &Settings,
    name: &str,
    test_mode: bool,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let provisioner = Provisioner::from_settings(settings)?;
    let handle = provisioner.provision_by_name(name, test_mode, seed).await?;
    println!("{}", serde_json::to_string_pretty(&handle)?);
    Ok(())
}

async fn load(
    settings: &Settings,
    name: &str,
    test_mode: bool,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let name: DatasetName = name.parse().map_err(ProvisionError::from)?;
    let sources = Sources::from_settings(settings)
        .map_err(|e| ProvisionError::ClientInit(format!("dataset hub: {e}")))?;
    let records = load_raw(&sources, name, test_mode, seed)
        .await
        .map_err(ProvisionError::from)?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

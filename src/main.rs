//! Covid Dashboard
//!
//! Serves the dashboard, or prints a default config file or the dataset
//! summary.
//!
//! # Configuration
//!
//! Settings come from `--config`, else `<config dir>/covid-dashboard/config.toml`
//! or `./config.toml`, else defaults. `DASHBOARD_*` environment variables
//! override the file and command-line flags override both. `RUST_LOG` wins
//! over the configured log level.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use covid_dashboard::aggregate::{distinct_values, top_n_by_category, DashboardSummary};
use covid_dashboard::api::{serve, AppState};
use covid_dashboard::callbacks::CallbackRegistry;
use covid_dashboard::config::{generate_default_config, Config, LoadedConfig, LoggingConfig};
use covid_dashboard::dataset::{CategoryColumn, Dataset, NumericColumn};

#[derive(Parser)]
#[command(name = "covid-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Covid-19 dashboard analytics server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// CSV dataset path
    #[arg(short, long, global = true)]
    pub data: Option<String>,

    /// Host to bind to
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, global = true)]
    pub port: Option<u16>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard (default)
    Serve,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the summary card values
    Summary {
        /// Also print the top rankings for this continent
        #[arg(long)]
        continent: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        return write_default_config(output.as_ref());
    }

    let mut loaded = match &cli.config {
        Some(path) => LoadedConfig::from_path(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => Config::load_default(),
    };
    let config = &mut loaded.config;
    if let Some(data) = cli.data {
        config.dataset.path = data;
    }
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }

    init_tracing(&config.logging);
    loaded.log();
    let config = loaded.config;

    let dataset = match Dataset::load(&config.dataset.path) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!(path = %config.dataset.path, error = %e, "Dataset unavailable");
            return Err(e).with_context(|| format!("Cannot load dataset {}", config.dataset.path));
        }
    };

    match cli.command {
        Some(Commands::Summary { continent }) => {
            print_summary(&dataset, continent.as_deref(), config.dashboard.top_n);
            Ok(())
        }
        _ => {
            tracing::info!("Starting Covid dashboard v{}", env!("CARGO_PKG_VERSION"));

            let registry = CallbackRegistry::dashboard(config.dashboard.top_n)?;
            let state = AppState::new(dataset, registry, &config.dashboard, config.api.clone());

            serve(state, &config.api).await?;
            Ok(())
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("covid_dashboard={},tower_http=info", logging.level))
    });
    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().pretty()).init();
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)
                .with_context(|| format!("Failed to write config {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

fn print_summary(dataset: &Dataset, continent: Option<&str>, top_n: usize) {
    let summary = DashboardSummary::compute(dataset);

    println!("Source: {}", dataset.source());
    println!();
    println!("{:<22} {:>14}", "Number of Countries", summary.countries);
    println!("{:<22} {:>14}", "Number of Continents", summary.continents);
    println!("{:<22} {:>14}", "Total Cases", summary.total_cases);
    println!("{:<22} {:>14}", "Total Deaths", summary.total_deaths);
    println!();
    println!(
        "Continents: {}",
        distinct_values(dataset, CategoryColumn::Continent).join(", ")
    );

    let Some(continent) = continent else {
        return;
    };

    for metric in [NumericColumn::TotalCases, NumericColumn::TotalDeaths] {
        println!();
        println!("Ranking of {} in {}", metric.header(), continent);
        println!("{}", "-".repeat(40));

        let top = top_n_by_category(
            dataset,
            CategoryColumn::Continent,
            continent,
            metric,
            top_n,
        );
        if top.is_empty() {
            println!("No data for {}", continent);
        }
        for record in top.iter().rev() {
            println!("{:<24} {:>14}", record.country, metric.value(record));
        }
    }
}

//! Tanawal CLI - inspect and moderate the food marketplace from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Available Pakistani dishes rated 4+
//! tanawal foods list --cuisine pakistani --availability available --min-rating 4
//!
//! # Dashboard numbers
//! tanawal orders kpis
//!
//! # Block a user
//! tanawal users block 42 --reason "payment fraud"
//!
//! # Normalize a saved API payload without touching the network
//! tanawal normalize food payload.json
//! ```
//!
//! # Environment Variables
//!
//! See `tanawal_admin::config` for the full list. `RUST_LOG` overrides the
//! default log filter and `TANAWAL_LOG_JSON` switches logs to JSON.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tanawal_admin::AdminConfig;

mod commands;

use commands::{CliError, deliveries, foods, normalize, orders, users};

#[derive(Parser)]
#[command(name = "tanawal")]
#[command(author, version, about = "Tanawal admin tools")]
struct Cli {
    /// Print records as JSON instead of summary lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and moderate food listings
    Foods {
        #[command(subcommand)]
        action: foods::FoodAction,
    },
    /// Browse and moderate app users
    Users {
        #[command(subcommand)]
        action: users::UserAction,
    },
    /// Browse and update orders
    Orders {
        #[command(subcommand)]
        action: orders::OrderAction,
    },
    /// Browse and dispatch deliveries
    Deliveries {
        #[command(subcommand)]
        action: deliveries::DeliveryAction,
    },
    /// Normalize a JSON payload read from a file
    Normalize(normalize::NormalizeArgs),
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    if let Some(id) = config.admin_user_id {
        tanawal_admin::error::set_sentry_user(id);
    }
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(with_sentry: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tanawal_cli=info,tanawal_admin=info".into());

    // stdout carries command output; logs go to stderr
    let json = std::env::var_os("TANAWAL_LOG_JSON").is_some();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    let sentry_layer =
        with_sentry.then(|| sentry_tracing::layer().event_filter(sentry_event_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_layer)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AdminConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(2);
        }
    };

    let sentry_guard = init_sentry(&config);
    init_tracing(sentry_guard.is_some());

    if let Err(e) = run(cli, config).await {
        match &e {
            CliError::Admin(admin) => admin.report(),
            other => tracing::error!(error = %other, "Command failed"),
        }
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: AdminConfig) -> Result<(), CliError> {
    let out = commands::Output::new(cli.json);
    match cli.command {
        Commands::Foods { action } => foods::run(&config, action, out).await,
        Commands::Users { action } => users::run(&config, action, out).await,
        Commands::Orders { action } => orders::run(&config, action, out).await,
        Commands::Deliveries { action } => deliveries::run(&config, action, out).await,
        Commands::Normalize(args) => normalize::run(&args, out),
    }
}

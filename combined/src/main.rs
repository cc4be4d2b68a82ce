//! Combined binary for development - runs all services in one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "listings-platform")]
#[command(about = "Combined listings platform binary for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "6000")]
        gateway_port: u16,
        #[arg(long, default_value = "6555")]
        listings_port: u16,
        #[arg(long, default_value = "6524")]
        users_port: u16,
    },
    /// Run database migrations for both stores
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            gateway_port,
            listings_port,
            users_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  Gateway:        http://{}:{}", host, gateway_port);
            info!("  Listings store: http://{}:{}", host, listings_port);
            info!("  Users store:    http://{}:{}", host, users_port);

            // Spawn the stores first (they own the databases)
            let listings_host = host.clone();
            let listings_handle = tokio::spawn(async move {
                if let Err(e) = listings_store_lib::run_embedded(&listings_host, listings_port).await
                {
                    error!("Listings store failed: {}", e);
                }
            });

            let users_host = host.clone();
            let users_handle = tokio::spawn(async move {
                if let Err(e) = users_store_lib::run_embedded(&users_host, users_port).await {
                    error!("Users store failed: {}", e);
                }
            });

            // Gateway runs in the foreground and fans out to the local stores
            let listings_url = format!("http://{}:{}", host, listings_port);
            let users_url = format!("http://{}:{}", host, users_port);
            if let Err(e) = gateway_lib::run_embedded(&host, gateway_port, listings_url, users_url).await
            {
                error!("Gateway failed: {}", e);
            }

            listings_handle.abort();
            users_handle.abort();
        }
        Commands::Migrate { action } => {
            let (listings_action, users_action) = match action {
                MigrateAction::Up => (
                    listings_store_lib::MigrateAction::Up,
                    users_store_lib::MigrateAction::Up,
                ),
                MigrateAction::Down => (
                    listings_store_lib::MigrateAction::Down,
                    users_store_lib::MigrateAction::Down,
                ),
                MigrateAction::Status => (
                    listings_store_lib::MigrateAction::Status,
                    users_store_lib::MigrateAction::Status,
                ),
                MigrateAction::Fresh => (
                    listings_store_lib::MigrateAction::Fresh,
                    users_store_lib::MigrateAction::Fresh,
                ),
            };

            listings_store_lib::run_migrations(listings_action).await?;
            users_store_lib::run_migrations(users_action).await?;
        }
    }

    Ok(())
}

mod config;
mod email;
mod error;
mod handlers;
mod identity;
mod metrics;
mod server;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tripshare_access::{AccessConfig, AccessService, BaseUrlLinks, DisabledNotifier, Notifier};
use tripshare_storage::{CreateUserParams, Store};
use tripshare_store_sqlite::SqliteStore;

use config::ServerConfig;
use email::EmailNotifier;
use server::{router, AppState};

// ────────────────────────────────────── CLI Types ──────────────────────────────────────

#[derive(Parser)]
#[command(name = "tripshare-server")]
#[command(about = "Tripshare server CLI for administration and serving")]
struct Cli {
    /// Database URL (sqlite://path/to/db.db)
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        default_value = "sqlite://tripshare.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Server address
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: String,
    },
    /// Apply database migrations and exit
    Migrate,
    /// User management commands
    User {
        #[command(subcommand)]
        user_cmd: UserCommand,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Register a user mirrored from the identity provider
    Add {
        email: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
}

// ────────────────────────────────────── Commands ──────────────────────────────────────

fn notifier_from(config: &ServerConfig) -> Result<Arc<dyn Notifier>, email::EmailError> {
    match &config.email {
        Some(email) => {
            let notifier = EmailNotifier::from_config(email)?;
            info!(from = %email.from_address, "email delivery enabled");
            Ok(Arc::new(notifier))
        }
        None => {
            warn!("email delivery not configured; invitation emails will not be sent");
            Ok(Arc::new(DisabledNotifier))
        }
    }
}

async fn cmd_serve(database_url: &str, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = addr.parse()?;
    let config = ServerConfig::from_env()?;

    let store = Arc::new(SqliteStore::open_with_timeout(database_url, config.io_timeout).await?);
    let links = Arc::new(BaseUrlLinks::new(&config.public_url)?);
    let notifier = notifier_from(&config)?;
    let access = AccessService::new(
        store,
        links,
        notifier,
        AccessConfig {
            default_invite_days: config.default_invite_days,
            io_timeout: config.io_timeout,
            ..AccessConfig::default()
        },
    );
    let metrics = metrics::init_metrics()?;

    let (readiness_tx, readiness_rx) = watch::channel(false);
    let app = router(AppState {
        access,
        metrics: Some(metrics),
        ready: readiness_rx,
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, public_url = %config.public_url, "tripshare-server listening");
    let _ = readiness_tx.send(true);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(readiness_tx))
        .await?;

    info!("server stopped");
    Ok(())
}

async fn cmd_migrate(database_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    SqliteStore::open(database_url).await?;
    info!("migrations applied");
    Ok(())
}

async fn cmd_user_add(
    database_url: &str,
    email: String,
    first_name: String,
    last_name: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open(database_url).await?;
    let user = store
        .create_user(&CreateUserParams {
            email,
            first_name,
            last_name,
        })
        .await?;
    println!("{}", user.id);
    Ok(())
}

async fn shutdown_signal(readiness_tx: watch::Sender<bool>) {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("received SIGINT, shutting down gracefully"),
        _ = terminate => info!("received SIGTERM, shutting down gracefully"),
    }

    // Mark not ready for the drain.
    let _ = readiness_tx.send(false);
}

// ────────────────────────────────────── Main ──────────────────────────────────────

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { addr } => cmd_serve(&cli.database_url, &addr).await?,
        Command::Migrate => cmd_migrate(&cli.database_url).await?,
        Command::User { user_cmd } => match user_cmd {
            UserCommand::Add {
                email,
                first_name,
                last_name,
            } => cmd_user_add(&cli.database_url, email, first_name, last_name).await?,
        },
    }

    Ok(())
}

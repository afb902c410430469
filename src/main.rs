use bookshelf::BookService;
use bookshelf::error::{ErrorKind, Result};
use bookshelf_catalog::{Database, Repository};
use bookshelf_config::Config;
use clap::Parser;
use exn::ResultExt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Book catalog ingestion server.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML configuration file (defaults to `bookshelf.toml` if present).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Address to listen on, overriding the configured one.
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = ?err, "Server exited with an error");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    let db = Database::connect(&config.database_url).await.or_raise(|| ErrorKind::Catalog)?;
    let service = BookService::new(Arc::new(Repository::from(&db)));
    let app = bookshelf::http::router(service, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind).await.or_raise(|| ErrorKind::Server)?;
    tracing::info!(bind = %config.bind, "Listening");
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(bookshelf::http::shutdown_signal())
        .await
        .or_raise(|| ErrorKind::Server);

    db.close().await;
    tracing::info!("Server shut down");
    served
}

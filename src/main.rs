mod config;
mod db;
mod lesson;
mod routes;
mod services;
mod state;
mod terminal;
mod theory;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::services::seed::{self, DEFAULT_SEED_PHASE_ID, PgSeedStore};

#[derive(Parser, Debug)]
#[command(name = "devlandia", about = "DevLândia content API and seed tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default).
    Serve,
    /// Insert the demo block activities. Not idempotent.
    Seed {
        #[arg(long, default_value_t = DEFAULT_SEED_PHASE_ID)]
        phase_id: Uuid,
    },
    /// Preview a markdown theory page as the viewer would lay it out.
    Theory {
        path: PathBuf,
        #[arg(long, default_value = "Aula")]
        title: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("database init failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("seed failed: {0}")]
    Seed(#[from] seed::SeedError),
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command.unwrap_or(Command::Serve)).await {
        error!(error = %e, "devlandia exited with error");
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Serve => serve().await,
        Command::Seed { phase_id } => seed_demo(phase_id).await,
        Command::Theory { path, title } => {
            let markdown_text = tokio::fs::read_to_string(&path).await?;
            print!("{}", theory::render_theory(&title, &markdown_text).render_text());
            Ok(())
        }
    }
}

async fn connect() -> Result<(AppConfig, sqlx::PgPool), AppError> {
    let config = AppConfig::from_env()?;
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    Ok((config, pool))
}

async fn serve() -> Result<(), AppError> {
    let (config, pool) = connect().await?;
    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN not set, map writes disabled");
    }

    let state = state::AppState::new(pool, config.admin_token);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "devlandia listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn seed_demo(phase_id: Uuid) -> Result<(), AppError> {
    let (_, pool) = connect().await?;

    info!(%phase_id, "seeding demo activities");
    let report = seed::run_seed(&PgSeedStore::new(pool), phase_id).await?;
    info!(
        activities = report.activities,
        options = report.options,
        default_code = report.default_code,
        answers = report.answers,
        tips = report.tips,
        "seed complete"
    );
    Ok(())
}

/// Roster Server - user CRUD over HTTP
use anyhow::Context;
use clap::{Parser, Subcommand};
use roster_core::UserRepository;
use roster_server::{
    config::{ServerConfig, DEFAULT_CONFIG_FILE},
    routes,
    services::UserService,
    state::AppState,
};
use roster_storage::{PgPool, PgUserRepository};
use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roster-server")]
#[command(about = "Roster user service", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "roster_server=info,roster_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&cli.config).await,
        Commands::Migrate => migrate(&cli.config).await,
        Commands::ListUsers => list_users(&cli.config).await,
    };

    if let Err(err) = result {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load_from(path)?;
    config.validate()?;
    Ok(config)
}

async fn connect(config: &ServerConfig) -> anyhow::Result<PgPool> {
    let pool = roster_storage::create_pool(&config.db.url())
        .await
        .with_context(|| {
            format!(
                "could not initialize database pool for {}",
                config.db.display_target()
            )
        })?;
    roster_storage::run_migrations(&pool)
        .await
        .context("could not apply database migrations")?;
    Ok(pool)
}

async fn serve(config_path: &Path) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    tracing::info!("Starting Roster Server");
    tracing::info!("Host: {}", config.host);
    tracing::info!("Port: {}", config.port);
    tracing::info!("Database: {}", config.db.display_target());

    let pool = connect(&config).await?;
    tracing::info!("Database connected");

    // Wire gateway -> service -> state -> router
    let repository: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let user_service = Arc::new(UserService::new(repository));
    let app_state = AppState::new(user_service);
    let cors = routes::cors_layer(&config.cors)?;
    let app = routes::router(app_state, cors);

    let addr = SocketAddr::from((
        config
            .host
            .parse::<IpAddr>()
            .with_context(|| format!("invalid HOST {:?}", config.host))?,
        config.port,
    ));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind HTTP listener on {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    let served = axum::serve(listener, app).await;
    pool.close().await;
    served.context("HTTP server failed")
}

async fn migrate(config_path: &Path) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let pool = connect(&config).await?;
    pool.close().await;
    Ok(())
}

async fn list_users(config_path: &Path) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let pool = connect(&config).await?;

    let users = roster_storage::users::get_all(&pool).await?;
    pool.close().await;

    println!("Users:");
    for user in users {
        println!("  {} - {} <{}>", user.id, user.name, user.email);
    }

    Ok(())
}

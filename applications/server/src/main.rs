/// Apparel Server - inventory REST backend
use apparel_core::DataStore;
use apparel_server::{
    api,
    config::{LoggingSettings, ServerConfig},
    services::{AuthService, SeedOutcome, UserService},
    state::AppState,
};
use apparel_storage::JsonFileStore;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "apparel-server")]
#[command(about = "Apparel inventory REST server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create the configured admin account if no admin exists
    SeedAdmin,
    /// List all accounts
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ServerConfig::load_from(&cli.config)?;

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_tracing(&config.logging)?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::SeedAdmin => {
            seed_admin(&config, &user_service(&config)).await?;
        }
        Commands::ListUsers => list_users(&config).await?,
    }

    Ok(())
}

/// Stdout logging, plus a plain-text file sink when enabled
fn init_tracing(settings: &LoggingSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = if settings.to_file {
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(settings.file_name.clone())
            .build(&settings.directory)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apparel_server=info,apparel_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if settings.to_file {
        tracing::info!(log_path = %settings.file_path().display(), "File logging enabled");
    }

    Ok(guard)
}

fn open_store(config: &ServerConfig) -> Arc<dyn DataStore> {
    Arc::new(JsonFileStore::new(config.storage.data_file.clone()))
}

fn auth_service(config: &ServerConfig) -> Arc<AuthService> {
    Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    ))
}

fn user_service(config: &ServerConfig) -> UserService {
    UserService::new(open_store(config), auth_service(config))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Apparel Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Data file: {:?}", config.storage.data_file);

    let store = open_store(&config);
    let auth_service = auth_service(&config);
    let app_state = AppState::new(store, auth_service);

    // Seeding failures are logged, the server still starts
    if let Err(e) = seed_admin(&config, &app_state.users).await {
        tracing::error!("Seeding failed: {}", e);
    }

    let app = api::router(app_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn seed_admin(config: &ServerConfig, users: &UserService) -> anyhow::Result<()> {
    let Some(admin) = &config.admin else {
        tracing::warn!("No admin credentials configured, skipping admin seeding");
        return Ok(());
    };

    match users.seed_admin(admin).await? {
        SeedOutcome::Created => tracing::info!("Seeded admin {}", admin.email),
        SeedOutcome::AlreadyPresent => tracing::info!("Admin present, seeding skipped"),
    }

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let users = user_service(config).list_accounts().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} <{}> [{}]", user.id, user.name, user.email, user.role);
    }

    Ok(())
}

/// Playlist Server - playlist management on top of an object datastore
use clap::{Parser, Subcommand};
use datastore_client::DatastoreClient;
use playlist_server::{config::ServerConfig, create_router, services::AuthService, state::AppState};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "playlist-server")]
#[command(about = "Playlist management service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Mint a signed bearer token for a user (testing aid; production
    /// tokens come from the external issuer)
    Token {
        /// User id to embed in the token
        #[arg(short, long)]
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playlist_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::Token { user_id } => {
            mint_token(&user_id)?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Playlist Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Datastore: {}", config.datastore.url);

    // Initialize datastore client
    let datastore = Arc::new(DatastoreClient::new(config.datastore.url.clone())?);

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    ));

    // Build application state and router
    let app_state = AppState::new(datastore, auth_service);
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn mint_token(user_id: &str) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    );
    let token = auth_service.issue_token(user_id)?;

    println!("{token}");

    Ok(())
}

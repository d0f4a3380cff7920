use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;

use bookrack::auth::password::PasswordManager;
use bookrack::auth::token::TokenManager;
use bookrack::config::ServerConfig;
use bookrack::keepalive::spawn_keepalive;
use bookrack::media::{CloudMediaStorage, MediaStorage, MemoryMediaStorage};
use bookrack::routes::routes;
use bookrack::state::AppState;
use bookrack::storage::memory::MemoryStore;

#[tokio::main]
async fn main() {
    // Load .env before logging init so RUST_LOG from the file is honoured
    let dotenv_result = dotenvy::dotenv();

    // Initialize logging
    env_logger::init();

    match dotenv_result {
        Ok(_) => info!("Environment variables loaded from .env file"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    }

    // Load config from the environment
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration: host={}, port={}", config.host, config.port);

    let media: Arc<dyn MediaStorage> = match config.media.clone() {
        Some(media_config) => match CloudMediaStorage::new(media_config) {
            Ok(storage) => Arc::new(storage),
            Err(e) => {
                error!("Failed to initialize media storage: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            warn!("No media storage configured, keeping uploaded assets in memory");
            Arc::new(MemoryMediaStorage::new())
        }
    };

    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        store.clone(),
        store,
        media,
        Arc::new(TokenManager::new(&config.jwt_secret)),
        Arc::new(PasswordManager::new()),
    );

    if let Some(url) = config.keepalive_url.clone() {
        info!("Starting keep-alive ping against {}", url);
        spawn_keepalive(url);
    }

    let api = routes(state);

    // Build the server address
    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Failed to parse server address: {}", e);
            std::process::exit(1);
        }
    };

    // Start the server
    info!("Starting bookrack server on {}", addr);

    warp::serve(api).run(addr).await;
}

//! clima-bot - conversational weather assistant
//!
//! A Rust backend implementing a conversation state machine that collects
//! a user's name and location, then answers weather questions from live
//! geocoding and weather-data lookups.

mod api;
mod config;
mod conversation;
mod lookup;
mod session;
mod text;

use api::{create_router, AppState};
use config::Config;
use conversation::Chatbot;
use lookup::{MeteomaticsClient, NominatimClient};
use session::SessionStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often the background sweep looks for expired sessions.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clima_bot=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Credentials live in .env during development; a missing file is fine.
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        language = ?config.language,
        session_ttl_secs = config.session_ttl.as_secs(),
        "Configuration loaded"
    );

    // Session store and expiry sweep
    let sessions = Arc::new(SessionStore::new(config.session_ttl));
    if config.session_ttl.is_zero() {
        tracing::info!("Session expiry disabled");
    } else {
        let store = sessions.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                let evicted = store.evict_expired().await;
                if evicted > 0 {
                    tracing::info!(evicted, "Swept expired sessions");
                }
            }
        });
    }

    // Lookup clients
    let geocoder = Arc::new(NominatimClient::new(&config.nominatim_base_url));
    let weather = Arc::new(MeteomaticsClient::new(
        &config.meteomatics_base_url,
        config.meteomatics_username.clone(),
        config.meteomatics_password.clone(),
    ));

    // Create application state
    let chatbot = Chatbot::new(sessions, geocoder, weather, config.language);
    let state = AppState::new(chatbot);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("clima-bot server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

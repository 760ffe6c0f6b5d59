use std::net::SocketAddr;
use std::sync::Arc;

use records_api::api::{create_router, AppState};
use records_api::config::Config;
use records_api::infrastructure::store::PostgrestStore;
use records_api::logging::init_tracing;
use records_api::startup::check_database_connection;

#[tokio::main]
async fn main() {
    // Load environment variables and initialize tracing
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let store = PostgrestStore::new(&config.store_url, &config.store_key);
    let state = AppState::new(Arc::new(store));

    // Check the store in the background; serving does not wait on it
    let check_state = state.clone();
    tokio::spawn(async move {
        check_database_connection(&check_state).await;
    });

    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use trip_server::history::{FileStore, HistoryStore};
use trip_server::places::{PlaceClient, PlaceClientConfig, SuggestConfig, Suggestions};
use trip_server::session::Session;
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Data directory for the saved-trip store
    let data_dir =
        PathBuf::from(std::env::var("TRIP_DATA_DIR").unwrap_or_else(|_| "data".to_string()));
    let store =
        FileStore::open(data_dir.join("history.json")).expect("Failed to open history store");
    let history = HistoryStore::new(store);

    // Static assets directory
    let static_dir = std::env::var("TRIP_STATIC_DIR").unwrap_or_else(|_| "static".to_string());

    // Place suggestions (no API key required)
    let place_client =
        PlaceClient::new(PlaceClientConfig::default()).expect("Failed to create place client");
    let suggestions = Suggestions::new(place_client, SuggestConfig::default());

    // Build app state and router
    let state = AppState::new(Session::new(), history, suggestions);
    let app = create_router(state, &static_dir);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Trip Planner listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health              - Health check");
    println!("  GET  /api/itinerary       - Current itinerary with derived dates");
    println!("  GET  /api/share           - Shareable state token");
    println!("  GET  /api/history         - Saved trips");
    println!("  GET  /api/places/search   - Place-name suggestions");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

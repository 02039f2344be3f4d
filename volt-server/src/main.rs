use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use volt_server::drive::DriveSimulator;
use volt_server::estimate::Estimator;
use volt_server::history::ReadingLog;
use volt_server::oracle::{GeminiClient, GeminiConfig};
use volt_server::stations::StationFinder;
use volt_server::web::{AppState, create_router};

/// Default location of the reading history file.
const DEFAULT_HISTORY_PATH: &str = "data/history.json";

/// Default location of the dashboard assets.
const DEFAULT_STATIC_DIR: &str = "static";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Get credentials from environment
    let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: GEMINI_API_KEY not set. Model calls will fail and fallbacks will serve.");
        String::new()
    });

    // Create the model client; both pipelines share it
    let gemini_config = GeminiConfig::new(&api_key);
    let gemini = GeminiClient::new(gemini_config).expect("Failed to create Gemini client");

    let estimator = Estimator::new(gemini.clone());
    let finder = StationFinder::new(gemini.clone());
    let drive = DriveSimulator::new(Estimator::new(gemini));

    // Open the reading history store
    let history_path =
        std::env::var("VOLT_HISTORY_PATH").unwrap_or_else(|_| DEFAULT_HISTORY_PATH.to_string());
    let log = ReadingLog::open(&history_path).expect("Failed to open reading history");

    let static_dir =
        std::env::var("VOLT_STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());

    // Build app state
    let state = AppState::new(estimator, finder, log, drive);

    // Create router
    let app = create_router(state, &static_dir);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("VoltMind server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET    /health            - Health check");
    println!("  POST   /api/estimate      - Range/time estimate for a battery level");
    println!("  GET    /api/stations      - Nearby charging stations (lat, lng)");
    println!("  GET    /api/history       - Saved readings, newest first");
    println!("  POST   /api/history       - Save a reading");
    println!("  DELETE /api/history       - Clear all readings");
    println!("  POST   /api/drive/start   - Start the simulated drive");
    println!("  POST   /api/drive/stop    - Stop the simulated drive");
    println!("  GET    /api/drive/latest  - Latest simulation tick");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

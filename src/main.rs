use dotenv::dotenv;
use novaforte_backend::app::app::App;
use novaforte_backend::util::logger::Logger;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("Starting NOVAFORTE backend");

    // Load environment variables from .env file
    match dotenv() {
        Ok(_) => info!("Loaded .env file"),
        Err(e) => warn!("No .env file loaded: {} (using system env vars)", e),
    }

    let app = App::new().await;
    app.start().await;
}

use tracing::info;

use quill::{Config, Database, WebServer};

#[tokio::main]
async fn main() -> quill::Result<()> {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = quill::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        quill::logging::init_console_only(&config.logging.level);
    }

    info!("Quill - a minimal weblog");
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    let db = Database::open(&config.database.path).await?;
    let server = WebServer::new(&config, db);
    server.run().await?;

    Ok(())
}

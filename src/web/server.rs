//! Web server for Quill.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::db::{Database, SessionRepository};
use crate::web::handlers::{AppState, SharedDatabase};
use crate::web::router::{create_health_router, create_router};

/// Interval between expired-session sweeps.
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// The Quill web server.
pub struct WebServer {
    addr: SocketAddr,
    app_state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server from configuration.
    pub fn new(config: &Config, db: Database) -> Self {
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .expect("invalid server address");

        let db: SharedDatabase = Arc::new(db);
        let app_state = Arc::new(AppState::new(db, &config.site, &config.auth));

        Self { addr, app_state }
    }

    /// Get the configured listen address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the server until the process is stopped.
    pub async fn run(self) -> std::io::Result<()> {
        start_session_cleanup_task(self.app_state.db.clone());

        let app = create_router(self.app_state).merge(create_health_router());

        tracing::info!("web server listening on http://{}", self.addr);
        let listener = TcpListener::bind(self.addr).await?;
        axum::serve(listener, app).await
    }

    /// Bind to the configured address and serve in a background task.
    ///
    /// Returns the actual bound address, which differs from the
    /// configured one when port 0 was requested.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        start_session_cleanup_task(self.app_state.db.clone());

        let app = create_router(self.app_state).merge(create_health_router());

        let listener = TcpListener::bind(self.addr).await?;
        let addr = listener.local_addr()?;
        tracing::info!("web server listening on http://{}", addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("web server error: {}", e);
            }
        });

        Ok(addr)
    }
}

/// Spawn the hourly task that deletes expired sessions.
fn start_session_cleanup_task(db: SharedDatabase) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        // The first tick fires immediately; skip it so startup is quiet.
        interval.tick().await;

        loop {
            interval.tick().await;
            let repo = SessionRepository::new(db.pool());
            match repo.delete_expired().await {
                Ok(0) => tracing::debug!("session cleanup: nothing to delete"),
                Ok(n) => tracing::info!("session cleanup: deleted {} expired sessions", n),
                Err(e) => tracing::warn!("session cleanup failed: {}", e),
            }
        }
    });
}

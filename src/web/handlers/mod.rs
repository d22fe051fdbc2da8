//! Request handlers for the Quill web interface.

pub mod auth;
pub mod comments;
pub mod posts;

pub use auth::*;
pub use comments::*;
pub use posts::*;

use std::sync::Arc;

use crate::config::{AuthConfig, SiteConfig};
use crate::db::Database;

/// Shared database handle passed to handlers through the router state.
pub type SharedDatabase = Arc<Database>;

/// Application state shared by all web handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: SharedDatabase,
    /// Site name shown in page headers.
    pub site_name: String,
    /// Site description shown on the post list.
    pub site_description: String,
    /// Session lifetime in days for new logins.
    pub session_expiry_days: u64,
}

impl AppState {
    /// Create application state from configuration sections.
    pub fn new(db: SharedDatabase, site: &SiteConfig, auth: &AuthConfig) -> Self {
        Self {
            db,
            site_name: site.name.clone(),
            site_description: site.description.clone(),
            session_expiry_days: auth.session_expiry_days,
        }
    }
}

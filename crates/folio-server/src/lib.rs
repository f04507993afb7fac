//! HTTP server for the Folio portfolio site.
//!
//! This crate serves the rendered site using axum:
//! - HTML pages for every route the site resolves
//! - Draft preview endpoints setting and clearing the draft-mode cookie
//! - Static files (stylesheet, fonts) from the configured directory
//!
//! # Quick Start
//!
//! ```ignore
//! use folio_server::{run_server, server_config_from_config, site_from_config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = folio_config::Config::load(None, None).unwrap();
//!     let site = site_from_config(&config);
//!     let server = server_config_from_config(&config, "1.0.0".to_owned(), false);
//!
//!     run_server(server, site).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (folio-server)
//!                        │
//!                        ├─► Page routes ──spawn_blocking──► Site (resolve + render)
//!                        │                                      │
//!                        │                                      └─► ContentStore (fs / Payload)
//!                        │
//!                        ├─► /api/preview, /api/exit-preview (draft cookie)
//!                        │
//!                        └─► /static/* (files on disk)
//! ```

mod app;
mod draft;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use folio_config::ContentBackend;
use folio_content::{ContentStore, FsStore};
use folio_payload::PayloadStore;
use folio_site::{Site, SiteConfig};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory served under `/static/`.
    pub static_dir: PathBuf,
    /// Secret required by the preview endpoint (`None` disables the check).
    pub preview_secret: Option<String>,
    /// Enable verbose output.
    pub verbose: bool,
    /// Application version (for cache invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            static_dir: PathBuf::from("static"),
            preview_secret: None,
            verbose: false,
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
/// * `site` - Page resolver over the configured content store
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig, site: Site) -> Result<(), Box<dyn std::error::Error>> {
    let state = app_state(&config, Arc::new(site));
    let app = app::create_router(state);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, static_dir = %config.static_dir.display(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn app_state(config: &ServerConfig, site: Arc<Site>) -> Arc<AppState> {
    Arc::new(AppState {
        site,
        static_dir: config.static_dir.clone(),
        preview_secret: config.preview_secret.clone(),
        draft_token: draft::draft_token(config.preview_secret.as_deref()),
        verbose: config.verbose,
        version: config.version.clone(),
    })
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create the page resolver for a loaded configuration.
///
/// Selects the content backend and carries over the presentation settings.
#[must_use]
pub fn site_from_config(config: &folio_config::Config) -> Site {
    let content = &config.content_resolved;
    let store: Arc<dyn ContentStore> = match content.backend {
        ContentBackend::Fs => Arc::new(FsStore::new(content.dir.clone())),
        ContentBackend::Payload => {
            // Validation guarantees a base URL for this backend
            let base_url = content.base_url.as_deref().unwrap_or_default();
            let mut store = PayloadStore::new(base_url, content.timeout);
            if let Some(key) = &content.api_key {
                store = store.with_api_key(key.as_str());
            }
            Arc::new(store)
        }
    };

    let site = &config.site_resolved;
    Site::new(
        store,
        SiteConfig {
            title: site.title.clone(),
            brand: site.brand.clone(),
            contact_email: site.contact_email.clone(),
        },
    )
}

/// Create server configuration from the application config.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `version` - Application version
/// * `verbose` - Enable verbose output
#[must_use]
pub fn server_config_from_config(
    config: &folio_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        static_dir: config.site_resolved.static_dir.clone(),
        preview_secret: config.preview.secret.clone().filter(|s| !s.is_empty()),
        verbose,
        version,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_config_from_config() {
        let mut config = folio_config::Config::default();
        config.server.port = 8080;
        config.preview.secret = Some("s3cret".to_owned());

        let server = server_config_from_config(&config, "1.2.3".to_owned(), true);

        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 8080);
        assert_eq!(server.static_dir, config.site_resolved.static_dir);
        assert_eq!(server.preview_secret.as_deref(), Some("s3cret"));
        assert_eq!(server.version, "1.2.3");
        assert!(server.verbose);
    }

    #[test]
    fn test_empty_preview_secret_disables_check() {
        let mut config = folio_config::Config::default();
        config.preview.secret = Some(String::new());

        let server = server_config_from_config(&config, String::new(), false);

        assert_eq!(server.preview_secret, None);
    }

    #[test]
    fn test_site_from_config_carries_presentation() {
        let config = folio_config::Config::default();

        let site = site_from_config(&config);

        assert_eq!(site.config().title, config.site_resolved.title);
        assert_eq!(site.config().contact_email, config.site_resolved.contact_email);
    }

    #[test]
    fn test_app_state_token_follows_secret() {
        let site = Arc::new(site_from_config(&folio_config::Config::default()));
        let open = app_state(&ServerConfig::default(), Arc::clone(&site));
        let guarded = app_state(
            &ServerConfig {
                preview_secret: Some("s3cret".to_owned()),
                ..ServerConfig::default()
            },
            site,
        );

        assert_eq!(open.draft_token, "1");
        assert_ne!(guarded.draft_token, "1");
    }
}

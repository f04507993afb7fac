//! `folio serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config, ContentBackend};
use folio_server::{run_server, server_config_from_config, site_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content directory of the filesystem backend (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "FOLIO_PORT")]
    port: Option<u16>,

    /// Enable verbose output (log render warnings).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            content_dir: self.content_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.serving(&config.server.host, config.server.port);
        match config.content_resolved.backend {
            ContentBackend::Fs => {
                output.setting("Content directory", config.content_resolved.dir.display());
            }
            ContentBackend::Payload => output.setting(
                "Content API",
                config.content_resolved.base_url.as_deref().unwrap_or_default(),
            ),
        }
        output.setting("Static directory", config.site_resolved.static_dir.display());
        if config.preview.secret.as_deref().is_none_or(str::is_empty) {
            output.warning("preview secret not set, anyone can enable draft mode");
        }

        let site = site_from_config(&config);
        let server_config = server_config_from_config(&config, version.to_owned(), self.verbose);
        run_server(server_config, site)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}

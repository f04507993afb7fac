//! `folio render` command implementation.
//!
//! Renders one URL path through the page resolver and writes the HTML
//! document, for inspection or static export.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_server::site_from_config;
use folio_site::{CategoryFilter, RenderedPage, Site};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// URL path to render (e.g. `/`, `/de?category=3`, `/my-artwork`).
    path: String,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content directory of the filesystem backend (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Include draft content.
    #[arg(long)]
    draft: bool,

    /// Write the document to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the path resolves to no page,
    /// or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            content_dir: self.content_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = site_from_config(&config);

        render_to(&site, &self.path, self.draft, self.output.as_deref())
    }
}

fn render_to(site: &Site, path: &str, draft: bool, output: Option<&Path>) -> Result<(), CliError> {
    let out = Output::new();
    let (path, query) = path.split_once('?').unwrap_or((path, ""));
    let page = site.render_filtered(path, draft, &CategoryFilter::from_query(query))?;
    report_warnings(&out, &page);

    match output {
        Some(file) => {
            if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(file, &page.html)?;
            out.wrote(file, page.language);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(page.html.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

fn report_warnings(out: &Output, page: &RenderedPage) {
    for warning in &page.warnings {
        out.warning(warning);
    }
}

//! Status lines for `folio` commands, written to stderr.
//!
//! Stdout is reserved for `folio render` documents.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Announce the address the server listens on.
    pub(crate) fn serving(&self, host: &str, port: u16) {
        let url = server_url(host, port);
        self.line(&format!("Serving on {}", self.cyan_bold.apply_to(url)));
    }

    /// One resolved setting, indented under the serving line.
    pub(crate) fn setting(&self, name: &str, value: impl Display) {
        self.line(&format!("  {name}: {value}"));
    }

    /// Report a rendered page written to disk.
    pub(crate) fn wrote(&self, path: &Path, language: impl Display) {
        let msg = format!("Wrote {} ({language})", path.display());
        self.line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.yellow.apply_to(format!("Warning: {msg}")).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(format!("Error: {msg}")).to_string());
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }
}

/// Browser URL of a bind address. IPv6 hosts are bracketed.
fn server_url(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("http://[{host}]:{port}")
    } else {
        format!("http://{host}:{port}")
    }
}

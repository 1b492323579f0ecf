use std::path::PathBuf;

use clap::{ArgAction, Parser};
use text_viewer_core::OpenError;
use tracing_subscriber::EnvFilter;

/// Target of failed-open diagnostics. Kept at `error` whatever the filter.
pub const OPEN_DIAGNOSTICS: &str = "text_viewer::open";

/// A minimal viewer for UTF-8 text files
#[derive(Debug, Parser)]
#[command(name = "text-viewer", version, about)]
pub struct Cli {
    /// File to open at startup
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Adds the directive that keeps open diagnostics on the error stream.
pub fn with_open_diagnostics(filter: EnvFilter) -> EnvFilter {
    match format!("{OPEN_DIAGNOSTICS}=error").parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `-v`, except for
/// open diagnostics which are never filtered out.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,text_viewer={level},text_viewer_core={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(with_open_diagnostics(filter))
        .with_writer(std::io::stderr)
        .init();
}

/// Reports a failed open: the path and the underlying cause, on stderr.
pub fn report_open_error(err: &OpenError) {
    tracing::error!(target: OPEN_DIAGNOSTICS, path = %err.path().display(), "{}", err);
}

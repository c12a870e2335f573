//! Rule tracing for the `atp` binary.
//!
//! Output format is picked by `ATP_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans via `tracing-tree`, one level per rule
//! - `json`: newline-delimited JSON events
//!
//! ```bash
//! ATP_LOG=debug ATP_LOG_FORMAT=tree atp open_file.json
//! ATP_LOG="atp_plugin::forwarding=trace" atp start_soon.json
//! ```
//!
//! Nothing is installed unless `ATP_LOG` or `RUST_LOG` is set. Everything
//! goes to stderr; stdout carries only the report.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "ATP_LOG";
pub const LOG_FORMAT_ENV: &str = "ATP_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Case-insensitive; anything unrecognised is `Text`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_ENV).unwrap_or_default())
    }
}

/// `ATP_LOG` wins over `RUST_LOG`; both use `RUST_LOG` directive syntax.
fn filter_from_env() -> Option<EnvFilter> {
    if let Ok(directives) = std::env::var(LOG_ENV) {
        return Some(EnvFilter::builder().parse_lossy(directives));
    }
    std::env::var("RUST_LOG")
        .is_ok()
        .then(EnvFilter::from_default_env)
}

/// Install the global subscriber. Returns whether one was installed.
pub fn init_tracing() -> bool {
    let Some(filter) = filter_from_env() else {
        return false;
    };

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    true
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;

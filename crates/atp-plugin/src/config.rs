//! Plugin configuration.
//!
//! Every qualified name a rule matches against lives here so a host with
//! differently named stubs can retarget the rules without code changes.
//! Defaults reproduce the stock `trio`/`async_generator` stubs.

use atp_common::limits::DEFAULT_MAX_FORWARDED_ARITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read plugin config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse plugin config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid plugin config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    /// Sentinel wrapping the yield type inside a composite return type.
    pub yield_marker: String,
    /// Sentinel wrapping the send type inside a composite return type.
    pub send_marker: String,
    /// Sentinel type of a forwarded `*args` parameter.
    pub args_marker: String,

    pub awaitable: String,
    pub coroutine: String,
    pub async_iterable: String,
    pub object: String,

    /// Return type of an `@async_generator`-decorated function.
    pub compat_async_generator: String,
    /// Generator-like classes whose first two args are (yield, send).
    pub generator_shapes: Vec<String>,

    pub text_stream: String,
    pub buffered_stream: String,
    pub raw_stream: String,
    /// Character in an open mode string that selects binary I/O.
    pub binary_mode_marker: char,

    /// Highest arity synthesized for variadic forwarding.
    pub max_forwarded_arity: usize,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            yield_marker: "trio_typing.YieldType".to_string(),
            send_marker: "trio_typing.SendType".to_string(),
            args_marker: "trio_typing.ArgsForCallable".to_string(),
            awaitable: "typing.Awaitable".to_string(),
            coroutine: "typing.Coroutine".to_string(),
            async_iterable: "typing.AsyncIterable".to_string(),
            object: "builtins.object".to_string(),
            compat_async_generator: "trio_typing.CompatAsyncGenerator".to_string(),
            generator_shapes: vec![
                "trio_typing.CompatAsyncGenerator".to_string(),
                "trio_typing.AsyncGenerator".to_string(),
                "typing.AsyncGenerator".to_string(),
            ],
            text_stream: "trio._AsyncTextIOBase".to_string(),
            buffered_stream: "trio._AsyncBufferedIOBase".to_string(),
            raw_stream: "trio._AsyncRawIOBase".to_string(),
            binary_mode_marker: 'b',
            max_forwarded_arity: DEFAULT_MAX_FORWARDED_ARITY,
        }
    }
}

impl PluginConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("yield_marker", &self.yield_marker),
            ("send_marker", &self.send_marker),
            ("args_marker", &self.args_marker),
            ("awaitable", &self.awaitable),
            ("coroutine", &self.coroutine),
            ("async_iterable", &self.async_iterable),
            ("object", &self.object),
            ("compat_async_generator", &self.compat_async_generator),
            ("text_stream", &self.text_stream),
            ("buffered_stream", &self.buffered_stream),
            ("raw_stream", &self.raw_stream),
        ];
        if let Some((field, _)) = names.iter().find(|(_, name)| name.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("`{field}` must not be empty")));
        }
        if self.yield_marker == self.send_marker {
            return Err(ConfigError::Invalid(
                "`yield_marker` and `send_marker` must differ".to_string(),
            ));
        }
        if self.generator_shapes.is_empty() {
            return Err(ConfigError::Invalid(
                "`generator_shapes` must name at least one class".to_string(),
            ));
        }
        Ok(())
    }

    /// Last dotted segment of a marker name, as shown in diagnostics.
    #[must_use]
    pub fn short_name(qualified: &str) -> &str {
        qualified.rsplit('.').next().unwrap_or(qualified)
    }
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;

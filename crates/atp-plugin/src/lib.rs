//! Type-checker extension rules for `trio`-style async code.
//!
//! The host type checker resolves a call, looks the callee's fully-qualified
//! name up in a [`Plugin`], and hands the matching rule a [`CallContext`].
//! Every rule returns a [`RuleOutcome`]:
//!
//! - **Refined**: a more precise type than the host's default
//! - **`NoOpinion`**: the rule does not apply; keep the default
//! - **Degraded**: an error was reported; use the placeholder it carries
//!
//! Rules are stateless. They reach the host only through [`CheckerApi`].

pub mod api;
pub mod config;
pub mod context;
pub mod decorator;
pub mod enclosing;
pub mod forwarding;
pub mod host;
pub mod open_mode;
pub mod outcome;
pub mod packed;
pub mod registry;
pub mod task_status;
pub mod yield_sites;

pub use api::{CheckerApi, SubtypeLabels};
pub use config::{ConfigError, PluginConfig};
pub use context::{ArgExpr, CallContext, EnclosingFunction, MethodContext};
pub use enclosing::{GeneratorTypes, Resolution, resolve_enclosing_generator_types};
pub use forwarding::{ForwardingError, expand_forwarding_overloads};
pub use host::RecordingChecker;
pub use open_mode::{StreamKind, classify_open_call};
pub use outcome::RuleOutcome;
pub use packed::{DecodeError, PackedParams, compose, decompose};
pub use registry::{FunctionRule, MethodRule, Plugin};

#[cfg(test)]
#[path = "../tests/test_support.rs"]
pub(crate) mod test_support;

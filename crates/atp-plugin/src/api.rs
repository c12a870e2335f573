//! The host boundary.
//!
//! Rules never talk to a type checker directly. Everything they need from
//! the host (type construction, subtype obligations, error reporting) goes
//! through `CheckerApi`, which keeps the rules testable against the
//! in-memory `RecordingChecker`.

use atp_common::Span;
use atp_solver::{TypeDatabase, TypeId};

/// Role labels for a subtype obligation, e.g. `("yield_ argument", "declared YieldType")`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubtypeLabels {
    pub subtype: &'static str,
    pub supertype: &'static str,
}

impl SubtypeLabels {
    #[must_use]
    pub const fn new(subtype: &'static str, supertype: &'static str) -> Self {
        Self { subtype, supertype }
    }
}

pub trait CheckerApi {
    fn types(&self) -> &dyn TypeDatabase;

    /// `Name[Args...]` by fully-qualified name.
    fn named_generic_type(&self, name: &str, args: Vec<TypeId>) -> TypeId {
        self.types().instance(name, args)
    }

    /// Check `subtype <: supertype`, reporting a labelled diagnostic at
    /// `location` when it does not hold. Returns whether it held.
    fn check_subtype(
        &mut self,
        subtype: TypeId,
        supertype: TypeId,
        location: Span,
        labels: SubtypeLabels,
    ) -> bool;

    /// Report an error without aborting the checking pass.
    fn fail(&mut self, message: &str, location: Span);
}

use atp_solver::TypeId;

/// Result of one rule invocation.
///
/// `NoOpinion` and `Degraded` both end up as some fallback type, but they
/// are not the same thing: the first means the rule did not apply, the
/// second means it applied, reported a diagnostic, and substituted a
/// placeholder so checking can continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleOutcome {
    Refined(TypeId),
    NoOpinion,
    Degraded(TypeId),
}

impl RuleOutcome {
    /// The type the host should use, given its own default.
    #[must_use]
    pub const fn into_type(self, default: TypeId) -> TypeId {
        match self {
            Self::Refined(ty) | Self::Degraded(ty) => ty,
            Self::NoOpinion => default,
        }
    }

    #[must_use]
    pub const fn is_refined(self) -> bool {
        matches!(self, Self::Refined(_))
    }
}

//! Per-call-site input handed to rules.

use atp_common::Span;
use atp_solver::TypeId;
use serde::{Deserialize, Serialize};

static NON_LITERAL: ArgExpr = ArgExpr::Other;

/// An argument expression as the host classified it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgExpr {
    StrLiteral(String),
    IntLiteral(i64),
    Other,
}

/// The function whose body contains the call being checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnclosingFunction {
    /// `async def`.
    pub is_coroutine: bool,
    /// Carries the generator decoration the yield rules require.
    pub is_decorated: bool,
    /// Declared (post-async) signature: a callable returning `Coroutine[_, _, R]`.
    pub signature: Option<TypeId>,
}

/// One call site.
///
/// `arg_types` and `args` have one group per formal parameter of the
/// callee; a group is empty when the caller passed nothing for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    pub arg_types: Vec<Vec<TypeId>>,
    pub args: Vec<Vec<ArgExpr>>,
    pub default_return_type: TypeId,
    pub location: Span,
    pub enclosing_function: Option<EnclosingFunction>,
}

impl CallContext {
    #[must_use]
    pub const fn new(default_return_type: TypeId, location: Span) -> Self {
        Self {
            arg_types: Vec::new(),
            args: Vec::new(),
            default_return_type,
            location,
            enclosing_function: None,
        }
    }

    /// Append one formal parameter's argument group.
    #[must_use]
    pub fn with_arg_group(mut self, types: Vec<TypeId>, exprs: Vec<ArgExpr>) -> Self {
        self.arg_types.push(types);
        self.args.push(exprs);
        self
    }

    /// Append a group holding a single non-literal argument.
    #[must_use]
    pub fn with_arg(self, ty: TypeId) -> Self {
        self.with_arg_group(vec![ty], vec![ArgExpr::Other])
    }

    #[must_use]
    pub fn with_empty_group(self) -> Self {
        self.with_arg_group(Vec::new(), Vec::new())
    }

    #[must_use]
    pub fn with_enclosing_function(mut self, function: EnclosingFunction) -> Self {
        self.enclosing_function = Some(function);
        self
    }

    /// The type in group `group` when it holds exactly one argument.
    pub fn single_arg_type(&self, group: usize) -> Option<TypeId> {
        match self.arg_types.get(group).map(Vec::as_slice) {
            Some(&[ty]) => Some(ty),
            _ => None,
        }
    }

    /// The expression in group `group` when it holds exactly one argument.
    /// Hosts that supplied types without expressions get `ArgExpr::Other`.
    pub fn single_arg_expr(&self, group: usize) -> Option<&ArgExpr> {
        match self.args.get(group).map(Vec::as_slice) {
            Some([expr]) => Some(expr),
            Some([]) | None if self.single_arg_type(group).is_some() => Some(&NON_LITERAL),
            _ => None,
        }
    }

    /// Whether nothing was passed for `group` (or the group does not exist).
    pub fn is_group_empty(&self, group: usize) -> bool {
        self.arg_types.get(group).is_none_or(Vec::is_empty)
    }

    /// Copy with `count` empty groups prepended, aligning a bound method's
    /// arguments with the underlying function's formals.
    #[must_use]
    pub fn shifted(&self, count: usize) -> Self {
        let mut arg_types = vec![Vec::new(); count];
        arg_types.extend(self.arg_types.iter().cloned());
        let mut args = vec![Vec::new(); count];
        args.extend(self.args.iter().cloned());
        Self {
            arg_types,
            args,
            ..self.clone()
        }
    }
}

/// A method call site: the call plus the type of the bound receiver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodContext {
    pub call: CallContext,
    pub receiver_type: TypeId,
}

impl MethodContext {
    #[must_use]
    pub const fn new(call: CallContext, receiver_type: TypeId) -> Self {
        Self {
            call,
            receiver_type,
        }
    }
}

#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod tests;

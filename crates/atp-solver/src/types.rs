//! Type representation for the plugin solver.
//!
//! Types are hash-consed: a `TypeId` is a handle into the `TypeInterner`, and
//! structurally equal trees always receive the same id. Rewriting a type means
//! interning a new tree; untouched children are shared by id.

use atp_common::interner::Atom;
use serde::{Deserialize, Serialize};

/// Handle to an interned type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// The None-type (`None` in annotations).
    pub const NONE: Self = Self(0);
    /// Uninhabited type produced by simplification (empty unions).
    pub const NEVER: Self = Self(1);
    /// Explicit never: "this call never returns normally".
    pub const NO_RETURN: Self = Self(2);
    /// `Any` written explicitly by the program author.
    pub const ANY: Self = Self(3);
    /// `Any` standing in for a missing annotation.
    pub const ANY_UNANNOTATED: Self = Self(4);
    /// `Any` substituted after a reported error, to suppress cascades.
    pub const ANY_ERROR: Self = Self(5);
    /// `Any` produced because the checker cannot express the real type.
    pub const ANY_ARTIFACT: Self = Self(6);
    /// `Any` from special forms.
    pub const ANY_SPECIAL: Self = Self(7);

    /// First id handed out for non-intrinsic types.
    pub const FIRST_DYNAMIC: u32 = 8;
}

/// Why a type is `Any`.
///
/// The reason never changes subtyping; it exists so diagnostics and later
/// passes can tell "author wrote Any" from "we gave up after an error".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnyReason {
    Explicit,
    Unannotated,
    FromError,
    ImplementationArtifact,
    SpecialForm,
}

impl AnyReason {
    #[must_use]
    pub const fn type_id(self) -> TypeId {
        match self {
            Self::Explicit => TypeId::ANY,
            Self::Unannotated => TypeId::ANY_UNANNOTATED,
            Self::FromError => TypeId::ANY_ERROR,
            Self::ImplementationArtifact => TypeId::ANY_ARTIFACT,
            Self::SpecialForm => TypeId::ANY_SPECIAL,
        }
    }
}

/// Interned list of types (union members, generic arguments, overload items).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeListId(pub u32);

/// Interned callable signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallableShapeId(pub u32);

/// Identity of a type variable binding.
///
/// Variables synthesized by the plugin use negative ids so they never collide
/// with the host's own (non-negative) binding ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeVarId(pub i32);

/// A reference to a type variable from inside a type tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeVarRef {
    pub id: TypeVarId,
    pub name: Atom,
    pub upper_bound: TypeId,
}

/// How an argument binds to a parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Required positional (or positional-or-keyword) parameter.
    Positional,
    /// Positional parameter with a default.
    Optional,
    /// `*args`
    Star,
    /// Required keyword-only parameter.
    Named,
    /// Keyword-only parameter with a default.
    NamedOptional,
    /// `**kwargs`
    StarStar,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub name: Option<Atom>,
    pub type_id: TypeId,
    pub kind: ParamKind,
}

impl ParamInfo {
    #[must_use]
    pub const fn positional(name: Option<Atom>, type_id: TypeId) -> Self {
        Self {
            name,
            type_id,
            kind: ParamKind::Positional,
        }
    }

    #[must_use]
    pub const fn star(name: Option<Atom>, type_id: TypeId) -> Self {
        Self {
            name,
            type_id,
            kind: ParamKind::Star,
        }
    }

    /// Unnamed positional slot, as produced by `Callable[[T], R]`.
    #[must_use]
    pub const fn unnamed(type_id: TypeId) -> Self {
        Self::positional(None, type_id)
    }
}

/// A type variable declared by a callable signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParamInfo {
    pub name: Atom,
    pub id: TypeVarId,
    pub upper_bound: TypeId,
    /// Value restriction (`TypeVar("T", int, str)`); empty when unrestricted.
    pub values: Vec<TypeId>,
}

impl TypeParamInfo {
    #[must_use]
    pub const fn as_type_var(&self) -> TypeVarRef {
        TypeVarRef {
            id: self.id,
            name: self.name,
            upper_bound: self.upper_bound,
        }
    }
}

/// A callable signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallableShape {
    pub params: Vec<ParamInfo>,
    pub type_params: Vec<TypeParamInfo>,
    pub return_type: TypeId,
    /// `Callable[..., R]`: accepts any arguments.
    pub is_ellipsis_args: bool,
    pub name: Option<Atom>,
}

impl CallableShape {
    #[must_use]
    pub const fn new(params: Vec<ParamInfo>, return_type: TypeId) -> Self {
        Self {
            params,
            type_params: Vec::new(),
            return_type,
            is_ellipsis_args: false,
            name: None,
        }
    }

    /// Copy of `self` whose argument portion (params, type params, ellipsis flag)
    /// is taken from `other`. Return type and name are kept.
    #[must_use]
    pub fn with_signature_of(&self, other: &Self) -> Self {
        Self {
            params: other.params.clone(),
            type_params: other.type_params.clone(),
            return_type: self.return_type,
            is_ellipsis_args: other.is_ellipsis_args,
            name: self.name,
        }
    }

    #[must_use]
    pub fn with_return_type(&self, return_type: TypeId) -> Self {
        Self {
            return_type,
            ..self.clone()
        }
    }
}

/// The structure behind a `TypeId`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    None,
    Uninhabited { is_noreturn: bool },
    Any(AnyReason),
    /// `Name[Args...]`; `args` may be empty.
    Instance { name: Atom, args: TypeListId },
    Callable(CallableShapeId),
    /// Ordered overload set; the host picks the first matching item.
    Overloaded(TypeListId),
    /// Flattened, deduplicated union. Never contains a nested union.
    Union(TypeListId),
    TypeVar(TypeVarRef),
    /// Anything the plugin does not need to look inside.
    Opaque(Atom),
}

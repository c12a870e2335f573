//! JSON call fixtures.
//!
//! A fixture describes one call site the way a host checker would see it
//! after resolving it:
//!
//! ```json
//! {
//!   "function": "trio.open_file",
//!   "args": [[{ "type": "builtins.str" }], [{ "literal": "rb" }], [{ "literal": 0 }]],
//!   "default_return": "typing.Awaitable"
//! }
//! ```
//!
//! Types are written either as a bare name (`"builtins.int"`, `"None"`,
//! `"NoReturn"`, `"Any"`) or as a node tagged with `kind`.

use anyhow::{Context, Result, bail};
use atp_common::Span;
use atp_plugin::{ArgExpr, CallContext, EnclosingFunction, MethodContext, PluginConfig};
use atp_solver::{
    AnyReason, CallableShape, ClassHierarchy, OBJECT_TYPE_NAME, ParamInfo, ParamKind,
    TypeDatabase, TypeId, TypeParamInfo, TypeVarId,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeExpr {
    Name(String),
    Node(TypeNode),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeNode {
    Instance {
        name: String,
        #[serde(default)]
        args: Vec<TypeExpr>,
    },
    Union {
        members: Vec<TypeExpr>,
    },
    Callable {
        #[serde(default)]
        params: Vec<ParamExpr>,
        #[serde(default)]
        type_params: Vec<TypeParamExpr>,
        returns: Box<TypeExpr>,
        #[serde(default)]
        ellipsis: bool,
    },
    TypeVar(TypeParamExpr),
    Any {
        #[serde(default)]
        reason: AnyReasonExpr,
    },
    Opaque {
        name: String,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnyReasonExpr {
    #[default]
    Explicit,
    Unannotated,
    Error,
    Artifact,
    Special,
}

impl From<AnyReasonExpr> for AnyReason {
    fn from(reason: AnyReasonExpr) -> Self {
        match reason {
            AnyReasonExpr::Explicit => Self::Explicit,
            AnyReasonExpr::Unannotated => Self::Unannotated,
            AnyReasonExpr::Error => Self::FromError,
            AnyReasonExpr::Artifact => Self::ImplementationArtifact,
            AnyReasonExpr::Special => Self::SpecialForm,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKindExpr {
    #[default]
    Positional,
    Optional,
    Star,
    Named,
    NamedOptional,
    StarStar,
}

impl From<ParamKindExpr> for ParamKind {
    fn from(kind: ParamKindExpr) -> Self {
        match kind {
            ParamKindExpr::Positional => Self::Positional,
            ParamKindExpr::Optional => Self::Optional,
            ParamKindExpr::Star => Self::Star,
            ParamKindExpr::Named => Self::Named,
            ParamKindExpr::NamedOptional => Self::NamedOptional,
            ParamKindExpr::StarStar => Self::StarStar,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamExpr {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub kind: ParamKindExpr,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamExpr {
    pub name: String,
    pub id: i32,
    /// Defaults to `builtins.object`.
    #[serde(default)]
    pub bound: Option<Box<TypeExpr>>,
}

impl TypeParamExpr {
    fn lower(&self, db: &dyn TypeDatabase) -> TypeParamInfo {
        let upper_bound = match &self.bound {
            Some(bound) => bound.lower(db),
            None => db.instance(OBJECT_TYPE_NAME, vec![]),
        };
        TypeParamInfo {
            name: db.intern_string(&self.name),
            id: TypeVarId(self.id),
            upper_bound,
            values: Vec::new(),
        }
    }
}

impl TypeExpr {
    pub fn lower(&self, db: &dyn TypeDatabase) -> TypeId {
        match self {
            Self::Name(name) => match name.as_str() {
                "None" => TypeId::NONE,
                "NoReturn" => TypeId::NO_RETURN,
                "Never" => TypeId::NEVER,
                "Any" => TypeId::ANY,
                _ => db.instance(name, vec![]),
            },
            Self::Node(node) => node.lower(db),
        }
    }
}

impl TypeNode {
    fn lower(&self, db: &dyn TypeDatabase) -> TypeId {
        match self {
            Self::Instance { name, args } => {
                let args = args.iter().map(|arg| arg.lower(db)).collect();
                db.instance(name, args)
            }
            Self::Union { members } => {
                db.union_declared(members.iter().map(|member| member.lower(db)).collect())
            }
            Self::Callable {
                params,
                type_params,
                returns,
                ellipsis,
            } => {
                let params = params
                    .iter()
                    .map(|param| ParamInfo {
                        name: param.name.as_deref().map(|name| db.intern_string(name)),
                        type_id: param.ty.lower(db),
                        kind: param.kind.into(),
                    })
                    .collect();
                let mut shape = CallableShape::new(params, returns.lower(db));
                shape.type_params = type_params.iter().map(|tp| tp.lower(db)).collect();
                shape.is_ellipsis_args = *ellipsis;
                db.callable(shape)
            }
            Self::TypeVar(param) => db.type_var(param.lower(db).as_type_var()),
            Self::Any { reason } => AnyReason::from(*reason).type_id(),
            Self::Opaque { name } => db.opaque(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Int(i64),
    Str(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgFixture {
    /// Inferred from `literal` when omitted.
    #[serde(rename = "type", default)]
    pub ty: Option<TypeExpr>,
    #[serde(default)]
    pub literal: Option<LiteralValue>,
}

impl ArgFixture {
    fn lower(&self, db: &dyn TypeDatabase) -> Result<(TypeId, ArgExpr)> {
        let expr = match &self.literal {
            Some(LiteralValue::Int(value)) => ArgExpr::IntLiteral(*value),
            Some(LiteralValue::Str(value)) => ArgExpr::StrLiteral(value.clone()),
            None => ArgExpr::Other,
        };
        let ty = match (&self.ty, &expr) {
            (Some(ty), _) => ty.lower(db),
            (None, ArgExpr::IntLiteral(_)) => db.instance("builtins.int", vec![]),
            (None, ArgExpr::StrLiteral(_)) => db.instance("builtins.str", vec![]),
            (None, ArgExpr::Other) => bail!("argument needs a `type` or a `literal`"),
        };
        Ok((ty, expr))
    }
}

const fn yes() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnclosingFixture {
    #[serde(default = "yes")]
    pub is_coroutine: bool,
    #[serde(default = "yes")]
    pub is_decorated: bool,
    /// Full post-async signature.
    #[serde(default)]
    pub signature: Option<TypeExpr>,
    /// Shorthand: the declared result type `R`, giving a signature
    /// `def () -> Coroutine[Any, Any, R]`.
    #[serde(default)]
    pub returns: Option<TypeExpr>,
}

impl EnclosingFixture {
    fn lower(&self, db: &dyn TypeDatabase, config: &PluginConfig) -> Result<EnclosingFunction> {
        let signature = match (&self.signature, &self.returns) {
            (Some(_), Some(_)) => {
                bail!("enclosing function takes `signature` or `returns`, not both")
            }
            (Some(signature), None) => Some(signature.lower(db)),
            (None, Some(returns)) => {
                let coroutine = db.instance(
                    &config.coroutine,
                    vec![TypeId::ANY, TypeId::ANY, returns.lower(db)],
                );
                Some(db.callable(CallableShape::new(vec![], coroutine)))
            }
            (None, None) => None,
        };
        Ok(EnclosingFunction {
            is_coroutine: self.is_coroutine,
            is_decorated: self.is_decorated,
            signature,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaseFixture {
    pub derived: String,
    pub base: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    /// File name used in diagnostics.
    #[serde(default)]
    pub file: Option<String>,
    /// Source text the span points into; enables line/column output.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub receiver: Option<TypeExpr>,
    #[serde(default)]
    pub args: Vec<Vec<ArgFixture>>,
    pub default_return: TypeExpr,
    /// `[start, end)` byte offsets of the call.
    #[serde(default)]
    pub span: Option<[u32; 2]>,
    #[serde(default)]
    pub enclosing: Option<EnclosingFixture>,
    /// Extra nominal bases on top of the stock async hierarchy.
    #[serde(default)]
    pub bases: Vec<BaseFixture>,
}

/// A fixture resolved against a type database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallSite {
    Function { name: String, ctx: CallContext },
    Method { name: String, ctx: MethodContext },
}

impl CallSite {
    pub fn name(&self) -> &str {
        match self {
            Self::Function { name, .. } | Self::Method { name, .. } => name,
        }
    }

    pub const fn default_return_type(&self) -> TypeId {
        match self {
            Self::Function { ctx, .. } => ctx.default_return_type,
            Self::Method { ctx, .. } => ctx.call.default_return_type,
        }
    }
}

impl Fixture {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid call fixture")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn file_name(&self) -> &str {
        self.file.as_deref().unwrap_or("<fixture>")
    }

    /// The stock async hierarchy plus this fixture's `bases`.
    pub fn hierarchy(&self, db: &dyn TypeDatabase) -> ClassHierarchy {
        let mut hierarchy = ClassHierarchy::with_async_defaults(db);
        for base in &self.bases {
            hierarchy.add_base(db, &base.derived, &base.base);
        }
        hierarchy
    }

    pub fn lower(&self, db: &dyn TypeDatabase, config: &PluginConfig) -> Result<CallSite> {
        let location = match self.span {
            Some([start, end]) if start <= end => Span::new(start, end),
            Some([start, end]) => bail!("span start {start} is after its end {end}"),
            None => Span::dummy(),
        };

        let mut ctx = CallContext::new(self.default_return.lower(db), location);
        for (idx, group) in self.args.iter().enumerate() {
            let (types, exprs): (Vec<_>, Vec<_>) = group
                .iter()
                .map(|arg| arg.lower(db))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("in argument group {idx}"))?
                .into_iter()
                .unzip();
            ctx = ctx.with_arg_group(types, exprs);
        }
        if let Some(enclosing) = &self.enclosing {
            ctx = ctx.with_enclosing_function(enclosing.lower(db, config)?);
        }

        match (&self.function, &self.method) {
            (Some(name), None) => {
                if self.receiver.is_some() {
                    bail!("`receiver` only applies to method fixtures");
                }
                Ok(CallSite::Function {
                    name: name.clone(),
                    ctx,
                })
            }
            (None, Some(name)) => {
                let Some(receiver) = &self.receiver else {
                    bail!("method fixture `{name}` needs a `receiver`");
                };
                Ok(CallSite::Method {
                    name: name.clone(),
                    ctx: MethodContext::new(ctx, receiver.lower(db)),
                })
            }
            (Some(_), Some(_)) => bail!("fixture names both a `function` and a `method`"),
            (None, None) => bail!("fixture must name a `function` or a `method`"),
        }
    }
}

#[cfg(test)]
#[path = "../tests/fixture_tests.rs"]
mod tests;

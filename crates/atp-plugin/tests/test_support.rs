use crate::config::PluginConfig;
use crate::context::{CallContext, EnclosingFunction};
use crate::host::RecordingChecker;
use atp_common::Span;
use atp_solver::{
    CallableShape, ClassHierarchy, ParamInfo, TypeDatabase, TypeFormatter, TypeId, TypeInterner,
};

pub(crate) const SITE: Span = Span::new(10, 24);

pub(crate) struct Fixture {
    pub db: TypeInterner,
    pub hierarchy: ClassHierarchy,
    pub config: PluginConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(PluginConfig::default())
    }

    pub fn with_config(config: PluginConfig) -> Self {
        let db = TypeInterner::new();
        let hierarchy = ClassHierarchy::with_async_defaults(&db);
        Self {
            db,
            hierarchy,
            config,
        }
    }

    pub fn checker(&self) -> RecordingChecker<'_> {
        RecordingChecker::new(&self.db, "test.py").with_hierarchy(&self.hierarchy)
    }

    pub fn named(&self, name: &str) -> TypeId {
        self.db.instance(name, vec![])
    }

    pub fn generic(&self, name: &str, args: Vec<TypeId>) -> TypeId {
        self.db.instance(name, args)
    }

    pub fn int(&self) -> TypeId {
        self.named("builtins.int")
    }

    pub fn str(&self) -> TypeId {
        self.named("builtins.str")
    }

    pub fn bool(&self) -> TypeId {
        self.named("builtins.bool")
    }

    pub fn yield_marker(&self, inner: TypeId) -> TypeId {
        self.generic("trio_typing.YieldType", vec![inner])
    }

    pub fn send_marker(&self, inner: TypeId) -> TypeId {
        self.generic("trio_typing.SendType", vec![inner])
    }

    /// A union as the author wrote it in an annotation.
    pub fn declared(&self, arms: Vec<TypeId>) -> TypeId {
        self.db.union_declared(arms)
    }

    pub fn callable(&self, params: Vec<ParamInfo>, return_type: TypeId) -> TypeId {
        self.db.callable(CallableShape::new(params, return_type))
    }

    pub fn param(&self, name: &str, ty: TypeId) -> ParamInfo {
        ParamInfo::positional(Some(self.db.intern_string(name)), ty)
    }

    pub fn star(&self, name: &str, ty: TypeId) -> ParamInfo {
        ParamInfo::star(Some(self.db.intern_string(name)), ty)
    }

    /// `@async_generator async def f() -> composite`, post-async signature.
    pub fn async_generator_function(&self, composite: TypeId) -> EnclosingFunction {
        let coroutine = self.generic(
            "typing.Coroutine",
            vec![TypeId::ANY, TypeId::ANY, composite],
        );
        EnclosingFunction {
            is_coroutine: true,
            is_decorated: true,
            signature: Some(self.callable(vec![], coroutine)),
        }
    }

    pub fn call(&self, default_return_type: TypeId) -> CallContext {
        CallContext::new(default_return_type, SITE)
    }

    pub fn format(&self, ty: TypeId) -> String {
        TypeFormatter::new(&self.db).format(ty)
    }
}

pub(crate) fn messages(checker: &RecordingChecker<'_>) -> Vec<String> {
    checker
        .diagnostics()
        .iter()
        .map(|d| d.message_text.clone())
        .collect()
}

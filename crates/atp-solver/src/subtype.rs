//! Reference subtype checker.
//!
//! Hosts normally answer subtype queries themselves. This checker exists so the
//! plugin can be exercised standalone (tests, the CLI) with rules close to the
//! host's for the shapes the plugin produces.
//!
//! ## Rules
//! - Reflexive, and `Any` is compatible in both directions
//! - Uninhabited types are subtypes of everything
//! - Union source: every arm must match; union target: some arm must match
//! - Type variables: same id, otherwise the upper bound is compared
//! - Instances: nominal via `ClassHierarchy`, args compared covariantly
//! - Callables: contravariant parameters, covariant return
//! - Overloads: some item of the source must match every item of the target

use crate::class_hierarchy::{ClassHierarchy, OBJECT_TYPE_NAME};
use crate::db::TypeDatabase;
use crate::types::{CallableShape, TypeData, TypeId};
use atp_common::limits::MAX_SUBTYPE_DEPTH;
use tracing::trace;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubtypeResult {
    True,
    False,
}

impl SubtypeResult {
    #[inline]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    #[inline]
    const fn from_bool(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

pub struct SubtypeChecker<'a> {
    interner: &'a dyn TypeDatabase,
    hierarchy: Option<&'a ClassHierarchy>,
    depth: u32,
}

impl<'a> SubtypeChecker<'a> {
    pub fn new(interner: &'a dyn TypeDatabase) -> Self {
        Self {
            interner,
            hierarchy: None,
            depth: 0,
        }
    }

    #[must_use]
    pub fn with_hierarchy(mut self, hierarchy: &'a ClassHierarchy) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    pub fn check_subtype(&mut self, source: TypeId, target: TypeId) -> SubtypeResult {
        if source == target {
            return SubtypeResult::True;
        }
        if self.depth >= MAX_SUBTYPE_DEPTH {
            trace!(?source, ?target, "subtype depth limit reached");
            return SubtypeResult::False;
        }

        self.depth += 1;
        let result = self.check_subtype_inner(source, target);
        self.depth -= 1;
        trace!(?source, ?target, ?result, "check_subtype");
        result
    }

    fn check_subtype_inner(&mut self, source: TypeId, target: TypeId) -> SubtypeResult {
        let (Some(s), Some(t)) = (self.interner.lookup(source), self.interner.lookup(target))
        else {
            return SubtypeResult::False;
        };

        match (&s, &t) {
            (TypeData::Any(_), _) | (_, TypeData::Any(_)) => return SubtypeResult::True,
            (TypeData::Uninhabited { .. }, _) => return SubtypeResult::True,
            _ => {}
        }

        if let TypeData::Union(list) = s {
            let members = self.interner.type_list_items(list);
            return SubtypeResult::from_bool(
                members.iter().all(|&m| self.check_subtype(m, target).is_true()),
            );
        }
        if let TypeData::Union(list) = t {
            let members = self.interner.type_list_items(list);
            return SubtypeResult::from_bool(
                members.iter().any(|&m| self.check_subtype(source, m).is_true()),
            );
        }

        if let TypeData::TypeVar(var) = s {
            if let TypeData::TypeVar(target_var) = t
                && target_var.id == var.id
            {
                return SubtypeResult::True;
            }
            return self.check_subtype(var.upper_bound, target);
        }

        if self.is_object_type(&t) {
            return SubtypeResult::True;
        }

        match (s, t) {
            (
                TypeData::Instance {
                    name: s_name,
                    args: s_args,
                },
                TypeData::Instance {
                    name: t_name,
                    args: t_args,
                },
            ) => {
                let related = s_name == t_name
                    || self
                        .hierarchy
                        .is_some_and(|h| h.is_nominal_subclass(s_name, t_name));
                if !related {
                    return SubtypeResult::False;
                }
                let s_args = self.interner.type_list_items(s_args);
                let t_args = self.interner.type_list_items(t_args);
                if s_name == t_name && s_args.len() != t_args.len() {
                    return SubtypeResult::False;
                }
                if t_args.len() > s_args.len() {
                    return SubtypeResult::False;
                }
                SubtypeResult::from_bool(
                    s_args
                        .iter()
                        .zip(t_args.iter())
                        .all(|(&sa, &ta)| self.check_subtype(sa, ta).is_true()),
                )
            }
            (TypeData::Callable(s_shape), TypeData::Callable(t_shape)) => {
                match (
                    self.interner.callable_shape(s_shape),
                    self.interner.callable_shape(t_shape),
                ) {
                    (Some(s_shape), Some(t_shape)) => self.check_callable(&s_shape, &t_shape),
                    _ => SubtypeResult::False,
                }
            }
            (TypeData::Overloaded(list), _) => {
                let items = self.interner.type_list_items(list);
                SubtypeResult::from_bool(
                    items.iter().any(|&item| self.check_subtype(item, target).is_true()),
                )
            }
            (_, TypeData::Overloaded(list)) => {
                let items = self.interner.type_list_items(list);
                SubtypeResult::from_bool(
                    items.iter().all(|&item| self.check_subtype(source, item).is_true()),
                )
            }
            _ => SubtypeResult::False,
        }
    }

    fn check_callable(&mut self, source: &CallableShape, target: &CallableShape) -> SubtypeResult {
        if !self.check_subtype(source.return_type, target.return_type).is_true() {
            return SubtypeResult::False;
        }
        if source.is_ellipsis_args || target.is_ellipsis_args {
            return SubtypeResult::True;
        }
        if source.params.len() != target.params.len() {
            return SubtypeResult::False;
        }
        for (s_param, t_param) in source.params.iter().zip(&target.params) {
            if s_param.kind != t_param.kind {
                return SubtypeResult::False;
            }
            // Parameters are contravariant.
            if !self.check_subtype(t_param.type_id, s_param.type_id).is_true() {
                return SubtypeResult::False;
            }
        }
        SubtypeResult::True
    }

    fn is_object_type(&self, data: &TypeData) -> bool {
        match data {
            TypeData::Instance { name, args } => {
                self.interner.type_list_items(*args).is_empty()
                    && &*self.interner.resolve_atom(*name) == OBJECT_TYPE_NAME
            }
            _ => false,
        }
    }
}

/// One-shot subtype query.
pub fn is_subtype_of(
    db: &dyn TypeDatabase,
    hierarchy: Option<&ClassHierarchy>,
    source: TypeId,
    target: TypeId,
) -> bool {
    let mut checker = SubtypeChecker::new(db);
    if let Some(hierarchy) = hierarchy {
        checker = checker.with_hierarchy(hierarchy);
    }
    checker.check_subtype(source, target).is_true()
}

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod tests;

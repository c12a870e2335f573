//! Type formatting for diagnostics.
//!
//! Output follows the annotation syntax users write: `Union[bool, str]`,
//! `Awaitable[_AsyncRawIOBase]`, `def (x: int, *args: Any) -> None`.
//! Qualified names are shortened to their last segment.

use crate::db::TypeDatabase;
use crate::types::{CallableShape, ParamKind, TypeData, TypeId};
use atp_common::limits::MAX_FORMAT_DEPTH;
use std::fmt::Write;

pub struct TypeFormatter<'a> {
    db: &'a dyn TypeDatabase,
    depth: u32,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        Self { db, depth: 0 }
    }

    pub fn format(&mut self, type_id: TypeId) -> String {
        if self.depth > MAX_FORMAT_DEPTH {
            return "...".to_string();
        }
        self.depth += 1;
        let result = self.format_inner(type_id);
        self.depth -= 1;
        result
    }

    fn format_inner(&mut self, type_id: TypeId) -> String {
        let Some(data) = self.db.lookup(type_id) else {
            return format!("<unknown type {}>", type_id.0);
        };

        match data {
            TypeData::None => "None".to_string(),
            TypeData::Uninhabited { is_noreturn: true } => "NoReturn".to_string(),
            TypeData::Uninhabited { is_noreturn: false } => "<nothing>".to_string(),
            TypeData::Any(_) => "Any".to_string(),
            TypeData::Instance { name, args } => {
                let name = self.db.resolve_atom(name);
                let short = short_name(&name).to_string();
                let args = self.db.type_list_items(args);
                if args.is_empty() {
                    short
                } else {
                    format!("{short}[{}]", self.format_list(&args))
                }
            }
            TypeData::Union(list) => {
                let members = self.db.type_list_items(list);
                format!("Union[{}]", self.format_list(&members))
            }
            TypeData::Overloaded(list) => {
                let items = self.db.type_list_items(list);
                format!("Overload({})", self.format_list(&items))
            }
            TypeData::Callable(shape_id) => match self.db.callable_shape(shape_id) {
                Some(shape) => self.format_callable(&shape),
                None => "def (...)".to_string(),
            },
            TypeData::TypeVar(var) => self.db.resolve_atom(var.name).to_string(),
            TypeData::Opaque(name) => short_name(&self.db.resolve_atom(name)).to_string(),
        }
    }

    fn format_list(&mut self, items: &[TypeId]) -> String {
        items
            .iter()
            .map(|&item| self.format(item))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn format_callable(&mut self, shape: &CallableShape) -> String {
        let mut out = String::from("def ");
        if !shape.type_params.is_empty() {
            let names: Vec<_> = shape
                .type_params
                .iter()
                .map(|tp| self.db.resolve_atom(tp.name).to_string())
                .collect();
            let _ = write!(out, "[{}] ", names.join(", "));
        }

        if shape.is_ellipsis_args {
            out.push_str("(...)");
        } else {
            let mut params = Vec::with_capacity(shape.params.len());
            for param in &shape.params {
                let ty = self.format(param.type_id);
                let name = param.name.map(|n| self.db.resolve_atom(n));
                let rendered = match (param.kind, name) {
                    (ParamKind::Star, Some(name)) => format!("*{name}: {ty}"),
                    (ParamKind::Star, None) => format!("*{ty}"),
                    (ParamKind::StarStar, Some(name)) => format!("**{name}: {ty}"),
                    (ParamKind::StarStar, None) => format!("**{ty}"),
                    (ParamKind::Optional | ParamKind::NamedOptional, Some(name)) => {
                        format!("{name}: {ty} =")
                    }
                    (ParamKind::Optional | ParamKind::NamedOptional, None) => format!("{ty} ="),
                    (_, Some(name)) => format!("{name}: {ty}"),
                    (_, None) => ty,
                };
                params.push(rendered);
            }
            let _ = write!(out, "({})", params.join(", "));
        }

        let ret = self.format(shape.return_type);
        let _ = write!(out, " -> {ret}");
        out
    }
}

/// `trio._AsyncRawIOBase` -> `_AsyncRawIOBase`
fn short_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;

//! Leaf scalar binding: native extraction plus registry conversion

use std::any::Any;

use crate::error::{BindError, Result};
use crate::shape::TargetType;
use crate::value::Node;

use super::Binder;

/// Bind a leaf node to `target`.
///
/// A string leaf against a registered enum matches variant names instead
/// of consulting the conversion registry. Everything else extracts the
/// leaf's native representation and looks up an exact (native, target)
/// conversion.
pub(crate) fn bind_leaf(binder: &Binder<'_>, node: &Node, target: TargetType) -> Result<Box<dyn Any>> {
    if let Node::String(s) = node {
        if let Some(info) = binder.shapes.enum_info(target.id) {
            return info.from_name(s).ok_or_else(|| BindError::Format {
                value: s.clone(),
                enum_name: info.name.to_string(),
            });
        }
    }

    let (native, native_name): (Box<dyn Any>, &'static str) = match node {
        Node::Bool(b) => (Box::new(*b), "bool"),
        Node::Integer(n) => (Box::new(*n), "i64"),
        Node::Float(n) => (Box::new(*n), "f64"),
        Node::String(s) => (Box::new(s.clone()), "String"),
        Node::LocalDateTime(dt) => (Box::new(*dt), "NaiveDateTime"),
        Node::OffsetDateTime(dt) => (Box::new(*dt), "DateTime<FixedOffset>"),
        // Null, Array, and Table are dispatched before we get here
        other => {
            return Err(BindError::TypeConversion {
                from: other.kind_name().to_string(),
                to: target.name.to_string(),
            })
        }
    };

    let native_id = native.as_ref().type_id();
    match binder.conversions.lookup(native_id, target.id) {
        Some(convert) => Ok((*convert)(native)),
        None => Err(BindError::TypeConversion {
            from: native_name.to_string(),
            to: target.name.to_string(),
        }),
    }
}

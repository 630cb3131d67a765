//! Serialization engine: values back to tree nodes
//!
//! [`Emitter`] is the mirror image of the binder: where binding tries
//! shape candidates speculatively, emission is deterministic. The data is
//! defined by the value itself, so the first discovered shape always
//! defines the output and no trial-and-error occurs.

use std::any::Any;

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::context::BindContext;
use crate::error::{BindError, Result};
use crate::shape::{Member, ShapeRegistry, TargetType, TypeInfo};
use crate::value::{ArrayNode, Node, Scalar, Table};

/// The serialization engine.
pub struct Emitter<'a> {
    shapes: &'a ShapeRegistry,
    ctx: BindContext,
}

impl<'a> Emitter<'a> {
    /// Create an emitter over the given shape registry.
    pub fn new(shapes: &'a ShapeRegistry) -> Self {
        Self {
            shapes,
            ctx: BindContext::default(),
        }
    }

    /// Replace the context (depth limit).
    pub fn with_context(mut self, ctx: BindContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Emit `value` as a tree node.
    pub fn emit<T: 'static>(&self, value: &T) -> Result<Node> {
        self.emit_any(value, TargetType::of::<T>(), 0)
    }

    fn emit_any(&self, value: &dyn Any, target: TargetType, depth: usize) -> Result<Node> {
        self.ctx.check_depth(depth)?;

        if let Some(leaf) = emit_leaf(value) {
            return Ok(leaf);
        }
        if let Some(info) = self.shapes.enum_info(target.id) {
            return match info.name_of(value) {
                Some(name) => Ok(Node::string(name)),
                None => Err(BindError::Format {
                    value: "<unregistered variant>".to_string(),
                    enum_name: info.name.to_string(),
                }),
            };
        }
        if let Some(seq) = self.shapes.sequence_info(target.id) {
            return self.emit_sequence(value, &seq, target, depth);
        }
        if let Some(info) = self.shapes.type_info(target.id) {
            return self.emit_shaped(value, &info, target, depth);
        }

        // no leaf, enum, sequence, or shape form exists for this value
        Err(BindError::TypeConversion {
            from: target.name.to_string(),
            to: "value tree node".to_string(),
        })
    }

    fn emit_sequence(
        &self,
        value: &dyn Any,
        seq: &crate::shape::SequenceInfo,
        target: TargetType,
        depth: usize,
    ) -> Result<Node> {
        let Some(elements) = seq.elements(value) else {
            return Err(BindError::TypeConversion {
                from: target.name.to_string(),
                to: seq.elem.name.to_string(),
            });
        };

        let mut items = Vec::with_capacity(elements.len());
        for element in &elements {
            items.push(self.emit_any(element.as_ref(), seq.elem, depth + 1)?);
        }

        // flag arrays of tables for the renderer
        let all_tables = !items.is_empty() && items.iter().all(Node::is_table);
        Ok(Node::Array(if all_tables {
            ArrayNode::of_tables(items)
        } else {
            ArrayNode::new(items)
        }))
    }

    fn emit_shaped(
        &self,
        value: &dyn Any,
        info: &TypeInfo,
        target: TargetType,
        depth: usize,
    ) -> Result<Node> {
        // The first candidate defines the shape. A zero-member first
        // candidate (the fill-style construction path) and a plain record
        // both expose themselves through their settable members instead,
        // mirroring the binder's fill rule so such types round-trip.
        let members: Vec<&Member> = match info.candidates(None).into_iter().next() {
            Some(shape) if shape.member_count() > 0 => shape.members().collect(),
            _ => info.settable_members().collect(),
        };
        if members.is_empty() {
            return Err(BindError::ShapeNotFound {
                type_name: target.name.to_string(),
            });
        }

        let mut table = Table::new();
        for member in members {
            let Some(current) = member.read(value) else {
                return Err(BindError::TypeConversion {
                    from: target.name.to_string(),
                    to: member.ty.name.to_string(),
                });
            };
            let node = self.emit_any(current.as_ref(), member.ty, depth + 1)?;
            table.insert(member.name.clone(), node);
        }
        Ok(Node::Table(table))
    }
}

/// Map a leaf-native value directly to its node kind. Integer-family
/// types widen to the tree's 64-bit integer, floats to its 64-bit float;
/// `u64` and wider have no tree representation.
fn emit_leaf(value: &dyn Any) -> Option<Node> {
    if let Some(b) = value.downcast_ref::<bool>() {
        return Some(Node::Bool(*b));
    }
    if let Some(n) = value.downcast_ref::<i64>() {
        return Some(Node::Integer(*n));
    }
    if let Some(n) = value.downcast_ref::<i32>() {
        return Some(Node::Integer(i64::from(*n)));
    }
    if let Some(n) = value.downcast_ref::<i16>() {
        return Some(Node::Integer(i64::from(*n)));
    }
    if let Some(n) = value.downcast_ref::<i8>() {
        return Some(Node::Integer(i64::from(*n)));
    }
    if let Some(n) = value.downcast_ref::<u8>() {
        return Some(Node::Integer(i64::from(*n)));
    }
    if let Some(n) = value.downcast_ref::<u16>() {
        return Some(Node::Integer(i64::from(*n)));
    }
    if let Some(n) = value.downcast_ref::<u32>() {
        return Some(Node::Integer(i64::from(*n)));
    }
    if let Some(n) = value.downcast_ref::<f64>() {
        return Some(Node::Float(*n));
    }
    if let Some(n) = value.downcast_ref::<f32>() {
        return Some(Node::Float(f64::from(*n)));
    }
    if let Some(s) = value.downcast_ref::<String>() {
        return Some(Node::String(s.clone()));
    }
    if let Some(dt) = value.downcast_ref::<NaiveDateTime>() {
        return Some(Node::LocalDateTime(*dt));
    }
    if let Some(dt) = value.downcast_ref::<DateTime<FixedOffset>>() {
        return Some(Node::OffsetDateTime(*dt));
    }
    if let Some(s) = value.downcast_ref::<Scalar>() {
        return Some(Node::from(s.clone()));
    }
    None
}

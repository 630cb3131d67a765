//! Deserialization engine: recursive tree-to-value binding
//!
//! [`Binder`] walks a [`Node`] tree and produces an instance of a
//! registered target type. Dispatch is by node kind: tables run the shape
//! candidate loop, arrays go through the collection builder, string
//! leaves against enum targets match variant names, and every other leaf
//! goes through the conversion registry.

mod array;
mod leaf;
mod table;

use std::any::Any;

use crate::context::BindContext;
use crate::convert::ConversionRegistry;
use crate::error::{BindError, Result};
use crate::shape::{ShapeRegistry, TargetType};
use crate::value::Node;

/// The deserialization engine.
///
/// Holds references to the registries for one batch of bind calls;
/// binding itself is a synchronous recursive walk with no side effects
/// beyond the constructed result.
pub struct Binder<'a> {
    pub(crate) shapes: &'a ShapeRegistry,
    pub(crate) conversions: &'a ConversionRegistry,
    ctx: BindContext,
}

impl<'a> Binder<'a> {
    /// Create a binder over the given registries.
    pub fn new(shapes: &'a ShapeRegistry, conversions: &'a ConversionRegistry) -> Self {
        Self {
            shapes,
            conversions,
            ctx: BindContext::default(),
        }
    }

    /// Replace the context (depth limit).
    pub fn with_context(mut self, ctx: BindContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Bind a tree against target type `T`.
    ///
    /// On failure nothing is partially populated; the error carries the
    /// full per-candidate diagnostic detail where candidates were tried.
    pub fn bind<T: 'static>(&self, node: &Node) -> Result<T> {
        let target = TargetType::of::<T>();
        let bound = self.bind_node(node, target, 0)?;
        match bound.downcast::<T>() {
            Ok(value) => Ok(*value),
            // a conversion registered with the wrong destination type
            Err(_) => Err(BindError::TypeConversion {
                from: node.kind_name().to_string(),
                to: target.name.to_string(),
            }),
        }
    }

    pub(crate) fn bind_node(
        &self,
        node: &Node,
        target: TargetType,
        depth: usize,
    ) -> Result<Box<dyn Any>> {
        self.ctx.check_depth(depth)?;
        match node {
            Node::Table(t) => table::bind_table(self, t, target, depth),
            Node::Array(a) => array::build(self, a, target, depth),
            Node::Null => Err(BindError::UnexpectedNull),
            leaf => leaf::bind_leaf(self, leaf, target),
        }
    }
}

//! Shape discovery: candidate construction plans for target types
//!
//! Rust exposes no runtime reflection, so the discovery capability is
//! supplied by explicit registration: callers describe each target type's
//! shapes once (members, construct function, accessors, mutators) in a
//! [`ShapeRegistry`], and the engine enumerates and orders those
//! descriptions exactly as a reflection-based host would enumerate
//! constructors.

mod builder;
mod registry;

pub use builder::{Args, ShapeBuilder, TypeBuilder};
pub use registry::{global, EnumInfo, SequenceInfo, ShapeRegistry};

use std::any::{Any, TypeId};
use std::sync::Arc;

/// Handle on a host type: its `TypeId` plus a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetType {
    /// Runtime type identity (exact-match comparisons only)
    pub id: TypeId,

    /// Name used in diagnostics
    pub name: &'static str,
}

impl TargetType {
    /// The handle for `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }
}

/// Produces a fresh default value for an optional member or a
/// default-constructible type.
pub type DefaultFn = Arc<dyn Fn() -> Box<dyn Any> + Send + Sync>;

/// Reads a member's current value from an instance. Returns `None` when
/// the instance is not of the member's declaring type.
pub type AccessorFn = Arc<dyn Fn(&dyn Any) -> Option<Box<dyn Any>> + Send + Sync>;

/// Writes a value into an instance after construction. Returns `false`
/// when the instance or value is not of the declared type.
pub type MutatorFn = Arc<dyn Fn(&mut dyn Any, Box<dyn Any>) -> bool + Send + Sync>;

/// Invokes a shape's construct function with resolved member values.
pub type ConstructFn = Arc<dyn Fn(Args) -> Box<dyn Any> + Send + Sync>;

/// One named member of a shape.
#[derive(Clone)]
pub struct Member {
    /// Member name; must match the source table key
    pub name: String,

    /// Declared type
    pub ty: TargetType,

    /// Default value for optional members (`None` means required)
    pub default: Option<DefaultFn>,

    /// Reads the current value for serialization
    pub accessor: Option<AccessorFn>,

    /// Writes a value post-construction (member fill)
    pub mutator: Option<MutatorFn>,

    /// Invisible to discovery and binding in both directions
    pub skip: bool,
}

impl Member {
    /// Whether this member must be present in the source table.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    pub(crate) fn default_value(&self) -> Option<Box<dyn Any>> {
        self.default.as_ref().map(|make| (**make)())
    }

    pub(crate) fn read(&self, instance: &dyn Any) -> Option<Box<dyn Any>> {
        self.accessor.as_ref().and_then(|get| (**get)(instance))
    }

    pub(crate) fn write(&self, instance: &mut dyn Any, value: Box<dyn Any>) -> bool {
        match &self.mutator {
            Some(set) => (**set)(instance, value),
            None => false,
        }
    }
}

/// A candidate construction plan for a target type: an ordered member
/// list plus the function that builds an instance from resolved values.
#[derive(Clone)]
pub struct Shape {
    pub(crate) members: Vec<Member>,
    pub(crate) construct: ConstructFn,
}

impl Shape {
    /// Visible members, with skip-flagged entries omitted.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| !m.skip)
    }

    /// Number of visible members.
    pub fn member_count(&self) -> usize {
        self.members().count()
    }

    /// Number of visible members without a default.
    pub fn required_count(&self) -> usize {
        self.members().filter(|m| m.is_required()).count()
    }

    /// Signature for diagnostics, e.g. `Point(x: i64, y: i64)`.
    pub fn signature(&self, type_name: &str) -> String {
        let members = self
            .members()
            .map(|m| format!("{}: {}", m.name, m.ty.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", type_name, members)
    }

    pub(crate) fn invoke(&self, values: Vec<Box<dyn Any>>) -> Box<dyn Any> {
        (*self.construct)(Args::new(values))
    }
}

/// Registered metadata for one target type.
pub struct TypeInfo {
    /// Name used in diagnostics
    pub name: &'static str,

    pub(crate) shapes: Vec<Shape>,
    pub(crate) settable: Vec<Member>,
    pub(crate) fallback: Option<DefaultFn>,
}

impl TypeInfo {
    /// Candidate shapes in trial order: most members first, ties in
    /// declaration order.
    ///
    /// When `key_count` is given, shapes needing more required members
    /// than there are keys are discarded up front. The filter is a cheap
    /// pre-check, not a guarantee: a surviving shape may still fail to
    /// bind for other reasons.
    pub fn candidates(&self, key_count: Option<usize>) -> Vec<&Shape> {
        let mut list: Vec<&Shape> = self
            .shapes
            .iter()
            .filter(|s| match key_count {
                Some(n) => s.required_count() <= n,
                None => true,
            })
            .collect();
        // sort_by is stable, so equal-sized shapes keep declaration order
        list.sort_by(|a, b| b.member_count().cmp(&a.member_count()));
        list
    }

    /// Public settable members, skip-flagged entries omitted.
    pub fn settable_members(&self) -> impl Iterator<Item = &Member> {
        self.settable.iter().filter(|m| !m.skip)
    }

    /// Whether the type can be constructed at all (some shape, or a
    /// default-construction fallback).
    pub fn has_construction_plan(&self) -> bool {
        !self.shapes.is_empty() || self.fallback.is_some()
    }

    pub(crate) fn fallback_instance(&self) -> Option<Box<dyn Any>> {
        self.fallback.as_ref().map(|make| (**make)())
    }
}

//! Process-wide registry of target type metadata

use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use super::builder::TypeBuilder;
use super::{TargetType, TypeInfo};

/// Unit-variant enum descriptor: maps between variant values and their
/// names (case-sensitive).
pub struct EnumInfo {
    /// Name used in diagnostics
    pub name: &'static str,

    variants: Vec<String>,
    make: Arc<dyn Fn(usize) -> Option<Box<dyn Any>> + Send + Sync>,
    index_of: Arc<dyn Fn(&dyn Any) -> Option<usize> + Send + Sync>,
}

impl EnumInfo {
    /// The registered variant names, in declaration order.
    pub fn variant_names(&self) -> &[String] {
        &self.variants
    }

    /// Construct the variant whose name matches exactly.
    pub fn from_name(&self, name: &str) -> Option<Box<dyn Any>> {
        let index = self.variants.iter().position(|v| v == name)?;
        (*self.make)(index)
    }

    /// The name of the variant `value` holds, if it is one of the
    /// registered variants.
    pub fn name_of(&self, value: &dyn Any) -> Option<&str> {
        (*self.index_of)(value).map(|i| self.variants[i].as_str())
    }
}

/// Sequence descriptor for a `Vec<T>` target: how to assemble one from
/// bound elements and how to read its elements back out.
pub struct SequenceInfo {
    /// The element type
    pub elem: TargetType,

    make: Arc<dyn Fn(Vec<Box<dyn Any>>) -> Option<Box<dyn Any>> + Send + Sync>,
    read: Arc<dyn Fn(&dyn Any) -> Option<Vec<Box<dyn Any>>> + Send + Sync>,
}

impl SequenceInfo {
    /// Assemble the sequence from element values. `None` when an element
    /// is not of the declared element type.
    pub fn assemble(&self, items: Vec<Box<dyn Any>>) -> Option<Box<dyn Any>> {
        (*self.make)(items)
    }

    /// Read the elements of `value`. `None` when `value` is not the
    /// registered sequence type.
    pub fn elements(&self, value: &dyn Any) -> Option<Vec<Box<dyn Any>>> {
        (*self.read)(value)
    }
}

/// The registry supplying the shape discovery capability.
///
/// Configure fully before binding begins: registration is keyed by
/// `TypeId`, later registrations replace earlier ones, and the observable
/// behavior of re-configuring while a bind or emit call is in flight is
/// unspecified (the maps are internally synchronized, so doing so is not
/// memory-unsafe, just not meaningful).
#[derive(Default)]
pub struct ShapeRegistry {
    types: DashMap<TypeId, Arc<TypeInfo>>,
    enums: DashMap<TypeId, Arc<EnumInfo>>,
    sequences: DashMap<TypeId, Arc<SequenceInfo>>,
}

impl ShapeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target type's shapes.
    pub fn register<T: 'static>(&self, builder: TypeBuilder<T>) {
        self.types.insert(TypeId::of::<T>(), Arc::new(builder.finish()));
    }

    /// Register a unit-variant enum as `(name, value)` pairs.
    ///
    /// Binding matches a string leaf against the names case-sensitively;
    /// emission turns a value back into its name by equality.
    pub fn register_enum<T>(&self, variants: Vec<(&str, T)>)
    where
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        let names: Vec<String> = variants.iter().map(|(n, _)| n.to_string()).collect();
        let values: Arc<Vec<T>> = Arc::new(variants.into_iter().map(|(_, v)| v).collect());

        let make_values = Arc::clone(&values);
        let make = Arc::new(move |index: usize| {
            make_values
                .get(index)
                .map(|v| Box::new(v.clone()) as Box<dyn Any>)
        });
        let index_of = Arc::new(move |value: &dyn Any| {
            let value = value.downcast_ref::<T>()?;
            values.iter().position(|candidate| candidate == value)
        });

        self.enums.insert(
            TypeId::of::<T>(),
            Arc::new(EnumInfo {
                name: std::any::type_name::<T>(),
                variants: names,
                make,
                index_of,
            }),
        );
    }

    /// Register `Vec<T>` as a sequence target with element type `T`.
    pub fn register_sequence<T: Clone + 'static>(&self) {
        let make = Arc::new(|items: Vec<Box<dyn Any>>| {
            let mut out: Vec<T> = Vec::with_capacity(items.len());
            for item in items {
                out.push(*item.downcast::<T>().ok()?);
            }
            Some(Box::new(out) as Box<dyn Any>)
        });
        let read = Arc::new(|value: &dyn Any| {
            let items = value.downcast_ref::<Vec<T>>()?;
            Some(
                items
                    .iter()
                    .map(|item| Box::new(item.clone()) as Box<dyn Any>)
                    .collect(),
            )
        });

        self.sequences.insert(
            TypeId::of::<Vec<T>>(),
            Arc::new(SequenceInfo {
                elem: TargetType::of::<T>(),
                make,
                read,
            }),
        );
    }

    /// Look up a registered type's metadata.
    pub fn type_info(&self, id: TypeId) -> Option<Arc<TypeInfo>> {
        self.types.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Look up a registered enum descriptor.
    pub fn enum_info(&self, id: TypeId) -> Option<Arc<EnumInfo>> {
        self.enums.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Look up a registered sequence descriptor.
    pub fn sequence_info(&self, id: TypeId) -> Option<Arc<SequenceInfo>> {
        self.sequences.get(&id).map(|entry| Arc::clone(entry.value()))
    }
}

/// The shared process-wide registry, used by the crate-level convenience
/// entry points. Configure it fully before binding begins.
pub fn global() -> &'static ShapeRegistry {
    static GLOBAL: OnceLock<ShapeRegistry> = OnceLock::new();
    GLOBAL.get_or_init(ShapeRegistry::new)
}

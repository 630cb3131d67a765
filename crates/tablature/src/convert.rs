//! Conversion registry: exact (source, destination) type-pair coercions
//!
//! The registry maps a `(TypeId, TypeId)` pair to a conversion function.
//! Lookup is exact-match only: no assignability or widening is inferred,
//! so registering `i64 -> i32` says nothing about `i64 -> u32`. Built-in
//! identity conversions (each leaf native to itself, and each leaf native
//! to [`Scalar`]) are tracked separately from user entries and survive
//! [`ConversionRegistry::clear`].
//!
//! Lifecycle contract: configure fully before binding begins. The maps
//! are internally synchronized, so concurrent registration is not
//! memory-unsafe, but the observable behavior of re-configuring while a
//! bind call is in flight is unspecified.

use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use dashmap::DashMap;

use crate::shape::TargetType;
use crate::value::Scalar;

/// A stored scalar conversion: applied to a boxed source value, yields a
/// boxed destination value.
pub type ConvertFn = Arc<dyn Fn(Box<dyn Any>) -> Box<dyn Any> + Send + Sync>;

/// A registered sequence converter: consumes an assembled sequence of
/// elements and produces the destination value.
#[derive(Clone)]
pub struct SeqConversion {
    /// Element type the source sequence must be assembled from
    pub elem: TargetType,

    run: Arc<dyn Fn(Vec<Box<dyn Any>>) -> Option<Box<dyn Any>> + Send + Sync>,
}

impl SeqConversion {
    /// Apply the converter to bound elements. `None` when an element is
    /// not of the declared element type.
    pub fn apply(&self, items: Vec<Box<dyn Any>>) -> Option<Box<dyn Any>> {
        (*self.run)(items)
    }
}

/// The (source type, destination type) to function mapping used for
/// scalar coercion, plus sequence converters searched by the collection
/// builder.
pub struct ConversionRegistry {
    builtin: DashMap<(TypeId, TypeId), ConvertFn>,
    user: DashMap<(TypeId, TypeId), ConvertFn>,
    sequences: DashMap<TypeId, Vec<SeqConversion>>,
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionRegistry {
    /// Create a registry holding only the built-in conversions.
    pub fn new() -> Self {
        let registry = Self {
            builtin: DashMap::new(),
            user: DashMap::new(),
            sequences: DashMap::new(),
        };
        registry.install_builtin::<bool>();
        registry.install_builtin::<i64>();
        registry.install_builtin::<f64>();
        registry.install_builtin::<String>();
        registry.install_builtin::<NaiveDateTime>();
        registry.install_builtin::<DateTime<FixedOffset>>();
        registry
    }

    /// Register a conversion from `T` to `U`, replacing any existing
    /// entry for the pair.
    pub fn register<T, U, F>(&self, convert: F)
    where
        T: 'static,
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let erased: ConvertFn = Arc::new(move |value: Box<dyn Any>| match value.downcast::<T>() {
            Ok(v) => Box::new(convert(*v)) as Box<dyn Any>,
            // only reachable on a misregistered lookup; hand the value
            // back so the caller's downcast reports the mismatch
            Err(v) => v,
        });
        self.user
            .insert((TypeId::of::<T>(), TypeId::of::<U>()), erased);
    }

    /// Register a sequence converter from `Vec<T>` to `U`, searched by
    /// the collection builder when no direct strategy fits the target.
    pub fn register_seq<T, U, F>(&self, convert: F)
    where
        T: 'static,
        U: 'static,
        F: Fn(Vec<T>) -> U + Send + Sync + 'static,
    {
        let run = Arc::new(move |items: Vec<Box<dyn Any>>| {
            let mut out: Vec<T> = Vec::with_capacity(items.len());
            for item in items {
                out.push(*item.downcast::<T>().ok()?);
            }
            Some(Box::new(convert(out)) as Box<dyn Any>)
        });
        self.sequences
            .entry(TypeId::of::<U>())
            .or_default()
            .push(SeqConversion {
                elem: TargetType::of::<T>(),
                run,
            });
    }

    /// Look up a conversion by exact type pair. User entries shadow
    /// built-ins; a miss is not itself an error.
    pub fn lookup(&self, from: TypeId, to: TypeId) -> Option<ConvertFn> {
        self.user
            .get(&(from, to))
            .or_else(|| self.builtin.get(&(from, to)))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// The sequence converters registered for destination `to`, in
    /// registration order.
    pub fn sequence_conversions(&self, to: TypeId) -> Vec<SeqConversion> {
        self.sequences
            .get(&to)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Remove every user entry. Built-ins remain available.
    pub fn clear(&self) {
        self.user.clear();
        self.sequences.clear();
    }

    fn install_builtin<T: Into<Scalar> + 'static>(&self) {
        let identity: ConvertFn = Arc::new(|value| value);
        self.builtin
            .insert((TypeId::of::<T>(), TypeId::of::<T>()), identity);

        let widen: ConvertFn = Arc::new(|value: Box<dyn Any>| match value.downcast::<T>() {
            Ok(v) => Box::new(Into::<Scalar>::into(*v)) as Box<dyn Any>,
            Err(v) => v,
        });
        self.builtin
            .insert((TypeId::of::<T>(), TypeId::of::<Scalar>()), widen);
    }
}

/// The shared process-wide registry, used by the crate-level convenience
/// entry points. Configure it fully before binding begins.
pub fn global() -> &'static ConversionRegistry {
    static GLOBAL: OnceLock<ConversionRegistry> = OnceLock::new();
    GLOBAL.get_or_init(ConversionRegistry::new)
}

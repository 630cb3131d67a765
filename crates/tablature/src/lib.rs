//! # Tablature
//!
//! Bidirectional structural data binding between a TOML-style value tree
//! and registered Rust types.
//!
//! The engine converts a dynamically typed [`Node`] tree, as produced by
//! a configuration-format parser, into instances of statically declared
//! target types, and back. Rust exposes no runtime reflection, so target
//! types are described once in a [`ShapeRegistry`]: their construction
//! plans ([shapes](shape::Shape)), settable members, enum variants, and
//! sequence forms. Scalar coercions beyond the built-in identities live
//! in a [`ConversionRegistry`] keyed by exact `(source, destination)`
//! type pairs.
//!
//! ## Architecture
//!
//! - **Value Tree Model** ([`value`]): `Node`/`Table`/`ArrayNode` plus the
//!   [`Scalar`] placeholder for heterogeneous sequences
//! - **Conversion Registry** ([`convert`]): exact type-pair coercions
//! - **Shape Discovery** ([`shape`]): candidate construction plans,
//!   ordered most-specific-first
//! - **Deserialization** (`bind` module): the recursive trial-loop binder
//! - **Serialization** (`emit` module): the deterministic inverse walker
//!
//! Text parsing and rendering are external collaborators: the engine only
//! consumes and produces well-formed trees.
//!
//! ## Lifecycle
//!
//! Registries are process-wide mutable state with no binding-time
//! synchronization contract: configure them fully before bind or emit
//! calls begin. [`Binder`] and [`Emitter`] take registries explicitly;
//! only the crate-level `bind`/`emit` convenience functions fall back to
//! the shared instances.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bind;
pub mod context;
pub mod convert;
pub mod emit;
pub mod error;
pub mod shape;
pub mod value;

// Re-export main types
pub use bind::Binder;
pub use context::BindContext;
pub use convert::{ConversionRegistry, SeqConversion};
pub use emit::Emitter;
pub use error::{BindError, CandidateFailure, Result};
pub use shape::{
    Args, Member, Shape, ShapeBuilder, ShapeRegistry, TargetType, TypeBuilder, TypeInfo,
};
pub use value::{ArrayNode, Node, Scalar, Table};

/// Tablature version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bind a tree against target type `T` using the shared process-wide
/// registries.
pub fn bind<T: 'static>(node: &Node) -> Result<T> {
    Binder::new(shape::global(), convert::global()).bind(node)
}

/// Emit `value` as a tree node using the shared process-wide registry.
pub fn emit<T: 'static>(value: &T) -> Result<Node> {
    Emitter::new(shape::global()).emit(value)
}

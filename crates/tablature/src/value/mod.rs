//! Value tree model: the generic parsed representation of the source format
//!
//! A [`Node`] is what the (external) text parser produces and what the
//! (external) text renderer consumes. The binding engine never mutates a
//! tree it reads; it only constructs new nodes when emitting.

mod display;
mod impls;
mod scalar;
mod table;

pub use scalar::Scalar;
pub use table::Table;

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// A node in the generic value tree.
///
/// Leaf scalars carry their native representation directly. `Null` never
/// legitimately appears in well-formed input: absence of a value is
/// expressed by absence of a table key, and binding a `Null` is always an
/// error.
#[derive(Clone, PartialEq)]
pub enum Node {
    /// Explicit null (always rejected by the binder)
    Null,

    /// `true` or `false`
    Bool(bool),

    /// 64-bit signed integer (the tree's only integer representation)
    Integer(i64),

    /// 64-bit float (the tree's only float representation)
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Date and time without a UTC offset
    LocalDateTime(NaiveDateTime),

    /// Date and time with an explicit UTC offset
    OffsetDateTime(DateTime<FixedOffset>),

    /// Ordered sequence of nodes
    Array(ArrayNode),

    /// String-keyed mapping, keys unique, insertion order preserved
    Table(Table),
}

/// An ordered sequence node.
///
/// `tables_hint` marks an "array of tables" for the text renderer's
/// benefit; the binder itself ignores it when reading.
#[derive(Clone, PartialEq, Default)]
pub struct ArrayNode {
    /// The elements, in source order
    pub items: Vec<Node>,

    /// Renderer hint: every element is a table
    pub tables_hint: bool,
}

impl ArrayNode {
    /// Create a plain array node.
    pub fn new(items: Vec<Node>) -> Self {
        Self {
            items,
            tables_hint: false,
        }
    }

    /// Create an array node flagged as an array of tables.
    pub fn of_tables(items: Vec<Node>) -> Self {
        Self {
            items,
            tables_hint: true,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.items.iter()
    }
}

//! Node trait implementations: constructors, predicates, extractors, From traits

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use super::{ArrayNode, Node, Scalar, Table};

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Node {
    /// Create a string node.
    pub fn string(s: impl Into<String>) -> Self {
        Node::String(s.into())
    }

    /// Create a plain array node.
    pub fn array(items: Vec<Node>) -> Self {
        Node::Array(ArrayNode::new(items))
    }

    /// Create a table node.
    pub fn table(table: Table) -> Self {
        Node::Table(table)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Kind Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Check if the node is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Check if the node is a leaf scalar (not an array, table, or null).
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Node::Null | Node::Array(_) | Node::Table(_))
    }

    /// Check if the node is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    /// Check if the node is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Node::Table(_))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Node::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Node::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract an array node.
    pub fn as_array(&self) -> Option<&ArrayNode> {
        match self {
            Node::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Extract a table node.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Node::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Human-readable name of the node kind (for error messages).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Integer(_) => "integer",
            Node::Float(_) => "float",
            Node::String(_) => "string",
            Node::LocalDateTime(_) => "local datetime",
            Node::OffsetDateTime(_) => "offset datetime",
            Node::Array(_) => "array",
            Node::Table(_) => "table",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Conversions
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Integer(n)
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Float(n)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<NaiveDateTime> for Node {
    fn from(dt: NaiveDateTime) -> Self {
        Node::LocalDateTime(dt)
    }
}

impl From<DateTime<FixedOffset>> for Node {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Node::OffsetDateTime(dt)
    }
}

impl From<ArrayNode> for Node {
    fn from(a: ArrayNode) -> Self {
        Node::Array(a)
    }
}

impl From<Table> for Node {
    fn from(t: Table) -> Self {
        Node::Table(t)
    }
}

impl From<Scalar> for Node {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Bool(b) => Node::Bool(b),
            Scalar::Integer(n) => Node::Integer(n),
            Scalar::Float(n) => Node::Float(n),
            Scalar::Str(s) => Node::String(s),
            Scalar::LocalDateTime(dt) => Node::LocalDateTime(dt),
            Scalar::OffsetDateTime(dt) => Node::OffsetDateTime(dt),
        }
    }
}

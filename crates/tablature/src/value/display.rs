//! Display and Debug implementations for tree nodes

use std::fmt;

use super::{ArrayNode, Node, Table};

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => write!(f, "null"),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Integer(n) => write!(f, "{}", n),
            Node::Float(n) => write!(f, "{}", n),
            Node::String(s) => write!(f, "{:?}", s),
            Node::LocalDateTime(dt) => write!(f, "{}", dt),
            Node::OffsetDateTime(dt) => write!(f, "{}", dt),
            Node::Array(a) => fmt::Debug::fmt(a, f),
            Node::Table(t) => fmt::Debug::fmt(t, f),
        }
    }
}

impl fmt::Debug for ArrayNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", item)?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {:?}", k, v)?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display is more user-friendly, Debug is more detailed
        match self {
            Node::String(s) => write!(f, "{}", s), // No quotes for Display
            _ => fmt::Debug::fmt(self, f),
        }
    }
}

//! Table nodes: string-keyed, insertion-ordered mappings

use indexmap::IndexMap;

use super::Node;

/// A table node.
///
/// Keys are unique; iteration follows insertion order of the first insert
/// of each key. The binder only ever reads tables ([`Table::get`] and
/// [`Table::keys`]); the constructors exist for the emitter and for tests.
#[derive(Clone, PartialEq, Default)]
pub struct Table {
    entries: IndexMap<String, Node>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Whether the table contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The table's keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Insert a value, replacing any existing value under the same key.
    ///
    /// Replacement keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), value.into())
    }

    /// Insert a value (builder form).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        self.insert(key, value);
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut table = Table::new();
        table.insert("a", 1i64);
        table.insert("b", true);

        assert_eq!(table.get("a"), Some(&Node::Integer(1)));
        assert_eq!(table.get("b"), Some(&Node::Bool(true)));
        assert_eq!(table.get("c"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_keys_preserve_insertion_order() {
        let table = Table::new()
            .with("z", 1i64)
            .with("a", 2i64)
            .with("m", 3i64);

        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut table = Table::new();
        table.insert("a", 1i64);
        table.insert("b", 2i64);
        let old = table.insert("a", 10i64);

        assert_eq!(old, Some(Node::Integer(1)));
        assert_eq!(table.get("a"), Some(&Node::Integer(10)));
        // replacement does not move the key to the back
        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}

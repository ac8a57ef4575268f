/// Deep key search over parsed JSON documents
///
/// Locates a key by name anywhere inside a nested object structure. The walk
/// is depth-first and pre-order: a mapping's own keys are checked before any
/// of its children, and children are visited in document order.
///
/// The walk keeps its own stack instead of recursing, so a pathologically deep
/// document cannot exhaust the call stack.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a deep key search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchResult<'a> {
    /// The key was found; holds the associated value
    Found(&'a Value),
    /// No reachable mapping contains the key
    NotFound,
}

impl<'a> SearchResult<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }

    /// Convert into an `Option`, dropping the wrapper
    pub fn value(self) -> Option<&'a Value> {
        match self {
            SearchResult::Found(value) => Some(value),
            SearchResult::NotFound => None,
        }
    }
}

/// Which container types the search descends into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    /// Only mapping-valued entries are followed; sequences are skipped
    #[default]
    ObjectsOnly,
    /// Mappings and sequences are both followed
    ObjectsAndArrays,
}

/// Which values count as a match when the key is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePolicy {
    /// Any value matches, including `null`, `false`, `0` and `""`
    #[default]
    AnyValue,
    /// `null`, `false`, `0` and `""` are treated as absent and the search goes on
    NonEmpty,
}

impl ValuePolicy {
    fn accepts(self, value: &Value) -> bool {
        match self {
            ValuePolicy::AnyValue => true,
            ValuePolicy::NonEmpty => !is_empty_value(value),
        }
    }
}

/// Search tuning knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    pub traversal: Traversal,
    pub values: ValuePolicy,
}

impl SearchOptions {
    pub fn new(traversal: Traversal, values: ValuePolicy) -> Self {
        Self { traversal, values }
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    pub fn with_values(mut self, values: ValuePolicy) -> Self {
        self.values = values;
        self
    }
}

/// Find the first value stored under `target_key` using the default options
/// (objects only, any value matches).
pub fn find<'a>(root: &'a Value, target_key: &str) -> SearchResult<'a> {
    find_with(root, target_key, SearchOptions::default())
}

/// Find the first value stored under `target_key`.
pub fn find_with<'a>(root: &'a Value, target_key: &str, options: SearchOptions) -> SearchResult<'a> {
    let mut stack: Vec<&'a Value> = vec![root];

    while let Some(node) = stack.pop() {
        match node {
            Value::Object(map) => {
                if let Some(value) = map.get(target_key) {
                    if options.values.accepts(value) {
                        return SearchResult::Found(value);
                    }
                }
                // Reverse push keeps document order on pop.
                for child in map.values().rev() {
                    if should_descend(child, options.traversal) {
                        stack.push(child);
                    }
                }
            }
            Value::Array(items) if options.traversal == Traversal::ObjectsAndArrays => {
                for child in items.iter().rev() {
                    if should_descend(child, options.traversal) {
                        stack.push(child);
                    }
                }
            }
            _ => {}
        }
    }

    SearchResult::NotFound
}

/// Look up `target_key` only among the root's direct keys.
pub fn find_direct<'a>(root: &'a Value, target_key: &str, values: ValuePolicy) -> SearchResult<'a> {
    match root.as_object().and_then(|map| map.get(target_key)) {
        Some(value) if values.accepts(value) => SearchResult::Found(value),
        _ => SearchResult::NotFound,
    }
}

fn should_descend(value: &Value, traversal: Traversal) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(_) => traversal == Traversal::ObjectsAndArrays,
        _ => false,
    }
}

/// JavaScript-style falsiness for JSON values
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

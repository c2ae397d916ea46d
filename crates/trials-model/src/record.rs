//! Tolerant access to raw registry records.
//!
//! Raw records arrive as arbitrarily shaped JSON; the schema is external and
//! only partially trusted. [`Node`] is a cheap cursor over a borrowed
//! `serde_json::Value` where every lookup on an absent or differently shaped
//! value yields another absent node, so extraction code reads as a straight
//! path chain with a typed default at the end instead of a ladder of match
//! arms.

use serde_json::Value;

/// A cursor over an optional position in a JSON tree.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    value: Option<&'a Value>,
}

impl<'a> Node<'a> {
    /// Cursor at the root of a record.
    pub fn new(root: &'a Value) -> Self {
        Self { value: Some(root) }
    }

    /// The absent marker.
    pub const fn absent() -> Self {
        Self { value: None }
    }

    /// Step into an object field. Absent when the current position is not an
    /// object or lacks the field.
    pub fn field(self, name: &str) -> Self {
        Self {
            value: self.value.and_then(|v| v.get(name)),
        }
    }

    /// Step into an array element by index.
    pub fn at(self, index: usize) -> Self {
        Self {
            value: self.value.and_then(|v| v.get(index)),
        }
    }

    /// Whether the cursor points at any value (including `null`).
    pub fn is_present(&self) -> bool {
        matches!(self.value, Some(v) if !v.is_null())
    }

    /// Borrowed string content.
    pub fn as_str(self) -> Option<&'a str> {
        self.value.and_then(Value::as_str)
    }

    /// Owned string content.
    pub fn string(self) -> Option<String> {
        self.as_str().map(str::to_owned)
    }

    /// Owned string content, treating the empty string as absent.
    pub fn non_empty_string(self) -> Option<String> {
        self.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }

    /// String rendering of a string or number scalar. Registry exports are
    /// inconsistent about which of the two a field uses (p-values notably).
    pub fn scalar_string(self) -> Option<String> {
        match self.value {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Boolean content; anything else reads as absent.
    pub fn as_bool(self) -> Option<bool> {
        self.value.and_then(Value::as_bool)
    }

    /// Unsigned integer content, accepting a numeric string as well.
    pub fn integer(self) -> Option<u64> {
        match self.value {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Float content, accepting a numeric string as well.
    pub fn numeric(self) -> Option<f64> {
        match self.value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Iterate array elements; empty when the position is absent or not an
    /// array.
    pub fn elements(self) -> impl Iterator<Item = Node<'a>> {
        self.value
            .and_then(Value::as_array)
            .map(|items| items.as_slice())
            .unwrap_or_default()
            .iter()
            .map(Node::new)
    }

    /// Number of array elements; zero when absent or not an array.
    pub fn len(self) -> usize {
        self.value.and_then(Value::as_array).map_or(0, Vec::len)
    }

    /// Whether the position holds an empty (or no) array.
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

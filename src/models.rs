//! Frontend Models
//!
//! Data structures matching the `todos` table exposed by the GraphQL backend.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// GraphQL type name of a todo row
pub const TODO_TYPENAME: &str = "todos";

/// Server-assigned todo identifier (a UUID on Hasura)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    #[cfg(test)]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Numeric ids are accepted so integer primary keys work too.
impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(id) => TodoId(id),
            Raw::Number(id) => TodoId(id.to_string()),
        })
    }
}

/// Todo row (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    #[serde(rename = "__typename", default = "default_typename")]
    pub typename: String,
    pub id: TodoId,
    pub text: String,
    pub done: bool,
}

fn default_typename() -> String {
    TODO_TYPENAME.to_string()
}

impl TodoItem {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, text: impl Into<String>, done: bool) -> Self {
        Self {
            typename: default_typename(),
            id: TodoId::new(id),
            text: text.into(),
            done,
        }
    }

    /// Key of this row in the normalized cache
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.typename, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_id_is_stringified() {
        let item: TodoItem =
            serde_json::from_value(json!({ "id": 1, "text": "Buy milk", "done": false })).unwrap();
        assert_eq!(item.id, TodoId::new("1"));
        assert_eq!(item.typename, TODO_TYPENAME);
    }

    #[test]
    fn test_serializes_typename() {
        let value = serde_json::to_value(TodoItem::new("a", "x", true)).unwrap();
        assert_eq!(
            value,
            json!({ "__typename": "todos", "id": "a", "text": "x", "done": true })
        );
    }

    #[test]
    fn test_cache_key_uses_typename_and_id() {
        assert_eq!(TodoItem::new("42", "x", false).cache_key(), "todos:42");
    }
}

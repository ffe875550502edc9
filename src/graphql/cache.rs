//! Normalized In-Memory Cache
//!
//! Query results are stored as trees whose identifiable objects (anything with
//! both `__typename` and `id`) are replaced by `{"__ref": "Type:id"}` links into
//! a shared entity table. A response that touches an entity therefore patches
//! every cached query that links to it.
//!
//! Entities live until evicted; dropping a row from a cached list does not
//! remove the entity itself.

use std::collections::HashMap;

use serde_json::{Map, Value};

const REF_FIELD: &str = "__ref";
const TYPENAME_FIELD: &str = "__typename";

/// Cache key of one query execution: operation name + canonical variables
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(operation_name: &str, variables: &Value) -> Self {
        let mut key = String::from(operation_name);
        key.push('(');
        write_canonical(variables, &mut key);
        key.push(')');
        Self(key)
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// JSON with object keys sorted, so `{a, b}` and `{b, a}` share a key.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        other => out.push_str(&other.to_string()),
    }
}

/// Entity key (`Type:id`) of an identifiable object
fn entity_key(object: &Map<String, Value>) -> Option<String> {
    let typename = object.get(TYPENAME_FIELD)?.as_str()?;
    let id = match object.get("id")? {
        Value::String(id) => id.clone(),
        Value::Number(id) => id.to_string(),
        _ => return None,
    };
    Some(format!("{typename}:{id}"))
}

#[derive(Debug, Default)]
pub struct InMemoryCache {
    entities: HashMap<String, Map<String, Value>>,
    queries: HashMap<QueryKey, Value>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` as the result of `key`, normalizing its entities.
    pub fn write_query(&mut self, key: QueryKey, data: &Value) {
        let root = self.normalize(data);
        self.queries.insert(key, root);
    }

    /// Denormalized result of `key`, or `None` on a miss or a dangling link.
    pub fn read_query(&self, key: &QueryKey) -> Option<Value> {
        let root = self.queries.get(key)?;
        self.resolve(root, &mut Vec::new())
    }

    #[cfg(test)]
    pub fn contains_query(&self, key: &QueryKey) -> bool {
        self.queries.contains_key(key)
    }

    /// Merge the entities of a response that has no query key (mutations).
    pub fn write_result(&mut self, data: &Value) {
        self.normalize(data);
    }

    /// Denormalized entity by `Type:id` key
    #[cfg(test)]
    pub fn entity(&self, key: &str) -> Option<Value> {
        self.resolve(&ref_value(key), &mut Vec::new())
    }

    /// Drop an entity. Queries linking to it become misses.
    pub fn evict(&mut self, key: &str) -> bool {
        self.entities.remove(key).is_some()
    }

    fn normalize(&mut self, value: &Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.iter().map(|item| self.normalize(item)).collect()),
            Value::Object(object) => {
                let fields: Map<String, Value> = object
                    .iter()
                    .map(|(name, field)| (name.clone(), self.normalize(field)))
                    .collect();
                match entity_key(object) {
                    Some(key) => {
                        self.entities.entry(key.clone()).or_default().extend(fields);
                        ref_value(&key)
                    }
                    None => Value::Object(fields),
                }
            }
            other => other.clone(),
        }
    }

    fn resolve(&self, value: &Value, path: &mut Vec<String>) -> Option<Value> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve(item, path))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            Value::Object(object) => {
                if let Some(key) = link_target(object) {
                    // Cycles stay as links.
                    if path.iter().any(|seen| seen == key) {
                        return Some(value.clone());
                    }
                    let entity = self.entities.get(key)?;
                    path.push(key.to_string());
                    let resolved = self.resolve_fields(entity, path);
                    path.pop();
                    return resolved;
                }
                self.resolve_fields(object, path)
            }
            other => Some(other.clone()),
        }
    }

    fn resolve_fields(&self, object: &Map<String, Value>, path: &mut Vec<String>) -> Option<Value> {
        let mut fields = Map::new();
        for (name, field) in object {
            fields.insert(name.clone(), self.resolve(field, path)?);
        }
        Some(Value::Object(fields))
    }
}

fn ref_value(key: &str) -> Value {
    let mut link = Map::new();
    link.insert(REF_FIELD.to_string(), Value::String(key.to_string()));
    Value::Object(link)
}

fn link_target(object: &Map<String, Value>) -> Option<&str> {
    if object.len() != 1 {
        return None;
    }
    object.get(REF_FIELD)?.as_str()
}

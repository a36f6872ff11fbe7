//! The `stat_data` wrapper envelope around host variables.

use serde_json::{Map, Value};

use crate::aliases::STAT_DATA;

/// Host variables split into the outer container and the logical root.
///
/// When `stat_data` holds an object that object is the root; otherwise the
/// top-level object is. Non-object payloads read as an empty root.
#[derive(Debug, Clone, PartialEq)]
pub struct HostEnvelope {
    outer: Map<String, Value>,
    root: Map<String, Value>,
    nested: bool,
}

impl HostEnvelope {
    pub fn from_value(value: Value) -> Self {
        let outer = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        match outer.get(STAT_DATA) {
            Some(Value::Object(root)) => Self {
                root: root.clone(),
                outer,
                nested: true,
            },
            _ => Self {
                root: outer,
                outer: Map::new(),
                nested: false,
            },
        }
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.root
    }

    /// Reassemble the container, re-wrapping under `stat_data` if the read
    /// was nested. Sibling keys of `stat_data` keep their positions.
    pub fn into_value(self) -> Value {
        if self.nested {
            let mut outer = self.outer;
            outer.insert(STAT_DATA.to_string(), Value::Object(self.root));
            Value::Object(outer)
        } else {
            Value::Object(self.root)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_root_is_unwrapped_and_rewrapped() {
        let raw = json!({"meta": 1, "stat_data": {"世界": {}}, "tail": true});
        let mut envelope = HostEnvelope::from_value(raw);
        assert!(envelope.root().contains_key("世界"));

        envelope.root_mut().insert("模式".into(), json!([]));
        let out = envelope.into_value();
        assert_eq!(out["meta"], json!(1));
        assert_eq!(out["tail"], json!(true));
        assert_eq!(out["stat_data"]["模式"], json!([]));
        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["meta", "stat_data", "tail"]);
    }

    #[test]
    fn test_flat_root() {
        let envelope = HostEnvelope::from_value(json!({"世界": {}}));
        assert_eq!(envelope.into_value(), json!({"世界": {}}));
    }

    #[test]
    fn test_non_object_stat_data_is_ignored() {
        let mut envelope = HostEnvelope::from_value(json!({"stat_data": "oops", "主角": {}}));
        assert!(envelope.root().contains_key("主角"));
        envelope.root_mut().insert("模式".into(), json!([]));
        // the root is written back flat, not wrapped
        assert_eq!(
            envelope.into_value(),
            json!({"stat_data": "oops", "主角": {}, "模式": []})
        );
    }

    #[test]
    fn test_non_object_payload_reads_empty() {
        let envelope = HostEnvelope::from_value(json!([1, 2, 3]));
        assert!(envelope.root().is_empty());
        assert_eq!(envelope.into_value(), json!({}));
    }
}

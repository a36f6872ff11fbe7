//! Host variables stored in a JSON file.
//!
//! The file holds the container of a single message. A missing file reads as
//! an empty object, so the dashboard falls back to its seed data.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::Value;

use crate::ports::outbound::{HostError, HostVariablesPort, MessageTarget};

pub struct JsonFileHost {
    path: PathBuf,
    message_id: Option<i64>,
}

impl JsonFileHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            message_id: None,
        }
    }

    pub fn with_message_id(mut self, message_id: Option<i64>) -> Self {
        self.message_id = message_id;
        self
    }
}

impl HostVariablesPort for JsonFileHost {
    fn current_message_id(&self) -> Option<i64> {
        self.message_id
    }

    fn get_variables(&self, target: MessageTarget) -> Result<Value, HostError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    %target,
                    "Variables file missing; reading empty container"
                );
                return Ok(Value::Object(Default::default()));
            }
            Err(error) => return Err(error.into()),
        };
        if text.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn replace_variables(&self, variables: Value, target: MessageTarget) -> Result<(), HostError> {
        let text = serde_json::to_string_pretty(&variables)?;
        fs::write(&self.path, text)?;
        tracing::debug!(path = %self.path.display(), %target, "Variables file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_empty_object() {
        let dir = TempDir::new().unwrap();
        let host = JsonFileHost::new(dir.path().join("variables.json"));
        assert_eq!(host.get_variables(MessageTarget::Latest).unwrap(), json!({}));
    }

    #[test]
    fn test_round_trip_preserves_key_order() {
        let dir = TempDir::new().unwrap();
        let host = JsonFileHost::new(dir.path().join("variables.json")).with_message_id(Some(2));
        let value = json!({"z": 1, "stat_data": {"圣裁官": {"称号": {"b": "B", "a": "A"}}}, "a": 0});

        host.replace_variables(value.clone(), MessageTarget::Id(2)).unwrap();
        let read = host.get_variables(MessageTarget::Id(2)).unwrap();
        assert_eq!(read, value);
        let keys: Vec<&String> = read["stat_data"]["圣裁官"]["称号"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(host.current_message_id(), Some(2));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("variables.json");
        std::fs::write(&path, "{not json").unwrap();
        let host = JsonFileHost::new(path);
        assert!(matches!(
            host.get_variables(MessageTarget::Latest),
            Err(HostError::Json(_))
        ));
    }
}

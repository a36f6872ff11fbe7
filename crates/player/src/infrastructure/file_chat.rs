//! Chat capability backed by plain files.
//!
//! The current message is read from one file; text placed in the input bar
//! is written to another. Without an input file there is no input bar.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::ports::outbound::{HostChatPort, HostError};

pub struct FileChat {
    message_path: PathBuf,
    input_path: Option<PathBuf>,
}

impl FileChat {
    pub fn new(message_path: impl Into<PathBuf>, input_path: Option<PathBuf>) -> Self {
        Self {
            message_path: message_path.into(),
            input_path,
        }
    }
}

impl HostChatPort for FileChat {
    fn message_text(&self, _message_id: Option<i64>) -> Result<Option<String>, HostError> {
        match fs::read_to_string(&self.message_path) {
            Ok(text) => Ok(Some(text)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn fill_input(&self, text: &str) -> Result<bool, HostError> {
        let Some(path) = &self.input_path else {
            return Ok(false);
        };
        fs::write(path, text)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_message_and_writes_input() {
        let dir = TempDir::new().unwrap();
        let message = dir.path().join("message.txt");
        let input = dir.path().join("input.txt");
        fs::write(&message, "A. 出击").unwrap();

        let chat = FileChat::new(&message, Some(input.clone()));
        assert_eq!(chat.message_text(None).unwrap().as_deref(), Some("A. 出击"));
        assert!(chat.fill_input("出击").unwrap());
        assert_eq!(fs::read_to_string(input).unwrap(), "出击");
    }

    #[test]
    fn test_missing_message_and_no_input_bar() {
        let dir = TempDir::new().unwrap();
        let chat = FileChat::new(dir.path().join("absent.txt"), None);
        assert_eq!(chat.message_text(None).unwrap(), None);
        assert!(!chat.fill_input("x").unwrap());
    }
}

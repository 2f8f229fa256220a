// Author: Dustin Pilgrim
// License: MIT

use super::*;
use crate::ast::{Key, Node};
use crate::resolver::{lookup, parse_path};

impl Document {
    /// The node stored at a dot-notation key, if any.
    ///
    /// # Examples
    /// ```ignore
    /// if let Some(node) = doc.get("connections.mysql.port") {
    ///     println!("port is a {}", node.kind());
    /// }
    /// ```
    pub fn get(&self, key: &str) -> Option<&Node> {
        if key.is_empty() {
            return None;
        }
        lookup(&self.program.root, &parse_path(key)).map(|entry| &entry.value)
    }

    /// Get a typed value at a dot-notation key.
    ///
    /// # Examples
    /// ```ignore
    /// let name: String = doc.get_as("name")?;
    /// let debug: bool = doc.get_as("debug")?;
    /// ```
    ///
    /// # Errors
    /// `MissingKey` when nothing is stored at `key`, `TypeError` when the
    /// node is not a literal of the requested kind.
    pub fn get_as<'a, T>(&'a self, key: &str) -> Result<T, ConfigError>
    where
        T: TryFrom<&'a Node, Error = ConfigError>,
    {
        let node = self.get(key).ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
            hint: Some("Check that the path exists in the array file".into()),
            code: Some(304),
        })?;
        T::try_from(node).map_err(|e| with_key(e, key))
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Effective keys of the collection at `key`; `""` lists the root.
    pub fn keys(&self, key: &str) -> Result<Vec<Key>, ConfigError> {
        let collection = if key.is_empty() {
            &self.program.root
        } else {
            let node = self.get(key).ok_or_else(|| ConfigError::MissingKey {
                key: key.to_string(),
                hint: None,
                code: Some(304),
            })?;
            node.as_collection().ok_or_else(|| ConfigError::TypeError {
                key: key.to_string(),
                message: format!("Expected collection, got {}", node.kind()),
                hint: None,
                code: Some(306),
            })?
        };
        Ok(collection.keys().into_iter().flatten().collect())
    }
}

fn with_key(error: ConfigError, path: &str) -> ConfigError {
    match error {
        ConfigError::TypeError { message, hint, code, .. } => ConfigError::TypeError {
            key: path.to_string(),
            message,
            hint,
            code,
        },
        other => other,
    }
}

// Author: Dustin Pilgrim
// License: MIT

use super::*;
use crate::ast::{Entry, Key, Node};
use crate::builder::{build_path, cast};
use crate::resolver::{entry_at_mut, format_path, parse_path, seek, Seek};

impl Document {
    /// Set the value at a dot-notation key, creating missing levels.
    ///
    /// Existing entries keep their position and comments; only the value
    /// changes. Assigning a plain value to an `env(KEY, DEFAULT)` call only
    /// replaces `DEFAULT`.
    ///
    /// # Errors
    /// - `Argument` for an empty key or a `Value::Null` value
    /// - `IllegalOffset` when the path runs through a non-collection value
    ///
    /// # Example
    /// ```ignore
    /// doc.set("connections.sqlite.prefix", "")?.set("debug", true)?;
    /// ```
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) -> Result<&mut Self, ConfigError> {
        let value = value.into();
        apply_set(&mut self.program.root, key, &value, &self.options)?;
        Ok(self)
    }

    /// Set several keys in order. Either every assignment applies or, on
    /// the first error, none of them do.
    pub fn set_many<I, K, V>(&mut self, entries: I) -> Result<&mut Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut scratch = self.program.root.clone();
        for (key, value) in entries {
            apply_set(&mut scratch, key.as_ref(), &value.into(), &self.options)?;
        }
        self.program.root = scratch;
        Ok(self)
    }

    /// Like [`Document::set`] for an untyped JSON value.
    ///
    /// Floats, arrays and objects other than `{"name": ..., "args": [...]}`
    /// have no literal form here and fail with `UnsupportedType`.
    pub fn set_json(&mut self, key: &str, value: serde_json::Value) -> Result<&mut Self, ConfigError> {
        let value = Value::try_from(value)?;
        self.set(key, value)
    }
}

fn apply_set(
    root: &mut Collection,
    key: &str,
    value: &Value,
    options: &EditorOptions,
) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::Argument {
            message: "Key must not be empty".into(),
            hint: Some("Use a dot-notation key such as 'app.name'".into()),
            code: Some(501),
        });
    }
    if value.is_null() {
        return Err(ConfigError::Argument {
            message: format!("You must specify a value to set for the key '{}'", key),
            hint: Some("Null is only accepted as a function argument".into()),
            code: Some(500),
        });
    }

    let path = parse_path(key);
    tracing::debug!(key, kind = value.kind(), "set");

    match seek(root, &path)? {
        Seek::Missing(remaining) => {
            root.items.extend(build_path(&remaining, value, options.array_syntax));
        }
        Seek::Partial { at, remaining } => {
            let target = splice_point(root, &at, &path)?;
            target.items.extend(build_path(&remaining, value, options.array_syntax));
        }
        Seek::Found(at) => {
            let entry = entry_at_mut(root, &at).ok_or_else(|| missing_entry(&path))?;
            replace_value(entry, value, options);
        }
    }
    Ok(())
}

fn splice_point<'a>(root: &'a mut Collection, at: &[usize], path: &[Key]) -> Result<&'a mut Collection, ConfigError> {
    entry_at_mut(root, at)
        .and_then(|entry| entry.value.as_collection_mut())
        .ok_or_else(|| missing_entry(path))
}

fn missing_entry(path: &[Key]) -> ConfigError {
    ConfigError::MissingKey {
        key: format_path(path),
        hint: Some("The key path could not be resolved against the document".into()),
        code: Some(305),
    }
}

/// In-place replacement, keeping the entry's key, comments and position.
fn replace_value(entry: &mut Entry, value: &Value, options: &EditorOptions) {
    if let Node::Call(call) = &mut entry.value {
        let is_function = matches!(value, Value::Function(_));
        if !is_function && options.is_env_accessor(&call.name) && !call.args.is_empty() {
            if call.args.len() < 2 {
                call.args.push(Node::string(""));
            }
            call.args[1] = cast(value);
            return;
        }
    }
    entry.value = cast(value);
}

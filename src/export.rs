// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use indexmap::IndexMap;
use serde_json::json;

use crate::ast::{Collection, Node};
use crate::document::Document;
use crate::ConfigError;

/// Convert a document's tree to JSON.
///
/// - Strings, integers, booleans and null map directly
/// - Collections holding only positional items become arrays, others objects
/// - Other constants become their name as a string
/// - Calls become `{"call": name, "args": [...]}`
/// - Raw expressions become `{"expression": source}`
///
/// Duplicate keys behave as they do at runtime: the last value wins, at the
/// position of the first.
pub fn to_json(doc: &Document) -> serde_json::Value {
    collection_to_json(doc.root())
}

fn collection_to_json(collection: &Collection) -> serde_json::Value {
    if collection.is_positional() {
        return json!(collection.items.iter().map(|e| node_to_json(&e.value)).collect::<Vec<_>>());
    }

    let mut object: IndexMap<String, serde_json::Value> = IndexMap::new();
    for (entry, key) in collection.items.iter().zip(collection.keys()) {
        let name = match (key, &entry.key) {
            (Some(key), _) => key.to_string(),
            (None, Some(Node::Raw(text) | Node::Constant(text))) => text.clone(),
            (None, _) => continue,
        };
        object.insert(name, node_to_json(&entry.value));
    }
    serde_json::Value::Object(object.into_iter().collect())
}

fn node_to_json(node: &Node) -> serde_json::Value {
    match node {
        Node::Collection(collection) => collection_to_json(collection),
        Node::String(s) => json!(s.value),
        Node::Int(i) => json!(i.value),
        Node::Constant(name) => {
            if let Some(b) = node.as_bool() {
                json!(b)
            } else if node.is_null() {
                serde_json::Value::Null
            } else {
                json!(name)
            }
        }
        Node::Call(call) => json!({
            "call": call.name,
            "args": call.args.iter().map(node_to_json).collect::<Vec<_>>(),
        }),
        Node::Raw(text) => json!({ "expression": text }),
    }
}

/// Pretty-printed JSON for a document.
pub fn export_document_to_json(doc: &Document) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(&to_json(doc)).map_err(|e| ConfigError::Argument {
        message: format!("Failed to serialize document: {}", e),
        hint: None,
        code: Some(504),
    })
}

/// Read an array file and export it to JSON in one call.
///
/// # Examples
/// ```no_run
/// use arrayfile::export::export_array_file;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let json = export_array_file("config/app.php")?;
/// println!("{}", json);
/// # Ok(())
/// # }
/// ```
pub fn export_array_file<P: AsRef<Path>>(path: P) -> Result<String, ConfigError> {
    let doc = Document::read(path, false)?;
    export_document_to_json(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"<?php

return [
    'name' => env('APP_NAME', 'Laravel'),
    'debug' => (bool) env('APP_DEBUG', false),
    'port' => 8080,
    'enabled' => true,
    'missing' => null,
    'eol' => PHP_EOL,
    'hosts' => ['a', 'b'],
    5 => 'five',
    '5' => 'again',
];
"#;

    #[test]
    fn test_to_json_maps_every_node_kind() {
        let doc = Document::from_str(SOURCE).unwrap();
        let v = to_json(&doc);

        assert_eq!(v["name"], json!({"call": "env", "args": ["APP_NAME", "Laravel"]}));
        assert_eq!(v["debug"], json!({"expression": "(bool) env('APP_DEBUG', false)"}));
        assert_eq!(v["port"], 8080);
        assert_eq!(v["enabled"], true);
        assert!(v["missing"].is_null());
        assert_eq!(v["eol"], "PHP_EOL");
        assert_eq!(v["hosts"], json!(["a", "b"]));
    }

    #[test]
    fn test_duplicate_keys_keep_last_value() {
        let doc = Document::from_str(SOURCE).unwrap();
        let v = to_json(&doc);
        let object = v.as_object().unwrap();

        assert_eq!(v["5"], "again");
        assert_eq!(object.keys().last().map(String::as_str), Some("5"));
        assert_eq!(object.len(), 8);
    }

    #[test]
    fn test_export_array_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.php");
        std::fs::write(&path, "<?php\n\nreturn ['a' => 1];\n").unwrap();

        let output = export_array_file(&path).unwrap();
        let v: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(v, json!({"a": 1}));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_array_file(dir.path().join("nope.php")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }
}

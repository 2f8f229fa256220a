// Author: Dustin Pilgrim
// License: MIT

use crate::ast::{ConfigFunction, Node, Value};
use crate::ConfigError;

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<ConfigFunction> for Value {
    fn from(value: ConfigFunction) -> Self {
        Value::Function(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// JSON input: `null`, booleans, integers and strings map directly; an
/// object `{"name": "...", "args": [...]}` is a function call.
impl TryFrom<serde_json::Value> for Value {
    type Error = ConfigError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Number(n) => n.as_i64().map(Value::Int).ok_or_else(|| {
                unsupported("float", "Only integers in the i64 range have a literal form", 403)
            }),
            serde_json::Value::Array(_) => Err(unsupported(
                "array",
                "Set each element under its own key instead",
                404,
            )),
            serde_json::Value::Object(mut map) => {
                let name = match map.remove("name") {
                    Some(serde_json::Value::String(name)) => name,
                    _ => return Err(unsupported("object", "Objects must look like {\"name\": ..., \"args\": [...]}", 405)),
                };
                let args = match map.remove("args") {
                    Some(serde_json::Value::Array(args)) => args,
                    None => Vec::new(),
                    Some(_) => return Err(unsupported("object", "Function args must be an array", 405)),
                };
                let args = args
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Function(ConfigFunction::new(name, args)))
            }
        }
    }
}

fn unsupported(kind: &str, hint: &str, code: u32) -> ConfigError {
    ConfigError::UnsupportedType {
        kind: kind.to_string(),
        hint: Some(hint.to_string()),
        code: Some(code),
    }
}

impl TryFrom<&Node> for String {
    type Error = ConfigError;

    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        match node {
            Node::String(s) => Ok(s.value.clone()),
            other => Err(ConfigError::TypeError {
                key: String::new(),
                message: format!("Expected string, got {}", other.kind()),
                hint: Some("Only string literals convert to String".into()),
                code: Some(401),
            }),
        }
    }
}

impl TryFrom<&Node> for i64 {
    type Error = ConfigError;

    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        node.as_int().ok_or_else(|| ConfigError::TypeError {
            key: String::new(),
            message: format!("Expected integer, got {}", node.kind()),
            hint: Some("Floats and expressions are not read back as integers".into()),
            code: Some(402),
        })
    }
}

impl TryFrom<&Node> for bool {
    type Error = ConfigError;

    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        node.as_bool().ok_or_else(|| ConfigError::TypeError {
            key: String::new(),
            message: format!("Expected boolean, got {}", node.kind()),
            hint: Some("Use true or false".into()),
            code: Some(403),
        })
    }
}

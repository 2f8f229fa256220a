// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::ast::ArraySyntax;
use crate::error::ConfigError;

/// Line terminator used when printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Editor configuration.
///
/// `indent` and `line_ending` default to whatever the loaded file already
/// uses, falling back to four spaces and `\n` for files with no indented lines.
///
/// # Examples
/// ```ignore
/// let options = EditorOptions::from_json(r#"{ "indent": "\t", "env_accessors": ["env", "config"] }"#)?;
/// let doc = Document::read_with("config/app.php", false, options)?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub indent: Option<String>,
    pub line_ending: Option<LineEnding>,
    /// Calls shaped like `env(KEY, DEFAULT)`; assigning a plain value to one
    /// of these rewrites only the default argument.
    pub env_accessors: Vec<String>,
    /// Bracket style for collections created by `set`.
    pub array_syntax: ArraySyntax,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            indent: None,
            line_ending: None,
            env_accessors: vec!["env".to_string()],
            array_syntax: ArraySyntax::Short,
        }
    }
}

impl EditorOptions {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Argument {
            message: format!("Invalid editor options: {}", e),
            hint: Some("Options are a JSON object with indent, line_ending, env_accessors, array_syntax".into()),
            code: Some(503),
        })
    }

    pub fn is_env_accessor(&self, name: &str) -> bool {
        let name = name.trim_start_matches('\\');
        self.env_accessors
            .iter()
            .any(|accessor| accessor.eq_ignore_ascii_case(name))
    }
}

// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

/// The main error type for reading, editing and writing array files.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("[ARRAYFILE] File not found '{path}'{}", suffix(.hint, .code))]
    NotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[ARRAYFILE] Syntax Error at {line}:{column}: {message}{}", suffix(.hint, .code))]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[ARRAYFILE] Unexpected EOF at {line}:{column}: {message}{}", suffix(.hint, .code))]
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// Raised when a string literal, heredoc or block comment is not closed.
    #[error("[ARRAYFILE] Unclosed {what} starting at {line}:{column}{}", suffix(.hint, .code))]
    UnclosedString {
        what: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[ARRAYFILE] Unexpected character '{character}' at {line}:{column}{}", suffix(.hint, .code))]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[ARRAYFILE] Invalid argument: {message}{}", suffix(.hint, .code))]
    Argument {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// A key path tried to descend through a value that is not a collection.
    #[error("[ARRAYFILE] Illegal offset '{key}': position is occupied by a {found}{}", suffix(.hint, .code))]
    IllegalOffset {
        key: String,
        found: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[ARRAYFILE] Unsupported value type '{kind}'{}", suffix(.hint, .code))]
    UnsupportedType {
        kind: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[ARRAYFILE] Key '{key}' not found{}", suffix(.hint, .code))]
    MissingKey {
        key: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[ARRAYFILE] Type Error at '{key}': {message}{}", suffix(.hint, .code))]
    TypeError {
        key: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[ARRAYFILE] File Error '{path}': {message}{}", suffix(.hint, .code))]
    File {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl ConfigError {
    /// True for every error produced while lexing or parsing source text.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ConfigError::Syntax { .. }
                | ConfigError::UnexpectedEof { .. }
                | ConfigError::UnclosedString { .. }
                | ConfigError::UnexpectedCharacter { .. }
        )
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            ConfigError::NotFound { code, .. }
            | ConfigError::Syntax { code, .. }
            | ConfigError::UnexpectedEof { code, .. }
            | ConfigError::UnclosedString { code, .. }
            | ConfigError::UnexpectedCharacter { code, .. }
            | ConfigError::Argument { code, .. }
            | ConfigError::IllegalOffset { code, .. }
            | ConfigError::UnsupportedType { code, .. }
            | ConfigError::MissingKey { code, .. }
            | ConfigError::TypeError { code, .. }
            | ConfigError::File { code, .. } => *code,
        }
    }
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

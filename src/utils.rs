// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::options::LineEnding;

static CANONICAL_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:0|-?[1-9][0-9]*)$").unwrap());
static INDENTED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^([ \t]+)\S").unwrap());

/// True for strings PHP would turn into an integer array key (`"0"`, `"42"`, `"-7"`).
pub fn is_canonical_int(text: &str) -> bool {
    CANONICAL_INT.is_match(text)
}

pub fn detect_line_ending(source: &str) -> Option<LineEnding> {
    let first = source.find('\n')?;
    if first > 0 && source.as_bytes()[first - 1] == b'\r' {
        Some(LineEnding::CrLf)
    } else {
        Some(LineEnding::Lf)
    }
}

/// Indentation unit of the first indented line, e.g. four spaces or a tab.
pub fn detect_indent(source: &str) -> Option<String> {
    let captures = INDENTED_LINE.captures(source)?;
    let leading = captures.get(1)?.as_str();
    if leading.starts_with('\t') {
        Some("\t".to_string())
    } else {
        Some(leading.to_string())
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_int() {
        assert!(is_canonical_int("0"));
        assert!(is_canonical_int("42"));
        assert!(is_canonical_int("-7"));
        assert!(!is_canonical_int("007"));
        assert!(!is_canonical_int("-0"));
        assert!(!is_canonical_int("1.5"));
        assert!(!is_canonical_int("abc"));
        assert!(!is_canonical_int(""));
    }

    #[test]
    fn test_detect_line_ending() {
        assert_eq!(detect_line_ending("<?php\r\nreturn [];"), Some(LineEnding::CrLf));
        assert_eq!(detect_line_ending("<?php\nreturn [];"), Some(LineEnding::Lf));
        assert_eq!(detect_line_ending("<?php return [];"), None);
    }

    #[test]
    fn test_detect_indent() {
        assert_eq!(detect_indent("<?php\nreturn [\n  'a' => 1,\n];"), Some("  ".into()));
        assert_eq!(detect_indent("<?php\nreturn [\n\t'a' => 1,\n];"), Some("\t".into()));
        assert_eq!(detect_indent("<?php\nreturn [];"), None);
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home(Path::new("/etc/app.php")), PathBuf::from("/etc/app.php"));
        assert_eq!(expand_home(Path::new("config/app.php")), PathBuf::from("config/app.php"));
    }
}

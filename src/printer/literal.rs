// Author: Dustin Pilgrim
// License: MIT

/// Quote a string with as little escaping as possible.
///
/// Single quotes are used unless the text holds control characters, which
/// only a double-quoted literal can express. Inside single quotes a
/// backslash is doubled only where it would otherwise escape something.
pub fn quote_string(value: &str) -> String {
    if value.chars().any(|c| c.is_control()) {
        return double_quoted(value);
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' if matches!(chars.peek(), None | Some('\\') | Some('\'')) => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

fn double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\x0b' => out.push_str("\\v"),
            '\x1b' => out.push_str("\\e"),
            '\x0c' => out.push_str("\\f"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexer, Token};

    fn relex(literal: &str) -> String {
        match Lexer::new(literal).next_token().unwrap().token {
            Token::String(s) => s,
            other => panic!("expected a string token, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_strings_use_single_quotes() {
        assert_eq!(quote_string("hello"), "'hello'");
        assert_eq!(quote_string("it's"), "'it\\'s'");
        assert_eq!(quote_string("say \"hi\""), "'say \"hi\"'");
        assert_eq!(quote_string("$HOME"), "'$HOME'");
    }

    #[test]
    fn test_backslashes_escaped_only_when_needed() {
        assert_eq!(quote_string("App\\Models\\User"), "'App\\Models\\User'");
        assert_eq!(quote_string("C:\\"), "'C:\\\\'");
        assert_eq!(quote_string("a\\\\b"), "'a\\\\\\b'");
    }

    #[test]
    fn test_control_characters_use_double_quotes() {
        assert_eq!(quote_string("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(quote_string("tab\t$x"), "\"tab\\t\\$x\"");
    }

    #[test]
    fn test_quoted_text_lexes_back_to_the_same_value() {
        for value in ["plain", "it's", "App\\Models", "end\\", "a\\\\b", "x\\'y", "multi\nline \"q\" $v", "bell\u{7}"] {
            assert_eq!(relex(&quote_string(value)), value, "value {:?}", value);
        }
    }
}

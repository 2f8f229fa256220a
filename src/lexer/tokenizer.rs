// Author: Dustin Pilgrim
// License: MIT

use super::*;
use super::scanner::{bump, bump_n, peek_next, rest, skip_whitespace_and_comments};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Spanned, ConfigError> {
    skip_whitespace_and_comments(lexer)?;

    let (start, line, column) = (lexer.pos, lexer.line, lexer.column + 1);

    let token = match lexer.peek {
        Some('<') if starts_with_open_tag(rest(lexer)) => {
            bump_n(lexer, 5);
            Ok(Token::OpenTag)
        }
        Some('<') if rest(lexer).starts_with("<<<") => tokenize_heredoc(lexer, line, column),
        Some('[') => tokenize_symbol(lexer, Token::LBracket),
        Some(']') => tokenize_symbol(lexer, Token::RBracket),
        Some('(') => tokenize_symbol(lexer, Token::LParen),
        Some(')') => tokenize_symbol(lexer, Token::RParen),
        Some('{') => tokenize_symbol(lexer, Token::LBrace),
        Some('}') => tokenize_symbol(lexer, Token::RBrace),
        Some(',') => tokenize_symbol(lexer, Token::Comma),
        Some(';') => tokenize_symbol(lexer, Token::Semicolon),
        Some('-') => tokenize_symbol(lexer, Token::Minus),
        Some('=') if peek_next(lexer) == Some('>') => {
            bump_n(lexer, 2);
            Ok(Token::DoubleArrow)
        }
        Some(':') if peek_next(lexer) == Some(':') => {
            bump_n(lexer, 2);
            Ok(Token::DoubleColon)
        }
        Some('.') if peek_next(lexer).is_some_and(|c| c.is_ascii_digit()) => tokenize_number(lexer),
        Some('\'') => tokenize_single_quoted(lexer, line, column),
        Some('"') => tokenize_double_quoted(lexer, line, column),
        Some('$') if peek_next(lexer).is_some_and(is_ident_start) => tokenize_variable(lexer),
        Some('\\') if peek_next(lexer).is_some_and(is_ident_start) => tokenize_identifier_or_keyword(lexer),
        Some(c) if c.is_ascii_digit() => tokenize_number(lexer),
        Some(c) if is_ident_start(c) => tokenize_identifier_or_keyword(lexer),
        Some(c) if c.is_ascii_punctuation() => tokenize_symbol(lexer, Token::Symbol(c)),
        Some(ch) => tokenize_unexpected_char(lexer, ch),
        None => Ok(Token::Eof),
    }?;

    Ok(Spanned {
        token,
        start,
        end: lexer.pos,
        line,
        column,
    })
}

fn starts_with_open_tag(text: &str) -> bool {
    text.get(..5).is_some_and(|tag| tag.eq_ignore_ascii_case("<?php"))
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || !c.is_ascii()
}

fn tokenize_symbol(lexer: &mut Lexer, token: Token) -> Result<Token, ConfigError> {
    bump(lexer);
    Ok(token)
}

fn tokenize_single_quoted(lexer: &mut Lexer, line: usize, column: usize) -> Result<Token, ConfigError> {
    bump(lexer); // consume opening quote
    let mut content = String::new();

    loop {
        match bump(lexer) {
            Some('\'') => return Ok(Token::String(content)),
            Some('\\') => match lexer.peek {
                Some(next @ ('\'' | '\\')) => {
                    content.push(next);
                    bump(lexer);
                }
                _ => content.push('\\'),
            },
            Some(ch) => content.push(ch),
            None => return Err(unclosed_string(line, column)),
        }
    }
}

fn tokenize_double_quoted(lexer: &mut Lexer, line: usize, column: usize) -> Result<Token, ConfigError> {
    bump(lexer); // consume opening quote
    let mut content = String::new();
    let mut interpolated = false;

    loop {
        match bump(lexer) {
            Some('"') => break,
            Some('\\') => {
                let Some(next) = bump(lexer) else {
                    return Err(unclosed_string(line, column));
                };
                match next {
                    'n' => content.push('\n'),
                    't' => content.push('\t'),
                    'r' => content.push('\r'),
                    'v' => content.push('\x0b'),
                    'e' => content.push('\x1b'),
                    'f' => content.push('\x0c'),
                    '\\' | '$' | '"' => content.push(next),
                    '0'..='7' => content.push(read_octal_escape(lexer, next)),
                    'x' if lexer.peek.is_some_and(|c| c.is_ascii_hexdigit()) => {
                        content.push(read_hex_escape(lexer));
                    }
                    'u' if lexer.peek == Some('{') => match read_unicode_escape(lexer) {
                        Some(ch) => content.push(ch),
                        None => interpolated = true, // malformed; keep the source text as-is
                    },
                    other => {
                        content.push('\\');
                        content.push(other);
                    }
                }
            }
            Some('$') if lexer.peek.is_some_and(|c| is_ident_start(c) || c == '{') => {
                interpolated = true;
                content.push('$');
            }
            Some('{') if lexer.peek == Some('$') => {
                interpolated = true;
                content.push('{');
            }
            Some(ch) => content.push(ch),
            None => return Err(unclosed_string(line, column)),
        }
    }

    if interpolated {
        Ok(Token::InterpolatedString)
    } else {
        Ok(Token::String(content))
    }
}

fn read_octal_escape(lexer: &mut Lexer, first: char) -> char {
    let mut value = first.to_digit(8).unwrap_or(0);
    for _ in 0..2 {
        match lexer.peek.and_then(|c| c.to_digit(8)) {
            Some(d) => {
                value = value * 8 + d;
                bump(lexer);
            }
            None => break,
        }
    }
    char::from_u32(value & 0xff).unwrap_or('\0')
}

fn read_hex_escape(lexer: &mut Lexer) -> char {
    let mut value = 0;
    for _ in 0..2 {
        match lexer.peek.and_then(|c| c.to_digit(16)) {
            Some(d) => {
                value = value * 16 + d;
                bump(lexer);
            }
            None => break,
        }
    }
    char::from_u32(value).unwrap_or('\0')
}

fn read_unicode_escape(lexer: &mut Lexer) -> Option<char> {
    bump(lexer); // consume '{'
    let mut digits = String::new();
    while let Some(c) = lexer.peek {
        if c == '}' {
            bump(lexer);
            return u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32);
        }
        if !c.is_ascii_hexdigit() {
            return None;
        }
        digits.push(c);
        bump(lexer);
    }
    None
}

fn unclosed_string(line: usize, column: usize) -> ConfigError {
    ConfigError::UnclosedString {
        what: "string literal".into(),
        line,
        column,
        hint: Some("String literal not closed".into()),
        code: Some(103),
    }
}

/// `<<<LABEL` / `<<<'LABEL'` up to the line that starts with the closing label.
fn tokenize_heredoc(lexer: &mut Lexer, line: usize, column: usize) -> Result<Token, ConfigError> {
    bump_n(lexer, 3); // consume '<<<'
    while matches!(lexer.peek, Some(' ' | '\t')) {
        bump(lexer);
    }

    let quote = match lexer.peek {
        Some(q @ ('\'' | '"')) => {
            bump(lexer);
            Some(q)
        }
        _ => None,
    };

    let mut label = String::new();
    while let Some(c) = lexer.peek.filter(|c| is_ident_char(*c)) {
        label.push(c);
        bump(lexer);
    }
    if let Some(q) = quote {
        if lexer.peek == Some(q) {
            bump(lexer);
        }
    }

    if label.is_empty() {
        return Err(ConfigError::Syntax {
            message: "Expected heredoc label after <<<".into(),
            line,
            column,
            hint: None,
            code: Some(106),
        });
    }

    let mut at_line_start = false;
    loop {
        match lexer.peek {
            None => {
                return Err(ConfigError::UnclosedString {
                    what: format!("heredoc '{}'", label),
                    line,
                    column,
                    hint: Some(format!("Terminate the heredoc with a line starting with {}", label)),
                    code: Some(103),
                });
            }
            Some('\n') => {
                bump(lexer);
                at_line_start = true;
            }
            Some(' ' | '\t') if at_line_start => {
                bump(lexer);
            }
            Some(_) if at_line_start => {
                let text = rest(lexer);
                let closes = text.starts_with(label.as_str())
                    && !text[label.len()..].chars().next().is_some_and(is_ident_char);
                if closes {
                    bump_n(lexer, label.chars().count());
                    return Ok(Token::Heredoc);
                }
                at_line_start = false;
                bump(lexer);
            }
            Some(_) => {
                bump(lexer);
            }
        }
    }
}

fn tokenize_number(lexer: &mut Lexer) -> Result<Token, ConfigError> {
    let (line, column) = (lexer.line, lexer.column + 1);
    let mut text = String::new();
    let mut radix = 10;

    if lexer.peek == Some('0') {
        match peek_next(lexer) {
            Some('x' | 'X') => radix = 16,
            Some('b' | 'B') => radix = 2,
            Some('o' | 'O') => radix = 8,
            _ => {}
        }
        if radix != 10 {
            bump_n(lexer, 2);
        }
    }

    let mut is_float = false;
    while let Some(ch) = lexer.peek {
        let accept = match ch {
            '_' => true,
            c if c.is_digit(radix) => true,
            '.' if radix == 10 && !is_float && peek_next(lexer).is_some_and(|c| c.is_ascii_digit()) => {
                is_float = true;
                true
            }
            '.' if radix == 10 && !is_float && !text.is_empty() => {
                // `1.` is a float; `1..2` is not something configs contain
                is_float = true;
                true
            }
            'e' | 'E' if radix == 10 && exponent_follows(lexer) => {
                is_float = true;
                text.push(ch);
                bump(lexer);
                if let Some(sign @ ('+' | '-')) = lexer.peek {
                    text.push(sign);
                    bump(lexer);
                }
                continue;
            }
            _ => false,
        };
        if !accept {
            break;
        }
        if ch != '_' {
            text.push(ch);
        }
        bump(lexer);
    }

    if is_float {
        return Ok(Token::Float);
    }

    if text.is_empty() {
        return Err(ConfigError::Syntax {
            message: "Invalid number literal".into(),
            line,
            column,
            hint: None,
            code: Some(102),
        });
    }

    // a leading zero means octal
    if radix == 10 && text.len() > 1 && text.starts_with('0') {
        radix = 8;
        text.remove(0);
    }

    match i64::from_str_radix(&text, radix) {
        Ok(n) => Ok(Token::Int(n)),
        Err(_) if text.chars().all(|c| c.is_digit(radix)) => Ok(Token::Float), // overflow
        Err(_) => Err(ConfigError::Syntax {
            message: format!("Invalid number '{}'", text),
            line,
            column,
            hint: None,
            code: Some(102),
        }),
    }
}

fn exponent_follows(lexer: &Lexer) -> bool {
    let mut chars = lexer.input.clone();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('+' | '-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

fn tokenize_variable(lexer: &mut Lexer) -> Result<Token, ConfigError> {
    bump(lexer); // consume '$'
    let mut name = String::new();
    while let Some(ch) = lexer.peek.filter(|c| is_ident_char(*c)) {
        name.push(ch);
        bump(lexer);
    }
    Ok(Token::Variable(name))
}

fn tokenize_identifier_or_keyword(lexer: &mut Lexer) -> Result<Token, ConfigError> {
    let mut ident = String::new();

    while let Some(ch) = lexer.peek {
        let namespaced = ch == '\\' && peek_next(lexer).is_some_and(is_ident_start);
        if is_ident_char(ch) || namespaced {
            ident.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    if ident.eq_ignore_ascii_case("return") {
        Ok(Token::Return)
    } else {
        Ok(Token::Ident(ident))
    }
}

fn tokenize_unexpected_char(lexer: &mut Lexer, ch: char) -> Result<Token, ConfigError> {
    let (line, column) = (lexer.line, lexer.column + 1);
    bump(lexer);
    Err(ConfigError::UnexpectedCharacter {
        character: ch,
        line,
        column,
        hint: Some("Unexpected character in input".into()),
        code: Some(104),
    })
}

// Author: Dustin Pilgrim
// License: MIT

use super::*;

/// Advance the character iterator and update offset/line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        lexer.pos += c.len_utf8();
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// The character after `peek`, without consuming anything
pub(super) fn peek_next(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}

/// Unconsumed source text, starting at `peek`
pub(super) fn rest<'a>(lexer: &Lexer<'a>) -> &'a str {
    &lexer.source[lexer.pos..]
}

pub(super) fn bump_n(lexer: &mut Lexer, n: usize) {
    for _ in 0..n {
        bump(lexer);
    }
}

/// Skip whitespace, recording comments as they go by
pub(super) fn skip_whitespace_and_comments(lexer: &mut Lexer) -> Result<(), ConfigError> {
    while let Some(c) = lexer.peek {
        match c {
            ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c' => {
                bump(lexer);
            }
            '#' => scan_line_comment(lexer),
            '/' if peek_next(lexer) == Some('/') => scan_line_comment(lexer),
            '/' if peek_next(lexer) == Some('*') => scan_block_comment(lexer)?,
            _ => break,
        }
    }
    Ok(())
}

fn scan_line_comment(lexer: &mut Lexer) {
    let (start, line, column) = (lexer.pos, lexer.line, lexer.column + 1);
    while let Some(ch) = lexer.peek {
        if ch == '\n' || (ch == '\r' && peek_next(lexer) == Some('\n')) {
            break;
        }
        bump(lexer);
    }
    push_comment(lexer, start, line, column);
}

fn scan_block_comment(lexer: &mut Lexer) -> Result<(), ConfigError> {
    let (start, line, column) = (lexer.pos, lexer.line, lexer.column + 1);
    bump_n(lexer, 2); // consume '/*'

    loop {
        match lexer.peek {
            Some('*') if peek_next(lexer) == Some('/') => {
                bump_n(lexer, 2);
                break;
            }
            Some(_) => {
                bump(lexer);
            }
            None => {
                return Err(ConfigError::UnclosedString {
                    what: "block comment".into(),
                    line,
                    column,
                    hint: Some("Close the comment with */".into()),
                    code: Some(105),
                });
            }
        }
    }

    push_comment(lexer, start, line, column);
    Ok(())
}

fn push_comment(lexer: &mut Lexer, start: usize, line: usize, column: usize) {
    let text = lexer.source[start..lexer.pos].to_string();
    lexer.comments.push(Comment {
        text,
        start,
        end: lexer.pos,
        line,
        column,
    });
}

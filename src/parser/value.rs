// Author: Dustin Pilgrim
// License: MIT

use super::*;
use crate::ast::{ArraySyntax, Collection, Entry, FunctionCall, IntLit, Layout, Node, StringLit};

/// Parse one expression. Literals, collections and plain calls become typed
/// nodes; anything else is captured verbatim as `Node::Raw`.
pub(super) fn parse_value(parser: &mut Parser) -> Result<Node, ConfigError> {
    let start_index = parser.pos;

    if let Some(node) = parse_simple_value(parser)? {
        if is_value_end(parser.peek()) {
            return Ok(node);
        }
    }

    // something like `'a' . 'b'` or `Foo::class`: start over and keep the text
    parser.pos = start_index;
    parse_raw_value(parser)
}

fn is_value_end(token: &Token) -> bool {
    matches!(
        token,
        Token::Comma
            | Token::RBracket
            | Token::RParen
            | Token::Semicolon
            | Token::DoubleArrow
            | Token::Eof
    )
}

fn parse_simple_value(parser: &mut Parser) -> Result<Option<Node>, ConfigError> {
    let current = parser.current().clone();

    match &current.token {
        Token::LBracket => {
            let collection = parse_collection(parser, ArraySyntax::Short)?;
            Ok(Some(Node::Collection(collection)))
        }
        Token::Ident(name) if name.eq_ignore_ascii_case("array") && *parser.peek_nth(1) == Token::LParen => {
            let collection = parse_collection(parser, ArraySyntax::Long)?;
            Ok(Some(Node::Collection(collection)))
        }
        Token::String(value) => {
            parser.bump()?;
            Ok(Some(Node::String(StringLit {
                value: value.clone(),
                raw: Some(parser.slice(current.start, current.end).to_string()),
            })))
        }
        Token::Int(value) => {
            parser.bump()?;
            Ok(Some(Node::Int(IntLit {
                value: *value,
                raw: Some(parser.slice(current.start, current.end).to_string()),
            })))
        }
        Token::Minus => {
            let Token::Int(value) = *parser.peek_nth(1) else {
                return Ok(None);
            };
            parser.bump()?;
            let digits = parser.bump()?;
            Ok(Some(Node::Int(IntLit {
                value: -value,
                raw: Some(parser.slice(current.start, digits.end).to_string()),
            })))
        }
        Token::Ident(name) if is_expression_keyword(name) => Ok(None),
        Token::Ident(_) if *parser.peek_nth(1) == Token::LParen => parse_call(parser),
        Token::Ident(name) => {
            parser.bump()?;
            Ok(Some(Node::Constant(name.clone())))
        }
        _ => Ok(None),
    }
}

fn is_expression_keyword(name: &str) -> bool {
    ["fn", "function", "static", "new", "match", "clone"]
        .iter()
        .any(|keyword| name.eq_ignore_ascii_case(keyword))
}

/// `name(arg, ...)`. Returns `None` when the call uses syntax the editor
/// does not model, or carries comments that a re-print would lose.
fn parse_call(parser: &mut Parser) -> Result<Option<Node>, ConfigError> {
    let name_token = parser.bump()?;
    let Token::Ident(name) = name_token.token.clone() else {
        return Ok(None);
    };
    let open = parser.expect(Token::LParen, "'(' after function name")?;

    let mut args = Vec::new();
    let mut trailing_comma = false;
    while *parser.peek() != Token::RParen {
        if *parser.peek() == Token::Eof {
            return Ok(None);
        }
        args.push(parse_value(parser)?);
        trailing_comma = false;
        if *parser.peek() == Token::Comma {
            parser.bump()?;
            trailing_comma = true;
        } else if *parser.peek() != Token::RParen {
            return Ok(None);
        }
    }
    let close = parser.bump()?;

    if !trivia::comments_between(parser, name_token.start, close.end).is_empty() {
        return Ok(None);
    }

    let layout = if parser.slice(open.end, close.start).contains('\n') {
        Layout::Multiline
    } else {
        Layout::Compact
    };

    Ok(Some(Node::Call(FunctionCall {
        name,
        args,
        layout,
        trailing_comma,
    })))
}

/// Capture source text up to the next `,`, `=>`, `;` or unbalanced closer.
fn parse_raw_value(parser: &mut Parser) -> Result<Node, ConfigError> {
    let start = parser.current().start;
    let (line, column) = (parser.line(), parser.column());
    let mut depth = 0usize;
    let mut pending_arrows = 0usize; // `fn (...) => expr` owns its arrow
    let mut end = None;

    loop {
        match parser.peek() {
            Token::LBracket | Token::LParen | Token::LBrace => depth += 1,
            Token::RBracket | Token::RParen | Token::RBrace => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Token::DoubleArrow if depth == 0 && pending_arrows > 0 => pending_arrows -= 1,
            Token::Comma | Token::DoubleArrow | Token::Semicolon if depth == 0 => break,
            Token::Ident(name) if name.eq_ignore_ascii_case("fn") && depth == 0 => pending_arrows += 1,
            Token::Eof => break,
            _ => {}
        }
        end = Some(parser.bump()?.end);
    }

    match end {
        Some(end) => Ok(Node::Raw(parser.slice(start, end).to_string())),
        None => Err(ConfigError::Syntax {
            message: format!("Expected a value, got {:?}", parser.peek()),
            line,
            column,
            hint: None,
            code: Some(210),
        }),
    }
}

pub(super) fn parse_collection(parser: &mut Parser, syntax: ArraySyntax) -> Result<Collection, ConfigError> {
    let open = parser.bump()?; // '[' or 'array'
    let (open_end, close_token) = match syntax {
        ArraySyntax::Short => (open.end, Token::RBracket),
        ArraySyntax::Long => (parser.expect(Token::LParen, "'(' after array")?.end, Token::RParen),
    };

    let mut items = Vec::new();
    let mut cursor = open_end;

    while *parser.peek() != close_token {
        if *parser.peek() == Token::Eof {
            return Err(ConfigError::UnexpectedEof {
                message: "Collection is never closed".into(),
                line: open.line,
                column: open.column,
                hint: Some(format!("Add the closing {}", if syntax == ArraySyntax::Short { "]" } else { ")" })),
                code: Some(201),
            });
        }

        let item_start = parser.current().start;
        let first = parse_value(parser)?;
        let (key, value, value_start) = if *parser.peek() == Token::DoubleArrow {
            parser.bump()?;
            let value_start = parser.current().start;
            (Some(first), parse_value(parser)?, value_start)
        } else {
            (None, first, item_start)
        };

        let leading = trivia::comments_between(parser, cursor, value_start);
        let gap_end = leading.first().map_or(item_start, |c| c.start);
        let blank_line_before = trivia::has_blank_line(parser.slice(cursor, gap_end));
        let mut comments = trivia::attach_comments(parser, leading);
        if let Some(last) = leading.last() {
            if last.end <= item_start && trivia::has_blank_line(parser.slice(last.end, item_start)) {
                comments.push(String::new());
            }
        }

        let mut last_end = parser.previous_end();
        if *parser.peek() == Token::Comma {
            last_end = parser.bump()?.end;
        } else if *parser.peek() != close_token {
            return Err(ConfigError::Syntax {
                message: format!("Expected ',' or end of collection, got {:?}", parser.peek()),
                line: parser.line(),
                column: parser.column(),
                hint: Some("Separate collection items with commas".into()),
                code: Some(209),
            });
        }

        let next_start = parser.current().start;
        let trailing = trivia::trailing_comment(parser, last_end, next_start);
        cursor = trailing.map_or(last_end, |c| c.end);
        let trailing_comment = trailing.map(|c| c.text.trim_end().to_string());

        items.push(Entry {
            key,
            value,
            comments,
            trailing_comment,
            blank_line_before,
        });
    }

    let close = parser.bump()?;
    let dangling_comments = trivia::dangling_comments(parser, cursor, close.start, !items.is_empty());

    let layout = if items.is_empty() && dangling_comments.is_empty() {
        Layout::Auto
    } else if parser.slice(open_end, close.start).contains('\n') {
        Layout::Multiline
    } else {
        Layout::Compact
    };

    Ok(Collection {
        items,
        syntax,
        layout,
        dangling_comments,
    })
}

// Author: Dustin Pilgrim
// License: MIT

use super::*;
use crate::ast::Node;

pub(super) fn parse_program(parser: &mut Parser) -> Result<Program, ConfigError> {
    if *parser.peek() != Token::OpenTag {
        return Err(ConfigError::Syntax {
            message: "Expected opening <?php tag".into(),
            line: parser.line(),
            column: parser.column(),
            hint: Some("Array files start with <?php".into()),
            code: Some(200),
        });
    }

    skip_to_return(parser)?;
    let return_token = parser.bump()?;
    let prologue = parser.slice(0, return_token.start).to_string();

    let (line, column) = (parser.line(), parser.column());
    let root_start = parser.current().start;
    let root = match value::parse_value(parser)? {
        Node::Collection(collection) => collection,
        other => {
            return Err(ConfigError::Syntax {
                message: format!("Expected a collection after return, found {}", other.kind()),
                line,
                column,
                hint: Some("The file must end with `return [ ... ];`".into()),
                code: Some(206),
            });
        }
    };

    let root_end = parser.previous_end();

    let semicolon = parser.expect(Token::Semicolon, "';' after the returned collection")?;
    let before_root = parser.slice(return_token.end, root_start).to_string();
    let after_root = parser.slice(root_end, semicolon.start).to_string();

    // an optional closing tag is the only thing allowed after the statement
    if *parser.peek() == Token::Symbol('?') && *parser.peek_nth(1) == Token::Symbol('>') {
        parser.bump()?;
        parser.bump()?;
    }
    if *parser.peek() != Token::Eof {
        return Err(ConfigError::Syntax {
            message: "Unexpected statement after the returned collection".into(),
            line: parser.line(),
            column: parser.column(),
            hint: Some("The return statement must be the last statement in the file".into()),
            code: Some(207),
        });
    }

    let epilogue = parser.slice(semicolon.end, parser.source.len()).to_string();

    Ok(Program {
        prologue,
        before_root,
        root,
        after_root,
        epilogue,
    })
}

/// Move to the first `return` that is not nested inside braces or brackets.
fn skip_to_return(parser: &mut Parser) -> Result<(), ConfigError> {
    let mut depth = 0usize;
    loop {
        match parser.peek() {
            Token::Return if depth == 0 => return Ok(()),
            Token::LBrace | Token::LParen | Token::LBracket => depth += 1,
            Token::RBrace | Token::RParen | Token::RBracket => depth = depth.saturating_sub(1),
            Token::Eof => {
                return Err(ConfigError::Syntax {
                    message: "Document must return a collection".into(),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Expected a top-level `return [ ... ];` statement".into()),
                    code: Some(205),
                });
            }
            _ => {}
        }
        parser.bump()?;
    }
}

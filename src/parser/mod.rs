// Author: Dustin Pilgrim
// License: MIT

use crate::lexer::{Comment, Lexer, Spanned, Token};
use crate::ConfigError;
use crate::ast::Program;

mod document;
mod trivia;
mod value;

/// Parser for the subset of PHP used by array config files.
///
/// The whole input is lexed up front so the value parser can backtrack:
/// anything it does not model is re-read as a verbatim `Node::Raw`.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Spanned>,
    comments: Vec<Comment>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Result<Self, ConfigError> {
        let (tokens, comments) = Lexer::new(source).tokenize()?;
        Ok(Self {
            source,
            tokens,
            comments,
            pos: 0,
        })
    }

    pub(crate) fn current(&self) -> &Spanned {
        // the token list always ends with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.current().token
    }

    pub(crate) fn peek_nth(&self, n: usize) -> &Token {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[index].token
    }

    pub(crate) fn bump(&mut self) -> Result<Spanned, ConfigError> {
        let curr = self.current().clone();
        if curr.token == Token::Eof {
            return Err(ConfigError::UnexpectedEof {
                message: "Unexpected end of input".into(),
                line: curr.line,
                column: curr.column,
                hint: None,
                code: Some(201),
            });
        }
        self.pos += 1;
        Ok(curr)
    }

    pub(crate) fn expect(&mut self, expected: Token, what: &str) -> Result<Spanned, ConfigError> {
        if *self.peek() != expected {
            let found = self.current();
            return Err(ConfigError::Syntax {
                message: format!("Expected {}, got {:?}", what, found.token),
                line: found.line,
                column: found.column,
                hint: Some("Check your syntax".into()),
                code: Some(202),
            });
        }
        self.bump()
    }

    pub(crate) fn line(&self) -> usize {
        self.current().line
    }

    pub(crate) fn column(&self) -> usize {
        self.current().column
    }

    /// End offset of the last consumed token.
    pub(crate) fn previous_end(&self) -> usize {
        match self.pos {
            0 => 0,
            n => self.tokens[n - 1].end,
        }
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    pub fn parse_program(&mut self) -> Result<Program, ConfigError> {
        document::parse_program(self)
    }
}

/// Parse a complete array file.
pub fn parse(source: &str) -> Result<Program, ConfigError> {
    let mut parser = Parser::new(source)?;
    let program = parser.parse_program()?;
    tracing::debug!(
        items = program.root.items.len(),
        bytes = source.len(),
        "parsed array file"
    );
    Ok(program)
}

#[cfg(test)]
mod tests;

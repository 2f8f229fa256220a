// Author: Dustin Pilgrim
// License: MIT

use std::str::Chars;
use crate::ConfigError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- tags & keywords ---
    OpenTag,
    Return,

    // --- literals ---
    Ident(String),
    Variable(String),
    String(String),
    /// Double-quoted string with `$var` interpolation; only its source text is kept.
    InterpolatedString,
    Heredoc,
    Int(i64),
    Float,

    // --- structure ---
    LBracket,
    RBracket,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    DoubleArrow,
    DoubleColon,
    Minus,

    /// Any other single punctuation character.
    Symbol(char),

    Eof,
}

/// A token plus its byte range and 1-based start position.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

/// A `//`, `#` or `/* */` comment, kept out of the token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

pub struct Lexer<'a> {
    source: &'a str,
    input: Chars<'a>,
    peek: Option<char>,
    pos: usize,
    line: usize,
    column: usize,
    comments: Vec<Comment>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer {
            source,
            input: source.chars(),
            peek: None,
            pos: 0,
            line: 1,
            column: 0,
            comments: Vec::new(),
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn next_token(&mut self) -> Result<Spanned, ConfigError> {
        tokenizer::next_token(self)
    }

    /// Lex the whole input, returning the tokens (ending with `Eof`) and
    /// every comment in source order.
    pub fn tokenize(mut self) -> Result<(Vec<Spanned>, Vec<Comment>), ConfigError> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_token()?;
            let done = spanned.token == Token::Eof;
            tokens.push(spanned);
            if done {
                break;
            }
        }
        Ok((tokens, self.comments))
    }
}

// Author: Dustin Pilgrim
// License: MIT

pub mod ast;
pub mod builder;
pub mod document;
pub mod error;
pub mod export;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod printer;
pub mod resolver;
pub mod utils;

pub use ast::{Collection, ConfigFunction, Entry, Key, Node, Value};
pub use document::{Document, SortMode};
pub use error::ConfigError;
pub use options::{EditorOptions, LineEnding};

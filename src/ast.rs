// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

/// A node of a parsed array file.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Collection(Collection),
    String(StringLit),
    Int(IntLit),
    /// Bare identifier such as `true`, `false`, `null` or `PHP_EOL`.
    Constant(String),
    Call(FunctionCall),
    /// Any expression the editor does not model, kept as its source text.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLit {
    pub value: String,
    pub raw: Option<String>, // source spelling, dropped once the value changes
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntLit {
    pub value: i64,
    pub raw: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Node>,
    pub layout: Layout,
    pub trailing_comma: bool,
}

/// Bracket style of a collection literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArraySyntax {
    #[default]
    Short, // [ ... ]
    Long,  // array( ... )
}

/// How a collection or call was laid out in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Built by the editor; the printer decides.
    #[default]
    Auto,
    Compact,
    Multiline,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    pub items: Vec<Entry>,
    pub syntax: ArraySyntax,
    pub layout: Layout,
    /// Comments after the last item, before the closing bracket.
    pub dangling_comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// `None` for positional items such as `['a', 'b']`.
    pub key: Option<Node>,
    pub value: Node,
    pub comments: Vec<String>,
    pub trailing_comment: Option<String>,
    pub blank_line_before: bool,
}

/// An effective array key, normalized the way PHP normalizes them:
/// canonical decimal strings become integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
}

/// The parsed file: verbatim text around a single `return [...];`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub prologue: String,
    /// Text between `return` and the root collection, usually one space.
    pub before_root: String,
    pub root: Collection,
    /// Text between the root collection and `;`.
    pub after_root: String,
    pub epilogue: String,
}

impl Node {
    pub fn string(value: impl Into<String>) -> Self {
        Node::String(StringLit { value: value.into(), raw: None })
    }

    pub fn int(value: i64) -> Self {
        Node::Int(IntLit { value, raw: None })
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Node::Constant(name.into())
    }

    pub fn bool(value: bool) -> Self {
        Node::constant(if value { "true" } else { "false" })
    }

    pub fn null() -> Self {
        Node::constant("null")
    }

    pub fn call(name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Call(FunctionCall {
            name: name.into(),
            args,
            layout: Layout::Auto,
            trailing_comma: false,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Collection(_) => "collection",
            Node::String(_) => "string",
            Node::Int(_) => "integer",
            Node::Constant(_) => "constant",
            Node::Call(_) => "function call",
            Node::Raw(_) => "expression",
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Node::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_collection_mut(&mut self) -> Option<&mut Collection> {
        match self {
            Node::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(&s.value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Node::Int(i) => Some(i.value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Constant(name) if name.eq_ignore_ascii_case("true") => Some(true),
            Node::Constant(name) if name.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Constant(name) if name.eq_ignore_ascii_case("null"))
    }

    /// The array key this node denotes when used on the left of `=>`.
    pub fn as_key(&self) -> Option<Key> {
        match self {
            Node::Int(i) => Some(Key::Int(i.value)),
            Node::String(s) => Some(Key::parse(&s.value)),
            _ => None,
        }
    }
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(items: Vec<Entry>) -> Self {
        Self { items, ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_positional(&self) -> bool {
        self.items.iter().all(|entry| entry.key.is_none())
    }

    pub fn has_comments(&self) -> bool {
        !self.dangling_comments.is_empty()
            || self
                .items
                .iter()
                .any(|entry| !entry.comments.is_empty() || entry.trailing_comment.is_some())
    }

    /// Effective key of every item. Positional items get PHP's implicit
    /// index: one past the largest integer key seen so far.
    pub fn keys(&self) -> Vec<Option<Key>> {
        let mut next_index: i64 = 0;
        self.items
            .iter()
            .map(|entry| {
                let key = match &entry.key {
                    None => Some(Key::Int(next_index)),
                    Some(node) => node.as_key(),
                };
                if let Some(Key::Int(n)) = key {
                    if n >= next_index {
                        next_index = n.saturating_add(1);
                    }
                }
                key
            })
            .collect()
    }

    pub fn position(&self, key: &Key) -> Option<usize> {
        self.keys().iter().position(|k| k.as_ref() == Some(key))
    }
}

impl Entry {
    pub fn new(key: Option<Node>, value: Node) -> Self {
        Self {
            key,
            value,
            comments: Vec::new(),
            trailing_comment: None,
            blank_line_before: false,
        }
    }

    pub fn keyed(key: Node, value: Node) -> Self {
        Self::new(Some(key), value)
    }
}

impl Key {
    /// Normalize a textual key: canonical decimal integers become `Key::Int`.
    pub fn parse(text: &str) -> Self {
        if crate::utils::is_canonical_int(text) {
            if let Ok(n) = text.parse::<i64>() {
                return Key::Int(n);
            }
        }
        Key::Str(text.to_string())
    }

    pub fn to_node(&self) -> Node {
        match self {
            Key::Int(n) => Node::int(*n),
            Key::Str(s) => Node::string(s.clone()),
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{}", n),
            Key::Str(s) => f.write_str(s),
        }
    }
}

/// A function call requested by the caller, e.g. `env('APP_KEY', 'secret')`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFunction {
    pub name: String,
    pub args: Vec<Value>,
}

impl ConfigFunction {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self { name: name.into(), args }
    }
}

/// A runtime value accepted by `Document::set`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    Function(ConfigFunction),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::String(_) => "string",
            Value::Function(_) => "function",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

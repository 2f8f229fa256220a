// Author: Dustin Pilgrim
// License: MIT

use std::cmp::Ordering;

use super::*;
use crate::ast::{Entry, Key, Node};

/// Comparator over two effective entry keys. Positional items pass their
/// implicit index; keys that are expressions rather than literals pass `None`.
pub type KeyComparator<'a> = &'a dyn Fn(Option<&Key>, Option<&Key>) -> Ordering;

/// How [`Document::sort`] orders the entries of every collection.
#[derive(Clone, Copy)]
pub enum SortMode<'a> {
    Ascending,
    Descending,
    /// Caller-supplied order. It should be total; entries it considers
    /// equal keep their relative order.
    Custom(KeyComparator<'a>),
}

impl SortMode<'static> {
    /// `"asc"` or `"desc"`.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortMode::Ascending),
            "desc" | "descending" => Ok(SortMode::Descending),
            _ => Err(ConfigError::Argument {
                message: format!("Requested sort type '{}' is invalid", name),
                hint: Some("Use 'asc' or 'desc'".into()),
                code: Some(502),
            }),
        }
    }
}

impl std::fmt::Debug for SortMode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMode::Ascending => f.write_str("Ascending"),
            SortMode::Descending => f.write_str("Descending"),
            SortMode::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl Document {
    /// Sort every collection in the document by key, recursively.
    ///
    /// Built-in orders compare effective keys: integer keys numerically
    /// (positional items by their implicit index), then string keys, then
    /// expression keys such as `Foo::class` by their source text. A
    /// positional item that would land on a different index is given an
    /// explicit key so no value changes its key.
    pub fn sort(&mut self, mode: SortMode<'_>) -> &mut Self {
        tracing::debug!(?mode, "sort");
        sort_collection(&mut self.program.root, mode);
        self
    }

    pub fn sort_by<F>(&mut self, compare: F) -> &mut Self
    where
        F: Fn(Option<&Key>, Option<&Key>) -> Ordering,
    {
        self.sort(SortMode::Custom(&compare))
    }
}

pub(crate) fn sort_collection(collection: &mut Collection, mode: SortMode<'_>) {
    let keys = collection.keys();
    let mut items: Vec<(Option<Key>, Entry)> = keys.into_iter().zip(collection.items.drain(..)).collect();

    match mode {
        SortMode::Ascending => items.sort_by(|(ka, a), (kb, b)| sort_key(ka, a).cmp(&sort_key(kb, b))),
        SortMode::Descending => items.sort_by(|(ka, a), (kb, b)| sort_key(kb, b).cmp(&sort_key(ka, a))),
        SortMode::Custom(compare) => items.sort_by(|(a, _), (b, _)| compare(a.as_ref(), b.as_ref())),
    }

    pin_implicit_keys(&mut items);
    collection.items = items.into_iter().map(|(_, entry)| entry).collect();

    for entry in &mut collection.items {
        if let Node::Collection(child) = &mut entry.value {
            sort_collection(child, mode);
        }
    }
}

/// Write out the key of every positional item whose implicit index would
/// differ in its new position.
fn pin_implicit_keys(items: &mut [(Option<Key>, Entry)]) {
    let mut next_index: i64 = 0;
    for (key, entry) in items.iter_mut() {
        if entry.key.is_none() && *key != Some(Key::Int(next_index)) {
            entry.key = key.as_ref().map(Key::to_node);
        }
        if let Some(Key::Int(n)) = key {
            if *n >= next_index {
                next_index = n.saturating_add(1);
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Literal(&'a Key),
    Expression(&'a str),
}

fn sort_key<'a>(key: &'a Option<Key>, entry: &'a Entry) -> SortKey<'a> {
    match key {
        Some(key) => SortKey::Literal(key),
        None => SortKey::Expression(match &entry.key {
            Some(Node::Raw(text)) | Some(Node::Constant(text)) => text.as_str(),
            _ => "",
        }),
    }
}

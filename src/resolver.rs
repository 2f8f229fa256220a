// Author: Dustin Pilgrim
// License: MIT

//! Dot-path resolution against a collection tree.
//!
//! `seek` never hands out references into the tree. It returns the index of
//! each entry along the matched path, so callers mutate through
//! [`entry_at_mut`] after every check has passed.

use crate::ast::{Collection, Entry, Key, Node};
use crate::ConfigError;

/// Split `a.b.0.c` into keys, turning canonical integers into `Key::Int`.
pub fn parse_path(path: &str) -> Vec<Key> {
    path.split('.').map(Key::parse).collect()
}

pub fn format_path(path: &[Key]) -> String {
    path.iter().map(Key::to_string).collect::<Vec<_>>().join(".")
}

/// Outcome of walking a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Seek {
    /// Every segment matched; indices of the entries from the root down.
    Found(Vec<usize>),
    /// A prefix matched. `at` locates the entry whose collection value is the
    /// splice point; `remaining` are the unmatched segments.
    Partial { at: Vec<usize>, remaining: Vec<Key> },
    /// Not even the first segment matched.
    Missing(Vec<Key>),
}

/// Walk `path` from `root`.
///
/// # Errors
/// Returns `IllegalOffset` when a matched entry still has segments left
/// below it but its value is not a collection.
pub fn seek(root: &Collection, path: &[Key]) -> Result<Seek, ConfigError> {
    let mut indices = Vec::new();
    let mut current = root;

    for (depth, segment) in path.iter().enumerate() {
        let Some(index) = current.position(segment) else {
            let remaining = path[depth..].to_vec();
            let outcome = if depth > 0 {
                Seek::Partial { at: indices, remaining }
            } else {
                Seek::Missing(remaining)
            };
            tracing::trace!(path = %format_path(path), ?outcome, "seek");
            return Ok(outcome);
        };
        indices.push(index);

        let entry = &current.items[index];
        if depth + 1 == path.len() {
            break;
        }

        current = match &entry.value {
            Node::Collection(collection) => collection,
            other => {
                return Err(ConfigError::IllegalOffset {
                    key: format_path(&path[..=depth]),
                    found: other.kind().to_string(),
                    hint: Some(format!(
                        "'{}' already holds a value; cannot set '{}' below it",
                        format_path(&path[..=depth]),
                        format_path(path)
                    )),
                    code: Some(402),
                });
            }
        };
    }

    tracing::trace!(path = %format_path(path), "seek found");
    Ok(Seek::Found(indices))
}

/// Read-only walk: the entry at `path`, if every segment exists.
pub fn lookup<'a>(root: &'a Collection, path: &[Key]) -> Option<&'a Entry> {
    let (last, parents) = path.split_last()?;
    let mut current = root;
    for segment in parents {
        let index = current.position(segment)?;
        current = current.items[index].value.as_collection()?;
    }
    let index = current.position(last)?;
    current.items.get(index)
}

pub fn entry_at<'a>(root: &'a Collection, indices: &[usize]) -> Option<&'a Entry> {
    let (last, parents) = indices.split_last()?;
    let mut current = root;
    for &index in parents {
        current = current.items.get(index)?.value.as_collection()?;
    }
    current.items.get(*last)
}

pub fn entry_at_mut<'a>(root: &'a mut Collection, indices: &[usize]) -> Option<&'a mut Entry> {
    let (last, parents) = indices.split_last()?;
    let mut current = root;
    for &index in parents {
        current = current.items.get_mut(index)?.value.as_collection_mut()?;
    }
    current.items.get_mut(*last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn root(source: &str) -> Collection {
        parse(source).expect("parse").root
    }

    #[test]
    fn test_parse_path_normalizes_integers() {
        assert_eq!(
            parse_path("w.0.n.007"),
            vec![
                Key::Str("w".into()),
                Key::Int(0),
                Key::Str("n".into()),
                Key::Str("007".into()),
            ]
        );
    }

    #[test]
    fn test_seek_found_partial_missing() {
        let root = root("<?php return ['a' => ['b' => ['c' => 1]], 'x' => 2];");

        assert_eq!(seek(&root, &parse_path("a.b.c")).unwrap(), Seek::Found(vec![0, 0, 0]));
        assert_eq!(
            seek(&root, &parse_path("a.b.d.e")).unwrap(),
            Seek::Partial {
                at: vec![0, 0],
                remaining: vec![Key::Str("d".into()), Key::Str("e".into())],
            }
        );
        assert_eq!(
            seek(&root, &parse_path("y.z")).unwrap(),
            Seek::Missing(vec![Key::Str("y".into()), Key::Str("z".into())])
        );
    }

    #[test]
    fn test_seek_matches_keys_loosely() {
        let root = root("<?php return ['5' => 'five', 7 => ['x' => 1]];");
        assert_eq!(seek(&root, &parse_path("5")).unwrap(), Seek::Found(vec![0]));
        assert_eq!(seek(&root, &parse_path("7.x")).unwrap(), Seek::Found(vec![1, 0]));
    }

    #[test]
    fn test_seek_uses_implicit_indices() {
        let root = root("<?php return ['list' => ['a', 'b', 'c']];");
        assert_eq!(seek(&root, &parse_path("list.1")).unwrap(), Seek::Found(vec![0, 1]));
    }

    #[test]
    fn test_seek_through_scalar_is_illegal() {
        let root = root("<?php return ['a' => 'leaf'];");
        let err = seek(&root, &parse_path("a.b")).unwrap_err();
        assert!(matches!(err, ConfigError::IllegalOffset { ref key, .. } if key == "a"));
    }

    #[test]
    fn test_seek_through_call_is_illegal() {
        let root = root("<?php return ['a' => env('A')];");
        let err = seek(&root, &parse_path("a.b")).unwrap_err();
        assert!(matches!(err, ConfigError::IllegalOffset { ref found, .. } if found == "function call"));
    }

    #[test]
    fn test_entry_at_mut_follows_indices() {
        let mut root = root("<?php return ['a' => ['b' => 1]];");
        let entry = entry_at_mut(&mut root, &[0, 0]).unwrap();
        entry.value = Node::int(2);
        assert_eq!(lookup(&root, &parse_path("a.b")).unwrap().value.as_int(), Some(2));
    }
}

// Author: Dustin Pilgrim
// License: MIT

//! Turning runtime values into tree nodes.

use crate::ast::{ArraySyntax, Collection, Entry, Key, Node, Value};

/// Build the node for a runtime value.
///
/// Booleans and null become the bare constants `true`, `false` and `null`;
/// function arguments are cast one by one, so calls may nest.
pub fn cast(value: &Value) -> Node {
    match value {
        Value::String(s) => Node::string(s.clone()),
        Value::Bool(b) => Node::bool(*b),
        Value::Int(n) => Node::int(*n),
        Value::Null => Node::null(),
        Value::Function(function) => Node::call(
            function.name.clone(),
            function.args.iter().map(cast).collect(),
        ),
    }
}

/// Build the entry chain for segments that do not exist yet.
///
/// `["a", "b", "c"]` with `"x"` gives `'a' => ['b' => ['c' => 'x']]`. Returns
/// `None` for an empty path.
pub fn build_path(segments: &[Key], value: &Value, syntax: ArraySyntax) -> Option<Entry> {
    let (outermost, inner) = segments.split_first()?;
    let mut node = cast(value);
    for segment in inner.iter().rev() {
        let entry = Entry::keyed(segment.to_node(), node);
        node = Node::Collection(Collection {
            syntax,
            ..Collection::with_entries(vec![entry])
        });
    }
    Some(Entry::keyed(outermost.to_node(), node))
}

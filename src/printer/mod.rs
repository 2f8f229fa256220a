// Author: Dustin Pilgrim
// License: MIT

//! Serializes a [`Program`] back to source text.
//!
//! Untouched literals, raw expressions and the text around the root
//! collection are printed from their original source. Collections keep the
//! shape they were parsed with; collections built by the editor are
//! multiline when keyed and compact when positional. Any comment forces a
//! collection onto multiple lines so it can sit above its item.

use crate::ast::{ArraySyntax, Collection, Entry, FunctionCall, Layout, Node, Program};
use crate::options::LineEnding;

mod literal;

pub use literal::quote_string;

#[derive(Debug, Clone, PartialEq)]
pub struct Printer {
    indent: String,
    newline: &'static str,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new("    ", LineEnding::Lf)
    }
}

impl Printer {
    pub fn new(indent: impl Into<String>, line_ending: LineEnding) -> Self {
        Self {
            indent: indent.into(),
            newline: line_ending.as_str(),
        }
    }

    pub fn render(&self, program: &Program) -> String {
        let mut out = String::with_capacity(program.prologue.len() + 256);
        out.push_str(&program.prologue);
        out.push_str("return");
        out.push_str(&program.before_root);
        self.print_collection(&program.root, 0, &mut out);
        out.push_str(&program.after_root);
        out.push(';');
        out.push_str(&program.epilogue);
        out
    }

    pub fn print_node(&self, node: &Node, depth: usize, out: &mut String) {
        match node {
            Node::Collection(collection) => self.print_collection(collection, depth, out),
            Node::String(s) => match &s.raw {
                Some(raw) => out.push_str(raw),
                None => out.push_str(&quote_string(&s.value)),
            },
            Node::Int(i) => match &i.raw {
                Some(raw) => out.push_str(raw),
                None => out.push_str(&i.value.to_string()),
            },
            Node::Constant(name) => out.push_str(name),
            Node::Call(call) => self.print_call(call, depth, out),
            Node::Raw(text) => out.push_str(text),
        }
    }

    fn print_collection(&self, collection: &Collection, depth: usize, out: &mut String) {
        let (open, close) = match collection.syntax {
            ArraySyntax::Short => ("[", "]"),
            ArraySyntax::Long => ("array(", ")"),
        };
        out.push_str(open);

        if !is_multiline(collection) {
            for (i, entry) in collection.items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.print_entry(entry, depth, out);
            }
            out.push_str(close);
            return;
        }

        for entry in &collection.items {
            if entry.blank_line_before {
                out.push_str(self.newline);
            }
            for comment in &entry.comments {
                out.push_str(self.newline);
                self.print_comment(comment, depth + 1, out);
            }
            out.push_str(self.newline);
            self.push_indent(depth + 1, out);
            self.print_entry(entry, depth + 1, out);
            out.push(',');
            if let Some(trailing) = &entry.trailing_comment {
                out.push(' ');
                out.push_str(trailing);
            }
        }
        for comment in &collection.dangling_comments {
            out.push_str(self.newline);
            self.print_comment(comment, depth + 1, out);
        }

        out.push_str(self.newline);
        self.push_indent(depth, out);
        out.push_str(close);
    }

    fn print_entry(&self, entry: &Entry, depth: usize, out: &mut String) {
        if let Some(key) = &entry.key {
            self.print_node(key, depth, out);
            out.push_str(" => ");
        }
        self.print_node(&entry.value, depth, out);
    }

    fn print_call(&self, call: &FunctionCall, depth: usize, out: &mut String) {
        out.push_str(&call.name);
        out.push('(');

        if call.layout == Layout::Multiline && !call.args.is_empty() {
            let last = call.args.len() - 1;
            for (i, arg) in call.args.iter().enumerate() {
                out.push_str(self.newline);
                self.push_indent(depth + 1, out);
                self.print_node(arg, depth + 1, out);
                if i != last || call.trailing_comma {
                    out.push(',');
                }
            }
            out.push_str(self.newline);
            self.push_indent(depth, out);
        } else {
            for (i, arg) in call.args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.print_node(arg, depth, out);
            }
        }

        out.push(')');
    }

    /// Each line of the comment at the given depth; an empty comment is a blank line.
    fn print_comment(&self, comment: &str, depth: usize, out: &mut String) {
        for (i, line) in comment.split('\n').enumerate() {
            if i > 0 {
                out.push_str(self.newline);
            }
            if !line.is_empty() {
                self.push_indent(depth, out);
                out.push_str(line);
            }
        }
    }

    fn push_indent(&self, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str(&self.indent);
        }
    }
}

fn is_multiline(collection: &Collection) -> bool {
    if collection.has_comments() {
        return true;
    }
    match collection.layout {
        Layout::Multiline => !collection.is_empty(),
        Layout::Compact => false,
        Layout::Auto => !collection.is_positional(),
    }
}

#[cfg(test)]
mod tests;

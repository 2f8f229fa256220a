// Author: Dustin Pilgrim
// License: MIT

//! Comment attachment and blank-line detection, all by source offset.

use super::*;

/// Comments lying entirely inside `start..end`.
pub(super) fn comments_between<'p>(parser: &'p Parser, start: usize, end: usize) -> &'p [Comment] {
    let first = parser.comments.partition_point(|c| c.start < start);
    let count = parser.comments[first..]
        .iter()
        .take_while(|c| c.end <= end)
        .count();
    &parser.comments[first..first + count]
}

/// A comment on the same line as `after`, ending before `before`.
pub(super) fn trailing_comment<'p>(parser: &'p Parser, after: usize, before: usize) -> Option<&'p Comment> {
    let comment = comments_between(parser, after, before).first()?;
    let gap = parser.slice(after, comment.start);
    if gap.contains('\n') || comment.text.contains('\n') {
        return None;
    }
    Some(comment)
}

pub(super) fn has_blank_line(gap: &str) -> bool {
    gap.matches('\n').count() >= 2
}

/// Normalize an attached comment block. Continuation lines of block
/// comments are made relative to the comment's own column; an empty string
/// marks a blank line between two comments.
pub(super) fn attach_comments(parser: &Parser, comments: &[Comment]) -> Vec<String> {
    let mut out = Vec::new();
    let mut previous_end: Option<usize> = None;
    for comment in comments {
        if let Some(end) = previous_end {
            if has_blank_line(parser.slice(end, comment.start)) {
                out.push(String::new());
            }
        }
        out.push(normalize_comment(&comment.text, comment.column));
        previous_end = Some(comment.end);
    }
    out
}

/// Comments between the last item and the closing bracket. Blank lines
/// around them are kept as empty entries; a blank line directly after `[`
/// is not, since the printer never emits one there.
pub(super) fn dangling_comments(parser: &Parser, cursor: usize, close: usize, has_items: bool) -> Vec<String> {
    let comments = comments_between(parser, cursor, close);
    let first_start = comments.first().map_or(close, |c| c.start);

    let mut out = Vec::new();
    if has_items && has_blank_line(parser.slice(cursor, first_start)) {
        out.push(String::new());
    }
    out.extend(attach_comments(parser, comments));
    if let Some(last) = comments.last() {
        if has_blank_line(parser.slice(last.end, close)) {
            out.push(String::new());
        }
    }
    out
}

pub(super) fn normalize_comment(text: &str, column: usize) -> String {
    let text = text.replace("\r\n", "\n");
    let mut lines = text.split('\n');
    let first = lines.next().unwrap_or_default().trim_end().to_string();
    let rest: Vec<&str> = lines.collect();
    if rest.is_empty() {
        return first;
    }

    let docblock = rest.iter().all(|line| line.trim_start().starts_with('*'));
    let mut out = first;
    for line in rest {
        out.push('\n');
        if docblock {
            out.push(' ');
            out.push_str(line.trim());
        } else {
            out.push_str(strip_indent(line, column.saturating_sub(1)).trim_end());
        }
    }
    out
}

fn strip_indent(line: &str, width: usize) -> &str {
    let cut = line
        .char_indices()
        .take(width)
        .take_while(|(_, c)| *c == ' ' || *c == '\t')
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    &line[cut..]
}

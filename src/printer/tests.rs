// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
use crate::ast::{Entry, FunctionCall};
use crate::parser::parse;

fn program(root: Collection) -> Program {
    Program {
        prologue: "<?php\n\n".into(),
        before_root: " ".into(),
        root,
        after_root: String::new(),
        epilogue: "\n".into(),
    }
}

fn keyed(key: &str, value: Node) -> Entry {
    Entry::keyed(Node::string(key), value)
}

#[test]
fn test_built_collections_choose_layout_by_shape() {
    let list = Collection::with_entries(vec![
        Entry::new(None, Node::string("a")),
        Entry::new(None, Node::int(2)),
    ]);
    let root = Collection::with_entries(vec![
        keyed("list", Node::Collection(list)),
        keyed("empty", Node::Collection(Collection::new())),
        keyed("flag", Node::bool(true)),
    ]);

    assert_eq!(
        Printer::default().render(&program(root)),
        "<?php\n\nreturn [\n    'list' => ['a', 2],\n    'empty' => [],\n    'flag' => true,\n];\n"
    );
}

#[test]
fn test_comments_force_multiline() {
    let mut entry = Entry::new(None, Node::string("a"));
    entry.comments = vec!["// note".into()];
    let root = Collection::with_entries(vec![entry, Entry::new(None, Node::string("b"))]);

    assert_eq!(
        Printer::default().render(&program(root)),
        "<?php\n\nreturn [\n    // note\n    'a',\n    'b',\n];\n"
    );
}

#[test]
fn test_blank_lines_and_trailing_comments() {
    let mut first = keyed("a", Node::int(1));
    first.trailing_comment = Some("// one".into());
    let mut second = keyed("b", Node::int(2));
    second.blank_line_before = true;
    second.comments = vec!["/**\n * Two\n */".into(), String::new()];
    let mut root = Collection::with_entries(vec![first, second]);
    root.dangling_comments = vec!["# end".into()];

    let expected = "<?php\n\nreturn [\n    'a' => 1, // one\n\n    /**\n     * Two\n     */\n\n    'b' => 2,\n    # end\n];\n";
    assert_eq!(Printer::default().render(&program(root)), expected);
}

#[test]
fn test_custom_indent_and_line_ending() {
    let inner = Collection::with_entries(vec![keyed("b", Node::string("x"))]);
    let root = Collection::with_entries(vec![keyed("a", Node::Collection(inner))]);
    let printer = Printer::new("\t", LineEnding::CrLf);

    let mut prog = program(root);
    prog.prologue = "<?php\r\n\r\n".into();
    prog.epilogue = "\r\n".into();

    assert_eq!(
        printer.render(&prog),
        "<?php\r\n\r\nreturn [\r\n\t'a' => [\r\n\t\t'b' => 'x',\r\n\t],\r\n];\r\n"
    );
}

#[test]
fn test_long_syntax() {
    let root = Collection {
        syntax: ArraySyntax::Long,
        ..Collection::with_entries(vec![keyed("a", Node::Collection(Collection {
            syntax: ArraySyntax::Long,
            ..Collection::new()
        }))])
    };
    assert_eq!(
        Printer::default().render(&program(root)),
        "<?php\n\nreturn array(\n    'a' => array(),\n);\n"
    );
}

#[test]
fn test_calls() {
    let compact = Node::call("env", vec![Node::string("A"), Node::null()]);
    let multiline = Node::Call(FunctionCall {
        name: "sprintf".into(),
        args: vec![Node::string("%s"), Node::int(1)],
        layout: Layout::Multiline,
        trailing_comma: false,
    });
    let root = Collection::with_entries(vec![keyed("a", compact), keyed("b", multiline)]);

    assert_eq!(
        Printer::default().render(&program(root)),
        "<?php\n\nreturn [\n    'a' => env('A', null),\n    'b' => sprintf(\n        '%s',\n        1\n    ),\n];\n"
    );
}

#[test]
fn test_edited_literals_are_requoted() {
    let mut prog = parse("<?php\n\nreturn [\"a\" => \"x\", 'n' => 0x10];\n").unwrap();
    assert_eq!(Printer::default().render(&prog), "<?php\n\nreturn [\"a\" => \"x\", 'n' => 0x10];\n");

    prog.root.items[0].value = Node::string("it's");
    prog.root.items[1].value = Node::int(17);
    assert_eq!(
        Printer::default().render(&prog),
        "<?php\n\nreturn [\"a\" => 'it\\'s', 'n' => 17];\n"
    );
}

#[test]
fn test_render_is_idempotent() {
    let source = r#"<?php

return [
    'providers' => [
        App\Providers\AppServiceProvider::class,
    ],
    'aliases' => ['Str' => Illuminate\Support\Str::class],
    'cipher' => 'AES-256-CBC',
    'key' => env('APP_KEY'),
    'previous_keys' => [
        ...array_filter(
            explode(',', env('APP_PREVIOUS_KEYS', ''))
        ),
    ],
    'maintenance' => [
        'driver' => env('APP_MAINTENANCE_DRIVER', 'file'),
        // 'store' => env('APP_MAINTENANCE_STORE', 'database'),
    ],
];
"#;
    let prog = parse(source).unwrap();
    let once = Printer::default().render(&prog);
    assert_eq!(once, source);
    assert_eq!(Printer::default().render(&parse(&once).unwrap()), source);
}

// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
use crate::ast::{ArraySyntax, Key, Layout, Node};

fn root(source: &str) -> crate::ast::Collection {
    parse(source).expect("Failed to parse").root
}

#[test]
fn test_parser_basic_document() {
    let source = "<?php\n\ndeclare(strict_types=1);\n\nreturn [\n    'name' => 'Demo',\n    'port' => 8080,\n    'debug' => false,\n];\n";
    let program = parse(source).unwrap();

    assert_eq!(program.prologue, "<?php\n\ndeclare(strict_types=1);\n\n");
    assert_eq!(program.epilogue, "\n");
    assert_eq!(program.root.layout, Layout::Multiline);
    assert_eq!(program.root.syntax, ArraySyntax::Short);

    let items = &program.root.items;
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].key.as_ref().and_then(Node::as_key), Some(Key::Str("name".into())));
    assert_eq!(items[0].value.as_str(), Some("Demo"));
    assert_eq!(items[1].value.as_int(), Some(8080));
    assert_eq!(items[2].value.as_bool(), Some(false));
}

#[test]
fn test_long_array_syntax_and_positional_items() {
    let collection = root("<?php return array('a', 'b', array(1, 2));");

    assert_eq!(collection.syntax, ArraySyntax::Long);
    assert_eq!(collection.layout, Layout::Compact);
    assert!(collection.is_positional());
    match &collection.items[2].value {
        Node::Collection(inner) => {
            assert_eq!(inner.syntax, ArraySyntax::Long);
            assert_eq!(inner.len(), 2);
        }
        other => panic!("expected a nested collection, got {:?}", other),
    }
}

#[test]
fn test_literals_keep_source_spelling() {
    let collection = root("<?php return [\"double\", 0x10, -5, 1_000];");

    match &collection.items[0].value {
        Node::String(s) => {
            assert_eq!(s.value, "double");
            assert_eq!(s.raw.as_deref(), Some("\"double\""));
        }
        other => panic!("expected a string, got {:?}", other),
    }
    match &collection.items[1].value {
        Node::Int(i) => assert_eq!((i.value, i.raw.as_deref()), (16, Some("0x10"))),
        other => panic!("expected an int, got {:?}", other),
    }
    match &collection.items[2].value {
        Node::Int(i) => assert_eq!((i.value, i.raw.as_deref()), (-5, Some("-5"))),
        other => panic!("expected an int, got {:?}", other),
    }
    assert_eq!(collection.items[3].value.as_int(), Some(1000));
}

#[test]
fn test_unmodelled_expressions_become_raw() {
    let source = r#"<?php return [
    'float' => 1.5,
    'class' => App\User::class,
    'concat' => 'a' . 'b',
    'cast' => (int) env('X', 1),
    'closure' => fn ($x) => $x * 2,
    'ternary' => $debug ? 'yes' : 'no',
    'interp' => "Hi {$name}",
    'var' => $value,
    'nested' => ['a' => strtolower('X')] + $defaults,
];"#;
    let collection = root(source);
    let raw: Vec<&str> = collection
        .items
        .iter()
        .map(|e| match &e.value {
            Node::Raw(text) => text.as_str(),
            other => panic!("expected raw, got {:?}", other),
        })
        .collect();

    assert_eq!(
        raw,
        vec![
            "1.5",
            r"App\User::class",
            "'a' . 'b'",
            "(int) env('X', 1)",
            "fn ($x) => $x * 2",
            "$debug ? 'yes' : 'no'",
            "\"Hi {$name}\"",
            "$value",
            "['a' => strtolower('X')] + $defaults",
        ]
    );
}

#[test]
fn test_function_calls_and_constants() {
    let collection = root("<?php return ['a' => env('A', storage_path('x')), 'b' => PHP_EOL, 'c' => null];");

    match &collection.items[0].value {
        Node::Call(call) => {
            assert_eq!(call.name, "env");
            assert_eq!(call.args.len(), 2);
            assert_eq!(call.layout, Layout::Compact);
            assert!(matches!(&call.args[1], Node::Call(inner) if inner.name == "storage_path"));
        }
        other => panic!("expected a call, got {:?}", other),
    }
    assert_eq!(collection.items[1].value, Node::Constant("PHP_EOL".into()));
    assert!(collection.items[2].value.is_null());
}

#[test]
fn test_multiline_call_layout() {
    let collection = root("<?php return ['a' => sprintf(\n    '%s',\n    'x',\n)];");
    match &collection.items[0].value {
        Node::Call(call) => {
            assert_eq!(call.layout, Layout::Multiline);
            assert!(call.trailing_comma);
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_call_with_comments_stays_raw() {
    let collection = root("<?php return ['a' => env('A' /* key */, 1)];");
    assert_eq!(collection.items[0].value, Node::Raw("env('A' /* key */, 1)".into()));
}

#[test]
fn test_comments_attach_to_following_item() {
    let source = r#"<?php

return [
    // first
    'a' => 1, // same line

    /**
     * Docblock
     */
    'b' => 2,
    // dangling
];
"#;
    let collection = root(source);

    assert_eq!(collection.items[0].comments, vec!["// first".to_string()]);
    assert_eq!(collection.items[0].trailing_comment.as_deref(), Some("// same line"));
    assert!(!collection.items[0].blank_line_before);

    assert_eq!(collection.items[1].comments, vec!["/**\n * Docblock\n */".to_string()]);
    assert!(collection.items[1].blank_line_before);
    assert_eq!(collection.dangling_comments, vec!["// dangling".to_string()]);
}

#[test]
fn test_blank_lines_between_comments_and_before_close() {
    let source = "<?php return [\n    // one\n\n    // two\n\n    'a' => 1,\n\n];";
    let collection = root(source);

    assert_eq!(
        collection.items[0].comments,
        vec!["// one".to_string(), String::new(), "// two".to_string(), String::new()]
    );
    assert_eq!(collection.dangling_comments, vec![String::new()]);
}

#[test]
fn test_block_comment_indent_is_relative() {
    let source = "<?php return [\n        /*\n        | Title\n        */\n        'a' => 1,\n];";
    let collection = root(source);
    assert_eq!(collection.items[0].comments, vec!["/*\n| Title\n*/".to_string()]);
}

#[test]
fn test_closing_tag_allowed() {
    let program = parse("<?php return [];\n?>\n").unwrap();
    assert_eq!(program.epilogue, "\n?>\n");
    assert!(program.root.is_empty());
    assert_eq!(program.root.layout, Layout::Auto);
}

#[test]
fn test_parse_errors() {
    let cases = [
        ("return [];", 200),
        ("<?php echo 'x';", 205),
        ("<?php return 'x';", 206),
        ("<?php return []", 202),
        ("<?php return []; echo 'x';", 207),
        ("<?php return ['a' => 1 'b' => 2];", 209),
        ("<?php return ['a' => 1,", 201),
        ("<?php return [,];", 210),
    ];

    for (source, code) in cases {
        let err = parse(source).unwrap_err();
        assert!(err.is_parse_error(), "{}: {:?}", source, err);
        assert_eq!(err.code(), Some(code), "{}: {:?}", source, err);
    }
}

#[test]
fn test_text_around_root_collection() {
    let program = parse("<?php\nreturn /* c */ [\n    'a' => 1,\n] /* d */;\n").unwrap();
    assert_eq!(program.before_root, " /* c */ ");
    assert_eq!(program.after_root, " /* d */");
    assert_eq!(program.root.len(), 1);
    assert!(program.root.items[0].comments.is_empty());
    assert!(program.root.dangling_comments.is_empty());

    let program = parse("<?php return[];").unwrap();
    assert_eq!((program.before_root.as_str(), program.after_root.as_str()), ("", ""));
}

#[test]
fn test_return_inside_function_is_skipped() {
    let source = "<?php\n\nfunction helper() { return 1; }\n\nreturn ['a' => 1];\n";
    let program = parse(source).unwrap();
    assert_eq!(program.root.len(), 1);
    assert!(program.prologue.contains("function helper()"));
}

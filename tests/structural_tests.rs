// Integration tests for the structural pipeline

use routine::ast::{ReferenceGraph, ReferenceKind};
use routine::structural::{self, lexer::StructuralKind};
use std::fs;
use std::path::Path;

fn reference_kinds(graph: &ReferenceGraph) -> Vec<Vec<ReferenceKind>> {
    graph
        .blocks
        .iter()
        .map(|block| block.body.iter().map(|r| r.kind).collect())
        .collect()
}

#[test]
fn test_matching_flags() {
    let graph = structural::parse("<a,b- -a,b>").expect("Parsing failed");
    assert_eq!(graph.blocks.len(), 1);
    assert_eq!(graph.blocks[0].open_flags, vec!["a", "b"]);
    assert_eq!(graph.blocks[0].close_flags, vec!["a", "b"]);
}

#[test]
fn test_differing_flags_are_accepted() {
    let graph = structural::parse("<a,b- -b,a>").expect("Parsing failed");
    assert_eq!(graph.blocks[0].open_flags, vec!["a", "b"]);
    assert_eq!(graph.blocks[0].close_flags, vec!["b", "a"]);

    let graph = structural::parse("<start- -stop>").expect("Parsing failed");
    assert_eq!(graph.blocks[0].open_flags, vec!["start"]);
    assert_eq!(graph.blocks[0].close_flags, vec!["stop"]);
}

#[test]
fn test_noise_between_markers() {
    let graph = structural::parse("<-\n @node garbage(((-->@sig junk-- ->").expect("Parsing failed");
    assert_eq!(
        reference_kinds(&graph),
        vec![vec![ReferenceKind::Node, ReferenceKind::Signal]]
    );
}

#[test]
fn test_blocks_keep_source_order() {
    let graph = structural::parse("<- @sig -> <- -> <x- @node @node @sig -x>").expect("Parsing failed");
    assert_eq!(
        reference_kinds(&graph),
        vec![
            vec![ReferenceKind::Signal],
            vec![],
            vec![ReferenceKind::Node, ReferenceKind::Node, ReferenceKind::Signal],
        ]
    );
}

#[test]
fn test_unterminated_block() {
    let err = structural::parse("<a- @node").unwrap_err();
    assert!(err.is_incomplete_input());
    assert_eq!(err.location().offset, 9);
    assert_eq!(
        err.to_string(),
        "Syntax error at line 1, column 10: unexpected end of input, expected '-' closing the scheduled block"
    );
}

#[test]
fn test_unterminated_open_delimiter() {
    let err = structural::parse("<a,b").unwrap_err();
    assert!(err.is_incomplete_input());
    assert_eq!(err.expected(), "'-'");
}

#[test]
fn test_lexer_consumes_everything() {
    let source = "<- #include <stdio.h> €£ @node ->";
    let tokens = structural::lexer::tokenize(source);
    assert_eq!(tokens.last().map(|t| t.kind), Some(StructuralKind::Eof));

    let covered: usize = tokens.iter().map(|t| t.span.len()).sum();
    let whitespace = source.chars().filter(|c| c.is_whitespace()).count();
    assert_eq!(covered + whitespace, source.len());
}

#[test]
fn test_demo_routine() {
    let path = Path::new("demos/tavern.routine");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let graph = structural::parse(&source).expect("Parsing failed");
    assert_eq!(
        reference_kinds(&graph),
        vec![
            vec![ReferenceKind::Node],
            vec![ReferenceKind::Signal, ReferenceKind::Node, ReferenceKind::Signal],
            vec![],
        ]
    );
    assert_eq!(graph.blocks[1].open_flags, vec!["loop", "idle"]);
    assert_eq!(graph.blocks[1].close_flags, vec!["idle"]);
}

#[test]
fn test_recovering_reports_each_bad_block() {
    let source = "<- @node -a,>\n<- @sig ->\n<,- ->\n<- @node ->";
    let (graph, errors) = structural::parse_recovering(source);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].location().line, 1);
    assert_eq!(errors[1].location().line, 3);
    assert_eq!(
        reference_kinds(&graph),
        vec![vec![ReferenceKind::Signal], vec![ReferenceKind::Node]]
    );
}

#[test]
fn test_block_comments_hide_markers() {
    let graph = structural::parse("<- /* @node -> */ @sig /**/ ->").expect("Parsing failed");
    assert_eq!(reference_kinds(&graph), vec![vec![ReferenceKind::Signal]]);
}

#[test]
fn test_unclosed_comment_loses_only_its_opener() {
    let graph = structural::parse("<- /* x ->\n<a- @node -a>").expect("Parsing failed");
    assert_eq!(
        reference_kinds(&graph),
        vec![vec![], vec![ReferenceKind::Node]]
    );
    assert_eq!(graph.blocks[1].open_flags, vec!["a"]);
}

//! Parsed representation of a single Go source file.
//!
//! A [`GoAst`] bundles the tree-sitter parse tree with the source text it
//! was produced from, since tree-sitter nodes only store byte ranges. One
//! instance is created per fetch, consumed by exactly one extractor, then
//! dropped; nothing here is cached or shared.

use tree_sitter::{Node, Parser, Tree};

use crate::core::errors::{Error, Result};

/// A parsed Go source file together with its originating path.
#[derive(Debug)]
pub struct GoAst {
    tree: Tree,
    pub source: String,
    pub path: String,
}

impl GoAst {
    /// The root node of the parse tree.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The source text a node spans.
    pub fn node_text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

/// Parse the full content of one Go file.
///
/// tree-sitter always produces a best-effort tree, so syntactic validity is
/// checked on the root node afterwards; extraction must never run over a
/// partial tree.
pub fn parse_go_source(path: &str, source: &str) -> Result<GoAst> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| Error::Parse {
            path: path.to_string(),
            message: format!("could not load Go grammar: {e}"),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::parse(path, "parser produced no tree"))?;

    let root = tree.root_node();
    if root.has_error() {
        let message = match first_error_node(root) {
            Some(node) => {
                let pos = node.start_position();
                format!("syntax error at line {}, column {}", pos.row + 1, pos.column + 1)
            }
            None => "syntax error".to_string(),
        };
        return Err(Error::parse(path, message));
    }

    Ok(GoAst {
        tree,
        source: source.to_string(),
        path: path.to_string(),
    })
}

/// Locate the first error or missing node for diagnostics.
fn first_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_go() {
        let ast = parse_go_source("ok.go", "package main\n\nfunc main() {}\n").unwrap();
        assert_eq!(ast.root().kind(), "source_file");
        assert_eq!(ast.path, "ok.go");
    }

    #[test]
    fn rejects_invalid_go() {
        let err = parse_go_source("bad.go", "package main\n\nfunc {{{\n").unwrap_err();
        match err {
            Error::Parse { path, message } => {
                assert_eq!(path, "bad.go");
                assert!(message.contains("invalid Go code"), "message: {message}");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn node_text_returns_source_slice() {
        let ast = parse_go_source("ok.go", "package demo\n").unwrap();
        let clause = ast.root().named_child(0).unwrap();
        assert_eq!(clause.kind(), "package_clause");
        assert_eq!(ast.node_text(clause), "package demo");
    }
}

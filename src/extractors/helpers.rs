//! Generic tree-walk helpers shared by the shape matchers.
//!
//! The inspected files are third-party code whose exact tree shape can
//! drift between grammar and upstream versions, so lookups here go through
//! named children and field names defensively instead of assuming fixed
//! child indices.

use tree_sitter::Node;

use crate::core::ast::GoAst;

/// Collect the named children of a node.
pub(crate) fn named_children<'a>(node: Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Find the top-level function declaration with the given name.
pub(crate) fn find_function_decl<'a>(ast: &'a GoAst, name: &str) -> Option<Node<'a>> {
    named_children(ast.root())
        .into_iter()
        .filter(|n| n.kind() == "function_declaration")
        .find(|n| {
            n.child_by_field_name("name")
                .is_some_and(|id| ast.node_text(id) == name)
        })
}

/// Find the initializer expression of the top-level var with the given name.
///
/// Handles both single (`var x = ...`) and grouped (`var ( ... )`)
/// declarations; within a spec, names and initializers pair up by position.
pub(crate) fn find_var_initializer<'a>(ast: &'a GoAst, name: &str) -> Option<Node<'a>> {
    for decl in named_children(ast.root()) {
        if decl.kind() != "var_declaration" {
            continue;
        }
        for spec in descendants_of_kind(decl, "var_spec") {
            let names = children_by_field(spec, "name");
            let Some(index) = names.iter().position(|n| ast.node_text(*n) == name) else {
                continue;
            };
            let Some(values) = spec.child_by_field_name("value") else {
                continue;
            };
            return named_children(values).into_iter().nth(index);
        }
    }
    None
}

/// The statements of a declaration's body block, in source order.
pub(crate) fn body_statements<'a>(decl: Node<'a>) -> Vec<Node<'a>> {
    decl.child_by_field_name("body")
        .map(named_children)
        .unwrap_or_default()
}

/// The call expression a statement consists of, if any.
pub(crate) fn statement_call<'a>(stmt: Node<'a>) -> Option<Node<'a>> {
    match stmt.kind() {
        "call_expression" => Some(stmt),
        "expression_statement" => {
            let inner = stmt.named_child(0)?;
            (inner.kind() == "call_expression").then_some(inner)
        }
        _ => None,
    }
}

/// The method name of a call through a selector (`recv.Method(...)`).
pub(crate) fn selector_method_name<'a>(ast: &'a GoAst, call: Node<'a>) -> Option<&'a str> {
    let function = call.child_by_field_name("function")?;
    if function.kind() != "selector_expression" {
        return None;
    }
    let field = function.child_by_field_name("field")?;
    Some(ast.node_text(field))
}

/// The arguments of a call expression.
pub(crate) fn call_arguments<'a>(call: Node<'a>) -> Vec<Node<'a>> {
    call.child_by_field_name("arguments")
        .map(named_children)
        .unwrap_or_default()
}

/// The key nodes of a composite literal's keyed entries, or `None` when the
/// expression is not a composite literal. Unkeyed entries are ignored.
pub(crate) fn composite_literal_keys<'a>(node: Node<'a>) -> Option<Vec<Node<'a>>> {
    let node = unwrap_single_wrapper(node, "literal_element");
    if node.kind() != "composite_literal" {
        return None;
    }
    let body = node.child_by_field_name("body")?;
    Some(
        named_children(body)
            .into_iter()
            .filter(|entry| entry.kind() == "keyed_element")
            .filter_map(keyed_element_key)
            .collect(),
    )
}

fn keyed_element_key(entry: Node<'_>) -> Option<Node<'_>> {
    entry
        .child_by_field_name("key")
        .or_else(|| entry.named_child(0))
}

/// Descend through a wrapper node of the given kind, if present.
pub(crate) fn unwrap_single_wrapper<'a>(node: Node<'a>, kind: &str) -> Node<'a> {
    if node.kind() == kind {
        if let Some(inner) = node.named_child(0) {
            return inner;
        }
    }
    node
}

fn children_by_field<'a>(node: Node<'a>, field: &str) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

fn descendants_of_kind<'a>(node: Node<'a>, kind: &str) -> Vec<Node<'a>> {
    let mut found = Vec::new();
    collect_descendants(node, kind, &mut found);
    found
}

fn collect_descendants<'a>(node: Node<'a>, kind: &str, found: &mut Vec<Node<'a>>) {
    for child in named_children(node) {
        if child.kind() == kind {
            found.push(child);
        } else {
            collect_descendants(child, kind, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ast::parse_go_source;
    use indoc::indoc;

    #[test]
    fn finds_function_decl_by_name() {
        let ast = parse_go_source(
            "f.go",
            indoc! {r#"
                package p

                func other() {}

                func target(c *Context) {}
            "#},
        )
        .unwrap();
        let decl = find_function_decl(&ast, "target").unwrap();
        assert_eq!(decl.kind(), "function_declaration");
        assert!(find_function_decl(&ast, "missing").is_none());
    }

    #[test]
    fn finds_var_initializer_in_grouped_declaration() {
        let ast = parse_go_source(
            "f.go",
            indoc! {r#"
                package p

                var (
                    First  = 1
                    Target = map[string]int{}
                )
            "#},
        )
        .unwrap();
        let init = find_var_initializer(&ast, "Target").unwrap();
        assert_eq!(init.kind(), "composite_literal");
    }

    #[test]
    fn pairs_names_and_values_by_position() {
        let ast = parse_go_source("f.go", "package p\n\nvar a, b = 1, \"two\"\n").unwrap();
        let init = find_var_initializer(&ast, "b").unwrap();
        assert_eq!(init.kind(), "interpreted_string_literal");
    }

    #[test]
    fn composite_literal_keys_rejects_other_expressions() {
        let ast = parse_go_source("f.go", "package p\n\nvar v = makeMap()\n").unwrap();
        let init = find_var_initializer(&ast, "v").unwrap();
        assert!(composite_literal_keys(init).is_none());
    }
}

//! Matcher for the nested setup-callback idiom.

use tree_sitter::Node;

use crate::core::ast::GoAst;
use crate::core::errors::Result;
use crate::core::literals::decode_string_literal;

use super::helpers::{body_statements, call_arguments, named_children, selector_method_name};

/// Extract names assigned inside setup callbacks registered anywhere in the
/// file:
///
/// ```go
/// templates.RegisterSetupFunc(func(ctx *templates.Context) {
///     ctx.ContextFuncs["name1"] = fn1
///     ctx.ContextFuncs["name2"] = fn2
/// })
/// ```
///
/// The whole tree is walked because registrations happen inside init
/// functions and other nesting. Only calls to `method` taking exactly one
/// function literal are inspected; within the literal, only single-target
/// assignments indexing a member named `member` contribute. Everything else
/// in the file is ignored, so an absent registration yields an empty list,
/// not a failure.
pub fn setup_callback_keys(ast: &GoAst, method: &str, member: &str) -> Result<Vec<String>> {
    let mut funcs = Vec::new();
    visit(ast.root(), &mut |node| {
        if node.kind() != "call_expression" {
            return;
        }
        if selector_method_name(ast, node) != Some(method) {
            return;
        }
        let args = call_arguments(node);
        let &[callback] = args.as_slice() else {
            return;
        };
        if callback.kind() != "func_literal" {
            return;
        }
        for stmt in body_statements(callback) {
            if let Some(name) = context_func_assignment(ast, stmt, member) {
                funcs.push(name);
            }
        }
    });
    Ok(funcs)
}

// Matches `recv.<member>[key] = value` with a single assignment target and
// returns the decoded key.
fn context_func_assignment(ast: &GoAst, stmt: Node<'_>, member: &str) -> Option<String> {
    if stmt.kind() != "assignment_statement" {
        return None;
    }
    let left = stmt.child_by_field_name("left")?;
    let &[target] = named_children(left).as_slice() else {
        return None;
    };
    if target.kind() != "index_expression" {
        return None;
    }
    let operand = target.child_by_field_name("operand")?;
    if operand.kind() != "selector_expression" {
        return None;
    }
    let field = operand.child_by_field_name("field")?;
    if ast.node_text(field) != member {
        return None;
    }
    let index = target.child_by_field_name("index")?;
    decode_string_literal(index, &ast.source)
}

// Every node is owned by its parent and visited exactly once.
fn visit<'a>(node: Node<'a>, f: &mut impl FnMut(Node<'a>)) {
    f(node);
    for child in named_children(node) {
        visit(child, f);
    }
}

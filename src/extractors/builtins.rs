//! Matcher for the wrapped return-literal idiom.

use crate::core::ast::GoAst;
use crate::core::errors::{Error, Result};

use super::context_funcs::decode_keys;
use super::helpers::{body_statements, composite_literal_keys, find_function_decl, named_children};

/// Extract the string keys of the map literal a function returns directly:
///
/// ```go
/// func builtins() FuncMap {
///     return FuncMap{
///         "name1": fn1,
///         "name2": fn2,
///     }
/// }
/// ```
///
/// This shape is structurally rigid in its target file, so any deviation --
/// an empty body, a first statement that is not a return, a first result
/// that is not a map literal -- is a hard failure rather than an empty
/// result.
pub fn returned_map_keys(ast: &GoAst, func_name: &str) -> Result<Vec<String>> {
    let decl = find_function_decl(ast, func_name)
        .ok_or_else(|| Error::shape_mismatch(&ast.path, format!("no definition for {func_name}")))?;

    let statements = body_statements(decl);
    let first = statements
        .first()
        .ok_or_else(|| Error::shape_mismatch(&ast.path, format!("{func_name} has an empty body")))?;

    if first.kind() != "return_statement" {
        return Err(Error::shape_mismatch(
            &ast.path,
            format!("no return statement at the start of {func_name}"),
        ));
    }

    let result = named_children(*first)
        .into_iter()
        .find(|n| n.kind() == "expression_list")
        .and_then(|results| named_children(results).into_iter().next())
        .ok_or_else(|| {
            Error::shape_mismatch(
                &ast.path,
                format!("return statement in {func_name} has no results"),
            )
        })?;

    let keys = composite_literal_keys(result).ok_or_else(|| {
        Error::shape_mismatch(
            &ast.path,
            format!("result of return statement in {func_name} is not a composite literal"),
        )
    })?;

    Ok(decode_keys(ast, keys))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ast::parse_go_source;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> GoAst {
        parse_go_source("funcs.go", source).unwrap()
    }

    #[test]
    fn collects_keys_of_returned_map() {
        let ast = parse(indoc! {r#"
            package template

            func builtins() FuncMap {
                return FuncMap{
                    "and":      and,
                    "call":     call,
                    "urlquery": URLQueryEscaper,
                }
            }
        "#});
        let funcs = returned_map_keys(&ast, "builtins").unwrap();
        assert_eq!(funcs, vec!["and", "call", "urlquery"]);
    }

    #[test]
    fn missing_function_is_a_shape_mismatch() {
        let ast = parse("package template\n");
        let err = returned_map_keys(&ast, "builtins").unwrap_err();
        match err {
            Error::ShapeMismatch { message, .. } => {
                assert_eq!(message, "no definition for builtins");
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn non_return_first_statement_is_a_shape_mismatch() {
        let ast = parse(indoc! {r#"
            package template

            func builtins() FuncMap {
                m := FuncMap{"and": and}
                return m
            }
        "#});
        let err = returned_map_keys(&ast, "builtins").unwrap_err();
        match err {
            Error::ShapeMismatch { message, .. } => {
                assert_eq!(message, "no return statement at the start of builtins");
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn empty_body_is_a_shape_mismatch() {
        let ast = parse("package template\n\nfunc builtins() FuncMap {}\n");
        let err = returned_map_keys(&ast, "builtins").unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn non_literal_result_is_a_shape_mismatch() {
        let ast = parse(indoc! {r#"
            package template

            func builtins() FuncMap {
                return makeBuiltins()
            }
        "#});
        let err = returned_map_keys(&ast, "builtins").unwrap_err();
        match err {
            Error::ShapeMismatch { message, .. } => {
                assert_eq!(
                    message,
                    "result of return statement in builtins is not a composite literal"
                );
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }
}

//! Matchers for the two registration idioms in the base context file.

use tree_sitter::Node;

use crate::core::ast::GoAst;
use crate::core::errors::{Error, Result};
use crate::core::literals::decode_string_literal;

use super::helpers::{
    body_statements, call_arguments, composite_literal_keys, find_function_decl,
    find_var_initializer, selector_method_name, statement_call,
};

/// Extract names registered through method calls in a setup function:
///
/// ```go
/// func baseContextFuncs(c *Context) {
///     c.addContextFunc("name1", fn1)
///     c.addContextFunc("name2", fn2)
/// }
/// ```
///
/// The declaration itself is load-bearing and must exist; statements inside
/// it that are not registration calls simply contribute nothing.
pub fn registration_calls(ast: &GoAst, func_name: &str, method: &str) -> Result<Vec<String>> {
    let decl = find_function_decl(ast, func_name)
        .ok_or_else(|| Error::shape_mismatch(&ast.path, format!("no definition for {func_name}")))?;

    let mut funcs = Vec::new();
    for stmt in body_statements(decl) {
        let Some(call) = statement_call(stmt) else {
            continue;
        };
        if selector_method_name(ast, call) != Some(method) {
            continue;
        }
        if let Some(name) = first_string_argument(ast, call) {
            funcs.push(name);
        }
    }
    Ok(funcs)
}

/// Extract the string keys of a top-level map variable:
///
/// ```go
/// var StandardFuncMap = map[string]interface{}{
///     "name1": fn1,
///     "name2": fn2,
/// }
/// ```
///
/// Entries whose key is not a decodable string literal are skipped.
pub fn map_literal_keys(ast: &GoAst, var_name: &str) -> Result<Vec<String>> {
    let init = find_var_initializer(ast, var_name)
        .ok_or_else(|| Error::shape_mismatch(&ast.path, format!("no definition for {var_name}")))?;

    let keys = composite_literal_keys(init).ok_or_else(|| {
        Error::shape_mismatch(
            &ast.path,
            format!("initializer for {var_name} is not a composite literal"),
        )
    })?;

    Ok(decode_keys(ast, keys))
}

pub(super) fn decode_keys(ast: &GoAst, keys: Vec<Node<'_>>) -> Vec<String> {
    keys.into_iter()
        .filter_map(|key| decode_string_literal(key, &ast.source))
        .collect()
}

fn first_string_argument(ast: &GoAst, call: Node<'_>) -> Option<String> {
    let arg = call_arguments(call).into_iter().next()?;
    decode_string_literal(arg, &ast.source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ast::parse_go_source;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> GoAst {
        parse_go_source("context.go", source).unwrap()
    }

    #[test]
    fn collects_registration_calls_in_source_order() {
        let ast = parse(indoc! {r#"
            package templates

            func baseContextFuncs(c *Context) {
                c.addContextFunc("sendDM", c.tmplSendDM)
                c.addContextFunc("mentionEveryone", c.tmplMentionEveryone)
                c.addContextFunc("deleteResponse", c.tmplDelResponse)
            }
        "#});
        let funcs = registration_calls(&ast, "baseContextFuncs", "addContextFunc").unwrap();
        assert_eq!(funcs, vec!["sendDM", "mentionEveryone", "deleteResponse"]);
    }

    #[test]
    fn skips_statements_that_are_not_registration_calls() {
        let ast = parse(indoc! {r#"
            package templates

            func baseContextFuncs(c *Context) {
                x := 1
                c.addContextFunc("keep", fn)
                c.helper(x)
                log.Println("not a registration")
                if x > 0 {
                    c.addContextFunc("nested calls are out of scope", fn)
                }
                c.addContextFunc(dynamicName, fn)
                c.addContextFunc("alsoKeep", fn)
            }
        "#});
        let funcs = registration_calls(&ast, "baseContextFuncs", "addContextFunc").unwrap();
        assert_eq!(funcs, vec!["keep", "alsoKeep"]);
    }

    #[test]
    fn missing_function_is_a_shape_mismatch() {
        let ast = parse("package templates\n\nfunc unrelated() {}\n");
        let err = registration_calls(&ast, "baseContextFuncs", "addContextFunc").unwrap_err();
        match err {
            Error::ShapeMismatch { message, .. } => {
                assert_eq!(message, "no definition for baseContextFuncs");
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn collects_map_literal_keys() {
        let ast = parse(indoc! {r#"
            package templates

            var (
                StandardFuncMap = map[string]interface{}{
                    "title":   strings.Title,
                    "lower":   strings.ToLower,
                    `raw-key`: rawFn,
                }
            )
        "#});
        let funcs = map_literal_keys(&ast, "StandardFuncMap").unwrap();
        assert_eq!(funcs, vec!["title", "lower", "raw-key"]);
    }

    #[test]
    fn skips_map_entries_with_undecodable_keys() {
        let ast = parse(indoc! {r#"
            package templates

            var StandardFuncMap = map[string]interface{}{
                "ok":        fn1,
                someConst:   fn2,
                "other":     fn3,
            }
        "#});
        let funcs = map_literal_keys(&ast, "StandardFuncMap").unwrap();
        assert_eq!(funcs, vec!["ok", "other"]);
    }

    #[test]
    fn non_map_initializer_is_a_shape_mismatch() {
        let ast = parse("package templates\n\nvar StandardFuncMap = buildFuncMap()\n");
        let err = map_literal_keys(&ast, "StandardFuncMap").unwrap_err();
        match err {
            Error::ShapeMismatch { message, .. } => {
                assert_eq!(message, "initializer for StandardFuncMap is not a composite literal");
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn missing_var_is_a_shape_mismatch() {
        let ast = parse("package templates\n");
        let err = map_literal_keys(&ast, "StandardFuncMap").unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the converters to avoid clutter.

/// Hint for an expression that appeared where a pattern was required.
///
/// `target` is `"binding"` or `"assignment"`.
pub fn for_pattern(found: &str, target: &str) -> Option<&'static str> {
    match (found, target) {
        ("MemberExpression", "binding") => Some("only plain names can be declared; member targets need plain assignment"),
        ("CallExpression", _) => Some("a call result cannot be assigned to"),
        ("Literal", _) => Some("literals cannot be assigned to; use a name"),
        ("ParenthesizedExpression", "binding") => Some("remove the parentheses around the parameter"),
        ("ParenthesizedExpression", _) => Some("only a parenthesised name or member can be assigned to"),
        ("ObjectExpression" | "ArrayExpression", "assignment") => {
            Some("destructuring needs plain '=', not a compound operator")
        }
        ("AssignmentExpression", _) => Some("defaults use '=', not a compound operator"),
        ("Property", _) => Some("methods and accessors cannot appear in a destructuring pattern"),
        ("RestElement", _) => Some("a rest element must be last and cannot have a default"),
        ("ChainExpression", _) => Some("optional chains cannot be assigned to"),
        ("ThisExpression" | "Super", _) => Some("'this' and 'super' cannot be assigned to"),
        ("ArrowFunctionExpression" | "FunctionExpression" | "ClassExpression", _) => {
            Some("did you mean to call it, or to declare a parameter?")
        }
        (_, "binding") => Some("parameters must be names, defaults, or object/array patterns"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_fallback() {
        assert!(for_pattern("BinaryExpression", "binding").is_some());
        assert!(for_pattern("BinaryExpression", "assignment").is_none());
    }
}

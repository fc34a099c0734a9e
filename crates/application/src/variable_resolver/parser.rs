//! Variable parser for `{{variable}}` syntax
//!
//! A token is `{{`, one or more ASCII letters, digits or underscores, then
//! `}}`. Anything else between braces (spaces, `$`, `-`) is plain text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
pub(crate) static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("valid regex"));

/// A parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without `{{ }}`).
    pub name: String,

    /// Byte range of the whole token in the original string.
    pub span: Range<usize>,
}

/// Parses a string and extracts every variable reference, left to right.
///
/// # Examples
///
/// ```
/// use workbench_application::variable_resolver::parser::parse_variables;
///
/// let refs = parse_variables("{{base_url}}/users/{{id}}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "base_url");
/// assert_eq!(refs[1].span, 19..25);
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    TOKEN
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(VariableReference {
                name: name.as_str().to_string(),
                span: whole.range(),
            })
        })
        .collect()
}

/// Returns true if the input contains at least one token.
#[must_use]
pub fn has_variables(input: &str) -> bool {
    TOKEN.is_match(input)
}

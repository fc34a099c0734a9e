//! Variable substitution engine
//!
//! Substitution is a single left-to-right pass: values are inserted as-is
//! and never scanned again, and unknown tokens are left verbatim.

use regex::Captures;
use serde::Serialize;
use workbench_domain::Environment;

use super::parser::{TOKEN, has_variables, parse_variables};

/// Replaces every known `{{name}}` token in `input` with its value.
///
/// With no environment, or an empty input, the input is returned unchanged.
/// This never fails.
#[must_use]
pub fn substitute(input: &str, environment: Option<&Environment>) -> String {
    VariableResolver::new(environment).substitute(input)
}

/// Splits `input` into highlightable segments.
#[must_use]
pub fn highlight(input: &str, environment: Option<&Environment>) -> Vec<Segment> {
    VariableResolver::new(environment).highlight(input)
}

/// Returns the distinct unresolved names in order of first appearance.
#[must_use]
pub fn find_unresolved(input: &str, environment: Option<&Environment>) -> Vec<String> {
    VariableResolver::new(environment).find_unresolved(input)
}

/// A piece of a string as the editor displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Segment {
    /// Literal text between tokens.
    Text {
        /// The text.
        text: String,
    },
    /// A token the environment knows.
    Resolved {
        /// The variable name.
        name: String,
        /// The value it resolves to.
        value: String,
    },
    /// A token with no matching variable.
    Unresolved {
        /// The variable name.
        name: String,
    },
}

impl Segment {
    /// Returns the original source text this segment covers.
    #[must_use]
    pub fn source(&self) -> String {
        match self {
            Self::Text { text } => text.clone(),
            Self::Resolved { name, .. } | Self::Unresolved { name } => format!("{{{{{name}}}}}"),
        }
    }
}

/// Resolves `{{variable}}` tokens against one (optional) environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableResolver<'a> {
    environment: Option<&'a Environment>,
}

impl<'a> VariableResolver<'a> {
    /// Creates a resolver for the active environment, if any.
    #[must_use]
    pub const fn new(environment: Option<&'a Environment>) -> Self {
        Self { environment }
    }

    fn lookup(&self, name: &str) -> Option<&'a str> {
        self.environment.and_then(|env| env.get(name))
    }

    /// Substitutes every known token in a single pass.
    #[must_use]
    pub fn substitute(&self, input: &str) -> String {
        if self.environment.is_none() || !has_variables(input) {
            return input.to_string();
        }

        TOKEN
            .replace_all(input, |caps: &Captures<'_>| {
                self.lookup(&caps[1])
                    .map_or_else(|| caps[0].to_string(), str::to_string)
            })
            .into_owned()
    }

    /// Splits `input` into text, resolved and unresolved segments.
    ///
    /// Concatenating [`Segment::source`] over the result gives back `input`.
    #[must_use]
    pub fn highlight(&self, input: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut last_end = 0;

        for reference in parse_variables(input) {
            if reference.span.start > last_end {
                segments.push(Segment::Text {
                    text: input[last_end..reference.span.start].to_string(),
                });
            }

            segments.push(match self.lookup(&reference.name) {
                Some(value) => Segment::Resolved {
                    name: reference.name,
                    value: value.to_string(),
                },
                None => Segment::Unresolved {
                    name: reference.name,
                },
            });

            last_end = reference.span.end;
        }

        if last_end < input.len() {
            segments.push(Segment::Text {
                text: input[last_end..].to_string(),
            });
        }

        segments
    }

    /// Returns the distinct unresolved names in order of first appearance.
    #[must_use]
    pub fn find_unresolved(&self, input: &str) -> Vec<String> {
        let mut unresolved: Vec<String> = Vec::new();
        for reference in parse_variables(input) {
            if self.lookup(&reference.name).is_none() && !unresolved.contains(&reference.name) {
                unresolved.push(reference.name);
            }
        }
        unresolved
    }
}

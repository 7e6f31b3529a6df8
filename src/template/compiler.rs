use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use super::token::{PlaceholderName, PlaceholderToken, Quantifier};
use crate::error::{CompileError, CompileErrorKind};
use crate::placeholder::{registry, PlaceholderRegistry};
use crate::route::CompiledRoute;
use crate::runtime_config::RuntimeConfig;

/// Parenthesised text within one path segment; a placeholder if it contains `:`
static CANDIDATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([^()/]*)\)").expect("placeholder candidate regex should be valid")
});

/// `( [name] : type [: quantifier] )` without the parentheses
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_]*):([A-Za-z0-9_]+)(?::(\*|\+|\?|[0-9]+|[0-9]*,[0-9]*)?)?$")
        .expect("placeholder token regex should be valid")
});

/// Compiles URL templates against a fixed registry snapshot
///
/// # Example
///
/// ```rust
/// use routeforge::template::Compiler;
///
/// let route = Compiler::default().compile("/blog/(id:digit)").unwrap();
/// assert_eq!(route.match_pattern(), "/blog/(?P<id>[0-9]+)");
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    registry: Arc<PlaceholderRegistry>,
    size_limit: usize,
    max_path_len: usize,
}

impl Compiler {
    /// Create a compiler resolving types from `registry`.
    ///
    /// Limits come from [`RuntimeConfig::from_env`].
    #[must_use]
    pub fn new(registry: Arc<PlaceholderRegistry>) -> Self {
        Self::with_config(registry, &RuntimeConfig::from_env())
    }

    #[must_use]
    pub fn with_config(registry: Arc<PlaceholderRegistry>, config: &RuntimeConfig) -> Self {
        Self {
            registry,
            size_limit: config.regex_size_limit,
            max_path_len: config.max_path_len,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<PlaceholderRegistry> {
        &self.registry
    }

    /// Compile a template into an immutable [`CompiledRoute`].
    ///
    /// Each placeholder becomes one capture group holding the type's fragment
    /// followed by the repetition derived from its quantifier. Literal text is
    /// matched verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] naming the first offending token when a token is
    /// malformed, references an unknown type or carries an unusable quantifier,
    /// or when the assembled pattern exceeds the regex size limit.
    pub fn compile(&self, template: &str) -> Result<CompiledRoute, CompileError> {
        match self.compile_inner(template) {
            Ok(route) => {
                debug!(
                    template = %template,
                    placeholders = route.tokens().len(),
                    pattern = %route.match_pattern(),
                    "Template compiled"
                );
                Ok(route)
            }
            Err(e) => {
                warn!(
                    template = %template,
                    token = %e.token,
                    error = %e,
                    "Template compilation failed"
                );
                Err(e)
            }
        }
    }

    fn compile_inner(&self, template: &str) -> Result<CompiledRoute, CompileError> {
        let mut pattern = String::with_capacity(template.len() + 16);
        let mut tokens = Vec::new();
        let mut group_names = HashSet::new();
        let mut last = 0;
        let mut position = 0;
        let mut group = 1;

        for candidate in CANDIDATE_REGEX.captures_iter(template) {
            let (Some(whole), Some(body)) = (candidate.get(0), candidate.get(1)) else {
                continue;
            };
            if !body.as_str().contains(':') {
                continue;
            }
            let literal = whole.as_str();
            let fail = |kind| CompileError::new(template, literal, kind);

            let parts = TOKEN_REGEX
                .captures(body.as_str())
                .ok_or_else(|| fail(CompileErrorKind::MalformedToken))?;
            let name_text = parts.get(1).map_or("", |m| m.as_str());
            let type_text = parts.get(2).map_or("", |m| m.as_str());
            let raw_quantifier = parts.get(3).map_or("", |m| m.as_str());

            let placeholder = self.registry.resolve(type_text).ok_or_else(|| {
                fail(CompileErrorKind::UnknownType {
                    type_name: type_text.to_string(),
                })
            })?;
            let quantifier = if placeholder.is_repeatable() {
                Quantifier::parse(raw_quantifier).ok_or_else(|| {
                    fail(CompileErrorKind::InvalidQuantifier {
                        quantifier: raw_quantifier.to_string(),
                    })
                })?
            } else {
                Quantifier::Implicit
            };

            let name = if name_text.is_empty() {
                position += 1;
                PlaceholderName::Position(position)
            } else {
                PlaceholderName::Named(name_text.to_string())
            };

            pattern.push_str(&regex::escape(&template[last..whole.start()]));
            pattern.push('(');
            if let PlaceholderName::Named(name) = &name {
                // Duplicate or digit-led names stay unnamed groups; extraction goes by index.
                if is_group_name(name) && group_names.insert(name.clone()) {
                    pattern.push_str("?P<");
                    pattern.push_str(name);
                    pattern.push('>');
                }
            }
            pattern.push_str(&placeholder.quantified(&quantifier.suffix()));
            pattern.push(')');

            tokens.push(PlaceholderToken {
                key: Arc::from(name.to_string()),
                name,
                type_name: type_text.to_string(),
                placeholder: Arc::clone(placeholder),
                quantifier,
                raw_quantifier: raw_quantifier.to_string(),
                literal: literal.to_string(),
                group,
            });
            group += 1 + placeholder.inner_groups();
            last = whole.end();
        }
        pattern.push_str(&regex::escape(&template[last..]));

        let invalid = |e: regex::Error| {
            CompileError::new(
                template,
                template,
                CompileErrorKind::InvalidPattern {
                    reason: e.to_string(),
                },
            )
        };
        let regex = RegexBuilder::new(&format!("^{}$", pattern))
            .size_limit(self.size_limit)
            .build()
            .map_err(invalid)?;
        let validators = tokens
            .iter()
            .map(|token| Regex::new(&token.placeholder.value_pattern()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;

        Ok(CompiledRoute {
            template: template.to_string(),
            match_pattern: pattern,
            regex,
            tokens,
            validators,
            max_path_len: self.max_path_len,
        })
    }
}

impl Default for Compiler {
    /// Compiler over the current process-wide registry snapshot
    fn default() -> Self {
        Self::new(registry())
    }
}

/// Whether the regex engine accepts `name` as a capture group name
fn is_group_name(name: &str) -> bool {
    name.chars()
        .next()
        .map_or(false, |c| c == '_' || c.is_ascii_alphabetic())
}

/// Compile `template` against the process-wide registry.
///
/// # Errors
///
/// See [`Compiler::compile`].
pub fn compile(template: &str) -> Result<CompiledRoute, CompileError> {
    Compiler::default().compile(template)
}

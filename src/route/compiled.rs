use regex::Regex;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::template::PlaceholderToken;

/// Maximum number of path parameters before heap allocation.
/// Most templates have ≤4 placeholders (e.g., `/archive/(y:year)/(m:month)`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Captured values in placeholder order, keyed by placeholder name or position
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Values captured from a matched path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(ParamVec);

impl PathParams {
    /// Get a captured value by placeholder name (or position, e.g. `"1"`).
    ///
    /// Uses "last write wins" semantics when a template repeats a name.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in placeholder order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Convert to a HashMap (allocates; later duplicates overwrite earlier ones)
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

impl Serialize for PathParams {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k.as_ref(), v)?;
        }
        map.end()
    }
}

/// Immutable artifact produced by compiling a template
///
/// Shared freely between threads; matching and reverse generation only read it.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pub(crate) template: String,
    /// Pattern without anchors, one capture group per placeholder
    pub(crate) match_pattern: String,
    /// `match_pattern` anchored at both ends
    pub(crate) regex: Regex,
    pub(crate) tokens: Vec<PlaceholderToken>,
    /// Anchored per-token value validators, parallel to `tokens`
    pub(crate) validators: Vec<Regex>,
    pub(crate) max_path_len: usize,
}

impl CompiledRoute {
    /// Source template as written by the route author
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Derived pattern (unanchored); placeholders with a usable name get a named group
    #[must_use]
    pub fn match_pattern(&self) -> &str {
        &self.match_pattern
    }

    /// Placeholder descriptors in template order
    #[must_use]
    pub fn tokens(&self) -> &[PlaceholderToken] {
        &self.tokens
    }

    /// Whether the template declares at least one placeholder
    #[must_use]
    pub fn has_placeholders(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// Match a candidate path against the whole template.
    ///
    /// Literal-only templates match by string equality. Otherwise the anchored
    /// pattern must cover the entire path; prefixes never match.
    ///
    /// # Returns
    ///
    /// * `Some(PathParams)` - captured values (empty for literal-only templates)
    /// * `None` - the path does not match, or is longer than the configured limit
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        if path.len() > self.max_path_len {
            debug!(
                template = %self.template,
                path_len = path.len(),
                max_path_len = self.max_path_len,
                "Path exceeds length limit, not matching"
            );
            return None;
        }

        if self.tokens.is_empty() {
            return (path == self.template).then(PathParams::default);
        }

        let captures = self.regex.captures(path)?;
        let params = self
            .tokens
            .iter()
            .map(|token| {
                let value = captures.get(token.group).map_or("", |m| m.as_str());
                (Arc::clone(&token.key), value.to_string())
            })
            .collect();
        Some(PathParams(params))
    }

    /// Whether `path` matches, without collecting captures
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        if path.len() > self.max_path_len {
            return false;
        }
        if self.tokens.is_empty() {
            return path == self.template;
        }
        self.regex.is_match(path)
    }
}

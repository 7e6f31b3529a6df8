use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::RegistryError;

/// Built-in placeholder types: (name, fragment, repeatable)
const BUILTIN_TYPES: [(&str, &str, bool); 13] = [
    ("any", "[^/]", true),
    ("alnum", "[a-zA-Z0-9]", true),
    ("alpha", "[a-zA-Z]", true),
    ("bit", "[01]", true),
    ("day", "0[1-9]|[12][0-9]|3[01]", false),
    ("digit", "[0-9]", true),
    ("lower", "[a-z]", true),
    ("month", "0[1-9]|1[012]", false),
    ("odigit", "[0-7]", true),
    ("upper", "[A-Z]", true),
    (
        "uuid",
        "[A-Fa-f0-9]{8}-[A-Fa-f0-9]{4}-[A-Fa-f0-9]{4}-[A-Fa-f0-9]{4}-[A-Fa-f0-9]{12}",
        false,
    ),
    ("xdigit", "[0-9a-fA-F]", true),
    ("year", "[12][0-9]{3}", false),
];

static GLOBAL_REGISTRY: Lazy<ArcSwap<PlaceholderRegistry>> =
    Lazy::new(|| ArcSwap::from_pointee(PlaceholderRegistry::builtin()));

/// A named character class usable from placeholder tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderType {
    name: String,
    pattern: String,
    repeatable: bool,
    /// Capture groups declared inside `pattern` itself
    #[serde(skip)]
    inner_groups: usize,
}

impl PlaceholderType {
    /// Validate and build a placeholder type.
    ///
    /// The name is stored lower-cased since type lookups are case-insensitive.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::InvalidName`] - empty name or characters outside `[A-Za-z0-9_]`
    /// * [`RegistryError::InvalidPattern`] - `pattern` is not a standalone regex
    pub fn new(name: &str, pattern: &str, repeatable: bool) -> Result<Self, RegistryError> {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
            });
        }

        let invalid = |e: regex::Error| RegistryError::InvalidPattern {
            name: name.to_string(),
            reason: e.to_string(),
        };
        // Parsed on its own first: "a)(b" only balances once wrapped.
        Regex::new(pattern).map_err(invalid)?;
        let wrapped = Regex::new(&format!("(?:{})", pattern)).map_err(invalid)?;

        Ok(Self {
            name: name.to_ascii_lowercase(),
            pattern: pattern.to_string(),
            repeatable,
            inner_groups: wrapped.captures_len() - 1,
        })
    }

    fn builtin(name: &str, pattern: &str, repeatable: bool) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            repeatable,
            inner_groups: 0,
        }
    }

    /// Lower-cased type name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regex fragment describing the type
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the fragment accepts a quantifier
    #[must_use]
    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub(crate) fn inner_groups(&self) -> usize {
        self.inner_groups
    }

    /// Body of the capture group for this type with `suffix` as repetition.
    ///
    /// Fixed-shape types ignore the suffix. Fragments that are not a single atom
    /// are wrapped in a non-capturing group so the suffix applies to the whole
    /// fragment.
    pub(crate) fn quantified(&self, suffix: &str) -> String {
        if !self.repeatable || suffix.is_empty() {
            return self.pattern.clone();
        }
        if is_atom(&self.pattern) {
            format!("{}{}", self.pattern, suffix)
        } else {
            format!("(?:{}){}", self.pattern, suffix)
        }
    }

    /// Anchored pattern a literal value must satisfy to stand in for this type
    pub(crate) fn value_pattern(&self) -> String {
        if self.repeatable {
            format!("^(?:{})*$", self.pattern)
        } else {
            format!("^(?:{})$", self.pattern)
        }
    }
}

/// Whether a quantifier can be appended to `fragment` without grouping it
fn is_atom(fragment: &str) -> bool {
    match fragment.as_bytes() {
        [b'.'] => true,
        [b'\\', c] => c.is_ascii_alphabetic(),
        [b'[', ..] => class_end(fragment) == Some(fragment.len()),
        _ => false,
    }
}

/// Byte offset just past the bracket class opening at offset 0
fn class_end(fragment: &str) -> Option<usize> {
    let bytes = fragment.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' => depth += 1,
            b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Table of placeholder types keyed by lower-cased name
#[derive(Debug, Clone)]
pub struct PlaceholderRegistry {
    types: HashMap<String, Arc<PlaceholderType>>,
}

impl PlaceholderRegistry {
    /// Registry without any types
    #[must_use]
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Registry holding the built-in types
    #[must_use]
    pub fn builtin() -> Self {
        let types = BUILTIN_TYPES
            .iter()
            .map(|(name, pattern, repeatable)| {
                (
                    (*name).to_string(),
                    Arc::new(PlaceholderType::builtin(name, pattern, *repeatable)),
                )
            })
            .collect();
        Self { types }
    }

    /// Register a new type.
    ///
    /// The first registration of a name wins: registering a name that is
    /// already present (case-insensitively) leaves the registry unchanged.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - the type was added
    /// * `Ok(false)` - the name was already registered
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the name or the pattern is unusable.
    pub fn register(
        &mut self,
        name: &str,
        pattern: &str,
        repeatable: bool,
    ) -> Result<bool, RegistryError> {
        if self.contains(name) {
            debug!(
                type_name = %name,
                "Placeholder type already registered, keeping the first registration"
            );
            return Ok(false);
        }
        let ty = PlaceholderType::new(name, pattern, repeatable)?;
        Ok(self.insert(ty))
    }

    fn insert(&mut self, ty: PlaceholderType) -> bool {
        if self.types.contains_key(ty.name()) {
            debug!(
                type_name = %ty.name(),
                "Placeholder type already registered, keeping the first registration"
            );
            return false;
        }
        info!(
            type_name = %ty.name(),
            pattern = %ty.pattern(),
            repeatable = ty.is_repeatable(),
            "Placeholder type registered"
        );
        self.types.insert(ty.name().to_string(), Arc::new(ty));
        true
    }

    /// Look up a type by name, ignoring ASCII case
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Arc<PlaceholderType>> {
        self.types.get(&name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All registered types ordered by name
    #[must_use]
    pub fn types(&self) -> Vec<&PlaceholderType> {
        let mut types: Vec<&PlaceholderType> = self.types.values().map(AsRef::as_ref).collect();
        types.sort_by(|a, b| a.name().cmp(b.name()));
        types
    }
}

impl Default for PlaceholderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Snapshot of the process-wide registry.
///
/// The snapshot never changes; call again to observe later registrations.
#[must_use]
pub fn registry() -> Arc<PlaceholderRegistry> {
    GLOBAL_REGISTRY.load_full()
}

/// Register a type in the process-wide registry.
///
/// Publishes a new registry snapshot containing the type. Same first-wins
/// policy as [`PlaceholderRegistry::register`].
///
/// # Errors
///
/// Returns [`RegistryError`] if the name or the pattern of a new type is
/// unusable; the registry is left unchanged. An already registered name is
/// never validated again.
pub fn register_type(name: &str, pattern: &str, repeatable: bool) -> Result<bool, RegistryError> {
    if GLOBAL_REGISTRY.load().contains(name) {
        debug!(
            type_name = %name,
            "Placeholder type already registered, keeping the first registration"
        );
        return Ok(false);
    }
    let ty = PlaceholderType::new(name, pattern, repeatable)?;
    let mut inserted = false;
    GLOBAL_REGISTRY.rcu(|current| {
        let mut next = PlaceholderRegistry::clone(current);
        inserted = next.insert(ty.clone());
        next
    });
    Ok(inserted)
}

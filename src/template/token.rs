use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::placeholder::PlaceholderType;

/// Name under which a placeholder's value is captured and supplied
///
/// Placeholders written without a name (`(:digit)`) receive a 1-based position
/// counted over unnamed placeholders only, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PlaceholderName {
    Named(String),
    Position(usize),
}

impl PlaceholderName {
    #[must_use]
    pub fn is_positional(&self) -> bool {
        matches!(self, PlaceholderName::Position(_))
    }
}

impl fmt::Display for PlaceholderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderName::Named(name) => f.write_str(name),
            PlaceholderName::Position(position) => write!(f, "{}", position),
        }
    }
}

/// Repetition attached to a repeatable placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Quantifier {
    /// No quantifier written; behaves like `+`
    Implicit,
    /// `?`
    ZeroOrOne,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `n`
    Exactly { count: u32 },
    /// `min,max`, `min,`, `,max` or `,` (a missing minimum means 1)
    Range { min: u32, max: Option<u32> },
}

impl Quantifier {
    /// Parse quantifier text as written after the second `:` of a token.
    ///
    /// Returns `None` for text outside the grammar, for counts that overflow
    /// and for ranges whose minimum exceeds their maximum.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "" => Some(Quantifier::Implicit),
            "?" => Some(Quantifier::ZeroOrOne),
            "*" => Some(Quantifier::ZeroOrMore),
            "+" => Some(Quantifier::OneOrMore),
            _ => match raw.split_once(',') {
                None => parse_count(raw).map(|count| Quantifier::Exactly { count }),
                Some((min, max)) => {
                    let min = if min.is_empty() { 1 } else { parse_count(min)? };
                    let max = if max.is_empty() {
                        None
                    } else {
                        Some(parse_count(max)?)
                    };
                    match max {
                        Some(max) if max < min => None,
                        _ => Some(Quantifier::Range { min, max }),
                    }
                }
            },
        }
    }

    /// Regex repetition operator for this quantifier
    #[must_use]
    pub fn suffix(&self) -> String {
        match self {
            Quantifier::Implicit | Quantifier::OneOrMore => "+".to_string(),
            Quantifier::ZeroOrOne => "?".to_string(),
            Quantifier::ZeroOrMore => "*".to_string(),
            Quantifier::Exactly { count } => format!("{{{}}}", count),
            Quantifier::Range { min, max: Some(max) } => format!("{{{},{}}}", min, max),
            Quantifier::Range { min, max: None } => format!("{{{},}}", min),
        }
    }

    /// Inclusive length bounds in characters; `None` means unbounded
    #[must_use]
    pub fn bounds(&self) -> (usize, Option<usize>) {
        match *self {
            Quantifier::Implicit | Quantifier::OneOrMore => (1, None),
            Quantifier::ZeroOrOne => (0, Some(1)),
            Quantifier::ZeroOrMore => (0, None),
            Quantifier::Exactly { count } => (count as usize, Some(count as usize)),
            Quantifier::Range { min, max } => (min as usize, max.map(|m| m as usize)),
        }
    }

    /// Whether a value of `len` characters satisfies the bounds
    #[must_use]
    pub fn accepts_len(&self, len: usize) -> bool {
        let (min, max) = self.bounds();
        len >= min && max.map_or(true, |max| len <= max)
    }
}

fn parse_count(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// One placeholder occurrence inside a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderToken {
    pub(crate) name: PlaceholderName,
    /// `name` rendered as the lookup key for captured and supplied values
    #[serde(skip)]
    pub(crate) key: Arc<str>,
    #[serde(rename = "type")]
    pub(crate) type_name: String,
    #[serde(skip)]
    pub(crate) placeholder: Arc<PlaceholderType>,
    pub(crate) quantifier: Quantifier,
    pub(crate) raw_quantifier: String,
    pub(crate) literal: String,
    /// Index of this placeholder's capture group in the compiled pattern
    #[serde(skip)]
    pub(crate) group: usize,
}

impl PlaceholderToken {
    #[must_use]
    pub fn name(&self) -> &PlaceholderName {
        &self.name
    }

    /// Key used in [`crate::route::PathParams`] and reverse parameters
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Type name as written in the template
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn placeholder_type(&self) -> &PlaceholderType {
        &self.placeholder
    }

    /// Effective quantifier. Always [`Quantifier::Implicit`] for fixed-shape types.
    #[must_use]
    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    /// Quantifier text as written, empty when absent
    #[must_use]
    pub fn raw_quantifier(&self) -> &str {
        &self.raw_quantifier
    }

    /// Exact token text in the source template, e.g. `(id:digit:3,5)`
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

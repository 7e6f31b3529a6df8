//! # Destination Module
//!
//! A destination names the handler a route dispatches to. The textual form is
//!
//! ```text
//! [prefix/]Controller::action[/arg]*
//! ```
//!
//! - `prefix` is a `/`-separated namespace path (`\` is accepted and normalised
//!   to `/`).
//! - `arg` is one of:
//!   - `{name}` or `{name=default}`: bound to the URL placeholder `name`
//!   - a bare word `[A-Za-z0-9_=-]+`: literal, named by its 1-based position
//!     among literal arguments
//!   - a quoted string `"..."` / `'...'`: literal, quotes stripped
//!
//!   Any argument may carry a `key=` prefix that names it explicitly.
//!
//! ```rust
//! use routeforge::destination::{Destination, DestinationArg};
//!
//! let dest = Destination::parse("admin/Blog::show/{id}/draft").unwrap();
//! assert_eq!(dest.class(), "admin\\Blog");
//! assert_eq!(dest.action(), "show");
//! assert_eq!(dest.args().len(), 2);
//! assert!(matches!(dest.args()[0], DestinationArg::Bound { .. }));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::error::DestinationError;
use crate::template::PlaceholderName;

/// Whole destination: optional prefix, controller, action, raw argument tail
static DESTINATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(?P<prefix>[A-Za-z0-9]+(?:/[A-Za-z0-9]+)*)/)?",
        r"(?P<controller>[A-Za-z0-9]+)::(?P<action>[A-Za-z0-9_]+)",
        r#"(?P<args>(?:/(?:[A-Za-z][A-Za-z0-9_-]*=)?(?:\{[A-Za-z0-9_=-]+\}|[A-Za-z0-9_=-]+|["'][^'"]+['"]))+)?$"#,
    ))
    .expect("destination regex should be valid")
});

/// One `/arg` of the argument tail
static ARG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"/(?:(?P<key>[A-Za-z][A-Za-z0-9_-]*)=)?",
        r#"(?:\{(?P<bound>[A-Za-z0-9_=-]+)\}|(?P<bare>[A-Za-z0-9_=-]+)|["'](?P<quoted>[^'"]+)['"])"#,
    ))
    .expect("destination argument regex should be valid")
});

/// Handler argument declared by a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DestinationArg {
    /// Value taken from the matched URL placeholder `placeholder`
    Bound {
        /// Argument name (the `key=` prefix, else the placeholder name)
        name: String,
        /// URL placeholder supplying the value
        placeholder: String,
        /// Used when the placeholder captured nothing
        default: Option<String>,
    },
    /// Fixed value written in the destination
    Literal {
        name: PlaceholderName,
        value: String,
    },
}

impl DestinationArg {
    /// Argument name as handed to the handler
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            DestinationArg::Bound { name, .. } => name.clone(),
            DestinationArg::Literal { name, .. } => name.to_string(),
        }
    }
}

/// Parsed route destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    prefix: Option<String>,
    controller: String,
    action: String,
    args: Vec<DestinationArg>,
}

impl Destination {
    /// Parse the textual form `[prefix/]Controller::action[/arg]*`.
    ///
    /// Backslashes are treated as `/` and trailing slashes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::Malformed`] when the text does not follow the
    /// grammar.
    pub fn parse(destination: &str) -> Result<Self, DestinationError> {
        let normalized = destination.replace('\\', "/");
        let normalized = normalized.trim().trim_end_matches('/');

        let caps = DESTINATION_REGEX
            .captures(normalized)
            .ok_or_else(|| DestinationError::Malformed {
                destination: destination.to_string(),
            })?;

        let prefix = caps.name("prefix").map(|m| m.as_str().to_string());
        let controller = caps
            .name("controller")
            .map_or_else(String::new, |m| m.as_str().to_string());
        let action = caps
            .name("action")
            .map_or_else(String::new, |m| m.as_str().to_string());
        let args = caps
            .name("args")
            .map(|m| parse_args(m.as_str()))
            .unwrap_or_default();

        Ok(Self {
            prefix,
            controller,
            action,
            args,
        })
    }

    /// Build a destination from `[controller, action, args...]`.
    ///
    /// The controller part may carry a prefix (`admin/Blog`); each following
    /// part is one argument.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::MissingAction`] with fewer than two parts and
    /// [`DestinationError::Malformed`] when the assembled text does not parse.
    pub fn from_parts<S: AsRef<str>>(parts: &[S]) -> Result<Self, DestinationError> {
        let [controller, action, args @ ..] = parts else {
            return Err(DestinationError::MissingAction);
        };

        let mut text = format!(
            "{}::{}",
            controller.as_ref().trim_matches('/'),
            action.as_ref().trim_matches('/')
        );
        for arg in args {
            text.push('/');
            text.push_str(arg.as_ref().trim_matches('/'));
        }
        Self::parse(&text)
    }

    /// Namespace path (`/`-separated), if any
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    #[must_use]
    pub fn args(&self) -> &[DestinationArg] {
        &self.args
    }

    /// Fully qualified controller: prefix and controller joined with `\`
    #[must_use]
    pub fn class(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}\\{}", prefix.replace('/', "\\"), self.controller),
            None => self.controller.clone(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{}/", prefix)?;
        }
        write!(f, "{}::{}", self.controller, self.action)?;
        for arg in &self.args {
            match arg {
                DestinationArg::Bound {
                    name,
                    placeholder,
                    default,
                } => {
                    f.write_str("/")?;
                    if name != placeholder {
                        write!(f, "{}=", name)?;
                    }
                    match default {
                        Some(default) => write!(f, "{{{}={}}}", placeholder, default)?,
                        None => write!(f, "{{{}}}", placeholder)?,
                    }
                }
                DestinationArg::Literal { name, value } => {
                    f.write_str("/")?;
                    if let PlaceholderName::Named(key) = name {
                        write!(f, "{}=", key)?;
                    }
                    write!(f, "\"{}\"", value)?;
                }
            }
        }
        Ok(())
    }
}

fn parse_args(tail: &str) -> Vec<DestinationArg> {
    let mut position = 0;
    ARG_REGEX
        .captures_iter(tail)
        .map(|caps| {
            let key = caps.name("key").map(|m| m.as_str().to_string());
            if let Some(bound) = caps.name("bound") {
                let (placeholder, default) = match bound.as_str().split_once('=') {
                    Some((placeholder, default)) => (
                        placeholder.to_string(),
                        (!default.is_empty()).then(|| default.to_string()),
                    ),
                    None => (bound.as_str().to_string(), None),
                };
                return DestinationArg::Bound {
                    name: key.unwrap_or_else(|| placeholder.clone()),
                    placeholder,
                    default,
                };
            }

            let value = caps
                .name("bare")
                .or_else(|| caps.name("quoted"))
                .map_or_else(String::new, |m| m.as_str().to_string());
            let name = match key {
                Some(key) => PlaceholderName::Named(key),
                None => {
                    position += 1;
                    PlaceholderName::Position(position)
                }
            };
            DestinationArg::Literal { name, value }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_destination() {
        let dest = Destination::parse("Blog::index").unwrap();
        assert_eq!(dest.prefix(), None);
        assert_eq!(dest.controller(), "Blog");
        assert_eq!(dest.action(), "index");
        assert!(dest.args().is_empty());
        assert_eq!(dest.class(), "Blog");
    }

    #[test]
    fn test_prefix_and_backslashes() {
        let dest = Destination::parse("App\\Admin\\Users::edit/").unwrap();
        assert_eq!(dest.prefix(), Some("App/Admin"));
        assert_eq!(dest.controller(), "Users");
        assert_eq!(dest.class(), "App\\Admin\\Users");
    }

    #[test]
    fn test_argument_forms() {
        let dest =
            Destination::parse("Blog::show/{id}/{page=1}/draft/'hello world'/mode=full").unwrap();
        assert_eq!(
            dest.args(),
            &[
                DestinationArg::Bound {
                    name: "id".to_string(),
                    placeholder: "id".to_string(),
                    default: None,
                },
                DestinationArg::Bound {
                    name: "page".to_string(),
                    placeholder: "page".to_string(),
                    default: Some("1".to_string()),
                },
                DestinationArg::Literal {
                    name: PlaceholderName::Position(1),
                    value: "draft".to_string(),
                },
                DestinationArg::Literal {
                    name: PlaceholderName::Position(2),
                    value: "hello world".to_string(),
                },
                DestinationArg::Literal {
                    name: PlaceholderName::Named("mode".to_string()),
                    value: "full".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_keyed_bound_argument() {
        let dest = Destination::parse("Blog::show/post={id}").unwrap();
        assert_eq!(dest.args()[0].name(), "post");
    }

    #[test]
    fn test_malformed_destinations() {
        for bad in ["", "Blog", "Blog::", "::index", "Blog::index/{}", "Blog::index/a b"] {
            assert!(
                matches!(
                    Destination::parse(bad),
                    Err(DestinationError::Malformed { .. })
                ),
                "destination {bad:?}"
            );
        }
    }

    #[test]
    fn test_from_parts() {
        let dest = Destination::from_parts(&["admin/Blog", "show", "{id}"]).unwrap();
        assert_eq!(dest.class(), "admin\\Blog");
        assert_eq!(dest.action(), "show");
        assert_eq!(dest.args().len(), 1);

        assert_eq!(
            Destination::from_parts(&["Blog"]),
            Err(DestinationError::MissingAction)
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            Destination::from_parts(&empty),
            Err(DestinationError::MissingAction)
        );
    }

    #[test]
    fn test_display_reparses() {
        let dest = Destination::parse("ns/Blog::show/key={id=3}/x/'y'").unwrap();
        let reparsed = Destination::parse(&dest.to_string()).unwrap();
        assert_eq!(dest, reparsed);
    }
}

//! Error types shared by the compiler, the registry and the registration layer.
//!
//! Matching and reverse generation never produce errors: a path that matches no
//! route and a parameter set that cannot be rendered are ordinary negative
//! results and are reported as `None`.

use std::fmt;

/// What went wrong while compiling a single placeholder token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileErrorKind {
    /// The token does not follow `( [name] : type [: quantifier] )`
    MalformedToken,
    /// The type name is not present in the placeholder registry
    UnknownType {
        /// Type name as written in the template
        type_name: String,
    },
    /// The quantifier is syntactically valid but unusable (e.g. `5,3`)
    InvalidQuantifier {
        /// Quantifier text as written in the template
        quantifier: String,
    },
    /// The assembled pattern was rejected by the regex engine
    InvalidPattern {
        /// Message reported by the regex engine
        reason: String,
    },
}

/// Template compilation failure
///
/// Identifies the offending token and the template it came from. A failed
/// compilation produces no partial artifact and leaves the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// Source template that failed to compile
    pub template: String,
    /// Offending token text (the whole template for pattern-level failures)
    pub token: String,
    /// Failure reason
    pub kind: CompileErrorKind,
}

impl CompileError {
    pub(crate) fn new(template: &str, token: &str, kind: CompileErrorKind) -> Self {
        Self {
            template: template.to_string(),
            token: token.to_string(),
            kind,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CompileErrorKind::MalformedToken => write!(
                f,
                "malformed placeholder '{}' in template '{}': expected (name:type) or (name:type:quantifier)",
                self.token, self.template
            ),
            CompileErrorKind::UnknownType { type_name } => write!(
                f,
                "unknown placeholder type '{}' in token '{}' of template '{}'",
                type_name, self.token, self.template
            ),
            CompileErrorKind::InvalidQuantifier { quantifier } => write!(
                f,
                "invalid quantifier '{}' in token '{}' of template '{}'",
                quantifier, self.token, self.template
            ),
            CompileErrorKind::InvalidPattern { reason } => write!(
                f,
                "template '{}' produced an invalid pattern: {}",
                self.template, reason
            ),
        }
    }
}

impl std::error::Error for CompileError {}

/// Rejected placeholder type registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Type names must be non-empty and consist of ASCII letters, digits and `_`
    InvalidName {
        /// Rejected name
        name: String,
    },
    /// The character-class fragment is not a valid regex sub-pattern
    InvalidPattern {
        /// Type name being registered
        name: String,
        /// Message reported by the regex engine
        reason: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::InvalidName { name } => write!(
                f,
                "invalid placeholder type name '{}': use ASCII letters, digits and '_'",
                name
            ),
            RegistryError::InvalidPattern { name, reason } => write!(
                f,
                "invalid pattern for placeholder type '{}': {}",
                name, reason
            ),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Route destination (`Controller::action/params`) parse failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationError {
    /// The destination string does not follow the destination grammar
    Malformed {
        /// Destination as given
        destination: String,
    },
    /// The array form needs at least a controller and an action
    MissingAction,
}

impl fmt::Display for DestinationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationError::Malformed { destination } => {
                write!(f, "could not parse route destination: {}", destination)
            }
            DestinationError::MissingAction => write!(
                f,
                "route with array destination must have controller and action passed"
            ),
        }
    }
}

impl std::error::Error for DestinationError {}

/// Route registration failure returned by [`crate::builder::RouteBuilder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    Compile(CompileError),
    Destination(DestinationError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Compile(e) => write!(f, "{}", e),
            BuildError::Destination(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Compile(e) => Some(e),
            BuildError::Destination(e) => Some(e),
        }
    }
}

impl From<CompileError> for BuildError {
    fn from(e: CompileError) -> Self {
        BuildError::Compile(e)
    }
}

impl From<DestinationError> for BuildError {
    fn from(e: DestinationError) -> Self {
        BuildError::Destination(e)
    }
}

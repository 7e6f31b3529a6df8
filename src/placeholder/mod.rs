//! # Placeholder Module
//!
//! Placeholder types are the character classes a template may reference from a
//! placeholder token such as `(id:digit)`. Each type pairs a regex fragment with
//! a `repeatable` flag:
//!
//! - **Repeatable** types (`digit`, `alpha`, ...) describe a single character and
//!   accept a quantifier (`*`, `+`, `?`, `{n}`, `{min,max}`); without one they
//!   match one or more characters.
//! - **Fixed-shape** types (`year`, `month`, `day`, `uuid`) already describe a
//!   complete token and ignore any quantifier.
//!
//! ## Built-in Types
//!
//! | Name | Fragment | Repeatable |
//! |---|---|---|
//! | `any` | `[^/]` | yes |
//! | `alnum` | `[a-zA-Z0-9]` | yes |
//! | `alpha` | `[a-zA-Z]` | yes |
//! | `bit` | `[01]` | yes |
//! | `digit` | `[0-9]` | yes |
//! | `lower` | `[a-z]` | yes |
//! | `upper` | `[A-Z]` | yes |
//! | `odigit` | `[0-7]` | yes |
//! | `xdigit` | `[0-9a-fA-F]` | yes |
//! | `day` | `0[1-9]\|[12][0-9]\|3[01]` | no |
//! | `month` | `0[1-9]\|1[012]` | no |
//! | `year` | `[12][0-9]{3}` | no |
//! | `uuid` | 8-4-4-4-12 hex groups | no |
//!
//! ## Process-wide Registry
//!
//! [`registry()`] returns an immutable snapshot of the process-wide registry and
//! [`register_type()`] publishes a new snapshot with the extra type. Snapshots
//! already handed out (and every route compiled from them) are unaffected, so
//! registration is safe to call at any time, but routes only see types that were
//! registered before they were compiled.
//!
//! ```rust
//! use routeforge::placeholder::{register_type, registry};
//!
//! register_type("slug", "[a-z0-9-]", true).unwrap();
//! assert!(registry().resolve("SLUG").is_some());
//! ```

mod registry;

pub use registry::{register_type, registry, PlaceholderRegistry, PlaceholderType};

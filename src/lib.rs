//! # routeforge
//!
//! **routeforge** compiles human-readable URL templates with typed placeholders
//! into matchers, and renders URLs back from parameter sets.
//!
//! ```text
//! /blog/(id:digit)              id is one or more digits
//! /archive/(y:year)/(m:month)   fixed-shape year and month
//! /code/(c:upper:3)             exactly three uppercase letters
//! ```
//!
//! ## Overview
//!
//! - **[`placeholder`]** - Placeholder type registry (built-in and custom types)
//! - **[`template`]** - Template tokenizer and compiler
//! - **[`route`]** - Compiled routes: path matching and reverse generation
//! - **[`destination`]** - `Controller::action/{param}` destination parsing
//! - **[`router`]** - Route collection and first-match lookup by path or name
//! - **[`builder`]** - Route registration with groups and slash policy
//! - **[`manifest`]** - TOML/JSON route manifests
//! - **[`cli`]** - `routeforge` command-line front end
//! - **[`runtime_config`]** / **[`logging`]** - Environment-driven settings
//!
//! ## Quick Start
//!
//! ```rust
//! use routeforge::compile;
//!
//! let route = compile("/blog/(id:digit)").unwrap();
//!
//! let params = route.match_path("/blog/42").unwrap();
//! assert_eq!(params.get("id"), Some("42"));
//! assert!(route.match_path("/blog/abc").is_none());
//!
//! assert_eq!(route.reverse([("id", "42")]).as_deref(), Some("/blog/42"));
//! assert_eq!(route.reverse([("id", "abc")]), None);
//! ```
//!
//! ## Guarantees
//!
//! - A compiled route matches whole paths only, never a prefix or suffix.
//! - Any parameter set accepted by [`CompiledRoute::reverse`] yields a path that
//!   [`CompiledRoute::match_path`] accepts with the same values.
//! - Compiled routes are immutable and `Send + Sync`; the process-wide registry
//!   is published as copy-on-write snapshots.
//! - Matching uses the `regex` crate, whose engine runs in time linear in the
//!   input, and paths over [`RuntimeConfig::max_path_len`] are rejected up front.

pub mod builder;
pub mod cli;
pub mod destination;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod placeholder;
pub mod route;
pub mod router;
pub mod runtime_config;
pub mod template;

pub use builder::RouteBuilder;
pub use destination::{Destination, DestinationArg};
pub use error::{BuildError, CompileError, CompileErrorKind, DestinationError, RegistryError};
pub use placeholder::{register_type, registry, PlaceholderRegistry, PlaceholderType};
pub use route::{CompiledRoute, PathParams};
pub use router::{Route, RouteCollection, RouteMatch, RouteOptions, Router};
pub use runtime_config::RuntimeConfig;
pub use template::{compile, Compiler, PlaceholderName, PlaceholderToken, Quantifier};

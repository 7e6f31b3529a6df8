//! # CLI Module
//!
//! Command-line front end for inspecting templates and route manifests.
//!
//! ## Commands
//!
//! ### `compile`
//!
//! Compile one template and print the derived pattern and its placeholders:
//!
//! ```bash
//! routeforge compile '/archive/(y:year)/(m:month)'
//! routeforge compile '/p/(slug:slug)' --routes routes.toml --json
//! ```
//!
//! ### `check`
//!
//! Compile every route in a manifest and print the route table:
//!
//! ```bash
//! routeforge check --routes routes.toml
//! ```
//!
//! ### `match`
//!
//! Resolve a path to the first matching route:
//!
//! ```bash
//! routeforge match --routes routes.toml /blog/42
//! ```
//!
//! ### `reverse`
//!
//! Render a named route:
//!
//! ```bash
//! routeforge reverse --routes routes.toml blog.show id=42
//! ```
//!
//! ### `types`
//!
//! List the placeholder types, optionally with a manifest's custom types.
//!
//! ## Exit Status
//!
//! `0` on success; `1` when no route matches, a route rejects the parameters,
//! or a manifest or template is invalid.

mod commands;


pub use commands::{execute, run_cli, Cli, Commands};

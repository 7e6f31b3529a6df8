//! # Router Module
//!
//! Resolves candidate paths to registered routes and routes back to URLs.
//!
//! ## Overview
//!
//! - [`Route`] pairs a [`CompiledRoute`](crate::route::CompiledRoute) with a
//!   [`Destination`](crate::destination::Destination), an optional name and
//!   user options.
//! - [`RouteCollection`] keeps routes in registration order and indexes them by
//!   name.
//! - [`Router`] answers `find_route_by_url` (first match wins),
//!   `find_route_by_name` and `reverse_url`.
//!
//! Routers are normally built with [`RouteBuilder`](crate::builder::RouteBuilder)
//! or loaded from a manifest ([`crate::manifest`]).
//!
//! ## Example
//!
//! ```rust
//! use routeforge::builder::RouteBuilder;
//! use routeforge::router::RouteOptions;
//!
//! let mut builder = RouteBuilder::new();
//! builder
//!     .link(
//!         "/archive/(y:year)/(m:month)",
//!         "Blog::archive/{y}/{m}",
//!         RouteOptions::new().name("archive"),
//!     )
//!     .unwrap();
//! let router = builder.into_router();
//!
//! let url = router.reverse_url("archive", [("y", "2023"), ("m", "05")]);
//! assert_eq!(url.as_deref(), Some("/archive/2023/05"));
//! ```
//!
//! ## Performance
//!
//! Matching is a linear scan over the routes; each candidate runs one anchored,
//! linear-time regex. Paths longer than the configured limit are rejected
//! before any regex runs.

mod collection;
mod core;
mod route;

pub use collection::RouteCollection;
pub use self::core::{RouteMatch, Router};
pub use route::{Route, RouteOptions};

//! # Builder Module
//!
//! [`RouteBuilder`] is the registration surface: it compiles URL templates,
//! parses destinations, applies group prefixes and the trailing-slash policy,
//! and collects the resulting routes into a [`Router`].
//!
//! ```rust
//! use routeforge::builder::RouteBuilder;
//! use routeforge::router::RouteOptions;
//!
//! let mut builder = RouteBuilder::new();
//! builder
//!     .group("/admin", |admin| {
//!         admin.link("/users/(id:digit)", "admin/Users::edit/{id}", RouteOptions::new())?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let router = builder.into_router();
//! let m = router.find_route_by_url("/admin/users/7").unwrap();
//! assert_eq!(m.route.destination().class(), "admin\\Users");
//! ```
//!
//! ## Trailing Slashes
//!
//! With `append_trailing_slash(false)` (the default) registered URLs lose any
//! trailing `/`, except the root `/`. With `true` every URL ends in exactly one
//! `/`. The policy applies when a route is linked; flipping it later does not
//! rewrite routes already registered.

use std::sync::Arc;
use tracing::{debug, info};

use crate::destination::Destination;
use crate::error::BuildError;
use crate::placeholder::PlaceholderRegistry;
use crate::router::{Route, RouteCollection, RouteOptions, Router};
use crate::runtime_config::RuntimeConfig;
use crate::template::Compiler;

/// Collects routes for a [`Router`]
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    compiler: Compiler,
    routes: RouteCollection,
    group_prefix: String,
    append_trailing_slash: bool,
}

impl RouteBuilder {
    /// Builder over the process-wide placeholder registry, configured from the
    /// environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_compiler(Compiler::default(), &RuntimeConfig::from_env())
    }

    /// Builder resolving placeholder types from `registry` instead of the
    /// process-wide one
    #[must_use]
    pub fn with_registry(registry: Arc<PlaceholderRegistry>) -> Self {
        let config = RuntimeConfig::from_env();
        Self::with_compiler(Compiler::with_config(registry, &config), &config)
    }

    #[must_use]
    pub fn with_compiler(compiler: Compiler, config: &RuntimeConfig) -> Self {
        Self {
            compiler,
            routes: RouteCollection::new(),
            group_prefix: String::new(),
            append_trailing_slash: config.append_trailing_slash,
        }
    }

    /// Set the trailing-slash policy for routes linked from now on
    pub fn append_trailing_slash(&mut self, append: bool) -> &mut Self {
        self.append_trailing_slash = append;
        self
    }

    /// Register routes under a URL prefix.
    ///
    /// `prefix` is appended to the current group prefix for the duration of
    /// `routes`; groups nest. The prefix is restored even when `routes` fails.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `routes`.
    pub fn group<F>(&mut self, prefix: &str, routes: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut Self) -> Result<(), BuildError>,
    {
        let saved = self.group_prefix.clone();
        if !prefix.starts_with('/') {
            self.group_prefix.push('/');
        }
        self.group_prefix.push_str(prefix);
        debug!(group_prefix = %self.group_prefix, "Entering route group");

        let result = routes(self);
        self.group_prefix = saved;
        result.map(|()| self)
    }

    /// Register `url` dispatching to the textual `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Compile`] when the template does not compile and
    /// [`BuildError::Destination`] when the destination does not parse. Nothing
    /// is registered on error.
    pub fn link(
        &mut self,
        url: &str,
        destination: &str,
        options: RouteOptions,
    ) -> Result<Arc<Route>, BuildError> {
        let destination = Destination::parse(destination)?;
        self.register(url, destination, options)
    }

    /// Register `url` dispatching to `[controller, action, args...]`.
    ///
    /// # Errors
    ///
    /// As [`link`](Self::link); fewer than two parts is
    /// [`DestinationError::MissingAction`](crate::error::DestinationError::MissingAction).
    pub fn link_parts<S: AsRef<str>>(
        &mut self,
        url: &str,
        parts: &[S],
        options: RouteOptions,
    ) -> Result<Arc<Route>, BuildError> {
        let destination = Destination::from_parts(parts)?;
        self.register(url, destination, options)
    }

    /// Routes registered so far
    #[must_use]
    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    #[must_use]
    pub fn into_router(self) -> Router {
        Router::new(self.routes)
    }

    fn register(
        &mut self,
        url: &str,
        destination: Destination,
        options: RouteOptions,
    ) -> Result<Arc<Route>, BuildError> {
        let url = self.full_url(url);
        let compiled = self.compiler.compile(&url)?;
        let route = self.routes.add(Route::new(compiled, destination, options));
        info!(
            route_url = %route.url(),
            route_name = ?route.name(),
            destination = %route.destination(),
            placeholders = route.placeholder_count(),
            "Route registered"
        );
        Ok(route)
    }

    fn full_url(&self, url: &str) -> String {
        let mut full = String::with_capacity(self.group_prefix.len() + url.len() + 1);
        full.push_str(self.group_prefix.trim_end_matches('/'));
        full.push_str(url);

        let trimmed = full.trim_end_matches('/');
        if self.append_trailing_slash {
            format!("{}/", trimmed)
        } else if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

impl Default for RouteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Router core: first-match lookup by path and lookup by name.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::collection::RouteCollection;
use super::route::Route;
use crate::destination::DestinationArg;
use crate::route::PathParams;

/// Result of successfully matching a path to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (Arc to avoid expensive clones)
    pub route: Arc<Route>,
    /// Values captured by the route's placeholders
    pub path_params: PathParams,
}

impl RouteMatch {
    /// Get a path parameter by name
    ///
    /// Uses "last write wins" semantics when a template repeats a name.
    ///
    /// # Arguments
    /// * `name` - The placeholder name, or its position for unnamed ones (e.g. `"1"`)
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name)
    }

    /// Handler arguments in destination order.
    ///
    /// Bound arguments take the captured value, falling back to their default;
    /// bound arguments with neither are left out. Literal arguments are passed
    /// through.
    #[must_use]
    pub fn arguments(&self) -> Vec<(String, String)> {
        self.route
            .destination()
            .args()
            .iter()
            .filter_map(|arg| match arg {
                DestinationArg::Bound {
                    name,
                    placeholder,
                    default,
                } => self
                    .path_params
                    .get(placeholder)
                    .map(str::to_string)
                    .or_else(|| default.clone())
                    .map(|value| (name.clone(), value)),
                DestinationArg::Literal { name, value } => Some((name.to_string(), value.clone())),
            })
            .collect()
    }
}

/// Ordered route table
///
/// Matching is a linear scan in registration order; the first route whose
/// template covers the whole path wins.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: RouteCollection,
}

impl Router {
    /// Create a router over `routes`
    #[must_use]
    pub fn new(routes: RouteCollection) -> Self {
        let routes_summary: Vec<String> = routes
            .iter()
            .take(10)
            .map(|route| format!("{} -> {}", route.url(), route.destination()))
            .collect();

        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Self { routes }
    }

    #[must_use]
    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    /// Write the route table, one `url -> destination [name]` line per route
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_route_table(&self, out: &mut impl Write) -> io::Result<()> {
        for route in &self.routes {
            match route.name() {
                Some(name) => writeln!(out, "{} -> {} [{}]", route.url(), route.destination(), name)?,
                None => writeln!(out, "{} -> {}", route.url(), route.destination())?,
            }
        }
        Ok(())
    }

    /// Match a path against the routes in registration order
    ///
    /// # Arguments
    ///
    /// * `path` - Candidate path (e.g., `/blog/42`)
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - The first route whose template covers the path
    /// * `None` - If no route matches
    ///
    /// # Example
    ///
    /// ```rust
    /// use routeforge::builder::RouteBuilder;
    /// use routeforge::router::RouteOptions;
    ///
    /// let mut builder = RouteBuilder::new();
    /// builder
    ///     .link("/blog/(id:digit)", "Blog::show/{id}", RouteOptions::new())
    ///     .unwrap();
    /// let router = builder.into_router();
    ///
    /// let m = router.find_route_by_url("/blog/42").unwrap();
    /// assert_eq!(m.get_path_param("id"), Some("42"));
    /// assert_eq!(m.arguments(), vec![("id".to_string(), "42".to_string())]);
    /// ```
    #[must_use]
    pub fn find_route_by_url(&self, path: &str) -> Option<RouteMatch> {
        debug!(path = %path, routes_count = self.routes.len(), "Route match attempt");

        let match_start = Instant::now();
        let result = self
            .routes
            .iter()
            .find_map(|route| route.compiled().match_path(path).map(|p| (route, p)));
        let match_duration = match_start.elapsed();

        if let Some((route, path_params)) = result {
            if match_duration > Duration::from_millis(1) {
                warn!(
                    path = %path,
                    route_url = %route.url(),
                    route_name = ?route.name(),
                    path_params = ?path_params,
                    duration_us = match_duration.as_micros(),
                    "Slow route matching detected"
                );
            } else {
                info!(
                    path = %path,
                    route_url = %route.url(),
                    route_name = ?route.name(),
                    path_params = ?path_params,
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
            }

            return Some(RouteMatch {
                route: Arc::clone(route),
                path_params,
            });
        }

        warn!(
            path = %path,
            duration_us = match_duration.as_micros(),
            "No route matched"
        );
        None
    }

    /// Look up a route by the name given at registration
    #[must_use]
    pub fn find_route_by_name(&self, name: &str) -> Option<Arc<Route>> {
        let route = self.routes.get(name).map(Arc::clone);
        if route.is_none() {
            debug!(route_name = %name, "No route with this name");
        }
        route
    }

    /// Render the URL of the route called `name` from `params`
    ///
    /// # Returns
    ///
    /// `None` when no route has that name or the route rejects the parameters
    /// (see [`CompiledRoute::reverse`](crate::route::CompiledRoute::reverse)).
    #[must_use]
    pub fn reverse_url<I, K, V>(&self, name: &str, params: I) -> Option<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.routes.get(name)?.compiled().reverse(params)
    }

    /// Registered URL templates in match order
    #[must_use]
    pub fn templates(&self) -> Vec<String> {
        self.routes.iter().map(|route| route.url().to_string()).collect()
    }
}

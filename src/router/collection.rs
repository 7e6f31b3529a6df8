use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::route::Route;

/// Routes in registration order, with a name index
///
/// Registering a route under a name that is already taken replaces the old
/// route in place, so it keeps its position in match order.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    routes: Vec<Arc<Route>>,
    names: HashMap<String, usize>,
}

impl RouteCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route, returning the shared handle stored in the collection
    pub fn add(&mut self, route: Route) -> Arc<Route> {
        let route = Arc::new(route);
        let Some(name) = route.name().map(str::to_string) else {
            self.routes.push(Arc::clone(&route));
            return route;
        };

        match self.names.get(&name) {
            Some(&index) => {
                info!(
                    route_name = %name,
                    old_url = %self.routes[index].url(),
                    new_url = %route.url(),
                    "Replacing named route"
                );
                self.routes[index] = Arc::clone(&route);
            }
            None => {
                self.names.insert(name, self.routes.len());
                self.routes.push(Arc::clone(&route));
            }
        }
        route
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Route>> {
        self.names.get(name).map(|&index| &self.routes[index])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Route>> {
        self.routes.iter()
    }
}

impl<'a> IntoIterator for &'a RouteCollection {
    type Item = &'a Arc<Route>;
    type IntoIter = std::slice::Iter<'a, Arc<Route>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

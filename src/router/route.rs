use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::destination::Destination;
use crate::route::CompiledRoute;

/// Options attached to a route at registration
///
/// `name` is reserved and becomes the route name. In a raw option map
/// ([`RouteOptions::from_map`]) only keys starting with `_` are kept, with the
/// underscore stripped; everything else is discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteOptions {
    pub(crate) name: Option<String>,
    pub(crate) extra: Map<String, Value>,
}

impl RouteOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the route for reverse lookup
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a user option, stored under `key` as given
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Interpret a raw option map.
    ///
    /// - `name` (string) names the route
    /// - `_key` is kept as `key`
    /// - any other key is dropped
    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        let mut options = Self::default();
        for (key, value) in map {
            if key == "name" {
                match value {
                    Value::String(name) if !name.is_empty() => options.name = Some(name),
                    other => debug!(value = %other, "Ignoring non-string route name"),
                }
            } else if let Some(stripped) = key.strip_prefix('_') {
                options.extra.insert(stripped.to_string(), value);
            } else {
                debug!(option = %key, "Discarding route option without '_' prefix");
            }
        }
        options
    }
}

/// Registered route: compiled template, destination, optional name and options
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    #[serde(rename = "url", serialize_with = "serialize_template")]
    compiled: CompiledRoute,
    destination: Destination,
    name: Option<String>,
    options: Map<String, Value>,
}

fn serialize_template<S: serde::Serializer>(
    compiled: &CompiledRoute,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(compiled.template())
}

impl Route {
    #[must_use]
    pub fn new(compiled: CompiledRoute, destination: Destination, options: RouteOptions) -> Self {
        Self {
            compiled,
            destination,
            name: options.name,
            options: options.extra,
        }
    }

    /// Registered URL template (after group prefixing and slash policy)
    #[must_use]
    pub fn url(&self) -> &str {
        self.compiled.template()
    }

    #[must_use]
    pub fn compiled(&self) -> &CompiledRoute {
        &self.compiled
    }

    #[must_use]
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of placeholders in the template
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.compiled.tokens().len()
    }

    #[must_use]
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Whether `key` is set to a non-null value
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.options.get(key).map_or(false, |v| !v.is_null())
    }

    #[must_use]
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }
}

//! # Manifest Module
//!
//! Loads a route table from a TOML or JSON file. The format is picked by file
//! extension (`.json` is JSON, anything else TOML).
//!
//! ```toml
//! append_trailing_slash = false
//!
//! [[types]]
//! name = "slug"
//! pattern = "[a-z0-9-]"
//! repeatable = true          # default
//!
//! [[routes]]
//! url = "/blog/(id:digit)"
//! to = "Blog::show/{id}"
//! name = "blog.show"
//! options = { _layout = "wide" }
//!
//! [[groups]]
//! prefix = "/admin"
//!
//! [[groups.routes]]
//! url = "/users/(id:digit)"
//! to = "admin/Users::edit/{id}"
//! ```
//!
//! Types declared in a manifest go into a private copy of the process-wide
//! registry, so loading a manifest never changes what other routes can use.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::builder::RouteBuilder;
use crate::placeholder::{registry, PlaceholderRegistry};
use crate::router::{RouteOptions, Router};

/// Manifest encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// Pick the format from a file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Toml,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Placeholder type declared by a manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeEntry {
    pub name: String,
    pub pattern: String,
    #[serde(default = "default_true")]
    pub repeatable: bool,
}

/// One route declaration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteEntry {
    pub url: String,
    /// Destination text, e.g. `Blog::show/{id}`
    pub to: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Raw options; only `_`-prefixed keys survive
    #[serde(default)]
    pub options: Map<String, Value>,
}

/// Routes sharing a URL prefix; groups nest
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GroupEntry {
    pub prefix: String,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

/// Parsed manifest
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Manifest {
    /// Overrides `ROUTEFORGE_APPEND_SLASH` when set
    #[serde(default)]
    pub append_trailing_slash: Option<bool>,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

impl Manifest {
    /// Parse manifest text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid for `format` or does not match
    /// the manifest schema.
    pub fn parse(content: &str, format: ManifestFormat) -> Result<Self> {
        let manifest = match format {
            ManifestFormat::Toml => toml::from_str(content).context("invalid TOML manifest")?,
            ManifestFormat::Json => {
                serde_json::from_str(content).context("invalid JSON manifest")?
            }
        };
        Ok(manifest)
    }

    /// Copy of the process-wide registry extended with this manifest's types
    ///
    /// # Errors
    ///
    /// Returns an error naming the first type with an invalid name or pattern.
    pub fn registry(&self) -> Result<PlaceholderRegistry> {
        let mut registry = PlaceholderRegistry::clone(&registry());
        for entry in &self.types {
            registry
                .register(&entry.name, &entry.pattern, entry.repeatable)
                .with_context(|| format!("invalid placeholder type '{}'", entry.name))?;
        }
        Ok(registry)
    }

    /// Compile every route into a [`Router`]
    ///
    /// Top-level routes are registered first, then groups in order.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first route whose template or destination
    /// is rejected.
    pub fn build_router(&self) -> Result<Router> {
        let mut builder = RouteBuilder::with_registry(Arc::new(self.registry()?));
        if let Some(append) = self.append_trailing_slash {
            builder.append_trailing_slash(append);
        }

        for entry in &self.routes {
            link_entry(&mut builder, entry)?;
        }
        for group in &self.groups {
            link_group(&mut builder, group)?;
        }

        info!(
            routes_count = builder.routes().len(),
            types_count = self.types.len(),
            "Manifest compiled"
        );
        Ok(builder.into_router())
    }
}

fn link_entry(builder: &mut RouteBuilder, entry: &RouteEntry) -> Result<()> {
    let mut options = RouteOptions::from_map(entry.options.clone());
    if let Some(name) = &entry.name {
        options = options.name(name.as_str());
    }
    builder
        .link(&entry.url, &entry.to, options)
        .with_context(|| format!("failed to register route '{}' -> '{}'", entry.url, entry.to))?;
    Ok(())
}

fn link_group(builder: &mut RouteBuilder, group: &GroupEntry) -> Result<()> {
    // The callback only returns BuildError; anyhow failures travel out through `failure`.
    let mut failure = None;
    builder.group(&group.prefix, |scoped| {
        let result = group
            .routes
            .iter()
            .try_for_each(|entry| link_entry(scoped, entry))
            .and_then(|()| group.groups.iter().try_for_each(|g| link_group(scoped, g)));
        failure = result.err();
        Ok(())
    })?;
    match failure {
        Some(e) => Err(e.context(format!("in group '{}'", group.prefix))),
        None => Ok(()),
    }
}

/// Read and parse a manifest file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Manifest> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    Manifest::parse(&content, ManifestFormat::from_path(path))
        .with_context(|| format!("failed to parse manifest {}", path.display()))
}

/// Load a manifest file and compile it into a [`Router`]
///
/// # Errors
///
/// See [`load_manifest`] and [`Manifest::build_router`].
pub fn load_router(path: impl AsRef<Path>) -> Result<Router> {
    let path = path.as_ref();
    load_manifest(path)?
        .build_router()
        .with_context(|| format!("failed to build routes from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
append_trailing_slash = false

[[types]]
name = "manifest_slug"
pattern = "[a-z0-9-]"

[[routes]]
url = "/blog/(id:digit)"
to = "Blog::show/{id}"
name = "blog.show"
options = { _layout = "wide", dropped = 1 }

[[groups]]
prefix = "/admin"

[[groups.routes]]
url = "/posts/(slug:manifest_slug)"
to = "admin/Posts::edit/{slug}"
name = "admin.post"

[[groups.groups]]
prefix = "/api"

[[groups.groups.routes]]
url = "/ping"
to = "Api::ping"
"#;

    #[test]
    fn test_parse_toml() {
        let manifest = Manifest::parse(TOML, ManifestFormat::Toml).unwrap();
        assert_eq!(manifest.append_trailing_slash, Some(false));
        assert_eq!(manifest.types.len(), 1);
        assert!(manifest.types[0].repeatable);
        assert_eq!(manifest.routes.len(), 1);
        assert_eq!(manifest.groups[0].groups[0].routes[0].url, "/ping");
    }

    #[test]
    fn test_build_router_from_toml() {
        let router = Manifest::parse(TOML, ManifestFormat::Toml)
            .unwrap()
            .build_router()
            .unwrap();
        assert_eq!(
            router.templates(),
            vec![
                "/blog/(id:digit)".to_string(),
                "/admin/posts/(slug:manifest_slug)".to_string(),
                "/admin/api/ping".to_string(),
            ]
        );

        let route = router.find_route_by_name("blog.show").unwrap();
        assert_eq!(route.option("layout"), Some(&Value::from("wide")));
        assert!(route.option("dropped").is_none());

        let m = router.find_route_by_url("/admin/posts/hello-world").unwrap();
        assert_eq!(m.route.name(), Some("admin.post"));
        assert!(router.find_route_by_url("/admin/api/ping").is_some());

        // Manifest types stay private to the manifest's router.
        assert!(!registry().contains("manifest_slug"));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "routes": [{ "url": "/u/(id:digit)", "to": "Users::show/{id}", "name": "user" }]
        }"#;
        let router = Manifest::parse(json, ManifestFormat::Json)
            .unwrap()
            .build_router()
            .unwrap();
        assert_eq!(
            router.reverse_url("user", [("id", "9")]).as_deref(),
            Some("/u/9")
        );
    }

    #[test]
    fn test_group_error_is_reported() {
        let toml = r#"
[[groups]]
prefix = "/g"

[[groups.routes]]
url = "/(x:unknown)"
to = "X::y"
"#;
        let err = Manifest::parse(toml, ManifestFormat::Toml)
            .unwrap()
            .build_router()
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("in group '/g'"), "{message}");
        assert!(message.contains("(x:unknown)"), "{message}");
    }

    #[test]
    fn test_invalid_type_rejected() {
        let toml = r#"
[[types]]
name = "bad name"
pattern = "[a-z]"
"#;
        let manifest = Manifest::parse(toml, ManifestFormat::Toml).unwrap();
        assert!(manifest.registry().is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ManifestFormat::from_path(Path::new("routes.JSON")),
            ManifestFormat::Json
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("routes.toml")),
            ManifestFormat::Toml
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("routes")),
            ManifestFormat::Toml
        );
    }
}

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::manifest::{load_manifest, load_router};
use crate::placeholder::{registry, PlaceholderRegistry};
use crate::runtime_config::RuntimeConfig;
use crate::template::Compiler;

/// Command-line interface for routeforge
#[derive(Parser)]
#[command(name = "routeforge")]
#[command(about = "Compile, match and reverse typed URL templates", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a single template and print its derived pattern
    Compile {
        /// URL template, e.g. `/blog/(id:digit)`
        template: String,

        /// Manifest whose custom types should be available
        #[arg(short, long)]
        routes: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Compile every route in a manifest and print the route table
    Check {
        /// Route manifest (TOML, or JSON by extension)
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Find the first route matching a path
    Match {
        #[arg(short, long)]
        routes: PathBuf,

        /// Candidate path, e.g. `/blog/42`
        path: String,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Render the URL of a named route
    Reverse {
        #[arg(short, long)]
        routes: PathBuf,

        /// Route name
        name: String,

        /// Parameters as KEY=VALUE; unnamed placeholders use their position as key
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// List the available placeholder types
    Types {
        /// Include the custom types of this manifest
        #[arg(short, long)]
        routes: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))
}

/// Parse arguments from the process and run the selected command.
///
/// Prints to stdout. A command that completes but finds nothing (no matching
/// route, parameters rejected) exits with a failure code.
///
/// # Errors
///
/// Returns an error when a manifest cannot be loaded or a template fails to
/// compile.
pub fn run_cli() -> Result<ExitCode> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let found = execute(&cli.command, &mut out)?;
    Ok(if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run `command`, writing its report to `out`.
///
/// # Returns
///
/// * `Ok(true)` - the command succeeded
/// * `Ok(false)` - no route matched, or the route rejected the parameters
///
/// # Errors
///
/// See [`run_cli`].
pub fn execute(command: &Commands, out: &mut impl Write) -> Result<bool> {
    match command {
        Commands::Compile {
            template,
            routes,
            json,
        } => {
            let compiler = Compiler::with_config(
                Arc::new(registry_for(routes.as_deref())?),
                &RuntimeConfig::from_env(),
            );
            let route = compiler.compile(template)?;
            if *json {
                let report = json!({
                    "template": route.template(),
                    "pattern": route.match_pattern(),
                    "placeholders": route.tokens(),
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                writeln!(out, "pattern: {}", route.match_pattern())?;
                for token in route.tokens() {
                    let label = if token.name().is_positional() {
                        format!("#{}", token.name())
                    } else {
                        token.name().to_string()
                    };
                    writeln!(
                        out,
                        "  {} : {} {}",
                        label,
                        token.placeholder_type().name(),
                        token.raw_quantifier()
                    )?;
                }
            }
            Ok(true)
        }
        Commands::Check { routes } => {
            let router = load_router(routes)?;
            router.write_route_table(out)?;
            writeln!(out, "{} routes OK", router.routes().len())?;
            Ok(true)
        }
        Commands::Match { routes, path, json } => {
            let router = load_router(routes)?;
            let Some(m) = router.find_route_by_url(path) else {
                writeln!(out, "no route matches '{}'", path)?;
                return Ok(false);
            };

            let destination = m.route.destination();
            if *json {
                let report = json!({
                    "url": m.route.url(),
                    "name": m.route.name(),
                    "class": destination.class(),
                    "action": destination.action(),
                    "params": &m.path_params,
                    "arguments": m.arguments(),
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                writeln!(out, "route: {}", m.route.url())?;
                if let Some(name) = m.route.name() {
                    writeln!(out, "name: {}", name)?;
                }
                writeln!(out, "handler: {}::{}", destination.class(), destination.action())?;
                for (key, value) in m.path_params.iter() {
                    writeln!(out, "  {} = {}", key, value)?;
                }
            }
            Ok(true)
        }
        Commands::Reverse {
            routes,
            name,
            params,
        } => {
            let router = load_router(routes)?;
            if router.find_route_by_name(name).is_none() {
                return Err(anyhow!("no route named '{}'", name));
            }
            match router.reverse_url(name, params.iter().map(|(k, v)| (k, v))) {
                Some(url) => {
                    writeln!(out, "{}", url)?;
                    Ok(true)
                }
                None => {
                    writeln!(out, "route '{}' rejected the parameters", name)?;
                    Ok(false)
                }
            }
        }
        Commands::Types { routes, json } => {
            let registry = registry_for(routes.as_deref())?;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&registry.types())?)?;
            } else {
                for ty in registry.types() {
                    writeln!(
                        out,
                        "{:<10} {:<8} {}",
                        ty.name(),
                        if ty.is_repeatable() { "repeat" } else { "fixed" },
                        ty.pattern()
                    )?;
                }
            }
            Ok(true)
        }
    }
}

fn registry_for(routes: Option<&Path>) -> Result<PlaceholderRegistry> {
    match routes {
        Some(path) => load_manifest(path)?
            .registry()
            .with_context(|| format!("invalid types in {}", path.display())),
        None => Ok(PlaceholderRegistry::clone(&registry())),
    }
}

//! # Route Module
//!
//! [`CompiledRoute`] is the artifact produced by the template compiler. It
//! drives both directions of routing:
//!
//! - **Matching** ([`CompiledRoute::match_path`]): path → captured parameters.
//! - **Reverse generation** ([`CompiledRoute::reverse`]): parameters → path.
//!
//! Both directions derive their constraints from the same placeholder tokens,
//! so any parameter set accepted by `reverse` produces a path that `match_path`
//! accepts with the same captured values.
//!
//! ```rust
//! use routeforge::compile;
//!
//! let route = compile("/archive/(y:year)/(m:month)").unwrap();
//! let params = route.match_path("/archive/2023/05").unwrap();
//! assert_eq!(params.get("y"), Some("2023"));
//! assert_eq!(params.get("m"), Some("05"));
//! assert!(route.match_path("/archive/23/5").is_none());
//! ```

mod compiled;
mod reverse;

pub use compiled::{CompiledRoute, ParamVec, PathParams, MAX_INLINE_PARAMS};

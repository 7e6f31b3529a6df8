//! # Template Module
//!
//! Compiles author-facing URL templates into [`CompiledRoute`](crate::route::CompiledRoute)s.
//!
//! ## Placeholder Grammar
//!
//! ```text
//! ( [name] : type [: quantifier] )
//!
//! name        [A-Za-z0-9_]*          omitted → 1-based position among unnamed placeholders
//! type        registered type name   case-insensitive
//! quantifier  * | + | ? | n | min,max (either bound may be empty; empty min means 1)
//! ```
//!
//! Examples: `(id:digit)`, `(:alpha)`, `(code:upper:3)`, `(slug:lower:2,)`,
//! `(y:year)`.
//!
//! ## Quantifier Rules
//!
//! | Type | Quantifier | Emitted repetition |
//! |---|---|---|
//! | repeatable | none | `+` |
//! | repeatable | `*` `+` `?` | as written |
//! | repeatable | `n` / `min,max` | `{n}` / `{min,max}` |
//! | fixed-shape | anything | none (ignored) |
//!
//! Parenthesised text without a `:` is literal, as is everything outside tokens.

mod compiler;
#[cfg(test)]
mod tests;
mod token;

pub use compiler::{compile, Compiler};
pub use token::{PlaceholderName, PlaceholderToken, Quantifier};

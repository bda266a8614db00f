//! schemasync - translation keys for theme schemas
//!
//! Reads section, app-block and global-settings definitions, replaces every
//! merchant-facing string with a `t:` translation reference, and writes the
//! matching default locale bundle. Strings that recur across definitions are
//! deduplicated into a shared `all` namespace.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Key normalization, frequency index, key resolution, localizer, bundle builder
//! - `generate`: Regeneration passes over a definition tree
//! - `schema`: Definition data model
//! - `writer`: Idempotent file writes

pub mod cli;
pub mod config;
pub mod core;
pub mod generate;
pub mod schema;
pub mod writer;

//! Configuration loader and schema types.
//!
//! This module exposes the settings that pick default playlist formats and
//! scanner behavior, and helpers to load them from disk and the environment.

mod load;
mod schema;

pub use load::resolve_config_path;
pub use schema::*;

#[cfg(test)]
mod tests;

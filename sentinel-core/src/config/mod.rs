//! Configuration types
//!
//! Board-agnostic configuration structures and the `machine.toml` parser.

pub mod toml;
pub mod types;

pub use self::toml::parse_config;
pub use types::*;

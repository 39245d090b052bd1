//! Machine configuration loading
//!
//! The configuration is compiled in from `machine.toml`. build.rs has
//! already validated it with a full TOML parser, so a runtime failure means
//! the embedded subset parser disagrees; the defaults are used instead.

use defmt::*;

use sentinel_core::config::{parse_config, MachineConfig};

/// Embedded configuration (compiled into firmware)
/// Edit machine.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../machine.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load_config() -> MachineConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded machine.toml ({} bytes)", EMBEDDED_CONFIG.len());
            config
        }
        Err(e) => {
            error!("Failed to parse machine.toml: {:?}, using defaults", e);
            MachineConfig::default()
        }
    }
}

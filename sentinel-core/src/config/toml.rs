//! Simple TOML parser for machine configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the turret configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, float, boolean)
//! - [section] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys
//!
//! Unknown keys are ignored so that newer config files still load on older
//! firmware. Unknown sections are rejected.

use crate::motion::AxisConfig;

use super::types::{ConfigError, MachineConfig, StartupMode};

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Serial,
    Pan,
    Tilt,
    Motion,
    Laser,
    Mode,
    Calibration,
}

/// Parse TOML configuration into MachineConfig
///
/// Missing sections and keys keep their defaults. The result is validated
/// before it is returned.
pub fn parse_config(input: &str) -> Result<MachineConfig, ConfigError> {
    let mut config = MachineConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidKey)?;
        apply_key(&mut config, section, key, value)?;
    }

    config.validate()?;
    Ok(config)
}

fn apply_key(
    config: &mut MachineConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    match section {
        Section::Root => {}
        Section::Serial => {
            if key == "baudrate" {
                config.serial.baudrate = parse_int(value)?;
            }
        }
        Section::Pan => apply_axis_key(&mut config.motion.pan, key, value)?,
        Section::Tilt => apply_axis_key(&mut config.motion.tilt, key, value)?,
        Section::Motion => {
            if key == "smooth_factor" {
                config.motion.smooth_factor = parse_float(value)?;
            }
        }
        Section::Laser => {
            if key == "active_low" {
                config.laser.active_low = parse_bool(value)?;
            }
        }
        Section::Mode => {
            if key == "startup" {
                config.mode = parse_mode(value)?;
            }
        }
        Section::Calibration => match key {
            "step_deg" => config.calibration.step_deg = parse_int(value)?,
            "dwell_ms" => config.calibration.dwell_ms = parse_int(value)?,
            _ => {}
        },
    }
    Ok(())
}

fn apply_axis_key(axis: &mut AxisConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "min_angle" => axis.range.min_deg = parse_float(value)?,
        "max_angle" => axis.range.max_deg = parse_float(value)?,
        "min_pulse_us" => axis.pulse.min_us = parse_int(value)?,
        "max_pulse_us" => axis.pulse.max_us = parse_int(value)?,
        "inverted" => axis.inverted = parse_bool(value)?,
        _ => {}
    }
    Ok(())
}

/// Parse a section header line like "[pan]"
fn parse_section_header(line: &str) -> Result<Section, ConfigError> {
    let header = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ConfigError::InvalidSection)?;

    match header.trim() {
        "serial" => Ok(Section::Serial),
        "pan" => Ok(Section::Pan),
        "tilt" => Ok(Section::Tilt),
        "motion" => Ok(Section::Motion),
        "laser" => Ok(Section::Laser),
        "mode" => Ok(Section::Mode),
        "calibration" => Ok(Section::Calibration),
        _ => Err(ConfigError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        // Make sure # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

/// Parse a float value
fn parse_float(value: &str) -> Result<f32, ConfigError> {
    let v: f32 = value.parse().map_err(|_| ConfigError::InvalidValue)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ConfigError::InvalidValue)
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn parse_mode(value: &str) -> Result<StartupMode, ConfigError> {
    match parse_string(value) {
        "run" => Ok(StartupMode::Run),
        "calibrate" => Ok(StartupMode::Calibrate),
        _ => Err(ConfigError::InvalidValue),
    }
}

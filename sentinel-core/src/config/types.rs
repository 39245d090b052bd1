//! Configuration type definitions
//!
//! These types represent the machine configuration. Defaults match the
//! stock turret: 115200 baud, both axes 0..180° on 700..2500 µs, pan
//! inverted, smoothing 0.3, laser active high, run mode.

use sentinel_protocol::DEFAULT_BAUDRATE;

use crate::motion::{AxisConfig, MotionConfig};

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is not a `key = value` pair
    InvalidKey,
    /// Value has the wrong type
    InvalidValue,
    /// Value is outside its allowed range
    InvalidRange,
}

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    pub baudrate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
        }
    }
}

/// Laser output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LaserConfig {
    /// Drive the pin low to turn the laser on
    pub active_low: bool,
}

/// Diagnostic sweep configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationConfig {
    /// Angle increment between moves
    pub step_deg: u16,
    /// Pause after each move in milliseconds
    pub dwell_ms: u32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            step_deg: 10,
            dwell_ms: 250,
        }
    }
}

/// What the firmware does after boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupMode {
    /// Follow host commands
    #[default]
    Run,
    /// Run the diagnostic sweep, then hold centre
    Calibrate,
}

/// Complete machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MachineConfig {
    pub serial: SerialConfig,
    pub motion: MotionConfig,
    pub laser: LaserConfig,
    pub calibration: CalibrationConfig,
    pub mode: StartupMode,
}

impl MachineConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serial.baudrate == 0 {
            return Err(ConfigError::InvalidRange);
        }

        validate_axis(&self.motion.pan)?;
        validate_axis(&self.motion.tilt)?;

        let factor = self.motion.smooth_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(ConfigError::InvalidRange);
        }

        if self.calibration.step_deg == 0 {
            return Err(ConfigError::InvalidRange);
        }

        Ok(())
    }
}

fn validate_axis(axis: &AxisConfig) -> Result<(), ConfigError> {
    if axis.is_valid() {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange)
    }
}

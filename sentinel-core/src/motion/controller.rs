//! Delta-command motion controller
//!
//! Turns each [`Command`] into new absolute axis positions and the pulse
//! widths that hold them. The controller is a pure function of the previous
//! [`MotionState`] and the command; the caller owns the state and feeds the
//! returned value back in on the next command.
//!
//! Per command, for each axis:
//!
//! 1. `target = current ∓ delta` (pan is inverted)
//! 2. `target` is clamped to the axis range
//! 3. `current += (target - current) * smooth_factor`
//! 4. `current` is mapped linearly onto the pulse range
//!
//! Step 3 is a single-pole low-pass filter. Because the target is clamped
//! before smoothing and the update is a convex combination, `current` can
//! never leave the axis range.

use sentinel_protocol::Command;

use super::axis::{Axis, AxisConfig};

/// Default fraction of the remaining distance covered per command
pub const DEFAULT_SMOOTH_FACTOR: f32 = 0.3;

/// Motion configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    pub pan: AxisConfig,
    pub tilt: AxisConfig,
    /// Smoothing factor in (0, 1]; 1 jumps straight to the target
    pub smooth_factor: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            pan: AxisConfig::pan(),
            tilt: AxisConfig::tilt(),
            smooth_factor: DEFAULT_SMOOTH_FACTOR,
        }
    }
}

impl MotionConfig {
    /// Configuration for one axis
    pub fn axis(&self, axis: Axis) -> &AxisConfig {
        match axis {
            Axis::Pan => &self.pan,
            Axis::Tilt => &self.tilt,
        }
    }
}

/// Smoothed axis positions in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionState {
    pub pan_deg: f32,
    pub tilt_deg: f32,
}

impl MotionState {
    pub const fn new(pan_deg: f32, tilt_deg: f32) -> Self {
        Self { pan_deg, tilt_deg }
    }

    /// Both axes at the centre of their travel
    pub fn centered(config: &MotionConfig) -> Self {
        Self::new(config.pan.range.midpoint(), config.tilt.range.midpoint())
    }

    /// Position of one axis
    pub fn position(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Pan => self.pan_deg,
            Axis::Tilt => self.tilt_deg,
        }
    }
}

/// Outputs produced for one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorFrame {
    /// Pan servo pulse width in microseconds
    pub pan_pulse_us: u16,
    /// Tilt servo pulse width in microseconds
    pub tilt_pulse_us: u16,
    /// Laser output level
    pub laser_on: bool,
}

/// Pure motion controller
#[derive(Debug, Clone)]
pub struct MotionController {
    config: MotionConfig,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

impl MotionController {
    /// Create a controller
    ///
    /// A smoothing factor outside (0, 1] is replaced by the default, and so
    /// is an empty, reversed or non-finite angle or pulse range.
    pub fn new(mut config: MotionConfig) -> Self {
        if !(config.smooth_factor > 0.0 && config.smooth_factor <= 1.0) {
            config.smooth_factor = DEFAULT_SMOOTH_FACTOR;
        }
        config.pan = config.pan.sanitized();
        config.tilt = config.tilt.sanitized();
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// State at power-up
    pub fn home(&self) -> MotionState {
        MotionState::centered(&self.config)
    }

    /// Apply one command
    ///
    /// Returns the new state (to be passed to the next call) and the
    /// actuator outputs for it.
    pub fn step(&self, state: MotionState, command: &Command) -> (MotionState, ActuatorFrame) {
        let next = MotionState {
            pan_deg: self.smooth(&self.config.pan, state.pan_deg, command.pan_delta),
            tilt_deg: self.smooth(&self.config.tilt, state.tilt_deg, command.tilt_delta),
        };

        (next, self.frame(&next, command.laser_on))
    }

    /// Actuator outputs for a state
    pub fn frame(&self, state: &MotionState, laser_on: bool) -> ActuatorFrame {
        ActuatorFrame {
            pan_pulse_us: self.config.pan.pulse_for(state.pan_deg),
            tilt_pulse_us: self.config.tilt.pulse_for(state.tilt_deg),
            laser_on,
        }
    }

    fn smooth(&self, axis: &AxisConfig, current_deg: f32, delta_deg: f32) -> f32 {
        let target = axis.target(current_deg, delta_deg);
        let next = current_deg + (target - current_deg) * self.config.smooth_factor;
        // Guards against float error nudging past a clamped target
        axis.range.clamp(next)
    }
}

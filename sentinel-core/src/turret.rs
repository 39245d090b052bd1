//! Turret command pipeline
//!
//! Owns the two servos, the laser and the motion state, and applies each
//! decoded command to them:
//!
//! ```text
//!  line ──► parse_command ──► MotionController::step ──► ActuatorFrame
//!                                                           │
//!                                   ┌───────────────────────┼──────────┐
//!                                   ▼                       ▼          ▼
//!                               pan servo              tilt servo    laser
//! ```
//!
//! A malformed line leaves every output and the motion state untouched.

use sentinel_protocol::{parse_command, Command, CommandError};

use crate::motion::{ActuatorFrame, Axis, MotionConfig, MotionController, MotionState};
use crate::traits::{LaserOutput, ServoDriver};

/// Pan/tilt turret with a laser
pub struct Turret<P, T, L>
where
    P: ServoDriver,
    T: ServoDriver,
    L: LaserOutput,
{
    pan: P,
    tilt: T,
    laser: L,
    controller: MotionController,
    state: MotionState,
}

impl<P, T, L> Turret<P, T, L>
where
    P: ServoDriver,
    T: ServoDriver,
    L: LaserOutput,
{
    /// Create a turret
    ///
    /// Nothing is written to the actuators until [`home`](Self::home) or a
    /// command is applied. Unusable axis ranges fall back to the defaults
    /// (see [`MotionController::new`]).
    pub fn new(pan: P, tilt: T, laser: L, config: MotionConfig) -> Self {
        let controller = MotionController::new(config);
        let state = controller.home();
        Self {
            pan,
            tilt,
            laser,
            controller,
            state,
        }
    }

    /// Centre both axes and switch the laser off
    pub fn home(&mut self) -> ActuatorFrame {
        self.state = self.controller.home();
        let frame = self.controller.frame(&self.state, false);
        self.write(&frame);
        frame
    }

    /// Decode and apply one command line (terminator already stripped)
    pub fn handle_line(&mut self, line: &str) -> Result<ActuatorFrame, CommandError> {
        let command = parse_command(line)?;
        Ok(self.apply(&command))
    }

    /// Apply a decoded command
    pub fn apply(&mut self, command: &Command) -> ActuatorFrame {
        let (state, frame) = self.controller.step(self.state, command);
        self.state = state;
        self.write(&frame);
        frame
    }

    /// Move one axis straight to an absolute angle, bypassing smoothing
    ///
    /// Used by the diagnostic sweep. The angle is clamped to the axis range
    /// and becomes the axis's new position. Returns the pulse width written.
    pub fn move_axis(&mut self, axis: Axis, angle_deg: f32) -> u16 {
        let axis_config = *self.controller.config().axis(axis);
        let angle_deg = axis_config.range.clamp(angle_deg);
        let width_us = axis_config.pulse_for(angle_deg);

        match axis {
            Axis::Pan => {
                self.state.pan_deg = angle_deg;
                self.pan.write_pulse_us(width_us);
            }
            Axis::Tilt => {
                self.state.tilt_deg = angle_deg;
                self.tilt.write_pulse_us(width_us);
            }
        }
        width_us
    }

    /// Current smoothed positions
    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn config(&self) -> &MotionConfig {
        self.controller.config()
    }

    pub fn laser_on(&self) -> bool {
        self.laser.is_on()
    }

    pub fn pan(&self) -> &P {
        &self.pan
    }

    pub fn tilt(&self) -> &T {
        &self.tilt
    }

    pub fn laser(&self) -> &L {
        &self.laser
    }

    /// Release the actuators
    pub fn into_parts(self) -> (P, T, L) {
        (self.pan, self.tilt, self.laser)
    }

    fn write(&mut self, frame: &ActuatorFrame) {
        self.pan.write_pulse_us(frame.pan_pulse_us);
        self.tilt.write_pulse_us(frame.tilt_pulse_us);
        self.laser.set_on(frame.laser_on);
    }
}

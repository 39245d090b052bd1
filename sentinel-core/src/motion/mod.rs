//! Motion control
//!
//! Axis geometry, the smoothed delta controller and the diagnostic sweep.

pub mod axis;
pub mod controller;
pub mod sweep;

pub use axis::{AngleRange, Axis, AxisConfig, PulseRange};
pub use controller::{ActuatorFrame, MotionConfig, MotionController, MotionState};
pub use sweep::{SweepEvent, SweepPhase, SweepPlan};

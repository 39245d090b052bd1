//! Actuator traits
//!
//! These traits define the interface between the turret logic and the
//! driver implementations.

pub mod laser;
pub mod servo;

pub use laser::LaserOutput;
pub use servo::ServoDriver;

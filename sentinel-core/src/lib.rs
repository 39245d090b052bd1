//! Board-agnostic core logic for the pan/tilt turret firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Actuator traits (servo, laser)
//! - Motion controller (delta → clamp → smoothing → pulse width)
//! - Turret pipeline tying commands to actuators
//! - Diagnostic servo sweep plan
//! - Configuration types and the `machine.toml` parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod motion;
pub mod traits;
pub mod turret;

pub use turret::Turret;

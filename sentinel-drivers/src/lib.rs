//! Actuator driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in sentinel-core on top of the sentinel-hal abstractions:
//!
//! - Hobby servo on a pulse-width output
//! - Laser pointer on a GPIO pin

#![no_std]
#![deny(unsafe_code)]

pub mod laser;
pub mod servo;

pub use laser::GpioLaser;
pub use servo::PwmServo;

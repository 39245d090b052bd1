//! RP2040-specific HAL for the turret firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `sentinel-hal` traits:
//!
//! - PWM slice channels as servo pulse outputs
//! - UART settings conversion

#![no_std]

pub mod pwm;
pub mod uart;

pub use pwm::{PwmChannel, PwmServoChannel};
pub use uart::to_uart_config;

/// System clock frequency (default 125 MHz)
pub const SYS_CLK_HZ: u32 = 125_000_000;

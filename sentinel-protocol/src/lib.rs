//! Host ↔ turret serial protocol
//!
//! This crate defines the text protocol spoken between the host tracker
//! (camera + tracking algorithm on a PC) and the turret controller. The
//! protocol is deliberately tiny: one command per newline-terminated line.
//!
//! # Protocol Overview
//!
//! ```text
//! <panDelta>:<tiltDelta>:<laserFlag>\n
//!
//!   +2.5:-3.5:0\n
//!   ────  ────  ─
//!    │     │    └─ laser: integer, nonzero = on
//!    │     └────── tilt delta in degrees (added)
//!    └──────────── pan delta in degrees (subtracted, axis is inverted)
//! ```
//!
//! The link is one-way under normal operation. The turret only speaks once
//! at boot ([`READY_BANNER`]) and while running the diagnostic sweep.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod numeric;

pub use command::{parse_command, Command, CommandError};
pub use line::{Line, LineBuffer, LineError, MAX_LINE_LEN};

/// Message written once after the turret has centred itself
pub const READY_BANNER: &str = "Tracking System Ready\r\n";

/// Serial link speed the host tracker uses
pub const DEFAULT_BAUDRATE: u32 = 115200;

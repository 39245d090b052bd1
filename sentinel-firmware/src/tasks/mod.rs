//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

use embassy_rp::gpio::Output;

use sentinel_core::Turret;
use sentinel_drivers::{GpioLaser, PwmServo};
use sentinel_hal::EhOutputPin;
use sentinel_hal_rp2040::PwmServoChannel;

pub mod calibration;
pub mod command_rx;
pub mod motion;

pub use calibration::calibration_task;
pub use command_rx::command_rx_task;
pub use motion::motion_task;

/// Servo on an RP2040 PWM channel
pub type BoardServo = PwmServo<PwmServoChannel<'static>>;

/// Laser on an RP2040 GPIO
pub type BoardLaser = GpioLaser<EhOutputPin<Output<'static>>>;

/// The turret as wired on the board
pub type BoardTurret = Turret<BoardServo, BoardServo, BoardLaser>;

//! PWM servo outputs
//!
//! Each RP2040 PWM slice has a 16-bit counter with a 8.4 fixed-point clock
//! divider and two compare channels (A and B). For servos the slice is
//! clocked at 1 MHz so one counter tick is one microsecond:
//!
//! ```text
//! tick   = SYS_CLK / divider          (1 MHz → divider 125.0)
//! period = (top + 1) ticks            (20 000 → top 19 999)
//! pulse  = compare ticks              (width in µs)
//! ```

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use fixed::types::U12F4;

use sentinel_hal::pwm::{max_pulse_us, SERVO_PERIOD_US};
use sentinel_hal::PulseOutput;

use crate::SYS_CLK_HZ;

/// Counter tick rate for servo slices
pub const SERVO_TICK_HZ: u32 = 1_000_000;

/// Compare channel within a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmChannel {
    A,
    B,
}

/// Calculate the PWM clock divider for a counter tick rate
///
/// divider = SYS_CLK / tick
///
/// Returns (integer_part, fractional_part) for the 8.4 fixed-point divider.
pub fn calc_pwm_divider(tick_hz: u32) -> (u8, u8) {
    if tick_hz == 0 {
        return (0xFF, 0x0F); // Slowest possible count
    }

    // 4-bit fractional precision: multiply by 16 first
    let divider_x16 = (SYS_CLK_HZ as u64 * 16) / tick_hz as u64;

    // The integer part must be at least 1
    let divider_x16 = divider_x16.clamp(16, 0xFFF);

    ((divider_x16 / 16) as u8, (divider_x16 % 16) as u8)
}

/// Counter wrap value for a period in ticks
pub fn calc_top(period_ticks: u32) -> u16 {
    period_ticks.saturating_sub(1).min(u16::MAX as u32) as u16
}

/// Slice configuration for a servo channel
pub fn servo_config(channel: PwmChannel, width_us: u16) -> PwmConfig {
    let (int_part, frac_part) = calc_pwm_divider(SERVO_TICK_HZ);

    let mut config = PwmConfig::default();
    config.divider = U12F4::from_bits(((int_part as u16) << 4) | frac_part as u16);
    config.top = calc_top(SERVO_PERIOD_US);
    match channel {
        PwmChannel::A => config.compare_a = width_us,
        PwmChannel::B => config.compare_b = width_us,
    }
    config
}

/// One PWM channel driving a servo
///
/// Owns the slice; the other channel of the slice stays idle.
pub struct PwmServoChannel<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
    channel: PwmChannel,
    width_us: u16,
}

impl<'d> PwmServoChannel<'d> {
    /// Configure the slice for 50 Hz servo frames, output held low
    pub fn new(mut pwm: Pwm<'d>, channel: PwmChannel) -> Self {
        let config = servo_config(channel, 0);
        pwm.set_config(&config);
        Self {
            pwm,
            config,
            channel,
            width_us: 0,
        }
    }
}

impl PulseOutput for PwmServoChannel<'_> {
    fn set_pulse_us(&mut self, width_us: u16) {
        let width_us = width_us.min(max_pulse_us(self.period_us()));
        match self.channel {
            PwmChannel::A => self.config.compare_a = width_us,
            PwmChannel::B => self.config.compare_b = width_us,
        }
        self.pwm.set_config(&self.config);
        self.width_us = width_us;
    }

    fn pulse_us(&self) -> u16 {
        self.width_us
    }

    fn period_us(&self) -> u32 {
        SERVO_PERIOD_US
    }
}

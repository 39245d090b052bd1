//! Pulse-width output abstraction
//!
//! Hobby servos are positioned by the width of a pulse repeated every
//! period (typically 20ms). Implementations translate a width in
//! microseconds into whatever compare value their timer needs.

/// Pulse-width modulated output
pub trait PulseOutput {
    /// Set the high time of each period in microseconds
    ///
    /// Implementations clamp widths longer than the period.
    fn set_pulse_us(&mut self, width_us: u16);

    /// The last pulse width that was set
    fn pulse_us(&self) -> u16;

    /// Period of the output in microseconds
    fn period_us(&self) -> u32;

    /// Stop pulsing (servo goes limp)
    fn disable(&mut self) {
        self.set_pulse_us(0);
    }
}

/// Standard hobby servo frame period (50 Hz)
pub const SERVO_PERIOD_US: u32 = 20_000;

/// Longest pulse an output with the given period can produce
pub fn max_pulse_us(period_us: u32) -> u16 {
    u16::try_from(period_us.saturating_sub(1)).unwrap_or(u16::MAX)
}

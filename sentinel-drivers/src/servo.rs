//! PWM hobby servo
//!
//! Positions a standard hobby servo by the width of a pulse repeated every
//! 20 ms. Widths are clamped to the configured range so a bad command can
//! never drive the horn into its mechanical stop, nor past the period of
//! the output.

use sentinel_core::motion::PulseRange;
use sentinel_core::traits::ServoDriver;
use sentinel_hal::pwm::max_pulse_us;
use sentinel_hal::PulseOutput;

/// Servo on a pulse-width output
pub struct PwmServo<P> {
    output: P,
    range: PulseRange,
}

impl<P: PulseOutput> PwmServo<P> {
    /// Create a servo, initially detached
    ///
    /// An empty or reversed range is replaced by the default.
    pub fn new(mut output: P, range: PulseRange) -> Self {
        output.disable();
        let range = if range.is_valid() {
            range
        } else {
            PulseRange::default()
        };
        Self { output, range }
    }

    /// Pulse range this servo is limited to
    pub fn range(&self) -> PulseRange {
        self.range
    }

    /// Release the output
    pub fn into_inner(self) -> P {
        self.output
    }
}

impl<P: PulseOutput> ServoDriver for PwmServo<P> {
    fn write_pulse_us(&mut self, width_us: u16) {
        let width_us = self.range.clamp(width_us);
        self.output
            .set_pulse_us(width_us.min(max_pulse_us(self.output.period_us())));
    }

    fn pulse_us(&self) -> u16 {
        self.output.pulse_us()
    }

    fn detach(&mut self) {
        self.output.disable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_hal::pwm::SERVO_PERIOD_US;

    struct MockPwm {
        width: u16,
        writes: u32,
        period_us: u32,
    }

    impl MockPwm {
        fn new() -> Self {
            Self::with_period(SERVO_PERIOD_US)
        }

        fn with_period(period_us: u32) -> Self {
            Self {
                width: 1234,
                writes: 0,
                period_us,
            }
        }
    }

    impl PulseOutput for MockPwm {
        fn set_pulse_us(&mut self, width_us: u16) {
            self.width = width_us;
            self.writes += 1;
        }

        fn pulse_us(&self) -> u16 {
            self.width
        }

        fn period_us(&self) -> u32 {
            self.period_us
        }
    }

    #[test]
    fn test_starts_detached() {
        let servo = PwmServo::new(MockPwm::new(), PulseRange::default());
        assert_eq!(servo.pulse_us(), 0);
        assert!(!servo.is_attached());
    }

    #[test]
    fn test_write_within_range() {
        let mut servo = PwmServo::new(MockPwm::new(), PulseRange::default());
        servo.write_pulse_us(1600);
        assert_eq!(servo.pulse_us(), 1600);
        assert!(servo.is_attached());
    }

    #[test]
    fn test_write_is_clamped() {
        let mut servo = PwmServo::new(MockPwm::new(), PulseRange::new(1000, 2000));
        servo.write_pulse_us(500);
        assert_eq!(servo.pulse_us(), 1000);
        servo.write_pulse_us(u16::MAX);
        assert_eq!(servo.pulse_us(), 2000);
    }

    #[test]
    fn test_write_limited_by_period() {
        // 400 Hz output: 2.5 ms period
        let mut servo = PwmServo::new(MockPwm::with_period(2500), PulseRange::default());
        servo.write_pulse_us(2500);
        assert_eq!(servo.pulse_us(), 2499);
        servo.write_pulse_us(1600);
        assert_eq!(servo.pulse_us(), 1600);
    }

    #[test]
    fn test_reversed_range_uses_default() {
        let mut servo = PwmServo::new(MockPwm::new(), PulseRange::new(2500, 700));
        assert_eq!(servo.range(), PulseRange::default());

        servo.write_pulse_us(100);
        assert_eq!(servo.pulse_us(), 700);
    }

    #[test]
    fn test_detach() {
        let mut servo = PwmServo::new(MockPwm::new(), PulseRange::default());
        servo.write_pulse_us(2500);
        servo.detach();
        assert_eq!(servo.pulse_us(), 0);

        let pwm = servo.into_inner();
        assert_eq!(pwm.writes, 3);
    }
}

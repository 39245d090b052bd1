//! GPIO laser output
//!
//! Laser module switched by a GPIO pin (directly or via a transistor).

use sentinel_core::traits::LaserOutput;
use sentinel_hal::OutputPin;

/// GPIO laser output
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioLaser<P> {
    pin: P,
    /// If true, laser ON = pin LOW
    active_low: bool,
    on: bool,
}

impl<P: OutputPin> GpioLaser<P> {
    /// Create a new laser output, switched off
    pub fn new(pin: P, active_low: bool) -> Self {
        let mut laser = Self {
            pin,
            active_low,
            on: false,
        };
        laser.set_on(false);
        laser
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> LaserOutput for GpioLaser<P> {
    fn set_on(&mut self, on: bool) {
        self.on = on;
        self.pin.set_state(on != self.active_low);
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                writes: 0,
            }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_high_laser() {
        let mut laser = GpioLaser::new_active_high(MockPin::new());

        assert!(!laser.is_on());
        assert!(laser.pin.is_set_low());
        assert_eq!(laser.pin.writes, 1);

        laser.set_on(true);
        assert!(laser.is_on());
        assert!(laser.pin.is_set_high());

        laser.set_on(false);
        assert!(!laser.is_on());
        assert!(laser.pin.is_set_low());
    }

    #[test]
    fn test_active_low_laser() {
        let mut laser = GpioLaser::new_active_low(MockPin::new());

        // Off means the pin idles high
        assert!(!laser.is_on());
        assert!(laser.pin.is_set_high());

        laser.set_on(true);
        assert!(laser.is_on());
        assert!(laser.pin.is_set_low());
    }

    #[test]
    fn test_repeated_writes_are_idempotent() {
        let mut laser = GpioLaser::new_active_high(MockPin::new());
        laser.set_on(true);
        laser.set_on(true);
        assert!(laser.is_on());

        let pin = laser.into_inner();
        assert!(pin.is_set_high());
        assert_eq!(pin.writes, 3);
    }
}

//! GPIO pin abstractions
//!
//! Provides the digital output trait used by the laser driver, plus an
//! adapter that lifts any `embedded-hal` 1.0 output pin into it.

use embedded_hal::digital::OutputPin as EhOutput;

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Adapter from an `embedded-hal` output pin
///
/// `embedded-hal` pins report errors and need `&mut self` to read back their
/// state. Chip outputs are infallible in practice, so errors are dropped and
/// the last written level is cached instead.
pub struct EhOutputPin<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutput> EhOutputPin<P> {
    /// Wrap a pin, driving it low
    pub fn new(pin: P) -> Self {
        Self::with_level(pin, false)
    }

    /// Wrap a pin, driving it to `high`
    pub fn with_level(mut pin: P, high: bool) -> Self {
        let _ = if high { pin.set_high() } else { pin.set_low() };
        Self { pin, high }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: EhOutput> OutputPin for EhOutputPin<P> {
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Records every level written to it
    struct RecordingPin {
        level: bool,
        writes: usize,
    }

    impl ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl EhOutput for RecordingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.level = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.level = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_adapter_starts_low() {
        let pin = RecordingPin {
            level: true,
            writes: 0,
        };
        let adapter = EhOutputPin::new(pin);

        assert!(adapter.is_set_low());
        let pin = adapter.into_inner();
        assert!(!pin.level);
        assert_eq!(pin.writes, 1);
    }

    #[test]
    fn test_adapter_initial_high() {
        let adapter = EhOutputPin::with_level(
            RecordingPin {
                level: false,
                writes: 0,
            },
            true,
        );

        assert!(adapter.is_set_high());
        assert!(adapter.into_inner().level);
    }

    #[test]
    fn test_adapter_tracks_state() {
        let mut adapter = EhOutputPin::new(RecordingPin {
            level: false,
            writes: 0,
        });

        adapter.set_state(true);
        assert!(adapter.is_set_high());

        adapter.set_state(false);
        assert!(adapter.is_set_low());

        let pin = adapter.into_inner();
        assert!(!pin.level);
        assert_eq!(pin.writes, 3);
    }
}

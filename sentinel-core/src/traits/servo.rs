//! Hobby servo trait

/// Trait for a position servo driven by pulse width
///
/// The servo holds whatever position corresponds to the last pulse width
/// written. Implementations keep repeating that pulse until told otherwise.
pub trait ServoDriver {
    /// Command a pulse width in microseconds
    ///
    /// Implementations clamp the width to their configured range.
    fn write_pulse_us(&mut self, width_us: u16);

    /// Last pulse width written, or 0 if detached
    fn pulse_us(&self) -> u16;

    /// Stop driving the servo (output held low)
    fn detach(&mut self);

    /// Check if the servo is being driven
    fn is_attached(&self) -> bool {
        self.pulse_us() != 0
    }
}

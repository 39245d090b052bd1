//! Laser pointer trait

/// Trait for the laser output
///
/// Implementations handle the electrical polarity; `on` always means the
/// beam is emitting.
pub trait LaserOutput {
    /// Turn the laser on or off
    fn set_on(&mut self, on: bool);

    /// Check if the laser is currently on
    fn is_on(&self) -> bool;
}

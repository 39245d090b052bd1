//! Axis types for the pan/tilt mechanism
//!
//! Each axis has a mechanical angle range and the servo pulse range that
//! spans it. Angles map linearly onto pulse widths.

/// Axis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Horizontal rotation
    Pan,
    /// Vertical rotation
    Tilt,
}

/// Mechanical travel of an axis, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngleRange {
    pub min_deg: f32,
    pub max_deg: f32,
}

impl Default for AngleRange {
    fn default() -> Self {
        Self::new(0.0, 180.0)
    }
}

impl AngleRange {
    pub const fn new(min_deg: f32, max_deg: f32) -> Self {
        Self { min_deg, max_deg }
    }

    /// Clamp an angle into the range
    pub fn clamp(&self, angle_deg: f32) -> f32 {
        angle_deg.clamp(self.min_deg, self.max_deg)
    }

    /// Check if an angle is within the range
    pub fn contains(&self, angle_deg: f32) -> bool {
        angle_deg >= self.min_deg && angle_deg <= self.max_deg
    }

    /// Centre of travel
    pub fn midpoint(&self) -> f32 {
        (self.min_deg + self.max_deg) / 2.0
    }

    pub fn span(&self) -> f32 {
        self.max_deg - self.min_deg
    }

    /// Finite bounds with `min_deg < max_deg`
    pub fn is_valid(&self) -> bool {
        self.min_deg.is_finite() && self.max_deg.is_finite() && self.min_deg < self.max_deg
    }
}

/// Servo pulse widths at the ends of travel, in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseRange {
    pub min_us: u16,
    pub max_us: u16,
}

impl Default for PulseRange {
    fn default() -> Self {
        Self::new(700, 2500)
    }
}

impl PulseRange {
    pub const fn new(min_us: u16, max_us: u16) -> Self {
        Self { min_us, max_us }
    }

    /// Clamp a pulse width into the range
    pub fn clamp(&self, width_us: u16) -> u16 {
        width_us.clamp(self.min_us, self.max_us)
    }

    pub fn span(&self) -> u16 {
        self.max_us - self.min_us
    }

    /// `min_us < max_us`
    pub fn is_valid(&self) -> bool {
        self.min_us < self.max_us
    }
}

/// Per-axis configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisConfig {
    /// Mechanical travel
    pub range: AngleRange,
    /// Pulse widths at `range.min_deg` and `range.max_deg`
    pub pulse: PulseRange,
    /// If true, a positive delta moves the axis toward `min_deg`
    pub inverted: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            range: AngleRange::default(),
            pulse: PulseRange::default(),
            inverted: false,
        }
    }
}

impl AxisConfig {
    /// Default pan axis (inverted relative to the host's error sign)
    pub fn pan() -> Self {
        Self {
            inverted: true,
            ..Self::default()
        }
    }

    /// Default tilt axis
    pub fn tilt() -> Self {
        Self::default()
    }

    /// Both ranges usable for clamping and interpolation
    pub fn is_valid(&self) -> bool {
        self.range.is_valid() && self.pulse.is_valid()
    }

    /// Replace unusable ranges with the defaults, keeping the inversion
    pub fn sanitized(mut self) -> Self {
        if !self.range.is_valid() {
            self.range = AngleRange::default();
        }
        if !self.pulse.is_valid() {
            self.pulse = PulseRange::default();
        }
        self
    }

    /// Target angle for a delta command from `current_deg`, clamped
    ///
    /// A NaN delta is treated as zero.
    pub fn target(&self, current_deg: f32, delta_deg: f32) -> f32 {
        let delta_deg = if delta_deg.is_nan() { 0.0 } else { delta_deg };
        let target = if self.inverted {
            current_deg - delta_deg
        } else {
            current_deg + delta_deg
        };
        self.range.clamp(target)
    }

    /// Pulse width for an angle
    ///
    /// Linear interpolation from the angle range onto the pulse range,
    /// rounded to the nearest microsecond (ties to even). Angles outside
    /// the range are clamped first.
    pub fn pulse_for(&self, angle_deg: f32) -> u16 {
        let angle_deg = self.range.clamp(angle_deg);
        let fraction = (angle_deg - self.range.min_deg) / self.range.span();
        let width = self.pulse.min_us as f32 + fraction * self.pulse.span() as f32;
        self.pulse.clamp(round_half_even(width) as u16)
    }
}

/// Round to the nearest integer, ties to even
fn round_half_even(x: f32) -> f32 {
    let floor = libm::floorf(x);
    let diff = x - floor;
    if diff < 0.5 {
        floor
    } else if diff > 0.5 {
        floor + 1.0
    } else if (floor as i64) % 2 == 0 {
        floor
    } else {
        floor + 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_mapping_bounds() {
        let axis = AxisConfig::default();
        assert_eq!(axis.pulse_for(0.0), 700);
        assert_eq!(axis.pulse_for(90.0), 1600);
        assert_eq!(axis.pulse_for(180.0), 2500);
    }

    #[test]
    fn test_pulse_mapping_rounds_ties_to_even() {
        let axis = AxisConfig::default();
        // 700 + 89.25 / 180 * 1800 = 1592.5
        assert_eq!(axis.pulse_for(89.25), 1592);
        // 700 + 0.15 / 180 * 1800 = 701.5
        assert_eq!(axis.pulse_for(0.15), 702);
        assert_eq!(axis.pulse_for(0.12), 701);
    }

    #[test]
    fn test_pulse_mapping_clamps_angle() {
        let axis = AxisConfig::default();
        assert_eq!(axis.pulse_for(-45.0), 700);
        assert_eq!(axis.pulse_for(270.0), 2500);
    }

    #[test]
    fn test_pulse_mapping_custom_range() {
        let axis = AxisConfig {
            range: AngleRange::new(30.0, 150.0),
            pulse: PulseRange::new(1000, 2000),
            inverted: false,
        };
        assert_eq!(axis.pulse_for(30.0), 1000);
        assert_eq!(axis.pulse_for(90.0), 1500);
        assert_eq!(axis.pulse_for(150.0), 2000);
    }

    #[test]
    fn test_target_inversion() {
        let pan = AxisConfig::pan();
        let tilt = AxisConfig::tilt();

        assert_eq!(pan.target(90.0, 2.5), 87.5);
        assert_eq!(tilt.target(90.0, 2.5), 92.5);
    }

    #[test]
    fn test_target_clamps() {
        let pan = AxisConfig::pan();
        assert_eq!(pan.target(10.0, 50.0), 0.0);
        assert_eq!(pan.target(170.0, -50.0), 180.0);
        assert_eq!(pan.target(90.0, f32::INFINITY), 0.0);
        assert_eq!(pan.target(90.0, f32::NAN), 90.0);
    }

    #[test]
    fn test_angle_range() {
        let range = AngleRange::default();
        assert_eq!(range.midpoint(), 90.0);
        assert_eq!(range.span(), 180.0);
        assert!(range.contains(0.0));
        assert!(range.contains(180.0));
        assert!(!range.contains(180.5));
        assert_eq!(range.clamp(-1.0), 0.0);
    }

    #[test]
    fn test_range_validity() {
        assert!(AngleRange::default().is_valid());
        assert!(!AngleRange::new(180.0, 0.0).is_valid());
        assert!(!AngleRange::new(90.0, 90.0).is_valid());
        assert!(!AngleRange::new(0.0, f32::INFINITY).is_valid());
        assert!(PulseRange::default().is_valid());
        assert!(!PulseRange::new(2500, 700).is_valid());
    }

    #[test]
    fn test_sanitized_replaces_reversed_ranges() {
        let axis = AxisConfig {
            range: AngleRange::new(180.0, 0.0),
            pulse: PulseRange::new(2500, 700),
            inverted: true,
        }
        .sanitized();

        assert_eq!(axis.range, AngleRange::default());
        assert_eq!(axis.pulse, PulseRange::default());
        assert!(axis.inverted);

        let custom = AxisConfig {
            range: AngleRange::new(30.0, 150.0),
            pulse: PulseRange::new(1000, 2000),
            inverted: false,
        };
        assert_eq!(custom.sanitized(), custom);
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(1.5), 2.0);
        assert_eq!(round_half_even(2.5), 2.0);
        assert_eq!(round_half_even(2.4), 2.0);
        assert_eq!(round_half_even(2.6), 3.0);
        assert_eq!(round_half_even(1589.5), 1590.0);
    }
}

//! Diagnostic servo sweep
//!
//! Walks each axis across its full travel in both directions so wiring and
//! mechanical limits can be checked by eye. The plan is a plain iterator of
//! [`SweepEvent`]s; the caller writes the announcements to the serial link,
//! moves the servos and waits `dwell_ms` after every move.

use super::axis::{AngleRange, Axis};
use super::controller::MotionConfig;

pub const MSG_START: &str = "Testing servo pins...\r\n";
pub const MSG_PAN: &str = "Pan Servo:\r\n";
pub const MSG_TILT: &str = "Tilt Servo:\r\n";
pub const MSG_REVERSE: &str = "Reversing servo directions...\r\n";
pub const MSG_DONE: &str = "Servo pin test complete.\r\n";

/// One sweep pass over one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SweepPhase {
    PanForward,
    TiltForward,
    PanReverse,
    TiltReverse,
}

impl SweepPhase {
    const ORDER: [SweepPhase; 4] = [
        SweepPhase::PanForward,
        SweepPhase::TiltForward,
        SweepPhase::PanReverse,
        SweepPhase::TiltReverse,
    ];

    pub fn axis(self) -> Axis {
        match self {
            SweepPhase::PanForward | SweepPhase::PanReverse => Axis::Pan,
            SweepPhase::TiltForward | SweepPhase::TiltReverse => Axis::Tilt,
        }
    }

    pub fn is_reverse(self) -> bool {
        matches!(self, SweepPhase::PanReverse | SweepPhase::TiltReverse)
    }

    /// Announcements written before the phase starts
    fn preamble(self) -> &'static [&'static str] {
        match self {
            SweepPhase::PanForward => &[MSG_START, MSG_PAN],
            SweepPhase::TiltForward => &[MSG_TILT],
            SweepPhase::PanReverse => &[MSG_REVERSE, MSG_PAN],
            SweepPhase::TiltReverse => &[MSG_TILT],
        }
    }
}

/// Output of the sweep plan
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SweepEvent {
    /// Progress text for the serial link
    Announce(&'static str),
    /// Move one axis to an absolute angle, then dwell
    Move { axis: Axis, angle_deg: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Preamble { phase: usize, line: usize },
    Moves { phase: usize, index: u16 },
    Done,
    Finished,
}

/// Iterator over the full diagnostic sweep
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pan: AngleRange,
    tilt: AngleRange,
    step_deg: u16,
    cursor: Cursor,
}

impl SweepPlan {
    /// Create a sweep over the configured axis ranges
    ///
    /// A zero step is treated as 1°.
    pub fn new(motion: &MotionConfig, step_deg: u16) -> Self {
        Self {
            pan: motion.pan.range,
            tilt: motion.tilt.range,
            step_deg: step_deg.max(1),
            cursor: Cursor::Preamble { phase: 0, line: 0 },
        }
    }

    pub fn step_deg(&self) -> u16 {
        self.step_deg
    }

    /// Angle of move `index` within `phase`, if still inside the range
    fn angle(&self, phase: SweepPhase, index: u16) -> Option<f32> {
        let range = match phase.axis() {
            Axis::Pan => &self.pan,
            Axis::Tilt => &self.tilt,
        };
        let offset = f32::from(index) * f32::from(self.step_deg);

        if phase.is_reverse() {
            let angle = range.max_deg - offset;
            (angle >= range.min_deg).then_some(angle)
        } else {
            let angle = range.min_deg + offset;
            (angle <= range.max_deg).then_some(angle)
        }
    }

    fn next_phase(phase: usize) -> Cursor {
        if phase + 1 < SweepPhase::ORDER.len() {
            Cursor::Preamble {
                phase: phase + 1,
                line: 0,
            }
        } else {
            Cursor::Done
        }
    }
}

impl Iterator for SweepPlan {
    type Item = SweepEvent;

    fn next(&mut self) -> Option<SweepEvent> {
        loop {
            match self.cursor {
                Cursor::Preamble { phase, line } => {
                    let preamble = SweepPhase::ORDER[phase].preamble();
                    if let Some(&text) = preamble.get(line) {
                        self.cursor = Cursor::Preamble {
                            phase,
                            line: line + 1,
                        };
                        return Some(SweepEvent::Announce(text));
                    }
                    self.cursor = Cursor::Moves { phase, index: 0 };
                }
                Cursor::Moves { phase, index } => {
                    let current = SweepPhase::ORDER[phase];
                    match self.angle(current, index) {
                        Some(angle_deg) => {
                            self.cursor = Cursor::Moves {
                                phase,
                                index: index.saturating_add(1),
                            };
                            return Some(SweepEvent::Move {
                                axis: current.axis(),
                                angle_deg,
                            });
                        }
                        None => self.cursor = Self::next_phase(phase),
                    }
                }
                Cursor::Done => {
                    self.cursor = Cursor::Finished;
                    return Some(SweepEvent::Announce(MSG_DONE));
                }
                Cursor::Finished => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(plan: SweepPlan) -> Vec<(Axis, f32)> {
        plan.filter_map(|e| match e {
            SweepEvent::Move { axis, angle_deg } => Some((axis, angle_deg)),
            SweepEvent::Announce(_) => None,
        })
        .collect()
    }

    fn announcements(plan: SweepPlan) -> Vec<&'static str> {
        plan.filter_map(|e| match e {
            SweepEvent::Announce(text) => Some(text),
            SweepEvent::Move { .. } => None,
        })
        .collect()
    }

    #[test]
    fn test_default_sweep_order() {
        let all = moves(SweepPlan::new(&MotionConfig::default(), 10));
        assert_eq!(all.len(), 4 * 19);

        let (pan_fwd, rest) = all.split_at(19);
        let (tilt_fwd, rest) = rest.split_at(19);
        let (pan_rev, tilt_rev) = rest.split_at(19);

        assert!(pan_fwd.iter().all(|(a, _)| *a == Axis::Pan));
        assert!(tilt_fwd.iter().all(|(a, _)| *a == Axis::Tilt));
        assert!(pan_rev.iter().all(|(a, _)| *a == Axis::Pan));
        assert!(tilt_rev.iter().all(|(a, _)| *a == Axis::Tilt));

        assert_eq!(pan_fwd.first().unwrap().1, 0.0);
        assert_eq!(pan_fwd.last().unwrap().1, 180.0);
        assert_eq!(tilt_rev.first().unwrap().1, 180.0);
        assert_eq!(tilt_rev.last().unwrap().1, 0.0);
        assert_eq!(pan_fwd[9].1, 90.0);
    }

    #[test]
    fn test_announcements() {
        let text = announcements(SweepPlan::new(&MotionConfig::default(), 10));
        assert_eq!(
            text,
            vec![
                MSG_START,
                MSG_PAN,
                MSG_TILT,
                MSG_REVERSE,
                MSG_PAN,
                MSG_TILT,
                MSG_DONE
            ]
        );
    }

    #[test]
    fn test_announcement_precedes_moves() {
        let mut plan = SweepPlan::new(&MotionConfig::default(), 10);
        assert_eq!(plan.next(), Some(SweepEvent::Announce(MSG_START)));
        assert_eq!(plan.next(), Some(SweepEvent::Announce(MSG_PAN)));
        assert_eq!(
            plan.next(),
            Some(SweepEvent::Move {
                axis: Axis::Pan,
                angle_deg: 0.0
            })
        );
    }

    #[test]
    fn test_uneven_step_stops_inside_range() {
        let all = moves(SweepPlan::new(&MotionConfig::default(), 50));
        let pan_fwd: Vec<f32> = all[..4].iter().map(|(_, a)| *a).collect();
        assert_eq!(pan_fwd, vec![0.0, 50.0, 100.0, 150.0]);
        assert_eq!(all.len(), 16);
        assert!(all.iter().all(|(_, a)| (0.0..=180.0).contains(a)));
    }

    #[test]
    fn test_zero_step_is_one_degree() {
        let plan = SweepPlan::new(&MotionConfig::default(), 0);
        assert_eq!(plan.step_deg(), 1);
        assert_eq!(moves(plan).len(), 4 * 181);
    }

    #[test]
    fn test_plan_ends() {
        let mut plan = SweepPlan::new(&MotionConfig::default(), 90);
        let count = plan.by_ref().count();
        assert_eq!(count, 7 + 4 * 3);
        assert_eq!(plan.next(), None);
    }
}

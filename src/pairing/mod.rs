//! Side-by-side pairing check over matched instances.

use crate::candidate::MatchCandidate;

/// Maximum vertical center offset (exclusive) for a pair to count as aligned.
pub const ALIGNMENT_TOLERANCE_PX: u32 = 8;

/// Outcome of the pairing check for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    /// Not exactly two instances, or the two are vertically offset.
    Unaligned,
    /// Two instances side by side; `distance` is the center-to-center length.
    Aligned { distance: f64 },
}

impl Alignment {
    pub fn is_aligned(&self) -> bool {
        matches!(self, Alignment::Aligned { .. })
    }

    /// Inter-instance distance, present only for aligned pairs.
    pub fn distance(&self) -> Option<f64> {
        match self {
            Alignment::Aligned { distance } => Some(*distance),
            Alignment::Unaligned => None,
        }
    }
}

/// Classifies a candidate list as an aligned pair or not.
#[derive(Clone, Copy, Debug)]
pub struct AlignmentValidator {
    half_width: i64,
    half_height: i64,
    tolerance: u32,
}

impl AlignmentValidator {
    /// Creates a validator for instances of a `template_width x template_height` template.
    pub fn new(template_width: usize, template_height: usize, tolerance: u32) -> Self {
        Self {
            half_width: (template_width / 2) as i64,
            half_height: (template_height / 2) as i64,
            tolerance,
        }
    }

    /// Returns the tolerance in pixels.
    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    fn center(&self, c: &MatchCandidate) -> (i64, i64) {
        (c.x as i64 + self.half_width, c.y as i64 + self.half_height)
    }

    /// Checks whether `candidates` form one horizontally aligned pair.
    ///
    /// The pair is ordered left to right by x before measuring, so the order
    /// in which the matcher extracted them does not matter.
    pub fn validate(&self, candidates: &[MatchCandidate]) -> Alignment {
        let [a, b] = candidates else {
            return Alignment::Unaligned;
        };
        let (left, right) = if a.x < b.x { (a, b) } else { (b, a) };

        let (lx, ly) = self.center(left);
        let (rx, ry) = self.center(right);
        if (ry - ly).unsigned_abs() >= u64::from(self.tolerance) {
            return Alignment::Unaligned;
        }

        let dx = (rx - lx) as f64;
        let dy = (ry - ly) as f64;
        Alignment::Aligned {
            distance: dx.hypot(dy),
        }
    }
}

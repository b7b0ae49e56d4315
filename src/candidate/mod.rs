//! Match candidates and duplicate suppression.

pub(crate) mod flood;

/// Top-left placement of one detected template instance, in ROI coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchCandidate {
    /// X coordinate (column) of the placement.
    pub x: usize,
    /// Y coordinate (row) of the placement.
    pub y: usize,
    /// Surface score at extraction time.
    pub score: f32,
}

impl MatchCandidate {
    /// Returns the placement as an `(x, y)` pair.
    pub fn location(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

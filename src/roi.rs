//! Region-of-interest geometry.
//!
//! The watched region is stored as fractions of the frame size and resolved
//! to pixels for every frame, so a stream that changes resolution midway
//! keeps watching the same relative area.

/// Pixel rectangle with its top-left corner at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Region expressed as fractions of the frame width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoiFraction {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl Default for RoiFraction {
    fn default() -> Self {
        Self {
            start_x: 0.14,
            start_y: 0.4,
            end_x: 0.85,
            end_y: 0.65,
        }
    }
}

impl RoiFraction {
    /// Returns true when all fractions lie in `[0, 1]` and the region is non-empty.
    pub fn is_valid(&self) -> bool {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        in_unit(self.start_x)
            && in_unit(self.start_y)
            && in_unit(self.end_x)
            && in_unit(self.end_y)
            && self.end_x > self.start_x
            && self.end_y > self.start_y
    }

    /// Resolves the region against a `frame_width x frame_height` frame.
    ///
    /// Offsets and extents are each truncated toward zero (the extent is the
    /// truncated fractional span, not `end - start` in pixels), then clamped
    /// so the rectangle stays inside the frame.
    pub fn resolve(&self, frame_width: usize, frame_height: usize) -> Rect {
        let fw = frame_width as f64;
        let fh = frame_height as f64;
        let x = ((fw * self.start_x) as usize).min(frame_width);
        let y = ((fh * self.start_y) as usize).min(frame_height);
        let width = ((fw * (self.end_x - self.start_x)) as usize).min(frame_width - x);
        let height = ((fh * (self.end_y - self.start_y)) as usize).min(frame_height - y);
        Rect::new(x, y, width, height)
    }
}

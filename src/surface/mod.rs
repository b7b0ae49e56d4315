//! Response surface construction.
//!
//! The surface holds one normalized cross-correlation score per valid
//! template placement inside the region of interest. Scores not strictly
//! above [`CLIP_FLOOR`] are zeroed before the surface is handed out. The
//! floor is fixed and independent of the matcher threshold, so a matcher
//! asked for peaks down to `0.1` still never sees anything at or below
//! `0.9`.

use crate::kernel::Kernel;
use crate::template::Template;
use crate::trace::{trace_event, trace_span};
use crate::util::{SentinelError, SentinelResult};
use crate::ImageView;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::NccScalar as Ncc;
#[cfg(feature = "simd")]
use crate::kernel::simd::NccSimd as Ncc;

/// Scores at or below this value are zeroed in every surface.
pub const CLIP_FLOOR: f32 = 0.9;

/// Dense grid of per-offset match scores.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseSurface {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ResponseSurface {
    /// Wraps a row-major score grid.
    pub fn from_vec(data: Vec<f32>, width: usize, height: usize) -> SentinelResult<Self> {
        if width == 0 || height == 0 {
            return Err(SentinelError::InvalidDimensions { width, height });
        }
        let needed = width * height;
        if data.len() != needed {
            return Err(SentinelError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Number of valid horizontal offsets.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of valid vertical offsets.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the score at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, value: f32) {
        self.data[y * self.width + x] = value;
    }

    /// Row-major scores.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the first maximum in row-major order as `(x, y, score)`.
    pub fn max_loc(&self) -> (usize, usize, f32) {
        let mut best_idx = 0usize;
        let mut best = f32::NEG_INFINITY;
        for (idx, &value) in self.data.iter().enumerate() {
            if value > best {
                best = value;
                best_idx = idx;
            }
        }
        (best_idx % self.width, best_idx / self.width, best)
    }
}

/// Builds the clipped response surface of `template` over `roi`.
///
/// Fails with [`SentinelError::InvalidDimensions`] (carrying the ROI size)
/// when the template does not fit inside the ROI in either dimension, and
/// with [`SentinelError::ChannelMismatch`] when the two differ in channels.
pub fn build_response_surface(
    roi: ImageView<'_, u8>,
    template: &Template,
) -> SentinelResult<ResponseSurface> {
    let plan = template.plan();
    if roi.channels() != plan.channels() {
        return Err(SentinelError::ChannelMismatch {
            template: plan.channels(),
            image: roi.channels(),
        });
    }
    if roi.width() < plan.width() || roi.height() < plan.height() {
        return Err(SentinelError::InvalidDimensions {
            width: roi.width(),
            height: roi.height(),
        });
    }

    let width = roi.width() - plan.width() + 1;
    let height = roi.height() - plan.height() + 1;
    let _span = trace_span!("response_surface", width = width, height = height).entered();

    let mut data = vec![0.0f32; width * height];
    let score_row = |y: usize, row: &mut [f32]| {
        for (x, cell) in row.iter_mut().enumerate() {
            let score = Ncc::score_at(roi, plan, x, y);
            *cell = if score > CLIP_FLOOR { score } else { 0.0 };
        }
    };

    #[cfg(feature = "rayon")]
    {
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| score_row(y, row));
    }
    #[cfg(not(feature = "rayon"))]
    {
        data.chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| score_row(y, row));
    }

    let surviving = data.iter().filter(|&&v| v > 0.0).count();
    trace_event!("surface_built", cells = data.len(), surviving = surviving);

    ResponseSurface::from_vec(data, width, height)
}

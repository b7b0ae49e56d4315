//! Template plan precomputation for normalized cross-correlation.

use crate::image::ImageView;
use crate::util::{SentinelError, SentinelResult};

/// Template samples as `f32` plus their precomputed energy.
///
/// Cross-correlation here is not mean-centred: the score at an offset is
/// `sum(T * I) / sqrt(sum(T^2) * sum(I^2))` with the sums running over every
/// channel of every pixel, so the plan only needs the raw interleaved values
/// and `sum(T^2)`.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    channels: usize,
    values: Vec<f32>,
    energy: f32,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_, u8>) -> SentinelResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let channels = tpl.channels();
        let count = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(SentinelError::InvalidDimensions { width, height })?;

        let mut values = Vec::with_capacity(count);
        let mut energy = 0.0f64;
        for y in 0..height {
            let row = tpl.row(y).ok_or(SentinelError::BufferTooSmall {
                needed: count,
                got: values.len(),
            })?;
            for &value in row {
                let v = f32::from(value);
                energy += f64::from(v) * f64::from(v);
                values.push(v);
            }
        }

        if energy <= 0.0 {
            return Err(SentinelError::DegenerateTemplate {
                reason: "all pixels are zero",
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            values,
            energy: energy as f32,
        })
    }

    /// Returns the template width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Samples per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples in one template row, `width * channels`.
    pub fn row_len(&self) -> usize {
        self.width * self.channels
    }

    /// Returns the row-major interleaved template values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns `sum(T^2)`.
    pub fn energy(&self) -> f32 {
        self.energy
    }
}

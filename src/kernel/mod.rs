//! Correlation kernel implementations.

use crate::template::TemplatePlan;
use crate::ImageView;

/// Per-offset scoring kernel for normalized cross-correlation.
pub trait Kernel {
    /// Computes the score with the template's top-left corner at `(x, y)`.
    ///
    /// The caller guarantees the placement lies fully inside `image`. A window
    /// with zero energy scores `0.0`, as does any non-finite result.
    fn score_at(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> f32;
}

/// Turns accumulated sums into a normalized score.
#[inline]
pub(crate) fn normalize(dot: f32, window_energy: f32, template_energy: f32) -> f32 {
    if window_energy <= 0.0 {
        return 0.0;
    }
    let score = dot / (template_energy.sqrt() * window_energy.sqrt());
    if score.is_finite() {
        score
    } else {
        0.0
    }
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

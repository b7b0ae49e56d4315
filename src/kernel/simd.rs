//! `wide::f32x8` correlation kernel.
//!
//! Each template row is walked in 8-sample chunks, with the leftover samples
//! of the row accumulated in scalar.

use crate::kernel::{normalize, Kernel};
use crate::template::TemplatePlan;
use crate::ImageView;
use wide::f32x8;

const LANES: usize = 8;

#[inline]
fn widen(pixels: &[u8]) -> f32x8 {
    let mut lanes = [0.0f32; LANES];
    for (lane, &pixel) in lanes.iter_mut().zip(pixels) {
        *lane = f32::from(pixel);
    }
    f32x8::from(lanes)
}

#[inline]
fn lanes_of(values: &[f32]) -> f32x8 {
    let mut lanes = [0.0f32; LANES];
    lanes.copy_from_slice(&values[..LANES]);
    f32x8::from(lanes)
}

/// Vectorized normalized cross-correlation kernel.
pub struct NccSimd;

impl Kernel for NccSimd {
    fn score_at(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> f32 {
        let row_len = plan.row_len();
        let start = x * plan.channels();

        let mut dot = f32x8::ZERO;
        let mut energy = f32x8::ZERO;
        let mut dot_tail = 0.0f32;
        let mut energy_tail = 0.0f32;

        for (ty, tpl_row) in plan.values().chunks_exact(row_len).enumerate() {
            let Some(img_row) = image.row(y + ty) else {
                return 0.0;
            };
            let window = &img_row[start..start + row_len];

            let pixel_chunks = window.chunks_exact(LANES);
            let value_chunks = tpl_row.chunks_exact(LANES);
            let pixel_tail = pixel_chunks.remainder();
            let value_tail = value_chunks.remainder();

            for (pixels, tpl) in pixel_chunks.zip(value_chunks) {
                let v = widen(pixels);
                dot += lanes_of(tpl) * v;
                energy += v * v;
            }
            for (&pixel, &t) in pixel_tail.iter().zip(value_tail) {
                let v = f32::from(pixel);
                dot_tail += t * v;
                energy_tail += v * v;
            }
        }

        let dot = dot.reduce_add() + dot_tail;
        let window_energy = energy.reduce_add() + energy_tail;
        normalize(dot, window_energy, plan.energy())
    }
}

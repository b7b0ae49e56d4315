//! Scalar reference kernel.

use crate::kernel::{normalize, Kernel};
use crate::template::TemplatePlan;
use crate::ImageView;

/// Scalar normalized cross-correlation kernel.
pub struct NccScalar;

impl Kernel for NccScalar {
    fn score_at(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> f32 {
        let row_len = plan.row_len();
        let start = x * plan.channels();

        let mut dot = 0.0f32;
        let mut window_energy = 0.0f32;
        for (ty, tpl_row) in plan.values().chunks_exact(row_len).enumerate() {
            let Some(img_row) = image.row(y + ty) else {
                return 0.0;
            };
            let window = &img_row[start..start + row_len];
            for (&pixel, &t) in window.iter().zip(tpl_row) {
                let v = f32::from(pixel);
                dot += t * v;
                window_energy += v * v;
            }
        }

        normalize(dot, window_energy, plan.energy())
    }
}

#[cfg(test)]
mod tests {
    use super::NccScalar;
    use crate::kernel::Kernel;
    use crate::{ImageView, OwnedImage, Template};

    #[test]
    fn exact_copy_scores_one() {
        let data: Vec<u8> = (0..12u8).map(|v| v * 20 + 5).collect();
        let template = Template::new(data.clone(), 4, 3).unwrap();
        let image = ImageView::from_slice(&data, 4, 3).unwrap();
        let score = NccScalar::score_at(image, template.plan(), 0, 0);
        assert!((score - 1.0).abs() < 1e-5, "score {score}");
    }

    #[test]
    fn scaled_copy_also_scores_one() {
        let data: Vec<u8> = vec![10, 20, 30, 40];
        let scaled: Vec<u8> = data.iter().map(|v| v * 2).collect();
        let template = Template::new(data, 2, 2).unwrap();
        let image = ImageView::from_slice(&scaled, 2, 2).unwrap();
        let score = NccScalar::score_at(image, template.plan(), 0, 0);
        assert!((score - 1.0).abs() < 1e-5, "score {score}");
    }

    #[test]
    fn black_window_scores_zero() {
        let template = Template::new(vec![255, 0, 0, 255], 2, 2).unwrap();
        let image_data = vec![0u8; 9];
        let image = ImageView::from_slice(&image_data, 3, 3).unwrap();
        assert_eq!(NccScalar::score_at(image, template.plan(), 1, 1), 0.0);
    }

    #[test]
    fn hue_only_difference_scores_one_over_root_three() {
        // Pure red against the gray of equal luma.
        let template = Template::from_image(
            OwnedImage::interleaved([255u8, 0, 0].repeat(4), 2, 2, 3).unwrap(),
        )
        .unwrap();
        let gray = OwnedImage::interleaved(vec![54u8; 12], 2, 2, 3).unwrap();
        let score = NccScalar::score_at(gray.view(), template.plan(), 0, 0);
        assert!((score - 1.0 / 3f32.sqrt()).abs() < 1e-5, "score {score}");
    }
}

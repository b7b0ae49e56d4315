//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Everything decoded here
//! becomes interleaved 8-bit RGB, so templates and frames always correlate
//! over the same three channels.

use crate::image::OwnedImage;
use crate::util::{SentinelError, SentinelResult};
use std::path::Path;

/// Samples per pixel of every decoded image.
pub const RGB_CHANNELS: usize = 3;

/// Creates an owned image from an RGB image buffer.
pub fn owned_from_rgb_image(img: &image::RgbImage) -> SentinelResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    OwnedImage::interleaved(img.as_raw().clone(), width, height, RGB_CHANNELS)
}

/// Converts any decoded image to owned 8-bit RGB.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> SentinelResult<OwnedImage> {
    owned_from_rgb_image(&img.to_rgb8())
}

/// Loads an image from disk as 8-bit RGB.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> SentinelResult<OwnedImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|err| SentinelError::ImageIo {
        reason: format!("{}: {err}", path.display()),
    })?;
    owned_from_dynamic_image(&img)
}

#[cfg(test)]
mod tests {
    use super::owned_from_dynamic_image;
    use image::{DynamicImage, GrayImage, Luma};

    #[test]
    fn gray_input_is_replicated_across_channels() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 1, Luma([90])));
        let owned = owned_from_dynamic_image(&gray).unwrap();
        assert_eq!(owned.channels(), 3);
        assert_eq!(owned.data(), &[90, 90, 90, 90, 90, 90]);
    }
}

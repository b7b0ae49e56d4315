//! Owned contiguous image buffers, grayscale or interleaved colour.

use crate::image::ImageView;
use crate::util::{SentinelError, SentinelResult};

/// Owned contiguous image buffer with `channels` interleaved samples per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
}

impl OwnedImage {
    /// Wraps a single-channel row-major buffer of exactly `width * height` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> SentinelResult<Self> {
        Self::interleaved(data, width, height, 1)
    }

    /// Wraps a row-major buffer of exactly `width * height * channels` bytes.
    pub fn interleaved(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> SentinelResult<Self> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(SentinelError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(SentinelError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(SentinelError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(SentinelError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates a `width * height` image filled with `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> SentinelResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(SentinelError::InvalidDimensions { width, height })?;
        Self::new(vec![value; len], width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Samples per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the row-major sample data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copies `patch` into this image with its top-left corner at `(x, y)`.
    ///
    /// Pixels falling outside the image are dropped, as is a patch with a
    /// different channel count.
    pub fn blit(&mut self, patch: ImageView<'_, u8>, x: usize, y: usize) {
        if x >= self.width || patch.channels() != self.channels {
            return;
        }
        let c = self.channels;
        for py in 0..patch.height() {
            let dst_y = y + py;
            if dst_y >= self.height {
                break;
            }
            let Some(src) = patch.row(py) else {
                break;
            };
            let visible = src.len().min((self.width - x) * c);
            let start = (dst_y * self.width + x) * c;
            self.data[start..start + visible].copy_from_slice(&src[..visible]);
        }
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.width * self.channels,
        }
    }
}

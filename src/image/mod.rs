//! Image buffers with interleaved channels and borrowed views.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride
//! (elements between row starts). Pixels may be interleaved, e.g. three
//! samples per pixel for RGB; `width` always counts pixels. Cropping a frame
//! down to its region of interest produces another view over the same
//! backing slice, so the per-frame pipeline never copies pixel data.

use crate::roi::Rect;
use crate::util::{SentinelError, SentinelResult};

#[cfg(feature = "image-io")]
pub mod io;
mod owned;

pub use owned::OwnedImage;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous single-channel view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> SentinelResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a single-channel view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> SentinelResult<Self> {
        Self::with_layout(data, width, height, 1, stride)
    }

    /// Creates a contiguous view of `channels` interleaved samples per pixel.
    pub fn interleaved(
        data: &'a [T],
        width: usize,
        height: usize,
        channels: usize,
    ) -> SentinelResult<Self> {
        let stride = width
            .checked_mul(channels)
            .ok_or(SentinelError::InvalidDimensions { width, height })?;
        Self::with_layout(data, width, height, channels, stride)
    }

    fn with_layout(
        data: &'a [T],
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
    ) -> SentinelResult<Self> {
        let needed = required_len(width, height, channels, stride)?;
        if data.len() < needed {
            return Err(SentinelError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            stride,
        })
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

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the samples of pixel `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [T]> {
        if x >= self.width {
            return None;
        }
        let start = x * self.channels;
        self.row(y)?.get(start..start + self.channels)
    }

    /// Returns row `y` as `width * channels` contiguous samples.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.channels)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy view of `rect` inside this image.
    pub fn crop(&self, rect: Rect) -> SentinelResult<ImageView<'a, T>> {
        let Rect {
            x,
            y,
            width,
            height,
        } = rect;
        if width == 0 || height == 0 {
            return Err(SentinelError::InvalidDimensions { width, height });
        }

        let out_of_bounds = SentinelError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let fits = x
            .checked_add(width)
            .zip(y.checked_add(height))
            .is_some_and(|(end_x, end_y)| end_x <= self.width && end_y <= self.height);
        if !fits {
            return Err(out_of_bounds);
        }

        let start = y * self.stride + x * self.channels;
        let data = self.data.get(start..).ok_or(SentinelError::BufferTooSmall {
            needed: start + 1,
            got: self.data.len(),
        })?;
        ImageView::with_layout(data, width, height, self.channels, self.stride)
    }
}

fn required_len(
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
) -> SentinelResult<usize> {
    let row_len = width
        .checked_mul(channels)
        .ok_or(SentinelError::InvalidDimensions { width, height })?;
    if row_len == 0 || height == 0 {
        return Err(SentinelError::InvalidDimensions { width, height });
    }
    if stride < row_len {
        return Err(SentinelError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(SentinelError::InvalidDimensions { width, height })
}

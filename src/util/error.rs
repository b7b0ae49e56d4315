//! Error types for sentinel.

use thiserror::Error;

/// Result alias for sentinel operations.
pub type SentinelResult<T> = std::result::Result<T, SentinelError>;

/// Errors that can occur while building the detector or processing a stream.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SentinelError {
    /// Image dimensions are zero, overflow, or the template exceeds the ROI.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than the row width.
    #[error("invalid stride: width={width}, stride={stride}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is too small for the requested view.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Requested region does not fit inside the image.
    #[error(
        "roi out of bounds: x={x}, y={y}, width={width}, height={height}, \
         image={img_width}x{img_height}"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Frame and template carry different samples per pixel.
    #[error("channel mismatch: template has {template}, image has {image}")]
    ChannelMismatch { template: usize, image: usize },
    /// Template has no energy, so the normalized correlation is undefined.
    #[error("degenerate template: {reason}")]
    DegenerateTemplate { reason: &'static str },
    /// Image decoding or loading failed.
    #[error("image io failed: {reason}")]
    ImageIo { reason: String },
    /// The frame source could not be opened.
    #[error("source unavailable: {identifier}: {reason}")]
    SourceUnavailable { identifier: String, reason: String },
    /// A frame delivered by the source could not be decoded.
    #[error("frame {index} decode failed: {reason}")]
    FrameDecode { index: u64, reason: String },
    /// Writing to the report sink or reading a stream failed.
    #[error("io failed: {reason}")]
    Io { reason: String },
    /// Detector configuration is inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

impl From<std::io::Error> for SentinelError {
    fn from(err: std::io::Error) -> Self {
        SentinelError::Io {
            reason: err.to_string(),
        }
    }
}

//! Frame sources.
//!
//! A source hands out frames one at a time through a blocking
//! [`FrameSource::read`]; `Ok(None)` is the normal end of the stream.
//! [`open`] picks a concrete source from an identifier:
//!
//! * `-`: binary netpbm stream on stdin.
//! * a directory: image files in file-name order.
//! * a `.pgm` / `.ppm` / `.pnm` file: binary netpbm stream.
//! * anything else: decoded by an `ffmpeg` child process into a PPM pipe.
//!
//! All of these decode through the `image` crate and yield RGB frames, so
//! they need the `image-io` feature. [`IterSource`] is always available.

use crate::image::OwnedImage;
use crate::util::{SentinelError, SentinelResult};

#[cfg(feature = "image-io")]
mod ffmpeg;
#[cfg(feature = "image-io")]
mod pnm;
#[cfg(feature = "image-io")]
mod sequence;

#[cfg(feature = "image-io")]
pub use ffmpeg::FfmpegSource;
#[cfg(feature = "image-io")]
pub use pnm::{PnmStream, MAX_FRAME_PIXELS};
#[cfg(feature = "image-io")]
pub use sequence::ImageSequence;

/// One decoded frame and its zero-based position in the stream.
#[derive(Clone, Debug)]
pub struct Frame {
    pub index: u64,
    pub image: OwnedImage,
}

/// Pull-based producer of frames.
pub trait FrameSource {
    /// Blocks until the next frame is available; `Ok(None)` at end of stream.
    fn read(&mut self) -> SentinelResult<Option<Frame>>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read(&mut self) -> SentinelResult<Option<Frame>> {
        (**self).read()
    }
}

/// Adapts any iterator of images into a frame source.
pub struct IterSource<I> {
    images: I,
    next_index: u64,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = OwnedImage>,
{
    pub fn new(images: I) -> Self {
        Self {
            images,
            next_index: 0,
        }
    }
}

impl<I> FrameSource for IterSource<I>
where
    I: Iterator<Item = OwnedImage>,
{
    fn read(&mut self) -> SentinelResult<Option<Frame>> {
        let Some(image) = self.images.next() else {
            return Ok(None);
        };
        let index = self.next_index;
        self.next_index += 1;
        Ok(Some(Frame { index, image }))
    }
}

fn unavailable(identifier: &str, reason: impl ToString) -> SentinelError {
    SentinelError::SourceUnavailable {
        identifier: identifier.to_owned(),
        reason: reason.to_string(),
    }
}

/// Opens the source named by `identifier`.
///
/// Failures to open surface here, before any frame is requested.
#[cfg(feature = "image-io")]
pub fn open(identifier: &str) -> SentinelResult<Box<dyn FrameSource>> {
    use std::fs::File;
    use std::io::{self, BufReader};
    use std::path::Path;

    if identifier == "-" {
        return Ok(Box::new(PnmStream::new(io::stdin().lock())));
    }

    let path = Path::new(identifier);
    if path.is_dir() {
        return Ok(Box::new(ImageSequence::open(identifier)?));
    }

    let is_netpbm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ["pgm", "ppm", "pnm"]
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });
    if is_netpbm {
        let file = File::open(path).map_err(|err| unavailable(identifier, err))?;
        return Ok(Box::new(PnmStream::new(BufReader::new(file))));
    }

    Ok(Box::new(FfmpegSource::spawn(identifier)?))
}

/// Opens the source named by `identifier`.
#[cfg(not(feature = "image-io"))]
pub fn open(identifier: &str) -> SentinelResult<Box<dyn FrameSource>> {
    Err(unavailable(
        identifier,
        "decoding sources require the image-io feature",
    ))
}

//! Netpbm (`P5`/`P6`) frame stream.
//!
//! A PNM stream is a plain concatenation of binary netpbm images, which is
//! what `ffmpeg -f image2pipe -vcodec ppm` writes. Each frame is decoded by
//! the `image` crate's PNM decoder directly from the shared reader, which
//! consumes exactly one image per call.

use std::io::BufRead;

use image::codecs::pnm::PnmDecoder;
use image::{DynamicImage, ImageDecoder};

use crate::image::io::owned_from_dynamic_image;
use crate::source::{Frame, FrameSource};
use crate::util::{SentinelError, SentinelResult};

/// Largest frame accepted, in pixels. Larger headers are decode errors.
pub const MAX_FRAME_PIXELS: u64 = 1 << 26;

/// Reads consecutive netpbm frames from `R` as RGB.
pub struct PnmStream<R> {
    reader: R,
    next_index: u64,
}

impl<R: BufRead> PnmStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            next_index: 0,
        }
    }

    /// Skips inter-frame whitespace; returns false at end of stream.
    fn at_frame_start(&mut self) -> SentinelResult<bool> {
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                return Ok(false);
            }
            let blank = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
            if blank == 0 {
                return Ok(true);
            }
            self.reader.consume(blank);
        }
    }

    fn decode(&mut self) -> SentinelResult<DynamicImage> {
        let index = self.next_index;
        let decoder = PnmDecoder::new(&mut self.reader).map_err(|err| frame_error(index, err))?;
        let (width, height) = decoder.dimensions();
        if u64::from(width) * u64::from(height) > MAX_FRAME_PIXELS {
            return Err(frame_error(
                index,
                format!("{width}x{height} exceeds {MAX_FRAME_PIXELS} pixels"),
            ));
        }
        DynamicImage::from_decoder(decoder).map_err(|err| frame_error(index, err))
    }
}

fn frame_error(index: u64, reason: impl ToString) -> SentinelError {
    SentinelError::FrameDecode {
        index,
        reason: reason.to_string(),
    }
}

impl<R: BufRead> FrameSource for PnmStream<R> {
    fn read(&mut self) -> SentinelResult<Option<Frame>> {
        if !self.at_frame_start()? {
            return Ok(None);
        }
        let index = self.next_index;
        let decoded = self.decode()?;
        let image = owned_from_dynamic_image(&decoded).map_err(|err| frame_error(index, err))?;
        self.next_index += 1;
        Ok(Some(Frame { index, image }))
    }
}

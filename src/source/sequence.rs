//! Directory of still images played back as an RGB stream.

use std::fs;
use std::path::PathBuf;

use crate::image::io::load_rgb_image;
use crate::source::{unavailable, Frame, FrameSource};
use crate::util::{SentinelError, SentinelResult};

const EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "pgm", "ppm"];

/// Image files of one directory, in file-name order.
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    next_index: u64,
}

impl ImageSequence {
    /// Lists the image files in `dir`. Other files are ignored.
    pub fn open(dir: &str) -> SentinelResult<Self> {
        let entries = fs::read_dir(dir).map_err(|err| unavailable(dir, err))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|err| unavailable(dir, err))?.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)));
            if is_image && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(Self {
            paths,
            next_index: 0,
        })
    }

    /// Number of frames in the sequence.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageSequence {
    fn read(&mut self) -> SentinelResult<Option<Frame>> {
        let Some(path) = self.paths.get(self.next_index as usize) else {
            return Ok(None);
        };
        let index = self.next_index;
        let image = load_rgb_image(path).map_err(|err| SentinelError::FrameDecode {
            index,
            reason: err.to_string(),
        })?;
        self.next_index += 1;
        Ok(Some(Frame { index, image }))
    }
}

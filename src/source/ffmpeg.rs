//! Container decoding through an `ffmpeg` child process.

use std::ffi::OsStr;
use std::io::BufReader;
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::source::pnm::PnmStream;
use crate::source::{unavailable, Frame, FrameSource};
use crate::util::SentinelResult;

/// RGB frames decoded by `ffmpeg` and piped back as a PPM stream.
///
/// Spawning blocks until the first frame arrives or ffmpeg exits, so an input
/// ffmpeg cannot open is reported as unavailable by [`FfmpegSource::spawn`]
/// itself. The first frame is held back for the first `read`.
pub struct FfmpegSource {
    identifier: String,
    child: Child,
    frames: PnmStream<BufReader<ChildStdout>>,
    pending: Option<Frame>,
    delivered: u64,
}

impl FfmpegSource {
    /// Starts `ffmpeg` from `PATH` on `identifier` (a path or any URL ffmpeg
    /// accepts).
    pub fn spawn(identifier: &str) -> SentinelResult<Self> {
        Self::spawn_program("ffmpeg", identifier)
    }

    /// Like [`FfmpegSource::spawn`] with an explicit ffmpeg executable.
    pub fn spawn_program(program: impl AsRef<OsStr>, identifier: &str) -> SentinelResult<Self> {
        let mut child = Command::new(program)
            .args(["-nostdin", "-loglevel", "error", "-i", identifier])
            .args(["-f", "image2pipe", "-pix_fmt", "rgb24", "-vcodec", "ppm", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| unavailable(identifier, format!("cannot start ffmpeg: {err}")))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| unavailable(identifier, "ffmpeg stdout not captured"))?;

        let mut source = Self {
            identifier: identifier.to_owned(),
            child,
            frames: PnmStream::new(BufReader::new(stdout)),
            pending: None,
            delivered: 0,
        };
        source.pending = source.pull()?;
        Ok(source)
    }

    fn pull(&mut self) -> SentinelResult<Option<Frame>> {
        if let Some(frame) = self.frames.read()? {
            self.delivered += 1;
            return Ok(Some(frame));
        }

        let status = self.child.wait()?;
        if self.delivered == 0 && !status.success() {
            return Err(unavailable(
                &self.identifier,
                format!("ffmpeg exited with {status}"),
            ));
        }
        Ok(None)
    }
}

impl FrameSource for FfmpegSource {
    fn read(&mut self) -> SentinelResult<Option<Frame>> {
        match self.pending.take() {
            Some(frame) => Ok(Some(frame)),
            None => self.pull(),
        }
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        // Already-exited children make both calls fail harmlessly.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

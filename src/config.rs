//! Detector configuration.

use crate::pairing::ALIGNMENT_TOLERANCE_PX;
use crate::roi::RoiFraction;
use crate::util::{SentinelError, SentinelResult};

/// Every tunable of the detection pipeline.
///
/// Run bounds are in admitted-frame units, i.e. raw frame counts already
/// divided by `frame_divisor`. The defaults describe a 30 fps feed watched
/// at a third of its frame rate: runs longer than 30 and shorter than 900
/// raw frames trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorConfig {
    /// Watched region as fractions of the frame size.
    pub roi: RoiFraction,
    /// Matcher threshold; the effective floor is never below the surface clip.
    pub match_threshold: f32,
    /// Exclusive vertical center tolerance for an aligned pair.
    pub alignment_tolerance: u32,
    /// Exclusive lower run bound.
    pub min_run: i64,
    /// Exclusive upper run bound.
    pub max_run: i64,
    /// Admit every n-th frame.
    pub frame_divisor: u64,
    /// Report throughput every n admitted frames.
    pub heartbeat_interval: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        let frame_divisor = 3;
        Self {
            roi: RoiFraction::default(),
            match_threshold: 0.1,
            alignment_tolerance: ALIGNMENT_TOLERANCE_PX,
            min_run: 30 / frame_divisor as i64,
            max_run: 900 / frame_divisor as i64,
            frame_divisor,
            heartbeat_interval: 30,
        }
    }
}

impl DetectorConfig {
    /// Rejects configurations the pipeline cannot run with.
    pub fn validate(&self) -> SentinelResult<()> {
        if !self.roi.is_valid() {
            return Err(SentinelError::InvalidConfig(
                "roi fractions must lie in [0, 1] with end > start",
            ));
        }
        if !self.match_threshold.is_finite() {
            return Err(SentinelError::InvalidConfig(
                "match_threshold must be finite",
            ));
        }
        if self.frame_divisor == 0 {
            return Err(SentinelError::InvalidConfig("frame_divisor must be >= 1"));
        }
        if self.heartbeat_interval == 0 {
            return Err(SentinelError::InvalidConfig(
                "heartbeat_interval must be >= 1",
            ));
        }
        if self.min_run < 0 || self.max_run <= self.min_run {
            return Err(SentinelError::InvalidConfig(
                "run bounds must satisfy 0 <= min_run < max_run",
            ));
        }
        Ok(())
    }
}

//! Frame decimation and processing-rate tracking.

use std::time::Instant;

/// Admits every `divisor`-th frame and tracks throughput.
///
/// Frame indices are zero-based; with divisor `D` the admitted indices are
/// `D - 1, 2D - 1, ...`, i.e. the `D`-th, `2D`-th, ... frame delivered.
#[derive(Clone, Debug)]
pub struct FrameDecimator {
    divisor: u64,
    started: Instant,
    seen: u64,
    admitted: u64,
}

impl FrameDecimator {
    /// Creates a decimator whose clock starts now. A divisor of 0 is treated as 1.
    pub fn new(divisor: u64) -> Self {
        Self::starting_at(divisor, Instant::now())
    }

    /// Creates a decimator whose clock started at `started`.
    pub fn starting_at(divisor: u64, started: Instant) -> Self {
        Self {
            divisor: divisor.max(1),
            started,
            seen: 0,
            admitted: 0,
        }
    }

    pub fn divisor(&self) -> u64 {
        self.divisor
    }

    /// Pure admission rule for a zero-based frame index.
    pub fn should_process(&self, frame_index: u64) -> bool {
        (frame_index + 1) % self.divisor == 0
    }

    /// Records delivery of frame `frame_index` and returns whether it is admitted.
    pub fn observe(&mut self, frame_index: u64) -> bool {
        self.seen += 1;
        let admit = self.should_process(frame_index);
        if admit {
            self.admitted += 1;
        }
        admit
    }

    /// Frames delivered so far.
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Frames admitted so far.
    pub fn admitted(&self) -> u64 {
        self.admitted
    }

    /// Admitted frames per second of wall time up to `now`.
    pub fn rate_at(&self, now: Instant) -> f64 {
        per_second(self.admitted, now.saturating_duration_since(self.started).as_secs_f64())
    }

    /// Delivered frames per second of wall time up to `now`.
    pub fn total_rate_at(&self, now: Instant) -> f64 {
        per_second(self.seen, now.saturating_duration_since(self.started).as_secs_f64())
    }

    /// Admitted frames per second up to this moment.
    pub fn current_rate(&self) -> f64 {
        self.rate_at(Instant::now())
    }

    pub fn total_rate(&self) -> f64 {
        self.total_rate_at(Instant::now())
    }
}

fn per_second(count: u64, elapsed: f64) -> f64 {
    if elapsed <= 0.0 {
        0.0
    } else {
        count as f64 / elapsed
    }
}

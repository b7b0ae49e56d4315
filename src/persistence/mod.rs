//! Trailing-edge persistence filter.
//!
//! A single signed counter tracks the current run of aligned frames:
//!
//! * `0`: idle, no run in progress.
//! * `n > 0`: inside a run of `n` consecutive aligned frames.
//! * [`LATCH_SENTINEL`] and anything below zero: a trigger just fired.
//!
//! An aligned frame always increments the counter, latched or not. A
//! non-aligned frame ends the run: if the run length lies strictly inside
//! `(min_run, max_run)` a trigger fires and the counter latches, otherwise
//! it resets to zero.
//!
//! Because a latched counter keeps climbing on aligned frames, a run of
//! roughly a billion aligned frames after a trigger climbs back above zero
//! and can fire again. That arithmetic is kept as is.

use crate::trace::trace_info;

/// Counter value written when a trigger fires.
pub const LATCH_SENTINEL: i64 = -999_999_999;

/// Event emitted when a qualifying run ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trigger {
    /// Number of aligned frames in the run that just ended.
    pub run_length: i64,
}

/// Tagged reading of the counter, for observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Accumulating(i64),
    Latched(i64),
}

/// Run-length counter with an exclusive qualifying band.
#[derive(Clone, Debug)]
pub struct PersistenceCounter {
    counter: i64,
    min_run: i64,
    max_run: i64,
}

impl PersistenceCounter {
    /// Creates an idle counter firing on runs strictly between the bounds.
    pub fn new(min_run: i64, max_run: i64) -> Self {
        Self {
            counter: 0,
            min_run,
            max_run,
        }
    }

    /// Resumes from a previously observed raw counter value.
    pub fn from_value(counter: i64, min_run: i64, max_run: i64) -> Self {
        Self {
            counter,
            min_run,
            max_run,
        }
    }

    /// Raw counter value.
    pub fn value(&self) -> i64 {
        self.counter
    }

    /// Exclusive qualifying band as `(min_run, max_run)`.
    pub fn band(&self) -> (i64, i64) {
        (self.min_run, self.max_run)
    }

    pub fn phase(&self) -> Phase {
        match self.counter {
            0 => Phase::Idle,
            n if n > 0 => Phase::Accumulating(n),
            n => Phase::Latched(n),
        }
    }

    fn qualifies(&self, run: i64) -> bool {
        self.min_run < run && run < self.max_run
    }

    /// Advances the counter by one admitted frame.
    pub fn update(&mut self, aligned: bool) -> Option<Trigger> {
        if aligned {
            self.counter += 1;
            return None;
        }

        let run = self.counter;
        if self.qualifies(run) {
            self.counter = LATCH_SENTINEL;
            trace_info!("trigger", run_length = run);
            Some(Trigger { run_length: run })
        } else {
            self.counter = 0;
            None
        }
    }
}

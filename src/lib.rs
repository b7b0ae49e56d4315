//! Sentinel watches a video stream for two copies of a reference image
//! sitting side by side inside a fixed region of the frame, and reports the
//! moment such a pairing ends after lasting a plausible amount of time.
//!
//! The pipeline per admitted frame is: normalized cross-correlation surface
//! over the region of interest, greedy peak extraction with flood
//! suppression, a pairing check on exactly two instances, and a run-length
//! counter that fires on the trailing edge of a qualifying run.

pub mod candidate;
pub mod config;
pub mod decimate;
pub mod image;
pub mod kernel;
pub mod pairing;
pub mod persistence;
pub mod pipeline;
pub mod report;
pub mod roi;
pub mod search;
pub mod source;
pub mod surface;
pub mod template;
mod trace;
pub mod util;

pub use candidate::MatchCandidate;
pub use config::DetectorConfig;
pub use decimate::FrameDecimator;
pub use crate::image::{ImageView, OwnedImage};
pub use pairing::{Alignment, AlignmentValidator, ALIGNMENT_TOLERANCE_PX};
pub use persistence::{PersistenceCounter, Phase, Trigger, LATCH_SENTINEL};
pub use pipeline::{run, DetectionObserver, Detector, FrameOutcome, FrameReport, RunSummary};
pub use report::Reporter;
pub use roi::{Rect, RoiFraction};
pub use search::{extract_instances, MatchConfig, Matcher};
pub use source::{Frame, FrameSource, IterSource};
pub use surface::{build_response_surface, ResponseSurface, CLIP_FLOOR};
pub use template::Template;
pub use util::{SentinelError, SentinelResult};

#[cfg(feature = "image-io")]
pub use crate::image::io;

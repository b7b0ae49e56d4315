//! Multi-instance template search.
//!
//! Instances are pulled off the response surface greedily: take the global
//! maximum, record it, flood-clear its blob, repeat until the maximum drops
//! under the caller's threshold. Because the surface is already clipped at
//! [`CLIP_FLOOR`](crate::surface::CLIP_FLOOR), the effective acceptance floor
//! is `max(threshold, CLIP_FLOOR)`.

use crate::candidate::flood::flood_suppress;
use crate::candidate::MatchCandidate;
use crate::surface::{build_response_surface, ResponseSurface};
use crate::template::Template;
use crate::trace::{trace_event, trace_span};
use crate::util::SentinelResult;
use crate::ImageView;

/// Width of the score band cleared around each accepted peak.
pub const FLOOD_TOLERANCE: f32 = 0.1;

/// Configuration for multi-instance extraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchConfig {
    /// Minimum peak score the caller is willing to accept.
    pub threshold: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { threshold: 0.1 }
    }
}

/// Extracts every distinct instance from `surface`, consuming it.
///
/// Results come out in extraction order (descending peak score). The loop
/// also ends once no positive score remains, which only matters for
/// thresholds at or below zero.
pub fn extract_instances(mut surface: ResponseSurface, threshold: f32) -> Vec<MatchCandidate> {
    let mut found = Vec::new();
    loop {
        let (x, y, peak) = surface.max_loc();
        if peak < threshold || peak <= 0.0 {
            break;
        }
        found.push(MatchCandidate { x, y, score: peak });
        flood_suppress(&mut surface, x, y, peak - FLOOD_TOLERANCE, peak);
    }
    found
}

/// Template matcher locating every instance of one template inside an ROI.
pub struct Matcher<'t> {
    template: &'t Template,
    cfg: MatchConfig,
}

impl<'t> Matcher<'t> {
    /// Creates a matcher with the default configuration.
    pub fn new(template: &'t Template) -> Self {
        Self {
            template,
            cfg: MatchConfig::default(),
        }
    }

    /// Replaces the matcher configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the template being searched for.
    pub fn template(&self) -> &Template {
        self.template
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Finds all instances of the template inside `roi`.
    pub fn match_all(&self, roi: ImageView<'_, u8>) -> SentinelResult<Vec<MatchCandidate>> {
        let _span = trace_span!("match_all", roi_w = roi.width(), roi_h = roi.height()).entered();
        let surface = build_response_surface(roi, self.template)?;
        let found = extract_instances(surface, self.cfg.threshold);
        trace_event!("instances", count = found.len());
        Ok(found)
    }
}

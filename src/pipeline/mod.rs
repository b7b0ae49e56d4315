//! Per-frame detection pipeline and stream driver.
//!
//! [`Detector`] owns everything that lives for the whole run: the template,
//! the persistence counter and the decimation state. Each admitted frame is
//! cropped to its region of interest, matched, checked for alignment and fed
//! to the counter, all synchronously inside [`Detector::process`].

use std::io::Write;
use std::time::Instant;

use crate::candidate::MatchCandidate;
use crate::config::DetectorConfig;
use crate::decimate::FrameDecimator;
use crate::pairing::{Alignment, AlignmentValidator};
use crate::persistence::{PersistenceCounter, Phase, Trigger};
use crate::report::Reporter;
use crate::roi::Rect;
use crate::search::{MatchConfig, Matcher};
use crate::source::{Frame, FrameSource};
use crate::template::Template;
use crate::trace::{trace_event, trace_info};
use crate::util::SentinelResult;
use crate::ImageView;

/// Everything computed for one admitted frame.
#[derive(Clone, Debug)]
pub struct FrameReport {
    /// Index of the frame in the source stream.
    pub index: u64,
    /// Region of interest resolved for this frame.
    pub roi: Rect,
    /// Instances found, in ROI coordinates and extraction order.
    pub candidates: Vec<MatchCandidate>,
    pub alignment: Alignment,
    /// Counter value after this frame.
    pub counter: i64,
    pub phase: Phase,
    /// Set when a qualifying run ended on this frame.
    pub trigger: Option<Trigger>,
    /// Admitted-frame rate, set every `heartbeat_interval` admitted frames.
    pub heartbeat: Option<f64>,
}

/// Result of offering one frame to the detector.
#[derive(Clone, Debug)]
pub enum FrameOutcome {
    /// Dropped by decimation.
    Skipped,
    Processed(FrameReport),
}

/// Read-only subscriber to per-frame reports, e.g. a debug overlay.
pub trait DetectionObserver {
    fn on_frame(&mut self, frame: &Frame, report: &FrameReport);
}

/// Streaming detector for an aligned pair of template instances.
pub struct Detector {
    template: Template,
    cfg: DetectorConfig,
    validator: AlignmentValidator,
    counter: PersistenceCounter,
    decimator: FrameDecimator,
    observers: Vec<Box<dyn DetectionObserver>>,
}

impl Detector {
    /// Builds a detector; the rate clock starts now.
    pub fn new(template: Template, cfg: DetectorConfig) -> SentinelResult<Self> {
        Self::starting_at(template, cfg, Instant::now())
    }

    /// Builds a detector whose rate clock started at `started`.
    pub fn starting_at(
        template: Template,
        cfg: DetectorConfig,
        started: Instant,
    ) -> SentinelResult<Self> {
        cfg.validate()?;
        let validator =
            AlignmentValidator::new(template.width(), template.height(), cfg.alignment_tolerance);
        Ok(Self {
            template,
            validator,
            counter: PersistenceCounter::new(cfg.min_run, cfg.max_run),
            decimator: FrameDecimator::starting_at(cfg.frame_divisor, started),
            cfg,
            observers: Vec::new(),
        })
    }

    /// Attaches an observer. Observers never influence detection.
    pub fn with_observer(mut self, observer: Box<dyn DetectionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.cfg
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn counter(&self) -> &PersistenceCounter {
        &self.counter
    }

    pub fn decimator(&self) -> &FrameDecimator {
        &self.decimator
    }

    /// Matches and pairs one ROI without touching any run state.
    pub fn analyze(
        &self,
        roi: ImageView<'_, u8>,
    ) -> SentinelResult<(Vec<MatchCandidate>, Alignment)> {
        let matcher = Matcher::new(&self.template).with_config(MatchConfig {
            threshold: self.cfg.match_threshold,
        });
        let candidates = matcher.match_all(roi)?;
        let alignment = self.validator.validate(&candidates);
        Ok((candidates, alignment))
    }

    /// Offers one frame, timing the heartbeat against the current instant.
    pub fn process(&mut self, frame: &Frame) -> SentinelResult<FrameOutcome> {
        self.process_at(frame, Instant::now())
    }

    /// Offers one frame, timing the heartbeat against `now`.
    pub fn process_at(&mut self, frame: &Frame, now: Instant) -> SentinelResult<FrameOutcome> {
        if !self.decimator.observe(frame.index) {
            return Ok(FrameOutcome::Skipped);
        }

        let image = frame.image.view();
        let roi = self
            .cfg
            .roi
            .resolve(image.width(), image.height());
        let (candidates, alignment) = self.analyze(image.crop(roi)?)?;

        let trigger = self.counter.update(alignment.is_aligned());
        let admitted = self.decimator.admitted();
        let heartbeat = (admitted % self.cfg.heartbeat_interval == 0)
            .then(|| self.decimator.rate_at(now));

        trace_event!(
            "frame",
            index = frame.index,
            candidates = candidates.len(),
            counter = self.counter.value()
        );

        let report = FrameReport {
            index: frame.index,
            roi,
            candidates,
            alignment,
            counter: self.counter.value(),
            phase: self.counter.phase(),
            trigger,
            heartbeat,
        };
        for observer in self.observers.iter_mut() {
            observer.on_frame(frame, &report);
        }
        Ok(FrameOutcome::Processed(report))
    }
}

/// Totals of one stream run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_read: u64,
    pub frames_processed: u64,
    pub triggers: u64,
}

/// Drives `source` to its end through `detector`, writing the line protocol.
///
/// Any error aborts the run; there is no per-frame recovery.
pub fn run<S, W>(
    source: &mut S,
    detector: &mut Detector,
    reporter: &mut Reporter<W>,
) -> SentinelResult<RunSummary>
where
    S: FrameSource + ?Sized,
    W: Write,
{
    reporter.starting()?;

    let mut summary = RunSummary::default();
    while let Some(frame) = source.read()? {
        summary.frames_read += 1;
        let FrameOutcome::Processed(report) = detector.process(&frame)? else {
            continue;
        };
        summary.frames_processed += 1;

        if let Some(trigger) = report.trigger {
            summary.triggers += 1;
            trace_info!(
                "died",
                frame = report.index,
                run_length = trigger.run_length
            );
            reporter.died()?;
        }
        if let Some(fps) = report.heartbeat {
            reporter.heartbeat(fps)?;
        }
    }

    reporter.stream_ended()?;
    trace_info!(
        "stream_ended",
        frames_read = summary.frames_read,
        triggers = summary.triggers
    );
    Ok(summary)
}

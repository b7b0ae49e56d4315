use sentinel::source::Frame;
use sentinel::{DetectionObserver, FrameReport};

/// Textual stand-in for a visual debug overlay.
///
/// Logs what an overlay would draw: instance boxes, the inter-instance
/// distance and the run counter.
pub struct TraceObserver {
    template_width: usize,
    template_height: usize,
}

impl TraceObserver {
    pub fn new(template_width: usize, template_height: usize) -> Self {
        Self {
            template_width,
            template_height,
        }
    }
}

impl DetectionObserver for TraceObserver {
    fn on_frame(&mut self, frame: &Frame, report: &FrameReport) {
        let boxes: Vec<String> = report
            .candidates
            .iter()
            .map(|c| {
                format!(
                    "({},{} {}x{} s={:.3})",
                    report.roi.x + c.x,
                    report.roi.y + c.y,
                    self.template_width,
                    self.template_height,
                    c.score
                )
            })
            .collect();
        let ird = report
            .alignment
            .distance()
            .map(|d| format!("{d:.3}"))
            .unwrap_or_else(|| "-".to_owned());
        tracing::debug!(
            frame = frame.index,
            width = frame.image.width(),
            height = frame.image.height(),
            matches = %boxes.join(" "),
            ird = %ird,
            sf = report.counter,
            "overlay"
        );
    }
}

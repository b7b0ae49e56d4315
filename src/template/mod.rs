//! Reference template storage.

use crate::image::{ImageView, OwnedImage};
use crate::util::SentinelResult;

mod plan;

pub use plan::TemplatePlan;

/// Reference image searched for in every frame.
///
/// Built once before the stream is opened and shared read-only for the whole
/// run. The correlation plan is computed at construction time.
#[derive(Clone, Debug)]
pub struct Template {
    img: OwnedImage,
    plan: TemplatePlan,
}

impl Template {
    /// Creates a single-channel template from a contiguous buffer.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> SentinelResult<Self> {
        Self::from_image(OwnedImage::new(data, width, height)?)
    }

    /// Creates a template from an owned image of any channel count.
    pub fn from_image(img: OwnedImage) -> SentinelResult<Self> {
        let plan = TemplatePlan::from_view(img.view())?;
        Ok(Self { img, plan })
    }

    /// Loads a template from an image file on disk as RGB.
    #[cfg(feature = "image-io")]
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> SentinelResult<Self> {
        Self::from_image(crate::image::io::load_rgb_image(path)?)
    }

    /// Returns a borrowed view of the template data.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    /// Returns the precomputed correlation plan.
    pub fn plan(&self) -> &TemplatePlan {
        &self.plan
    }

    pub fn width(&self) -> usize {
        self.img.width()
    }

    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Samples per pixel; frames must carry the same count.
    pub fn channels(&self) -> usize {
        self.img.channels()
    }
}

use crate::raster::Raster;
use anyhow::Result;
use image::RgbImage;

/// Alpha matte: grayscale values where 0.0 = background, 1.0 = foreground
/// Flattened in row-major order, same dimensions as the frame
pub type Matte = Vec<f32>;

/// Trait for matting models
/// Allows swapping between different backends (U2Net, ISNet, etc.)
pub trait SegmentationModel {
    /// Process a frame and return an alpha matte
    ///
    /// The matte must hold exactly one value per frame pixel; any other
    /// length is rejected by [`MatteSegmenter`] rather than resampled.
    ///
    /// [`MatteSegmenter`]: super::MatteSegmenter
    fn segment(&mut self, frame: &RgbImage) -> Result<Matte>;
}

/// Anything that turns an opaque frame into an RGBA raster with a soft matte
pub trait Segmenter {
    fn remove_background(&mut self, frame: &RgbImage) -> Result<Raster>;
}

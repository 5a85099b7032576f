use super::types::{SegmentationModel, Segmenter};
use crate::error::{CleanupError, Result};
use crate::raster::Raster;
use image::{Rgba, RgbImage, RgbaImage};

fn quantize(value: f32) -> u8 {
    (value * 255.0).clamp(0.0, 255.0) as u8
}

/// Combine an RGB frame with a matte into an RGBA raster
///
/// Matte values are scaled to 0-255 and truncated into the alpha channel.
/// The matte must match the frame pixel for pixel.
pub fn attach_matte(frame: &RgbImage, matte: &[f32]) -> Result<Raster> {
    let (width, height) = frame.dimensions();
    let expected = width as usize * height as usize;
    if matte.len() != expected {
        return Err(CleanupError::dimension_mismatch(
            "matte",
            format!("{} values ({}x{})", expected, width, height),
            format!("{} values", matte.len()),
        ));
    }

    let mut image = RgbaImage::new(width, height);
    for ((out, pixel), &value) in image.pixels_mut().zip(frame.pixels()).zip(matte) {
        *out = Rgba([pixel[0], pixel[1], pixel[2], quantize(value)]);
    }

    Ok(Raster::from(image))
}

/// Adapts a matte-producing model into a [`Segmenter`]
pub struct MatteSegmenter<M> {
    model: M,
}

impl<M: SegmentationModel> MatteSegmenter<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_inner(self) -> M {
        self.model
    }
}

impl<M: SegmentationModel> Segmenter for MatteSegmenter<M> {
    fn remove_background(&mut self, frame: &RgbImage) -> anyhow::Result<Raster> {
        let _span = tracing::debug_span!("matte_segment").entered();

        let matte = self.model.segment(frame)?;
        Ok(attach_matte(frame, &matte)?)
    }
}

mod matte;
pub mod types;

pub use matte::{attach_matte, MatteSegmenter};
pub use types::{Matte, SegmentationModel, Segmenter};

use crate::error::{CleanupError, Result};
use crate::pipeline::{Cleaned, Pipeline};
use image::RgbImage;

/// Remove the background of `frame` and run the cleanup pipeline on the result
///
/// Engine errors raised inside the segmenter (e.g. a wrong-size matte) are
/// passed through as-is; any other segmenter failure becomes
/// [`CleanupError::Segmentation`].
pub fn remove_background<S>(
    segmenter: &mut S,
    frame: &RgbImage,
    pipeline: &Pipeline,
) -> Result<Cleaned>
where
    S: Segmenter + ?Sized,
{
    let _span = tracing::debug_span!("remove_background").entered();

    let raster = segmenter
        .remove_background(frame)
        .map_err(|err| match err.downcast::<CleanupError>() {
            Ok(err) => err,
            Err(err) => CleanupError::Segmentation(err),
        })?;

    if raster.dimensions() != frame.dimensions() {
        let (fw, fh) = frame.dimensions();
        let (rw, rh) = raster.dimensions();
        return Err(CleanupError::dimension_mismatch(
            "segmenter output",
            format!("{}x{}", fw, fh),
            format!("{}x{}", rw, rh),
        ));
    }

    tracing::debug!(
        soft_edges = raster.soft_edge_count(),
        "Background removed"
    );

    Ok(pipeline.run(&raster))
}

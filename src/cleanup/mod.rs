mod despill;
mod threshold;

pub use despill::{despill, Despill};
pub use threshold::{threshold_cutoff, ThresholdCutoff};

use crate::raster::{Raster, CHANNELS};
use rayon::prelude::*;

/// Rasters with at least this many pixels are processed across the rayon pool
pub const PARALLEL_THRESHOLD: usize = 64 * 1024;

/// Trait for per-pixel edge cleanup filters
///
/// Each output pixel depends only on the matching input pixel, so filters can
/// run in any order over the raster.
pub trait EdgeFilter: Sync {
    /// Short name used in log spans
    fn name(&self) -> &'static str;

    /// Transform a single (R, G, B, A) pixel
    fn apply_pixel(&self, pixel: [u8; 4]) -> [u8; 4];

    /// Filter the raster in place
    fn apply_in_place(&self, raster: &mut Raster) {
        let _span = tracing::debug_span!("edge_filter", filter = self.name()).entered();

        for_each_pixel_mut(raster.samples_mut(), |px| {
            let out = self.apply_pixel([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        });
    }

    /// Filter a copy of the raster, leaving the input untouched
    fn apply(&self, raster: &Raster) -> Raster {
        let mut output = raster.clone();
        self.apply_in_place(&mut output);
        output
    }
}

/// Run `f` over every RGBA pixel, in parallel for large rasters
pub(crate) fn for_each_pixel_mut<F>(samples: &mut [u8], f: F)
where
    F: Fn(&mut [u8]) + Sync + Send,
{
    let pixels = samples.len() / CHANNELS;

    if pixels >= PARALLEL_THRESHOLD {
        samples.par_chunks_exact_mut(CHANNELS).for_each(f);
    } else {
        samples.chunks_exact_mut(CHANNELS).for_each(f);
    }
}

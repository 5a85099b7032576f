use crate::cleanup::{for_each_pixel_mut, PARALLEL_THRESHOLD};
use crate::error::{CleanupError, Result};
use crate::raster::{Raster, CHANNELS};
use rayon::prelude::*;

/// Solid RGBA backdrop for compositing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl BackgroundColor {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from untyped components, e.g. a config array
    ///
    /// Requires exactly four components, each within `[0, 255]`.
    pub fn from_components(components: &[i64]) -> Result<Self> {
        if components.len() != CHANNELS {
            return Err(CleanupError::invalid_parameter(
                "background_color",
                format!("expected 4 components (RGBA), got {}", components.len()),
            ));
        }

        let mut rgba = [0u8; 4];
        for (slot, &value) in rgba.iter_mut().zip(components) {
            *slot = u8::try_from(value).map_err(|_| {
                CleanupError::invalid_parameter(
                    "background_color",
                    format!("component {} is outside [0, 255]", value),
                )
            })?;
        }

        Ok(rgba.into())
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for BackgroundColor {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// "Over" blend of one foreground pixel onto one background pixel
///
/// `out = round(fg * alpha + bg * (1 - alpha))` with `alpha = fg.a / 255`,
/// rounding half away from zero. The output is always opaque.
pub fn blend_pixel(foreground: [u8; 4], background: [u8; 4]) -> [u8; 4] {
    let alpha = f64::from(foreground[3]) / 255.0;
    let inv_alpha = 1.0 - alpha;

    let mix = |fg: u8, bg: u8| -> u8 {
        (f64::from(fg) * alpha + f64::from(bg) * inv_alpha)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    [
        mix(foreground[0], background[0]),
        mix(foreground[1], background[1]),
        mix(foreground[2], background[2]),
        255,
    ]
}

fn blend_into(px: &mut [u8], bg: &[u8]) {
    let out = blend_pixel([px[0], px[1], px[2], px[3]], [bg[0], bg[1], bg[2], bg[3]]);
    px.copy_from_slice(&out);
}

/// Composite `foreground` onto a uniform background color
pub fn composite(foreground: &Raster, background: BackgroundColor) -> Raster {
    let _span = tracing::debug_span!("composite", ?background).entered();

    let background = background.to_array();
    let mut output = foreground.clone();
    for_each_pixel_mut(output.samples_mut(), |px| {
        let out = blend_pixel([px[0], px[1], px[2], px[3]], background);
        px.copy_from_slice(&out);
    });

    output
}

/// Composite `foreground` onto a background raster of the same size
pub fn composite_onto(foreground: &Raster, background: &Raster) -> Result<Raster> {
    if foreground.dimensions() != background.dimensions() {
        let (fw, fh) = foreground.dimensions();
        let (bw, bh) = background.dimensions();
        return Err(CleanupError::dimension_mismatch(
            "composite background",
            format!("{}x{}", fw, fh),
            format!("{}x{}", bw, bh),
        ));
    }

    let _span = tracing::debug_span!("composite_onto").entered();

    let mut output = foreground.clone();

    if foreground.pixel_count() >= PARALLEL_THRESHOLD {
        output
            .samples_mut()
            .par_chunks_exact_mut(CHANNELS)
            .zip(background.as_raw().par_chunks_exact(CHANNELS))
            .for_each(|(px, bg)| blend_into(px, bg));
    } else {
        output
            .samples_mut()
            .chunks_exact_mut(CHANNELS)
            .zip(background.as_raw().chunks_exact(CHANNELS))
            .for_each(|(px, bg)| blend_into(px, bg));
    }

    Ok(output)
}

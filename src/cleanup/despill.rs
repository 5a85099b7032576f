use super::EdgeFilter;
use crate::error::{CleanupError, Result};
use crate::raster::Raster;

/// Despill filter for soft edge pixels
///
/// Segmenters leave a tint of the old background in semi-transparent
/// boundary pixels. For every pixel with `0 < alpha < 255` the color
/// channels are scaled by
///
/// ```text
/// factor = 1 - ((255 - alpha) / 255) * strength
/// channel' = floor(channel * factor)
/// ```
///
/// so the more transparent the pixel, the stronger the attenuation. The
/// product is computed in `f64`, truncated toward zero (it is never negative)
/// and clamped to `[0, 255]`. Alpha is never changed, and fully transparent or
/// fully opaque pixels pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Despill {
    strength: f64,
}

impl Despill {
    /// `strength` must be a finite value in `[0, 1]`; 0 is the identity
    pub fn new(strength: f64) -> Result<Self> {
        if !strength.is_finite() || !(0.0..=1.0).contains(&strength) {
            return Err(CleanupError::invalid_parameter(
                "despill_strength",
                format!("must be within [0, 1], got {}", strength),
            ));
        }

        Ok(Self { strength })
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    fn factor(&self, alpha: u8) -> f64 {
        1.0 - ((255.0 - f64::from(alpha)) / 255.0) * self.strength
    }
}

fn attenuate(channel: u8, factor: f64) -> u8 {
    (f64::from(channel) * factor).floor().clamp(0.0, 255.0) as u8
}

impl EdgeFilter for Despill {
    fn name(&self) -> &'static str {
        "despill"
    }

    fn apply_pixel(&self, [r, g, b, a]: [u8; 4]) -> [u8; 4] {
        if a == 0 || a == 255 {
            return [r, g, b, a];
        }

        let factor = self.factor(a);
        [
            attenuate(r, factor),
            attenuate(g, factor),
            attenuate(b, factor),
            a,
        ]
    }
}

/// Despill a copy of `raster` with the given strength
pub fn despill(raster: &Raster, strength: f64) -> Result<Raster> {
    let filter = Despill::new(strength)?;
    Ok(filter.apply(raster))
}

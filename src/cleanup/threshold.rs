use super::EdgeFilter;
use crate::error::{CleanupError, Result};
use crate::raster::Raster;

/// Hard alpha cutoff
///
/// Pixels with `alpha < threshold` become fully transparent while keeping
/// their color channels. Pixels at or above the threshold are left
/// byte-identical. A threshold of 0 is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdCutoff {
    threshold: u8,
}

impl ThresholdCutoff {
    /// `threshold` must lie in `[0, 255]`
    pub fn new(threshold: i64) -> Result<Self> {
        let threshold = u8::try_from(threshold).map_err(|_| {
            CleanupError::invalid_parameter(
                "alpha_threshold",
                format!("must be within [0, 255], got {}", threshold),
            )
        })?;

        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl EdgeFilter for ThresholdCutoff {
    fn name(&self) -> &'static str {
        "threshold_cutoff"
    }

    fn apply_pixel(&self, [r, g, b, a]: [u8; 4]) -> [u8; 4] {
        if a < self.threshold {
            [r, g, b, 0]
        } else {
            [r, g, b, a]
        }
    }
}

/// Apply the cutoff to a copy of `raster`
pub fn threshold_cutoff(raster: &Raster, threshold: i64) -> Result<Raster> {
    let filter = ThresholdCutoff::new(threshold)?;
    Ok(filter.apply(raster))
}

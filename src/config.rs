//! Cleanup configuration
//!
//! Recognized options, all optional:
//!
//! ```toml
//! despill_strength = 0.1        # float in [0, 1]
//! alpha_threshold = 180         # int in [0, 255]
//! background_color = [255, 255, 255, 255]
//! order = "despill-first"       # or "threshold-first"
//! ```
//!
//! There is no built-in threshold default. When both filters are enabled the
//! order has to be given explicitly because the two do not commute.

use crate::composite::BackgroundColor;
use crate::error::{CleanupError, Result};
use crate::pipeline::Pipeline;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageOrder {
    DespillFirst,
    ThresholdFirst,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanupConfig {
    pub despill_strength: Option<f64>,
    pub alpha_threshold: Option<i64>,
    pub background_color: Option<Vec<i64>>,
    pub order: Option<StageOrder>,
}

impl CleanupConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading cleanup config from {}", path.display());

        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Validate every option and assemble the pipeline
    pub fn to_pipeline(&self) -> Result<Pipeline> {
        let order = match (self.despill_strength, self.alpha_threshold, self.order) {
            (Some(_), Some(_), None) => {
                return Err(CleanupError::invalid_parameter(
                    "order",
                    "required when both despill_strength and alpha_threshold are set",
                ));
            }
            (_, _, order) => order.unwrap_or(StageOrder::DespillFirst),
        };

        let mut builder = Pipeline::builder();
        match order {
            StageOrder::DespillFirst => {
                if let Some(strength) = self.despill_strength {
                    builder = builder.despill(strength)?;
                }
                if let Some(threshold) = self.alpha_threshold {
                    builder = builder.threshold(threshold)?;
                }
            }
            StageOrder::ThresholdFirst => {
                if let Some(threshold) = self.alpha_threshold {
                    builder = builder.threshold(threshold)?;
                }
                if let Some(strength) = self.despill_strength {
                    builder = builder.despill(strength)?;
                }
            }
        }

        if let Some(components) = &self.background_color {
            builder = builder.background(BackgroundColor::from_components(components)?);
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Stage;
    use std::io::Write;

    #[test]
    fn test_empty_config() {
        let config = CleanupConfig::from_toml_str("").unwrap();
        assert_eq!(config, CleanupConfig::default());

        let pipeline = config.to_pipeline().unwrap();
        assert!(pipeline.stages().is_empty());
        assert_eq!(pipeline.background(), None);
    }

    #[test]
    fn test_full_config() {
        let config = CleanupConfig::from_toml_str(
            r#"
            despill_strength = 0.1
            alpha_threshold = 180
            background_color = [255, 255, 255, 255]
            order = "threshold-first"
            "#,
        )
        .unwrap();

        assert_eq!(config.order, Some(StageOrder::ThresholdFirst));

        let pipeline = config.to_pipeline().unwrap();
        assert!(matches!(
            pipeline.stages(),
            [Stage::Threshold(t), Stage::Despill(_)] if t.threshold() == 180
        ));
        assert_eq!(pipeline.background(), Some(BackgroundColor::WHITE));
    }

    #[test]
    fn test_integer_strength_is_accepted() {
        let config = CleanupConfig::from_toml_str("despill_strength = 1").unwrap();
        assert_eq!(config.despill_strength, Some(1.0));
    }

    #[test]
    fn test_order_required_with_both_filters() {
        let config = CleanupConfig::from_toml_str(
            "despill_strength = 0.1\nalpha_threshold = 100",
        )
        .unwrap();

        assert!(matches!(
            config.to_pipeline(),
            Err(CleanupError::InvalidParameter { name: "order", .. })
        ));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = CleanupConfig::from_toml_str("alpha_threshold = 256").unwrap();
        assert!(config.to_pipeline().is_err());

        let config = CleanupConfig::from_toml_str("despill_strength = -0.5").unwrap();
        assert!(config.to_pipeline().is_err());

        let config = CleanupConfig::from_toml_str("background_color = [255, 255, 255]").unwrap();
        assert!(config.to_pipeline().is_err());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(matches!(
            CleanupConfig::from_toml_str("despil_strength = 0.1"),
            Err(CleanupError::Config(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha_threshold = 200").unwrap();

        let config = CleanupConfig::from_file(file.path()).unwrap();
        assert_eq!(config.alpha_threshold, Some(200));

        let missing = CleanupConfig::from_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(CleanupError::Io(_))));
    }
}

//! Edge cleanup for background-removed images
//!
//! A segmenter hands over an RGBA raster whose soft (partially transparent)
//! edge pixels still carry a tint of the old background. This crate cleans
//! those edges and can flatten the result onto a solid backdrop:
//!
//! ```text
//! segmenter output -> [despill?] -> [threshold cutoff?] -> [composite?]
//! ```
//!
//! - [`cleanup::Despill`] scales color down in proportion to transparency
//! - [`cleanup::ThresholdCutoff`] zeroes alpha below a cutoff
//! - [`composite::composite`] blends onto a background color
//!
//! Every operation borrows its input and returns a new raster.

pub mod cleanup;
pub mod composite;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod raster;
pub mod segmentation;

pub use cleanup::{despill, threshold_cutoff, Despill, EdgeFilter, ThresholdCutoff};
pub use composite::{composite, composite_onto, BackgroundColor};
pub use config::{CleanupConfig, StageOrder};
pub use error::{CleanupError, Result};
pub use pipeline::{Cleaned, Pipeline, PipelineBuilder, Stage};
pub use raster::Raster;

use crate::cleanup::{Despill, EdgeFilter, ThresholdCutoff};
use crate::composite::{composite, BackgroundColor};
use crate::error::Result;
use crate::raster::Raster;

/// A single per-pixel cleanup step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    Despill(Despill),
    Threshold(ThresholdCutoff),
}

impl Stage {
    pub fn filter(&self) -> &dyn EdgeFilter {
        match self {
            Stage::Despill(filter) => filter,
            Stage::Threshold(filter) => filter,
        }
    }
}

impl From<Despill> for Stage {
    fn from(filter: Despill) -> Self {
        Stage::Despill(filter)
    }
}

impl From<ThresholdCutoff> for Stage {
    fn from(filter: ThresholdCutoff) -> Self {
        Stage::Threshold(filter)
    }
}

/// Result of running a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cleaned {
    /// Cleaned foreground, alpha preserved
    Transparent(Raster),
    /// Foreground composited onto the background, alpha is 255 everywhere
    Opaque(Raster),
}

impl Cleaned {
    pub fn raster(&self) -> &Raster {
        match self {
            Cleaned::Transparent(raster) | Cleaned::Opaque(raster) => raster,
        }
    }

    pub fn into_raster(self) -> Raster {
        match self {
            Cleaned::Transparent(raster) | Cleaned::Opaque(raster) => raster,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Cleaned::Opaque(_))
    }
}

/// Segmenter output -> [despill | threshold]* -> [composite?]
///
/// Stages run in the order they were added. Despill and threshold cutoff do
/// not commute, so the caller decides which goes first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    stages: Vec<Stage>,
    background: Option<BackgroundColor>,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn background(&self) -> Option<BackgroundColor> {
        self.background
    }

    /// Run every stage on a copy of `input`
    pub fn run(&self, input: &Raster) -> Cleaned {
        let (width, height) = input.dimensions();
        let _span = tracing::debug_span!("cleanup_pipeline", width, height).entered();

        let mut raster = input.clone();
        for stage in &self.stages {
            let filter = stage.filter();
            filter.apply_in_place(&mut raster);
            tracing::debug!(
                stage = filter.name(),
                soft_edges = raster.soft_edge_count(),
                "Stage complete"
            );
        }

        match self.background {
            Some(background) => Cleaned::Opaque(composite(&raster, background)),
            None => Cleaned::Transparent(raster),
        }
    }
}

/// Builder for [`Pipeline`]; parameters are validated as they are added
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    stages: Vec<Stage>,
    background: Option<BackgroundColor>,
}

impl PipelineBuilder {
    pub fn despill(self, strength: f64) -> Result<Self> {
        Ok(self.stage(Despill::new(strength)?))
    }

    pub fn threshold(self, threshold: i64) -> Result<Self> {
        Ok(self.stage(ThresholdCutoff::new(threshold)?))
    }

    pub fn stage(mut self, stage: impl Into<Stage>) -> Self {
        self.stages.push(stage.into());
        self
    }

    pub fn background(mut self, color: BackgroundColor) -> Self {
        self.background = Some(color);
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            stages: self.stages,
            background: self.background,
        }
    }
}

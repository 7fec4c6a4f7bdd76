use crate::core::probability_model::ProbabilityModel;
use crate::dissimilarity::{LowWeightPolicy, MultiplyStyle};
use crate::measures::{
    DifferenceStrategy, Eskin, Gambaryan, Goodall, InverseOccurrenceFrequency, Lin,
    OccurrenceFrequency, Overlap, WeightAdjustment,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Frequency-based measures that need no training.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum BaseMeasure {
    #[strum(message = "Eskin", detailed_message = "Mismatch cost shrinks with the number of values.")]
    Eskin,
    #[strum(message = "Goodall", detailed_message = "Matches on rare values are more similar.")]
    Goodall,
    #[strum(message = "Lin", detailed_message = "Information-theoretic similarity.")]
    Lin,
    #[strum(message = "Gambaryan", detailed_message = "Matches weighted by value entropy.")]
    Gambaryan,
    #[strum(
        message = "Occurrence frequency",
        detailed_message = "Mismatches on rare values are more dissimilar."
    )]
    OccurrenceFrequency,
    #[strum(
        message = "Inverse occurrence frequency",
        detailed_message = "Mismatches on frequent values are more dissimilar."
    )]
    InverseOccurrenceFrequency,
    #[strum(message = "Overlap", detailed_message = "0 on a match, 1 otherwise.")]
    Overlap,
}

impl BaseMeasure {
    pub fn build(self, model: Arc<ProbabilityModel>) -> Box<dyn DifferenceStrategy> {
        match self {
            BaseMeasure::Eskin => Box::new(Eskin::new(model)),
            BaseMeasure::Goodall => Box::new(Goodall::new(model)),
            BaseMeasure::Lin => Box::new(Lin::new(model)),
            BaseMeasure::Gambaryan => Box::new(Gambaryan::new(model)),
            BaseMeasure::OccurrenceFrequency => Box::new(OccurrenceFrequency::new(model)),
            BaseMeasure::InverseOccurrenceFrequency => {
                Box::new(InverseOccurrenceFrequency::new(model))
            }
            BaseMeasure::Overlap => Box::new(Overlap),
        }
    }

    /// Usual way trained weights are combined with this measure.
    pub fn modified_adjustment(self) -> WeightAdjustment {
        match self {
            BaseMeasure::Eskin => {
                WeightAdjustment::new(LowWeightPolicy::MaxLow, MultiplyStyle::Normal)
            }
            BaseMeasure::OccurrenceFrequency | BaseMeasure::InverseOccurrenceFrequency => {
                WeightAdjustment::new(LowWeightPolicy::MaxLow, MultiplyStyle::OneMinus)
            }
            BaseMeasure::Gambaryan => {
                WeightAdjustment::new(LowWeightPolicy::Base, MultiplyStyle::OneMinus)
            }
            BaseMeasure::Goodall | BaseMeasure::Lin | BaseMeasure::Overlap => {
                WeightAdjustment::new(LowWeightPolicy::Base, MultiplyStyle::Normal)
            }
        }
    }
}

/// Which difference a distance function uses for nominal attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureKind {
    Statistical(BaseMeasure),
    /// Trained per-attribute dissimilarity tables.
    LearningBased,
    /// A statistical measure scaled by trained attribute weights. Training
    /// for these always uses kappa weights over untouched confusion rows.
    Modified {
        base: BaseMeasure,
        adjustment: WeightAdjustment,
    },
}

impl MeasureKind {
    /// `base` with its usual weight adjustment.
    pub fn modified(base: BaseMeasure) -> Self {
        MeasureKind::Modified {
            base,
            adjustment: base.modified_adjustment(),
        }
    }

    pub fn needs_training(&self) -> bool {
        !matches!(self, MeasureKind::Statistical(_))
    }
}

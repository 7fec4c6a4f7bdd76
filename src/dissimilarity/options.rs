use crate::error::{DistanceError, Result};
use crate::evaluation::AucVariant;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};
use tracing::warn;

/// How the diagonal of a row-normalized confusion matrix is adjusted before
/// it is read as a similarity matrix.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
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
pub enum DiagonalStrategy {
    #[default]
    #[strum(message = "A", detailed_message = "Add 1 to the diagonal, then renormalize rows.")]
    AddOne,
    #[strum(message = "N", detailed_message = "Leave the matrix untouched.")]
    Untouched,
    #[strum(message = "B", detailed_message = "Add 2 to the diagonal, then renormalize rows.")]
    AddTwo,
    #[strum(message = "C", detailed_message = "Force the diagonal to 1.")]
    ForceOne,
    #[strum(
        message = "D",
        detailed_message = "Add 1 to the diagonal, renormalize rows, then force the diagonal to 1."
    )]
    AddOneForceOne,
    #[strum(
        message = "E",
        detailed_message = "Add 2 to the diagonal, renormalize rows, then force the diagonal to 1."
    )]
    AddTwoForceOne,
}

impl DiagonalStrategy {
    /// Single-letter flag value. Unknown letters give the default strategy.
    pub fn from_flag(flag: &str) -> Self {
        match flag {
            "N" => Self::Untouched,
            "B" => Self::AddTwo,
            "C" => Self::ForceOne,
            "D" => Self::AddOneForceOne,
            "E" => Self::AddTwoForceOne,
            "A" => Self::AddOne,
            other => {
                warn!(value = other, "unknown strategy, using A");
                Self::AddOne
            }
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Self::AddOne => "A",
            Self::Untouched => "N",
            Self::AddTwo => "B",
            Self::ForceOne => "C",
            Self::AddOneForceOne => "D",
            Self::AddTwoForceOne => "E",
        }
    }
}

/// Score used to pick the winning classifier of an attribute.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SelectionScore {
    #[default]
    Auc,
    Kappa,
}

/// Score used as the weight of an attribute.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum WeightSource {
    Auc,
    Kappa,
    #[default]
    Uniform,
}

/// What a learned difference does when the attribute weight is below 0.5.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
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
pub enum LowWeightPolicy {
    #[default]
    #[strum(message = "Keep the weighted difference.")]
    Base,
    #[strum(message = "Return 0.")]
    DiscardLow,
    #[strum(message = "Return 1.")]
    MaxLow,
    #[strum(message = "Return overlap: 0 when equal, 1 otherwise.")]
    BaseLow,
}

/// How the attribute weight scales a difference.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum MultiplyStyle {
    /// `weight · d`
    #[default]
    Normal,
    /// `(1 − weight) · d`
    OneMinus,
    /// `d`
    None,
}

fn default_folds() -> usize {
    10
}

fn default_seed() -> u64 {
    1
}

fn default_max_values() -> usize {
    50
}

fn default_lazy_classifier_limit() -> usize {
    1000
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_attribute_range() -> String {
    "first-last".to_string()
}

/// Parses a choice by name and falls back to its default on anything else.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default + std::fmt::Display,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = value.as_str().and_then(|s| T::from_str(s).ok());
    Ok(parsed.unwrap_or_else(|| {
        let fallback = T::default();
        warn!(%value, %fallback, "unknown option value, using default");
        fallback
    }))
}

/// Everything the learning-based dissimilarity can be tuned with.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LearningOptions {
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(
        title = "Diagonal strategy",
        description = "Adjustment applied to the diagonal of the similarity matrix."
    )]
    pub strategy: DiagonalStrategy,

    #[serde(default, deserialize_with = "lenient")]
    #[schemars(
        title = "Selection score",
        description = "Score that picks the best classifier for an attribute."
    )]
    pub decide_weight_by: SelectionScore,

    #[serde(default, deserialize_with = "lenient")]
    #[schemars(
        title = "Weight source",
        description = "Score stored as the attribute weight (uniform means 1)."
    )]
    pub multiply_weight_by: WeightSource,

    #[serde(default, deserialize_with = "lenient")]
    #[schemars(title = "AUC variant", description = "How the AUC of a classifier is estimated.")]
    pub auc_variant: AucVariant,

    #[serde(default = "default_false")]
    #[schemars(
        title = "Symmetric",
        description = "Average the similarity matrix with its transpose?",
        default = "default_false"
    )]
    pub symmetric: bool,

    #[serde(default = "default_false")]
    #[schemars(
        title = "Normalize dissimilarity",
        description = "Row-normalize the dissimilarity matrix?",
        default = "default_false"
    )]
    pub normalize_dissimilarity: bool,

    #[serde(default, deserialize_with = "lenient")]
    #[schemars(
        title = "Low weight policy",
        description = "Behavior of a learned difference when the weight is below 0.5."
    )]
    pub low_weight_policy: LowWeightPolicy,

    #[serde(default, deserialize_with = "lenient")]
    #[schemars(title = "Multiply style", description = "How the weight scales a difference.")]
    pub multiply_style: MultiplyStyle,

    #[serde(default = "default_folds")]
    #[schemars(
        title = "Folds",
        description = "Cross-validation folds per classifier.",
        range(min = 2),
        default = "default_folds"
    )]
    pub folds: usize,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "Seed of the fold shuffle.", default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_max_values")]
    #[schemars(
        title = "Max values",
        description = "Attributes with more declared values are not modeled.",
        default = "default_max_values"
    )]
    pub max_values: usize,

    #[serde(default = "default_lazy_classifier_limit")]
    #[schemars(
        title = "Lazy classifier limit",
        description = "The nearest-neighbour candidate is used only below this many instances.",
        default = "default_lazy_classifier_limit"
    )]
    pub lazy_classifier_limit: usize,

    #[serde(default = "default_true")]
    #[schemars(
        title = "Parallel",
        description = "Train attributes in parallel?",
        default = "default_true"
    )]
    pub parallel: bool,

    #[serde(default)]
    #[schemars(
        title = "Time budget (s)",
        description = "Wall-clock budget per attribute; remaining candidates are skipped once exceeded."
    )]
    pub time_budget_secs: Option<u64>,

    #[serde(default = "default_attribute_range")]
    #[schemars(
        title = "Attribute range",
        description = "Attributes taking part in the distance, e.g. first-last or 1,3-5.",
        default = "default_attribute_range"
    )]
    pub attribute_range: String,
}

impl Default for LearningOptions {
    fn default() -> Self {
        Self {
            strategy: DiagonalStrategy::default(),
            decide_weight_by: SelectionScore::default(),
            multiply_weight_by: WeightSource::default(),
            auc_variant: AucVariant::default(),
            symmetric: default_false(),
            normalize_dissimilarity: default_false(),
            low_weight_policy: LowWeightPolicy::default(),
            multiply_style: MultiplyStyle::default(),
            folds: default_folds(),
            seed: default_seed(),
            max_values: default_max_values(),
            lazy_classifier_limit: default_lazy_classifier_limit(),
            parallel: default_true(),
            time_budget_secs: None,
            attribute_range: default_attribute_range(),
        }
    }
}

fn flag_value<'a, S: AsRef<str>>(flags: &'a [S], i: usize, name: &str) -> Result<&'a str> {
    flags
        .get(i + 1)
        .map(AsRef::as_ref)
        .ok_or_else(|| DistanceError::InvalidParameter(format!("option {name} expects a value")))
}

impl LearningOptions {
    pub fn schema() -> Schema {
        schema_for!(LearningOptions)
    }

    /// What the weight-scaled statistical measures train with: raw confusion
    /// rows and kappa as the attribute weight. Everything else is kept.
    pub fn for_modified(&self) -> LearningOptions {
        LearningOptions {
            strategy: DiagonalStrategy::Untouched,
            multiply_weight_by: WeightSource::Kappa,
            ..self.clone()
        }
    }

    /// Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parses single-letter flags: `-S <A|N|B|C|D|E>`, `-w <A|K>`,
    /// `-W <A|K|N>`, `-o <B|D|M|L>`, `-t <N|I>`, `-a <N|S|W>`, `-s`, `-n`,
    /// `-R <range>` and `-x <folds>`.
    ///
    /// `-w` takes the `-W` value when only `-W` is given. Without `-t` the
    /// weight does not scale the difference. Unknown values fall back to
    /// the defaults; a missing value or a malformed fold count is an error.
    pub fn from_flags<S: AsRef<str>>(flags: &[S]) -> Result<Self> {
        let mut options = LearningOptions {
            multiply_style: MultiplyStyle::None,
            ..Default::default()
        };
        let mut decide: Option<String> = None;
        let mut multiply: Option<String> = None;

        let mut i = 0;
        while i < flags.len() {
            let flag = flags[i].as_ref();
            let mut consumed = 2;
            match flag {
                "-S" => options.strategy = DiagonalStrategy::from_flag(flag_value(flags, i, flag)?),
                "-w" => decide = Some(flag_value(flags, i, flag)?.to_string()),
                "-W" => multiply = Some(flag_value(flags, i, flag)?.to_string()),
                "-o" => {
                    options.low_weight_policy = match flag_value(flags, i, flag)? {
                        "D" => LowWeightPolicy::DiscardLow,
                        "M" => LowWeightPolicy::MaxLow,
                        "L" => LowWeightPolicy::BaseLow,
                        _ => LowWeightPolicy::Base,
                    }
                }
                "-t" => {
                    options.multiply_style = match flag_value(flags, i, flag)? {
                        "I" => MultiplyStyle::OneMinus,
                        "N" => MultiplyStyle::Normal,
                        _ => MultiplyStyle::None,
                    }
                }
                "-a" => {
                    options.auc_variant = match flag_value(flags, i, flag)? {
                        "S" => AucVariant::OneVsRest,
                        "W" => AucVariant::External,
                        _ => AucVariant::PairwiseAverage,
                    }
                }
                "-R" => options.attribute_range = flag_value(flags, i, flag)?.to_string(),
                "-x" => {
                    let raw = flag_value(flags, i, flag)?;
                    options.folds = raw.parse().map_err(|_| {
                        DistanceError::InvalidParameter(format!("invalid fold count '{raw}'"))
                    })?;
                }
                "-s" => {
                    options.symmetric = true;
                    consumed = 1;
                }
                "-n" => {
                    options.normalize_dissimilarity = true;
                    consumed = 1;
                }
                other => {
                    warn!(flag = other, "ignoring unknown option");
                    consumed = 1;
                }
            }
            i += consumed;
        }

        if let Some(m) = multiply.as_deref() {
            options.multiply_weight_by = match m {
                "A" => WeightSource::Auc,
                "K" => WeightSource::Kappa,
                _ => WeightSource::Uniform,
            };
        }
        options.decide_weight_by = match decide.as_deref().or(multiply.as_deref()) {
            Some("K") => SelectionScore::Kappa,
            _ => SelectionScore::Auc,
        };
        Ok(options)
    }

    /// Inverse of [`from_flags`](Self::from_flags).
    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = vec![
            "-S".to_string(),
            self.strategy.flag().to_string(),
            "-W".to_string(),
            match self.multiply_weight_by {
                WeightSource::Auc => "A",
                WeightSource::Kappa => "K",
                WeightSource::Uniform => "N",
            }
            .to_string(),
            "-w".to_string(),
            match self.decide_weight_by {
                SelectionScore::Auc => "A",
                SelectionScore::Kappa => "K",
            }
            .to_string(),
            "-o".to_string(),
            match self.low_weight_policy {
                LowWeightPolicy::Base => "B",
                LowWeightPolicy::DiscardLow => "D",
                LowWeightPolicy::MaxLow => "M",
                LowWeightPolicy::BaseLow => "L",
            }
            .to_string(),
            "-t".to_string(),
            match self.multiply_style {
                MultiplyStyle::Normal => "N",
                MultiplyStyle::OneMinus => "I",
                MultiplyStyle::None => "O",
            }
            .to_string(),
            "-a".to_string(),
            match self.auc_variant {
                AucVariant::PairwiseAverage => "N",
                AucVariant::OneVsRest => "S",
                AucVariant::External => "W",
            }
            .to_string(),
            "-R".to_string(),
            self.attribute_range.clone(),
            "-x".to_string(),
            self.folds.to_string(),
        ];
        if self.symmetric {
            flags.push("-s".to_string());
        }
        if self.normalize_dissimilarity {
            flags.push("-n".to_string());
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use strum::{EnumMessage, IntoEnumIterator};

    #[test]
    fn defaults() {
        let o = LearningOptions::default();
        assert_eq!(o.strategy, DiagonalStrategy::AddOne);
        assert_eq!(o.decide_weight_by, SelectionScore::Auc);
        assert_eq!(o.multiply_weight_by, WeightSource::Uniform);
        assert_eq!(o.folds, 10);
        assert_eq!(o.seed, 1);
        assert_eq!(o.max_values, 50);
        assert_eq!(o.lazy_classifier_limit, 1000);
        assert!(o.parallel);
        assert_eq!(o.attribute_range, "first-last");
    }

    #[test]
    fn json_missing_fields_apply_defaults() {
        let o: LearningOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(o, LearningOptions::default());
    }

    #[test]
    fn json_names_are_kebab_case() {
        let o = LearningOptions::from_json(
            r#"{"strategy": "add-two-force-one", "auc_variant": "one-vs-rest",
                "low_weight_policy": "base-low", "multiply_style": "one-minus", "folds": 5}"#,
        )
        .unwrap();
        assert_eq!(o.strategy, DiagonalStrategy::AddTwoForceOne);
        assert_eq!(o.auc_variant, AucVariant::OneVsRest);
        assert_eq!(o.low_weight_policy, LowWeightPolicy::BaseLow);
        assert_eq!(o.multiply_style, MultiplyStyle::OneMinus);
        assert_eq!(o.folds, 5);

        let v = serde_json::to_value(&o).unwrap();
        assert_eq!(v["strategy"], "add-two-force-one");
    }

    #[test]
    fn unknown_choice_values_fall_back_to_default() {
        let o = LearningOptions::from_json(
            r#"{"strategy": "Z", "decide_weight_by": 3, "multiply_style": "sideways"}"#,
        )
        .unwrap();
        assert_eq!(o.strategy, DiagonalStrategy::AddOne);
        assert_eq!(o.decide_weight_by, SelectionScore::Auc);
        assert_eq!(o.multiply_style, MultiplyStyle::Normal);
    }

    #[test]
    fn reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"symmetric": true, "seed": 7}}"#).unwrap();
        let o = LearningOptions::from_json_file(file.path()).unwrap();
        assert!(o.symmetric);
        assert_eq!(o.seed, 7);

        let missing = LearningOptions::from_json_file(file.path().with_extension("nope"));
        assert!(matches!(missing, Err(DistanceError::Io(_))));
    }

    #[test]
    fn flags_follow_the_letter_scheme() {
        let o = LearningOptions::from_flags(&[
            "-S", "E", "-W", "K", "-o", "M", "-t", "I", "-a", "W", "-s", "-n", "-R", "1-3",
        ])
        .unwrap();
        assert_eq!(o.strategy, DiagonalStrategy::AddTwoForceOne);
        assert_eq!(o.multiply_weight_by, WeightSource::Kappa);
        assert_eq!(o.decide_weight_by, SelectionScore::Kappa);
        assert_eq!(o.low_weight_policy, LowWeightPolicy::MaxLow);
        assert_eq!(o.multiply_style, MultiplyStyle::OneMinus);
        assert_eq!(o.auc_variant, AucVariant::External);
        assert!(o.symmetric && o.normalize_dissimilarity);
        assert_eq!(o.attribute_range, "1-3");
    }

    #[test]
    fn explicit_decide_flag_wins_and_absent_style_does_not_multiply() {
        let o = LearningOptions::from_flags(&["-W", "K", "-w", "A"]).unwrap();
        assert_eq!(o.decide_weight_by, SelectionScore::Auc);
        assert_eq!(o.multiply_style, MultiplyStyle::None);

        let o = LearningOptions::from_flags::<&str>(&[]).unwrap();
        assert_eq!(o.multiply_weight_by, WeightSource::Uniform);
        assert_eq!(o.decide_weight_by, SelectionScore::Auc);
    }

    #[test]
    fn bad_flags() {
        assert!(LearningOptions::from_flags(&["-S"]).is_err());
        assert!(LearningOptions::from_flags(&["-x", "ten"]).is_err());
        let o = LearningOptions::from_flags(&["-S", "Q", "--verbose"]).unwrap();
        assert_eq!(o.strategy, DiagonalStrategy::AddOne);
    }

    #[test]
    fn flags_round_trip() {
        let o = LearningOptions {
            strategy: DiagonalStrategy::ForceOne,
            multiply_weight_by: WeightSource::Auc,
            decide_weight_by: SelectionScore::Kappa,
            symmetric: true,
            ..Default::default()
        };
        assert_eq!(LearningOptions::from_flags(&o.to_flags()).unwrap(), o);
    }

    #[test]
    fn modified_training_uses_kappa_on_raw_rows() {
        let base = LearningOptions {
            folds: 4,
            symmetric: true,
            ..LearningOptions::default()
        };
        let o = base.for_modified();
        assert_eq!(o.strategy, DiagonalStrategy::Untouched);
        assert_eq!(o.multiply_weight_by, WeightSource::Kappa);
        assert_eq!(o.decide_weight_by, SelectionScore::Auc);
        assert_eq!(o.folds, 4);
        assert!(o.symmetric);
    }

    #[test]
    fn every_strategy_has_a_letter() {
        for s in DiagonalStrategy::iter() {
            assert_eq!(s.get_message(), Some(s.flag()));
            assert_eq!(DiagonalStrategy::from_flag(s.flag()), s);
        }
    }

    #[test]
    fn schema_lists_every_field() {
        let v = serde_json::to_value(LearningOptions::schema()).unwrap();
        let props = v.get("properties").and_then(Value::as_object).unwrap();
        for key in ["strategy", "folds", "seed", "attribute_range", "time_budget_secs"] {
            assert!(props.contains_key(key), "missing {key}");
        }
    }
}

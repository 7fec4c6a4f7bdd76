use crate::core::dataset::AttributeStats;
use std::fmt;

/// Why an attribute gets weight 0 and no dissimilarity table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    NotNominal,
    TooManyValues { declared: usize, limit: usize },
    UnobservedValue { label: String },
    MostlyMissing { missing: usize, total: usize },
    NoUsableClassifier,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::NotNominal => write!(f, "attribute is not nominal"),
            ExclusionReason::TooManyValues { declared, limit } => {
                write!(f, "{declared} declared values exceed the limit of {limit}")
            }
            ExclusionReason::UnobservedValue { label } => {
                write!(f, "value '{label}' never occurs")
            }
            ExclusionReason::MostlyMissing { missing, total } => {
                write!(f, "{missing} of {total} values are missing")
            }
            ExclusionReason::NoUsableClassifier => write!(f, "no classifier could be evaluated"),
        }
    }
}

/// Gate applied before any classifier is trained on an attribute.
pub fn check_eligibility<S: AsRef<str>>(
    labels: &[S],
    stats: &AttributeStats,
    max_values: usize,
) -> Result<(), ExclusionReason> {
    if labels.len() > max_values {
        return Err(ExclusionReason::TooManyValues {
            declared: labels.len(),
            limit: max_values,
        });
    }
    if let Some(pos) = stats.nominal_counts.iter().position(|&c| c == 0) {
        return Err(ExclusionReason::UnobservedValue {
            label: labels
                .get(pos)
                .map(|l| l.as_ref().to_string())
                .unwrap_or_default(),
        });
    }
    if stats.missing_count * 2 > stats.total_count {
        return Err(ExclusionReason::MostlyMissing {
            missing: stats.missing_count,
            total: stats.total_count,
        });
    }
    Ok(())
}

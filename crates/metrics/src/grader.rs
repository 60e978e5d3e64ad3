use crate::error::MetricsError;
use configuration::{GradeBand, GradingConfig};
use core_types::Grade;
use rust_decimal::Decimal;

/// Maps an ROI percentage to a letter grade.
///
/// Bands are lower bounds checked from the highest to the lowest; the first
/// band the ROI reaches wins, and anything below the last band gets the floor
/// grade. This makes the bands contiguous over every value by construction.
#[derive(Debug, Clone)]
pub struct Grader {
    bands: Vec<GradeBand>,
    floor: Grade,
}

impl Grader {
    /// Creates a grader after checking that thresholds and grades both strictly descend.
    pub fn new(config: &GradingConfig) -> Result<Self, MetricsError> {
        if config.bands.is_empty() {
            return Err(MetricsError::InvalidGradeBands(
                "at least one band is required".to_string(),
            ));
        }

        for pair in config.bands.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            if lower.min_roi_pct >= upper.min_roi_pct {
                return Err(MetricsError::InvalidGradeBands(format!(
                    "threshold {} must be below {}",
                    lower.min_roi_pct, upper.min_roi_pct
                )));
            }
            if lower.grade >= upper.grade {
                return Err(MetricsError::InvalidGradeBands(format!(
                    "grade {} must rank below {}",
                    lower.grade, upper.grade
                )));
            }
        }

        if let Some(last) = config.bands.last() {
            if config.floor >= last.grade {
                return Err(MetricsError::InvalidGradeBands(format!(
                    "floor grade {} must rank below {}",
                    config.floor, last.grade
                )));
            }
        }

        Ok(Self {
            bands: config.bands.clone(),
            floor: config.floor,
        })
    }

    /// The standard A+ through F scale.
    pub fn standard() -> Self {
        let config = GradingConfig::default();
        Self {
            bands: config.bands,
            floor: config.floor,
        }
    }

    pub fn grade(&self, roi_pct: Decimal) -> Grade {
        self.bands
            .iter()
            .find(|band| roi_pct >= band.min_roi_pct)
            .map(|band| band.grade)
            .unwrap_or(self.floor)
    }

    pub fn bands(&self) -> &[GradeBand] {
        &self.bands
    }

    pub fn floor(&self) -> Grade {
        self.floor
    }
}

impl Default for Grader {
    fn default() -> Self {
        Self::standard()
    }
}

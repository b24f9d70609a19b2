use crate::detector::{StreakIncrement, StreakParams};
use crate::error::{BackgroundError, BackgroundResult};
use crate::types::Tower;
use serde::{Deserialize, Serialize};

/// Calibrated outer-HCal towers.
pub const DEFAULT_INPUT_SELECTOR: &str = "TOWERINFO_CALIB_HCALOUT";

fn default_input_selector() -> String {
    DEFAULT_INPUT_SELECTOR.to_string()
}

/// Per-filter options. The three thresholds are required when read from
/// JSON; everything else falls back to its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub min_candidate_energy: f32,
    pub max_neighbor_energy: f32,
    pub min_streak_count: u32,
    /// Name of the tower collection the filter reads.
    #[serde(default = "default_input_selector")]
    pub input_selector: String,
    #[serde(default)]
    pub good_status: u8,
    #[serde(default)]
    pub increment: StreakIncrement,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub verbosity: u8,
}

impl Default for FilterConfig {
    fn default() -> Self {
        let streak = StreakParams::default();
        Self {
            min_candidate_energy: streak.min_candidate_energy,
            max_neighbor_energy: streak.max_neighbor_energy,
            min_streak_count: streak.min_streak_count,
            input_selector: default_input_selector(),
            good_status: streak.good_status,
            increment: streak.increment,
            debug: false,
            verbosity: 0,
        }
    }
}

impl FilterConfig {
    pub fn streak_params(&self) -> StreakParams {
        StreakParams {
            min_candidate_energy: self.min_candidate_energy,
            max_neighbor_energy: self.max_neighbor_energy,
            min_streak_count: self.min_streak_count,
            good_status: self.good_status,
            increment: self.increment,
        }
    }

    /// Whether per-call tracing is enabled for this filter.
    pub fn traces(&self) -> bool {
        self.debug && self.verbosity > 2
    }

    pub fn validate(&self, filter: &str) -> BackgroundResult<()> {
        if !self.min_candidate_energy.is_finite() || !self.max_neighbor_energy.is_finite() {
            return Err(BackgroundError::Config(format!(
                "filter {filter}: energy thresholds must be finite"
            )));
        }
        // Unset cells must never qualify as candidates.
        if self.min_candidate_energy <= Tower::UNSET_ENERGY {
            return Err(BackgroundError::Config(format!(
                "filter {filter}: min_candidate_energy {} must be above the unset sentinel {}",
                self.min_candidate_energy,
                Tower::UNSET_ENERGY
            )));
        }
        if self.input_selector.trim().is_empty() {
            return Err(BackgroundError::Config(format!(
                "filter {filter}: input_selector is empty"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_with_thresholds_only_uses_defaults_elsewhere() {
        let cfg: FilterConfig = serde_json::from_str(
            r#"{"min_candidate_energy": 0.8, "max_neighbor_energy": 0.1, "min_streak_count": 3}"#,
        )
        .unwrap();
        assert_eq!(cfg.min_candidate_energy, 0.8);
        assert_eq!(cfg.input_selector, DEFAULT_INPUT_SELECTOR);
        assert_eq!(cfg.increment, StreakIncrement::Candidate);
        assert!(cfg.validate("StreakSideband").is_ok());
    }

    #[test]
    fn missing_threshold_fails_to_parse() {
        let res: Result<FilterConfig, _> =
            serde_json::from_str(r#"{"min_candidate_energy": 0.8, "min_streak_count": 3}"#);
        let err = res.unwrap_err().to_string();
        assert!(err.contains("max_neighbor_energy"), "unexpected error: {err}");
    }

    #[test]
    fn increment_variant_parses_snake_case() {
        let cfg: FilterConfig = serde_json::from_str(
            r#"{"min_candidate_energy": 0.6, "max_neighbor_energy": 0.06, "min_streak_count": 5,
                "increment": "candidate_and_up"}"#,
        )
        .unwrap();
        assert_eq!(cfg.streak_params().increment, StreakIncrement::CandidateAndUp);
    }

    #[test]
    fn validate_rejects_sentinel_candidate_threshold() {
        let cfg = FilterConfig {
            min_candidate_energy: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate("StreakSideband"),
            Err(BackgroundError::Config(_))
        ));
    }

    #[test]
    fn validate_rejects_nan_and_empty_selector() {
        let nan = FilterConfig {
            max_neighbor_energy: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate("a").is_err());
        let empty = FilterConfig {
            input_selector: "  ".into(),
            ..Default::default()
        };
        assert!(empty.validate("b").is_err());
    }
}

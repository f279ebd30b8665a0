//! Confidence tiers derived from similarity scores

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

const DEFAULT_HIGH: f32 = 0.90;
const DEFAULT_MEDIUM: f32 = 0.80;
const DEFAULT_LOW: f32 = 0.70;

/// Discrete confidence bucket for a cache match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    /// Stored answer is returned verbatim
    High,
    /// Stored answer is returned with a confidence note
    Medium,
    /// Stored answer is adapted to the exact phrasing by the generator
    Low,
    /// Not a usable match
    None,
}

impl ConfidenceTier {
    /// Tier for a similarity score using the default boundaries
    pub fn from_similarity(similarity: f32) -> Self {
        ConfidenceThresholds::default().tier_for(similarity)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive lower bounds of each tier
///
/// `low` doubles as the minimum acceptance threshold for a cache hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    #[serde(default = "default_high")]
    pub high: f32,
    #[serde(default = "default_medium")]
    pub medium: f32,
    #[serde(default = "default_low")]
    pub low: f32,
}

fn default_high() -> f32 {
    DEFAULT_HIGH
}

fn default_medium() -> f32 {
    DEFAULT_MEDIUM
}

fn default_low() -> f32 {
    DEFAULT_LOW
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH,
            medium: DEFAULT_MEDIUM,
            low: DEFAULT_LOW,
        }
    }
}

impl ConfidenceThresholds {
    /// Create thresholds after checking `0 <= low <= medium <= high <= 1`
    pub fn new(high: f32, medium: f32, low: f32) -> Result<Self, DomainError> {
        let thresholds = Self { high, medium, low };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let in_range = |v: f32| (0.0..=1.0).contains(&v);

        if !(in_range(self.high) && in_range(self.medium) && in_range(self.low)) {
            return Err(DomainError::configuration(
                "Confidence thresholds must be within [0, 1]",
            ));
        }

        if !(self.low <= self.medium && self.medium <= self.high) {
            return Err(DomainError::configuration(format!(
                "Confidence thresholds must satisfy low <= medium <= high (got {}, {}, {})",
                self.low, self.medium, self.high
            )));
        }

        Ok(())
    }

    /// Minimum similarity for a stored question to count as a hit
    pub fn min_acceptance(&self) -> f32 {
        self.low
    }

    /// Map a similarity to its tier, evaluated high to low
    pub fn tier_for(&self, similarity: f32) -> ConfidenceTier {
        if similarity >= self.high {
            ConfidenceTier::High
        } else if similarity >= self.medium {
            ConfidenceTier::Medium
        } else if similarity >= self.low {
            ConfidenceTier::Low
        } else {
            ConfidenceTier::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_for_representative_scores() {
        assert_eq!(ConfidenceTier::from_similarity(0.95), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_similarity(0.85), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_similarity(0.75), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_similarity(0.5), ConfidenceTier::None);
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        assert_eq!(ConfidenceTier::from_similarity(0.90), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_similarity(0.80), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_similarity(0.70), ConfidenceTier::Low);
    }

    #[test]
    fn test_negative_similarity_is_none() {
        assert_eq!(ConfidenceTier::from_similarity(-0.4), ConfidenceTier::None);
    }

    #[test]
    fn test_min_acceptance_is_low_boundary() {
        let thresholds = ConfidenceThresholds::default();
        assert_eq!(thresholds.min_acceptance(), thresholds.low);
        assert!((thresholds.min_acceptance() - 0.70).abs() < f32::EPSILON);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = ConfidenceThresholds::new(0.95, 0.9, 0.85).unwrap();

        assert_eq!(thresholds.tier_for(0.92), ConfidenceTier::Medium);
        assert_eq!(thresholds.tier_for(0.8), ConfidenceTier::None);
    }

    #[test]
    fn test_thresholds_reject_bad_order() {
        assert!(ConfidenceThresholds::new(0.7, 0.8, 0.9).is_err());
        assert!(ConfidenceThresholds::new(1.2, 0.8, 0.7).is_err());
        assert!(ConfidenceThresholds::new(0.9, 0.8, -0.1).is_err());
    }

    #[test]
    fn test_tier_serialization() {
        assert_eq!(
            serde_json::to_string(&ConfidenceTier::Medium).unwrap(),
            "\"medium\""
        );
        assert_eq!(ConfidenceTier::Low.to_string(), "low");
    }
}

use super::factors::Threshold;
use crate::startup::Recommendation;

/// Score bands for the two positive decisions, tried INVEST first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationBands {
    pub invest: Threshold,
    pub monitor: Threshold,
}

impl Default for RecommendationBands {
    fn default() -> Self {
        Self {
            invest: Threshold::AtLeast(80.0),
            monitor: Threshold::AtLeast(55.0),
        }
    }
}

impl RecommendationBands {
    pub fn classify(&self, score: u8) -> Recommendation {
        let score = f64::from(score);
        if self.invest.matches(score) {
            Recommendation::Invest
        } else if self.monitor.matches(score) {
            Recommendation::Monitor
        } else {
            Recommendation::Reject
        }
    }
}

/// Map a score to a decision with the standard bands (≥80 invest, ≥55 monitor).
pub fn recommend(score: u8) -> Recommendation {
    RecommendationBands::default().classify(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_achievable_score() {
        assert_eq!(recommend(0), Recommendation::Reject);
        assert_eq!(recommend(20), Recommendation::Reject);
        assert_eq!(recommend(40), Recommendation::Reject);
        assert_eq!(recommend(60), Recommendation::Monitor);
        assert_eq!(recommend(80), Recommendation::Invest);
        assert_eq!(recommend(100), Recommendation::Invest);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(recommend(54), Recommendation::Reject);
        assert_eq!(recommend(55), Recommendation::Monitor);
        assert_eq!(recommend(79), Recommendation::Monitor);
    }

    #[test]
    fn test_custom_bands() {
        let bands = RecommendationBands {
            invest: Threshold::AtLeast(100.0),
            monitor: Threshold::Between(40.0, 80.0),
        };
        assert_eq!(bands.classify(100), Recommendation::Invest);
        assert_eq!(bands.classify(80), Recommendation::Monitor);
        assert_eq!(bands.classify(20), Recommendation::Reject);
    }
}

use serde::Serialize;

use super::factors::Threshold;

/// Growth tier mapping to an ARR multiple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthTier {
    pub growth: Threshold,
    pub multiple: f64,
}

/// Estimated company value and the multiple that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Valuation {
    pub amount: f64,
    pub multiple: f64,
}

/// Ordered growth tiers with a fallback multiple. First match wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationTable {
    pub tiers: Vec<GrowthTier>,
    pub default_multiple: f64,
}

impl Default for ValuationTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                GrowthTier {
                    growth: Threshold::Above(15.0),
                    multiple: 12.0,
                },
                GrowthTier {
                    growth: Threshold::Above(8.0),
                    multiple: 8.0,
                },
            ],
            default_multiple: 5.0,
        }
    }
}

impl ValuationTable {
    pub fn multiple_for(&self, growth: f64) -> f64 {
        self.tiers
            .iter()
            .find(|tier| tier.growth.matches(growth))
            .map(|tier| tier.multiple)
            .unwrap_or(self.default_multiple)
    }

    pub fn appraise(&self, arr: f64, growth: f64) -> Valuation {
        let multiple = self.multiple_for(growth);
        Valuation {
            amount: arr * multiple,
            multiple,
        }
    }
}

/// Value `arr` with the standard growth tiers (>15% → 12x, >8% → 8x, else 5x).
pub fn valuation(arr: f64, growth: f64) -> f64 {
    ValuationTable::default().appraise(arr, growth).amount
}

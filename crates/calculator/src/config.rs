//! Calculator factors and default prices.

use serde::{Deserialize, Serialize};

use corrugate_core::{DomainError, DomainResult};

pub const DEFAULT_LENGTH_SHRINKAGE: f64 = 1.006;
pub const DEFAULT_BREADTH_SHRINKAGE: f64 = 1.006;
pub const DEFAULT_HEIGHT_SHRINKAGE: f64 = 1.0112;
/// Take-up factor: extra paper a fluted layer consumes per unit of board area.
pub const DEFAULT_FLUTE_TAKE_UP: f64 = 1.35;
/// Paper price (per kg) used when neither the layer nor the request names one.
pub const DEFAULT_PAPER_COST_PER_KG: f64 = 80.0;
pub const DEFAULT_LABOR_FRACTION: f64 = 0.3;
pub const DEFAULT_PROFIT_MARGIN_PCT: f64 = 15.0;

/// Tunable inputs of the calculator.
///
/// Every field has a default, so a partial JSON/TOML document (or `{}`)
/// deserializes into a usable config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub length_shrinkage: f64,
    pub breadth_shrinkage: f64,
    pub height_shrinkage: f64,
    pub flute_take_up: f64,
    pub paper_cost_per_kg: f64,
    /// Labor cost as a fraction of material cost (0.3 = 30%).
    pub labor_fraction: f64,
    /// Default profit margin in percent, used when a request has none.
    pub profit_margin_pct: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            length_shrinkage: DEFAULT_LENGTH_SHRINKAGE,
            breadth_shrinkage: DEFAULT_BREADTH_SHRINKAGE,
            height_shrinkage: DEFAULT_HEIGHT_SHRINKAGE,
            flute_take_up: DEFAULT_FLUTE_TAKE_UP,
            paper_cost_per_kg: DEFAULT_PAPER_COST_PER_KG,
            labor_fraction: DEFAULT_LABOR_FRACTION,
            profit_margin_pct: DEFAULT_PROFIT_MARGIN_PCT,
        }
    }
}

impl CalculatorConfig {
    pub fn validate(&self) -> DomainResult<()> {
        for (field, factor) in [
            ("length_shrinkage", self.length_shrinkage),
            ("breadth_shrinkage", self.breadth_shrinkage),
            ("height_shrinkage", self.height_shrinkage),
            ("flute_take_up", self.flute_take_up),
        ] {
            // A shrinkage allowance only ever adds material.
            if !factor.is_finite() || factor < 1.0 {
                return Err(DomainError::validation(format!(
                    "{field} must be at least 1.0 (got {factor})"
                )));
            }
        }
        DomainError::ensure_positive("paper_cost_per_kg", self.paper_cost_per_kg)?;
        DomainError::ensure_non_negative("labor_fraction", self.labor_fraction)?;
        DomainError::ensure_non_negative("profit_margin_pct", self.profit_margin_pct)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        CalculatorConfig::default().validate().unwrap();
    }

    #[test]
    fn shrinkage_below_one_is_rejected() {
        let config = CalculatorConfig {
            height_shrinkage: 0.99,
            ..CalculatorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("height_shrinkage")));
    }

    #[test]
    fn zero_paper_cost_is_rejected() {
        let config = CalculatorConfig {
            paper_cost_per_kg: 0.0,
            ..CalculatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_labor_and_margin_are_allowed() {
        let config = CalculatorConfig {
            labor_fraction: 0.0,
            profit_margin_pct: 0.0,
            ..CalculatorConfig::default()
        };
        config.validate().unwrap();
    }
}

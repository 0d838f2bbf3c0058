//! Cost rollup: material, labor, per-box and order totals, suggested price.

use serde::{Deserialize, Serialize};

use crate::config::CalculatorConfig;
use crate::paper::PaperRequirement;

/// `total_cost × (1 + margin / 100)`.
pub fn suggested_price(total_cost: f64, margin_pct: f64) -> f64 {
    total_cost * (1.0 + margin_pct / 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub material_cost: f64,
    pub labor_cost: f64,
    pub cost_per_box: f64,
    pub quantity: u32,
    pub total_order_cost: f64,
    pub profit_margin_pct: f64,
    pub suggested_price: f64,
}

impl CostEstimate {
    pub fn compute(
        paper: &PaperRequirement,
        quantity: u32,
        margin_pct: f64,
        config: &CalculatorConfig,
    ) -> Self {
        let material_cost = paper.total_cost;
        let labor_cost = material_cost * config.labor_fraction;
        let cost_per_box = material_cost + labor_cost;
        let total_order_cost = cost_per_box * f64::from(quantity);

        Self {
            material_cost,
            labor_cost,
            cost_per_box,
            quantity,
            total_order_cost,
            profit_margin_pct: margin_pct,
            suggested_price: suggested_price(total_order_cost, margin_pct),
        }
    }

    /// Suggested price per box; `0` for an empty order.
    pub fn unit_price(&self) -> f64 {
        if self.quantity == 0 {
            0.0
        } else {
            self.suggested_price / f64::from(self.quantity)
        }
    }
}

//! Worked formulas with the actual values substituted, for display next to a
//! result so an estimator can check the arithmetic by hand.

use serde::{Deserialize, Serialize};

use crate::board::{CM_PER_INCH, SQ_IN_PER_SQ_M};
use crate::calculate::{BoxParameters, CalculationResult};
use crate::config::CalculatorConfig;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculationFormulas {
    pub dimensions: Vec<String>,
    pub board_sizes: Vec<String>,
    pub ups: Vec<String>,
    pub paper_weights: Vec<String>,
    pub costs: Vec<String>,
}

impl CalculationFormulas {
    pub fn explain(
        params: &BoxParameters,
        result: &CalculationResult,
        config: &CalculatorConfig,
    ) -> Self {
        let l = params.dimensions.length_cm;
        let b = params.dimensions.breadth_cm;
        let h = params.dimensions.height_cm;
        let shrunk = &result.dimensions;
        let board = &result.board;
        let f = shrunk.flute_size_cm;

        let dimensions = vec![
            format!("L (cm) = {l} × {} = {:.4}", config.length_shrinkage, shrunk.length_cm),
            format!("B (cm) = {b} × {} = {:.4}", config.breadth_shrinkage, shrunk.breadth_cm),
            format!("H (cm) = {h} × {} = {:.4}", config.height_shrinkage, shrunk.height_cm),
            format!("F (cm) = ({b} + 0.635) × 1.013575 / 2 = {f:.4}"),
        ];

        let board_sizes = vec![
            format!(
                "Full length (L\") = (({l} + {b}) × 2 + 3.5 + 0.5) / {CM_PER_INCH} = {:.4}\"",
                board.full_length_in
            ),
            format!(
                "Half length (L\") = (({l} + {b}) + 3.5 + 0.4) / {CM_PER_INCH} = {:.4}\"",
                board.half_length_in
            ),
            format!(
                "Reel size 1 up (R) = (({h} + {f:.4} + {f:.4}) + 0.8) / {CM_PER_INCH} = {:.4}\"",
                board.reel_1up_in
            ),
            format!(
                "Reel size 2 up (R) = ((({h} + {f:.4} + {f:.4}) × 2) + 0.8) / {CM_PER_INCH} = {:.4}\"",
                board.reel_2up_in
            ),
            format!(
                "Reel width = ({b} + {h}) / {CM_PER_INCH} = {:.4}\"",
                board.reel_width_in
            ),
        ];

        let ups = vec![
            format!("Reel Width = {:.4}\"", board.reel_width_in),
            format!("Full Length = {:.4}\"", board.full_length_in),
            format!("UPS Determination: {}", result.ups_reason),
        ];

        let mut paper_weights = vec![format!(
            "Paper Area = {:.4}\" × {:.4}\" = {:.4} in² = {:.6} m²",
            board.full_length_in, board.reel_width_in, result.board_area_sq_in, result.board_area_sq_m
        )];
        for layer in &result.paper.layers {
            let name = layer.layer.label();
            if layer.layer.is_fluted() {
                paper_weights.push(format!(
                    "{name} Weight = ({:.4} / {SQ_IN_PER_SQ_M} × {} × {}) / 1000 = {:.4} kg",
                    result.board_area_sq_in, layer.gsm, layer.take_up, layer.weight_kg
                ));
            } else {
                paper_weights.push(format!(
                    "{name} Weight = ({:.4} / {SQ_IN_PER_SQ_M} × {}) / 1000 = {:.4} kg",
                    result.board_area_sq_in, layer.gsm, layer.weight_kg
                ));
            }
            paper_weights.push(format!(
                "{name} Cost = {:.4} kg × ₹{} = ₹{:.4}",
                layer.weight_kg, layer.price_per_kg, layer.cost
            ));
        }
        paper_weights.push(format!(
            "Total Material Weight = {:.4} kg",
            result.paper.total_weight_kg
        ));
        paper_weights.push(format!("Total Material Cost = ₹{:.4}", result.paper.total_cost));

        let cost = &result.cost;
        let mut costs = vec![
            format!("Material Cost = ₹{:.4}", cost.material_cost),
            format!(
                "Labor Cost = ₹{:.4} × {} = ₹{:.4}",
                cost.material_cost, config.labor_fraction, cost.labor_cost
            ),
            format!(
                "Total Cost Per Box = ₹{:.4} + ₹{:.4} = ₹{:.4}",
                cost.material_cost, cost.labor_cost, cost.cost_per_box
            ),
        ];
        if cost.quantity > 1 {
            costs.push(format!(
                "Total Order Cost ({} boxes) = ₹{:.4} × {} = ₹{:.4}",
                cost.quantity, cost.cost_per_box, cost.quantity, cost.total_order_cost
            ));
        }
        costs.push(format!(
            "Suggested Price = ₹{:.4} × (1 + {} / 100) = ₹{:.4}",
            cost.total_order_cost, cost.profit_margin_pct, cost.suggested_price
        ));

        Self {
            dimensions,
            board_sizes,
            ups,
            paper_weights,
            costs,
        }
    }

    /// All sections as one list of lines, each section under a heading.
    pub fn lines(&self) -> Vec<String> {
        let sections = [
            ("Dimensions", &self.dimensions),
            ("Board sizes", &self.board_sizes),
            ("UPS", &self.ups),
            ("Paper weights", &self.paper_weights),
            ("Costs", &self.costs),
        ];
        let mut out = Vec::new();
        for (heading, lines) in sections {
            out.push(format!("# {heading}"));
            out.extend(lines.iter().cloned());
        }
        out
    }
}

//! Calculation entrypoint.

use serde::{Deserialize, Serialize};

use corrugate_core::{DomainError, DomainResult};

use crate::board::BoardSizes;
use crate::config::CalculatorConfig;
use crate::cost::CostEstimate;
use crate::dimensions::{BoxDimensions, FluteType, ShrunkDimensions};
use crate::paper::{PaperRequirement, PaperSpec, PlyCount};
use crate::ups::Ups;

/// Everything the calculator needs to know about one box and its order size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxParameters {
    pub dimensions: BoxDimensions,
    #[serde(default)]
    pub flute: FluteType,
    #[serde(default)]
    pub plies: PlyCount,
    pub paper: PaperSpec,
    /// Price per kg for layers without their own price; config default if unset.
    #[serde(default)]
    pub paper_cost_per_kg: Option<f64>,
    pub quantity: u32,
    /// Config default if unset.
    #[serde(default)]
    pub profit_margin_pct: Option<f64>,
}

impl BoxParameters {
    pub fn validate(&self) -> DomainResult<()> {
        self.dimensions.validate()?;
        self.paper.validate_for(self.plies)?;
        if self.quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        if let Some(price) = self.paper_cost_per_kg {
            DomainError::ensure_positive("paper cost per kg", price)?;
        }
        if let Some(margin) = self.profit_margin_pct {
            DomainError::ensure_non_negative("profit margin", margin)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub flute: FluteType,
    pub plies: PlyCount,
    pub dimensions: ShrunkDimensions,
    pub board: BoardSizes,
    pub ups: Ups,
    pub ups_reason: String,
    pub board_area_sq_in: f64,
    pub board_area_sq_m: f64,
    pub box_surface_area_sq_m: f64,
    pub paper: PaperRequirement,
    pub cost: CostEstimate,
}

/// Run the full calculation for one box.
///
/// Fails only on invalid input (config or parameters).
#[tracing::instrument(
    name = "calculator.calculate",
    skip_all,
    fields(plies = params.plies.count(), flute = %params.flute, quantity = params.quantity)
)]
pub fn calculate(
    params: &BoxParameters,
    config: &CalculatorConfig,
) -> DomainResult<CalculationResult> {
    config.validate()?;
    params.validate()?;

    let dims = &params.dimensions;
    let board = BoardSizes::compute(dims);
    let ups = Ups::for_board(&board);

    let paper_cost = params.paper_cost_per_kg.unwrap_or(config.paper_cost_per_kg);
    let paper = PaperRequirement::compute(&board, &params.paper, paper_cost, config);

    let margin = params.profit_margin_pct.unwrap_or(config.profit_margin_pct);
    let cost = CostEstimate::compute(&paper, params.quantity, margin, config);

    tracing::debug!(
        ups = %ups,
        reel_width_in = board.reel_width_in,
        paper_kg = paper.total_weight_kg,
        cost_per_box = cost.cost_per_box,
        "box calculated"
    );

    let result = CalculationResult {
        flute: params.flute,
        plies: params.plies,
        dimensions: dims.shrunk(config),
        board,
        ups,
        ups_reason: Ups::reason(board.reel_width_in, board.full_length_in),
        board_area_sq_in: board.area_sq_in(),
        board_area_sq_m: board.area_sq_m(),
        box_surface_area_sq_m: dims.surface_area_m2(),
        paper,
        cost,
    };
    result.ensure_finite()?;
    Ok(result)
}

impl CalculationResult {
    /// Finite inputs can still overflow once multiplied out; reject those
    /// instead of reporting `inf`.
    fn ensure_finite(&self) -> DomainResult<()> {
        let dims = &self.dimensions;
        let board = &self.board;
        let cost = &self.cost;
        for (field, value) in [
            ("shrunk length", dims.length_cm),
            ("shrunk breadth", dims.breadth_cm),
            ("shrunk height", dims.height_cm),
            ("flute size", dims.flute_size_cm),
            ("full board length", board.full_length_in),
            ("half board length", board.half_length_in),
            ("1-up reel", board.reel_1up_in),
            ("2-up reel", board.reel_2up_in),
            ("reel width", board.reel_width_in),
            ("board area", self.board_area_sq_in),
            ("box surface area", self.box_surface_area_sq_m),
            ("paper weight", self.paper.total_weight_kg),
            ("paper cost", self.paper.total_cost),
            ("cost per box", cost.cost_per_box),
            ("total order cost", cost.total_order_cost),
            ("suggested price", cost.suggested_price),
        ] {
            if !value.is_finite() {
                return Err(DomainError::validation(format!(
                    "{field} is out of range for the given box (got {value})"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::{LayerSpec, PaperLayer};

    fn three_ply_params() -> BoxParameters {
        BoxParameters {
            dimensions: BoxDimensions::new(30.0, 20.0, 15.0).unwrap(),
            flute: FluteType::B,
            plies: PlyCount::Three,
            paper: PaperSpec::new()
                .with_layer(PaperLayer::Top, LayerSpec::gsm(150))
                .with_layer(PaperLayer::Bottom, LayerSpec::gsm(120)),
            paper_cost_per_kg: None,
            quantity: 500,
            profit_margin_pct: None,
        }
    }

    #[test]
    fn defaults_come_from_config() {
        let result = calculate(&three_ply_params(), &CalculatorConfig::default()).unwrap();
        assert_eq!(result.cost.profit_margin_pct, 15.0);
        assert!(result.paper.layers.iter().all(|l| l.price_per_kg == 80.0));
        assert_eq!(result.cost.quantity, 500);
    }

    #[test]
    fn request_price_overrides_config() {
        let params = BoxParameters {
            paper_cost_per_kg: Some(62.5),
            ..three_ply_params()
        };
        let result = calculate(&params, &CalculatorConfig::default()).unwrap();
        assert!(result.paper.layers.iter().all(|l| l.price_per_kg == 62.5));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let params = BoxParameters {
            quantity: 0,
            ..three_ply_params()
        };
        let err = calculate(&params, &CalculatorConfig::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("quantity")));
    }

    #[test]
    fn non_positive_dimension_is_rejected() {
        let mut params = three_ply_params();
        params.dimensions.height_cm = 0.0;
        assert!(calculate(&params, &CalculatorConfig::default()).is_err());
    }

    #[test]
    fn invalid_config_is_rejected_before_params() {
        let config = CalculatorConfig {
            flute_take_up: 0.5,
            ..CalculatorConfig::default()
        };
        let err = calculate(&three_ply_params(), &config).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("flute_take_up")));
    }

    #[test]
    fn overflowing_board_size_is_rejected() {
        let mut params = three_ply_params();
        params.dimensions.length_cm = 1e308;
        let err = calculate(&params, &CalculatorConfig::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("out of range")));
    }

    #[test]
    fn overflowing_order_cost_is_rejected() {
        let params = BoxParameters {
            paper_cost_per_kg: Some(1e306),
            quantity: u32::MAX,
            ..three_ply_params()
        };
        let err = calculate(&params, &CalculatorConfig::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("total order cost")));
    }

    #[test]
    fn negative_margin_is_rejected() {
        let params = BoxParameters {
            profit_margin_pct: Some(-5.0),
            ..three_ply_params()
        };
        assert!(calculate(&params, &CalculatorConfig::default()).is_err());
    }
}

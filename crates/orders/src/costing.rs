//! Order costing: calculator output scaled to the order and rounded to the
//! two decimals the record store keeps (see `corrugate_core::money`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use corrugate_calculator::{CalculatorConfig, PaperLayer, calculate};
use corrugate_catalog::BoxTemplate;
use corrugate_core::{AggregateRoot, Decimal, DomainError, DomainResult, money};

/// Costs the calculator does not derive, entered per order. All default to 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostingExtras {
    pub gum_cost: f64,
    pub ink_cost: f64,
    pub machine_cost: f64,
    pub overhead_cost: f64,
}

impl CostingExtras {
    fn validate(&self) -> DomainResult<()> {
        DomainError::ensure_non_negative("gum cost", self.gum_cost)?;
        DomainError::ensure_non_negative("ink cost", self.ink_cost)?;
        DomainError::ensure_non_negative("machine cost", self.machine_cost)?;
        DomainError::ensure_non_negative("overhead cost", self.overhead_cost)?;
        Ok(())
    }
}

/// Paper and consumables needed for the whole order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    pub layer_weights_kg: BTreeMap<PaperLayer, f64>,
    pub total_paper_weight_kg: f64,
    pub paper_cost: f64,
    pub gum_cost: f64,
    pub ink_cost: f64,
}

impl MaterialRequirement {
    pub fn material_cost(&self) -> DomainResult<f64> {
        money::sum_amounts("material cost", &[self.paper_cost, self.gum_cost, self.ink_cost])
    }
}

/// Cost and price of the whole order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingCost {
    pub quantity: u32,
    pub material_cost: f64,
    pub machine_cost: f64,
    pub labor_cost: f64,
    pub overhead_cost: f64,
    pub total_cost: f64,
    pub profit_margin_pct: f64,
    pub suggested_price: f64,
    unit_price: f64,
}

impl ManufacturingCost {
    pub fn new(
        quantity: u32,
        material_cost: f64,
        machine_cost: f64,
        labor_cost: f64,
        overhead_cost: f64,
        profit_margin_pct: f64,
    ) -> DomainResult<Self> {
        DomainError::ensure_non_negative("profit margin", profit_margin_pct)?;
        let total_cost = money::sum_amounts(
            "total cost",
            &[material_cost, machine_cost, labor_cost, overhead_cost],
        )?;

        let total = money::decimal("total cost", total_cost)?;
        let margin = money::decimal("profit margin", profit_margin_pct)?;
        let markup = money::checked(
            "profit margin",
            margin
                .checked_div(Decimal::from(100))
                .and_then(|m| m.checked_add(Decimal::ONE)),
        )?;
        let suggested = money::round(money::checked("suggested price", total.checked_mul(markup))?);
        let unit_price = if quantity == 0 {
            Decimal::ZERO
        } else {
            money::checked("unit price", suggested.checked_div(Decimal::from(quantity)))?
        };

        Ok(Self {
            quantity,
            material_cost,
            machine_cost,
            labor_cost,
            overhead_cost,
            total_cost,
            profit_margin_pct,
            suggested_price: money::amount("suggested price", suggested)?,
            unit_price: money::amount("unit price", unit_price)?,
        })
    }

    /// Suggested price per box; `0` when the quantity is zero.
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCosting {
    pub material: MaterialRequirement,
    pub manufacturing: ManufacturingCost,
}

/// Cost an order of `quantity` boxes of `template`.
///
/// The margin falls back to the config default. Labor follows the
/// calculator (a fraction of paper cost); gum, ink, machine and overhead come
/// from `extras`.
#[tracing::instrument(
    name = "orders.cost_order",
    skip_all,
    fields(template_id = %template.id(), quantity = quantity)
)]
pub fn cost_order(
    template: &BoxTemplate,
    quantity: u32,
    profit_margin_pct: Option<f64>,
    extras: CostingExtras,
    config: &CalculatorConfig,
) -> DomainResult<OrderCosting> {
    extras.validate()?;
    let params = template.parameters(quantity, None, profit_margin_pct)?;
    let result = calculate(&params, config)?;

    let boxes = f64::from(quantity);
    let layer_weights_kg = result
        .paper
        .layers
        .iter()
        .map(|l| Ok((l.layer, money::round_amount("layer weight", l.weight_kg * boxes)?)))
        .collect::<DomainResult<BTreeMap<_, _>>>()?;

    let material = MaterialRequirement {
        layer_weights_kg,
        total_paper_weight_kg: money::round_amount(
            "paper weight",
            result.paper.total_weight_kg * boxes,
        )?,
        paper_cost: money::round_amount("paper cost", result.paper.total_cost * boxes)?,
        gum_cost: money::round_amount("gum cost", extras.gum_cost)?,
        ink_cost: money::round_amount("ink cost", extras.ink_cost)?,
    };

    let manufacturing = ManufacturingCost::new(
        quantity,
        material.material_cost()?,
        money::round_amount("machine cost", extras.machine_cost)?,
        money::round_amount("labor cost", result.cost.labor_cost * boxes)?,
        money::round_amount("overhead cost", extras.overhead_cost)?,
        result.cost.profit_margin_pct,
    )?;

    tracing::info!(
        paper_kg = material.total_paper_weight_kg,
        total_cost = manufacturing.total_cost,
        suggested_price = manufacturing.suggested_price,
        "order costed"
    );

    Ok(OrderCosting {
        material,
        manufacturing,
    })
}

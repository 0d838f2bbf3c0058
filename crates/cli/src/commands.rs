//! Subcommand handlers. Each returns what `main` prints.

use anyhow::{Context, bail};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use corrugate_calculator::{CalculationFormulas, CalculatorConfig, calculate};
use corrugate_catalog::{
    BoxTemplate, CreateTemplate, TemplateCommand, TemplateDetails, TemplateId,
};
use corrugate_core::{Aggregate, AggregateId};
use corrugate_events::Event;
use corrugate_orders::{
    BoxOrder, CostingExtras, OrderCommand, OrderCosting, OrderId, OrderStatus, PlaceOrder,
    RecordCosting, cost_order,
};

use crate::args::{BoxArgs, OrderArgs};

/// `corrugate calculate`: JSON result, or one formula per line.
pub fn run_calculate(
    config: &CalculatorConfig,
    box_args: &BoxArgs,
    formulas: bool,
) -> anyhow::Result<String> {
    let params = box_args.parameters()?;
    let result = calculate(&params, config)?;

    if formulas {
        let explained = CalculationFormulas::explain(&params, &result, config);
        return Ok(explained.lines().join("\n"));
    }
    serde_json::to_string_pretty(&result).context("failed to serialize calculation result")
}

/// Order summary printed by `corrugate quote`.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteSummary {
    pub order_id: OrderId,
    pub order_number: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub template_id: TemplateId,
    pub template_name: String,
    pub quantity: u32,
    pub delivery_date: Option<NaiveDate>,
    pub costing: OrderCosting,
    pub unit_price: f64,
}

/// `corrugate quote`: create a template for the box, place a draft order for
/// it, cost the order and record the costing.
pub fn run_quote(
    config: &CalculatorConfig,
    box_args: &BoxArgs,
    order_args: &OrderArgs,
    now: DateTime<Utc>,
) -> anyhow::Result<QuoteSummary> {
    // A request price replaces the default for every layer of the quote.
    let config = CalculatorConfig {
        paper_cost_per_kg: box_args.paper_cost.unwrap_or(config.paper_cost_per_kg),
        ..config.clone()
    };
    config.validate()?;

    let name = order_args.name.clone().unwrap_or_else(|| {
        format!(
            "{}x{}x{} cm",
            box_args.length, box_args.breadth, box_args.height
        )
    });

    let template_id = TemplateId::new(AggregateId::new());
    let mut template = BoxTemplate::empty(template_id);
    let created = template.execute(&TemplateCommand::CreateTemplate(CreateTemplate {
        template_id,
        details: TemplateDetails {
            name: name.clone(),
            dimensions: box_args.dimensions()?,
            flute: box_args.flute,
            plies: box_args.plies()?,
            print_color: order_args.print_color.clone(),
            paper: box_args.paper()?,
        },
        occurred_at: now,
    }))?;
    log_events(&created);
    if !template.is_orderable() {
        bail!("template {template_id} cannot be ordered");
    }

    let order_id = OrderId::new(AggregateId::new());
    let mut order = BoxOrder::empty(order_id);
    let placed = order.execute(&OrderCommand::PlaceOrder(PlaceOrder {
        order_id,
        order_number: order_args.order_number.clone(),
        customer_name: order_args.customer.clone(),
        template_id,
        quantity: box_args.quantity,
        delivery_date: order_args.delivery_date.unwrap_or_else(|| now.date_naive()),
        notes: order_args.notes.clone(),
        occurred_at: now,
    }))?;
    log_events(&placed);

    let extras = CostingExtras {
        gum_cost: order_args.gum_cost,
        ink_cost: order_args.ink_cost,
        machine_cost: order_args.machine_cost,
        overhead_cost: order_args.overhead_cost,
    };
    let costing = cost_order(&template, box_args.quantity, box_args.margin, extras, &config)?;
    let costed = order.execute(&OrderCommand::RecordCosting(RecordCosting {
        order_id,
        costing: costing.clone(),
        occurred_at: now,
    }))?;
    log_events(&costed);

    tracing::info!(
        order_id = %order_id,
        template_id = %template_id,
        quantity = box_args.quantity,
        "quote prepared"
    );

    Ok(QuoteSummary {
        order_id,
        order_number: order.order_number().to_string(),
        customer_name: order.customer_name().to_string(),
        status: order.status(),
        template_id,
        template_name: name,
        quantity: order.quantity(),
        delivery_date: order.delivery_date(),
        unit_price: costing.manufacturing.unit_price(),
        costing,
    })
}

fn log_events<E: Event>(events: &[E]) {
    for event in events {
        tracing::debug!(
            area = event.area(),
            event_type = event.event_type(),
            version = event.version(),
            "event applied"
        );
    }
}

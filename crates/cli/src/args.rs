//! Command-line arguments.

use core::str::FromStr;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use corrugate_calculator::{
    BoxDimensions, BoxParameters, CalculatorConfig, FluteType, LayerSpec, PaperLayer, PaperSpec,
    PlyCount,
};
use corrugate_core::{DomainError, DomainResult};

#[derive(Debug, Parser)]
#[command(name = "corrugate")]
#[command(version, about = "Corrugated box dimension, paper and cost calculator", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Calculate board sizes, paper weights and costs for one box
    Calculate {
        #[command(flatten)]
        box_args: BoxArgs,

        /// Print the substituted formulas instead of JSON
        #[arg(long)]
        formulas: bool,
    },

    /// Cost a draft order for a box and print the order summary as JSON
    Quote {
        #[command(flatten)]
        box_args: BoxArgs,

        #[command(flatten)]
        order: OrderArgs,
    },
}

/// Calculator defaults, overridable per process.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Default paper price per kg
    #[arg(long = "default-paper-cost", env = "CORRUGATE_PAPER_COST_PER_KG", global = true)]
    pub paper_cost_per_kg: Option<f64>,

    /// Labor cost as a fraction of material cost
    #[arg(long, env = "CORRUGATE_LABOR_FRACTION", global = true)]
    pub labor_fraction: Option<f64>,

    /// Default profit margin in percent
    #[arg(long = "default-margin", env = "CORRUGATE_PROFIT_MARGIN", global = true)]
    pub profit_margin_pct: Option<f64>,

    /// Take-up factor of fluted layers
    #[arg(long = "flute-tuf", env = "CORRUGATE_FLUTE_TUF", global = true)]
    pub flute_take_up: Option<f64>,
}

impl ConfigArgs {
    /// Overlay the given values onto `base` and validate the result.
    pub fn apply(&self, base: CalculatorConfig) -> DomainResult<CalculatorConfig> {
        let config = CalculatorConfig {
            paper_cost_per_kg: self.paper_cost_per_kg.unwrap_or(base.paper_cost_per_kg),
            labor_fraction: self.labor_fraction.unwrap_or(base.labor_fraction),
            profit_margin_pct: self.profit_margin_pct.unwrap_or(base.profit_margin_pct),
            flute_take_up: self.flute_take_up.unwrap_or(base.flute_take_up),
            ..base
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Args)]
pub struct BoxArgs {
    /// Box length in cm
    #[arg(long)]
    pub length: f64,

    /// Box breadth in cm
    #[arg(long)]
    pub breadth: f64,

    /// Box height in cm
    #[arg(long)]
    pub height: f64,

    /// Flute type (A, B or C)
    #[arg(long, default_value_t = FluteType::B)]
    pub flute: FluteType,

    /// Ply count (3, 5 or 7)
    #[arg(long, default_value_t = 3)]
    pub plies: u8,

    #[arg(long)]
    pub top_gsm: Option<u32>,

    #[arg(long)]
    pub bottom_gsm: Option<u32>,

    /// Flute layer GSM (5 ply)
    #[arg(long)]
    pub flute_gsm: Option<u32>,

    /// First flute layer GSM (7 ply)
    #[arg(long)]
    pub flute1_gsm: Option<u32>,

    /// Middle liner GSM (7 ply)
    #[arg(long)]
    pub middle_gsm: Option<u32>,

    /// Second flute layer GSM (7 ply)
    #[arg(long)]
    pub flute2_gsm: Option<u32>,

    /// Burst factor of a layer's grade, as LAYER=BF (repeatable)
    #[arg(long = "bf", value_name = "LAYER=BF", value_parser = parse_layer_value::<u32>)]
    pub bf: Vec<(PaperLayer, u32)>,

    /// Price per kg for one layer, as LAYER=PRICE (repeatable)
    #[arg(
        long = "layer-price",
        value_name = "LAYER=PRICE",
        value_parser = parse_layer_value::<f64>
    )]
    pub layer_prices: Vec<(PaperLayer, f64)>,

    /// Paper price per kg for this request
    #[arg(long)]
    pub paper_cost: Option<f64>,

    /// Number of boxes
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,

    /// Profit margin in percent for this request
    #[arg(long)]
    pub margin: Option<f64>,
}

impl BoxArgs {
    pub fn plies(&self) -> DomainResult<PlyCount> {
        PlyCount::try_from(self.plies)
    }

    pub fn dimensions(&self) -> DomainResult<BoxDimensions> {
        BoxDimensions::new(self.length, self.breadth, self.height)
    }

    /// Paper spec from the GSM flags that were given, with any BF and
    /// per-layer prices applied. Layers the ply count needs but were not
    /// given are left for validation to report.
    pub fn paper(&self) -> DomainResult<PaperSpec> {
        let mut paper = PaperSpec::new();
        for (layer, gsm) in [
            (PaperLayer::Top, self.top_gsm),
            (PaperLayer::Flute, self.flute_gsm),
            (PaperLayer::Flute1, self.flute1_gsm),
            (PaperLayer::Middle, self.middle_gsm),
            (PaperLayer::Flute2, self.flute2_gsm),
            (PaperLayer::Bottom, self.bottom_gsm),
        ] {
            if let Some(gsm) = gsm {
                paper.set(layer, LayerSpec::gsm(gsm));
            }
        }
        for &(layer, bf) in &self.bf {
            let spec = given_layer(&paper, layer, "BF")?;
            paper.set(layer, spec.with_bf(bf));
        }
        for &(layer, price) in &self.layer_prices {
            let spec = given_layer(&paper, layer, "price")?;
            paper.set(layer, spec.with_price(price));
        }
        Ok(paper)
    }

    pub fn parameters(&self) -> DomainResult<BoxParameters> {
        Ok(BoxParameters {
            dimensions: self.dimensions()?,
            flute: self.flute,
            plies: self.plies()?,
            paper: self.paper()?,
            paper_cost_per_kg: self.paper_cost,
            quantity: self.quantity,
            profit_margin_pct: self.margin,
        })
    }
}

fn given_layer(paper: &PaperSpec, layer: PaperLayer, what: &str) -> DomainResult<LayerSpec> {
    paper.get(layer).copied().ok_or_else(|| {
        DomainError::validation(format!("{} {what} given without a GSM", layer.label()))
    })
}

/// Parse `LAYER=VALUE`, e.g. `top=18`.
fn parse_layer_value<T>(s: &str) -> Result<(PaperLayer, T), String>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    let (layer, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LAYER=VALUE, got {s:?}"))?;
    let layer = PaperLayer::from_str(layer).map_err(|e| e.to_string())?;
    let value = value
        .trim()
        .parse::<T>()
        .map_err(|e| format!("invalid value {value:?}: {e}"))?;
    Ok((layer, value))
}

#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    #[arg(long)]
    pub order_number: String,

    #[arg(long)]
    pub customer: String,

    /// Template name (defaults to the box size)
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, default_value = "Plain")]
    pub print_color: String,

    /// Delivery date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub delivery_date: Option<NaiveDate>,

    #[arg(long, default_value = "")]
    pub notes: String,

    #[arg(long, default_value_t = 0.0)]
    pub gum_cost: f64,

    #[arg(long, default_value_t = 0.0)]
    pub ink_cost: f64,

    #[arg(long, default_value_t = 0.0)]
    pub machine_cost: f64,

    #[arg(long, default_value_t = 0.0)]
    pub overhead_cost: f64,
}

//! Ply layouts, per-layer paper specs and paper weights.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use corrugate_core::{DomainError, DomainResult, ValueObject};

use crate::board::BoardSizes;
use crate::config::CalculatorConfig;

/// Number of paper plies in the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlyCount {
    #[default]
    Three,
    Five,
    Seven,
}

impl PlyCount {
    pub fn count(self) -> u8 {
        match self {
            PlyCount::Three => 3,
            PlyCount::Five => 5,
            PlyCount::Seven => 7,
        }
    }

    /// Paper layers a board of this ply count is built from, outside in.
    pub fn layers(self) -> &'static [PaperLayer] {
        use PaperLayer::*;
        match self {
            PlyCount::Three => &[Top, Bottom],
            PlyCount::Five => &[Top, Flute, Bottom],
            PlyCount::Seven => &[Top, Flute1, Middle, Flute2, Bottom],
        }
    }

    pub fn uses(self, layer: PaperLayer) -> bool {
        self.layers().contains(&layer)
    }
}

impl TryFrom<u8> for PlyCount {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(PlyCount::Three),
            5 => Ok(PlyCount::Five),
            7 => Ok(PlyCount::Seven),
            other => Err(DomainError::validation(format!(
                "ply count must be 3, 5 or 7 (got {other})"
            ))),
        }
    }
}

impl From<PlyCount> for u8 {
    fn from(value: PlyCount) -> Self {
        value.count()
    }
}

impl core::fmt::Display for PlyCount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ply", self.count())
    }
}

/// A paper layer position in the board. Declaration order is board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperLayer {
    Top,
    Flute,
    Flute1,
    Middle,
    Flute2,
    Bottom,
}

impl PaperLayer {
    /// Fluted (corrugated) layers consume extra paper, see `flute_take_up`.
    pub fn is_fluted(self) -> bool {
        matches!(self, PaperLayer::Flute | PaperLayer::Flute1 | PaperLayer::Flute2)
    }

    pub fn label(self) -> &'static str {
        match self {
            PaperLayer::Top => "Top Paper",
            PaperLayer::Flute => "Flute Paper",
            PaperLayer::Flute1 => "Flute Paper 1",
            PaperLayer::Middle => "Middle Paper",
            PaperLayer::Flute2 => "Flute Paper 2",
            PaperLayer::Bottom => "Bottom Paper",
        }
    }
}

impl core::str::FromStr for PaperLayer {
    type Err = DomainError;

    /// Accepts the snake_case names used in JSON (`top`, `flute1`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(PaperLayer::Top),
            "flute" => Ok(PaperLayer::Flute),
            "flute1" => Ok(PaperLayer::Flute1),
            "middle" => Ok(PaperLayer::Middle),
            "flute2" => Ok(PaperLayer::Flute2),
            "bottom" => Ok(PaperLayer::Bottom),
            other => Err(DomainError::validation(format!(
                "unknown paper layer {other:?}; use top, flute, flute1, middle, flute2 or bottom"
            ))),
        }
    }
}

/// Paper grade chosen for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub gsm: u32,
    /// Burst factor of the grade, recorded for purchasing; not used in weights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bf: Option<u32>,
    /// Overrides the request/config paper price for this layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_kg: Option<f64>,
}

impl LayerSpec {
    pub fn gsm(gsm: u32) -> Self {
        Self {
            gsm,
            bf: None,
            price_per_kg: None,
        }
    }

    pub fn with_bf(mut self, bf: u32) -> Self {
        self.bf = Some(bf);
        self
    }

    pub fn with_price(mut self, price_per_kg: f64) -> Self {
        self.price_per_kg = Some(price_per_kg);
        self
    }
}

/// Paper requirement spec of a box: one `LayerSpec` per layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperSpec {
    layers: BTreeMap<PaperLayer, LayerSpec>,
}

impl ValueObject for PaperSpec {}

impl PaperSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, layer: PaperLayer, spec: LayerSpec) -> Self {
        self.layers.insert(layer, spec);
        self
    }

    pub fn set(&mut self, layer: PaperLayer, spec: LayerSpec) {
        self.layers.insert(layer, spec);
    }

    pub fn get(&self, layer: PaperLayer) -> Option<&LayerSpec> {
        self.layers.get(&layer)
    }

    /// Layers in board order.
    pub fn iter(&self) -> impl Iterator<Item = (PaperLayer, &LayerSpec)> {
        self.layers.iter().map(|(layer, spec)| (*layer, spec))
    }

    /// Every layer of `plies` must be present with a positive GSM, and no
    /// layer outside the ply layout may be set.
    pub fn validate_for(&self, plies: PlyCount) -> DomainResult<()> {
        for layer in plies.layers() {
            if !self.layers.contains_key(layer) {
                return Err(DomainError::validation(format!(
                    "{} GSM is required for {plies} boxes",
                    layer.label()
                )));
            }
        }
        for (layer, spec) in self.iter() {
            if !plies.uses(layer) {
                return Err(DomainError::validation(format!(
                    "{} is not part of a {plies} board",
                    layer.label()
                )));
            }
            if spec.gsm == 0 {
                return Err(DomainError::validation(format!(
                    "{} GSM must be greater than zero",
                    layer.label()
                )));
            }
            if spec.bf == Some(0) {
                return Err(DomainError::validation(format!(
                    "{} BF must be greater than zero",
                    layer.label()
                )));
            }
            if let Some(price) = spec.price_per_kg {
                DomainError::ensure_positive(&format!("{} price per kg", layer.label()), price)?;
            }
        }
        Ok(())
    }
}

/// Weight and cost of one layer for a single box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerRequirement {
    pub layer: PaperLayer,
    pub gsm: u32,
    pub take_up: f64,
    pub weight_kg: f64,
    pub price_per_kg: f64,
    pub cost: f64,
}

/// Paper needed for a single box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRequirement {
    pub layers: Vec<LayerRequirement>,
    pub total_weight_kg: f64,
    pub total_cost: f64,
}

impl PaperRequirement {
    /// `weight = area_m2 × GSM × take_up / 1000`, take-up applying to fluted
    /// layers only. The spec is expected to be validated already.
    pub fn compute(
        board: &BoardSizes,
        spec: &PaperSpec,
        paper_cost_per_kg: f64,
        config: &CalculatorConfig,
    ) -> Self {
        let area_m2 = board.area_sq_m();
        let layers: Vec<LayerRequirement> = spec
            .iter()
            .map(|(layer, layer_spec)| {
                let take_up = if layer.is_fluted() {
                    config.flute_take_up
                } else {
                    1.0
                };
                let weight_kg = area_m2 * f64::from(layer_spec.gsm) * take_up / 1000.0;
                let price_per_kg = layer_spec.price_per_kg.unwrap_or(paper_cost_per_kg);
                LayerRequirement {
                    layer,
                    gsm: layer_spec.gsm,
                    take_up,
                    weight_kg,
                    price_per_kg,
                    cost: weight_kg * price_per_kg,
                }
            })
            .collect();

        let total_weight_kg = layers.iter().map(|l| l.weight_kg).sum();
        let total_cost = layers.iter().map(|l| l.cost).sum();

        Self {
            layers,
            total_weight_kg,
            total_cost,
        }
    }

    pub fn layer(&self, layer: PaperLayer) -> Option<&LayerRequirement> {
        self.layers.iter().find(|l| l.layer == layer)
    }
}

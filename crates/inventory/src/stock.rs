use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use corrugate_core::{AggregateId, Decimal, DomainError, DomainResult, Entity, money};

/// Stock line identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockLineId(pub AggregateId);

impl StockLineId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for StockLineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// What was received. Weights are in kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StockKind {
    PaperReel {
        gsm: u32,
        bf: String,
        size: String,
        total_weight_kg: f64,
    },
    PastingGum {
        gum_type: String,
        weight_per_bag: f64,
        total_qty: u32,
    },
    Ink {
        color: String,
        weight_per_can: f64,
        total_qty: u32,
    },
    StrappingRoll {
        roll_type: String,
        meters_per_roll: u32,
        weight_per_roll: f64,
        total_qty: u32,
    },
    PinCoil {
        coil_type: String,
        total_qty: u32,
    },
}

impl StockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockKind::PaperReel { .. } => "paper_reel",
            StockKind::PastingGum { .. } => "pasting_gum",
            StockKind::Ink { .. } => "ink",
            StockKind::StrappingRoll { .. } => "strapping_roll",
            StockKind::PinCoil { .. } => "pin_coil",
        }
    }

    /// Quantity the price per kg applies to: reel weight for paper, unit
    /// count for everything else.
    pub fn priced_quantity(&self) -> f64 {
        match self {
            StockKind::PaperReel {
                total_weight_kg, ..
            } => *total_weight_kg,
            StockKind::PastingGum { total_qty, .. }
            | StockKind::Ink { total_qty, .. }
            | StockKind::StrappingRoll { total_qty, .. }
            | StockKind::PinCoil { total_qty, .. } => f64::from(*total_qty),
        }
    }

    fn validate(&self) -> DomainResult<()> {
        match self {
            StockKind::PaperReel {
                gsm,
                size,
                total_weight_kg,
                ..
            } => {
                if *gsm == 0 {
                    return Err(DomainError::validation("gsm must be greater than zero"));
                }
                DomainError::ensure_not_blank("reel size", size)?;
                DomainError::ensure_positive("total weight", *total_weight_kg)
            }
            StockKind::PastingGum {
                gum_type,
                weight_per_bag,
                ..
            } => {
                DomainError::ensure_not_blank("gum type", gum_type)?;
                DomainError::ensure_positive("weight per bag", *weight_per_bag)
            }
            StockKind::Ink {
                color,
                weight_per_can,
                ..
            } => {
                DomainError::ensure_not_blank("ink color", color)?;
                DomainError::ensure_positive("weight per can", *weight_per_can)
            }
            StockKind::StrappingRoll {
                roll_type,
                weight_per_roll,
                ..
            } => {
                DomainError::ensure_not_blank("roll type", roll_type)?;
                DomainError::ensure_positive("weight per roll", *weight_per_roll)
            }
            StockKind::PinCoil { coil_type, .. } => {
                DomainError::ensure_not_blank("coil type", coil_type)
            }
        }
    }
}

/// Purchase price inputs as entered on receipt.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StockPricing {
    pub price_per_kg: f64,
    pub freight: f64,
    pub extra_charges: f64,
    pub tax_percent: f64,
}

impl StockPricing {
    fn validate(&self) -> DomainResult<()> {
        DomainError::ensure_non_negative("price per kg", self.price_per_kg)?;
        DomainError::ensure_non_negative("freight", self.freight)?;
        DomainError::ensure_non_negative("extra charges", self.extra_charges)?;
        DomainError::ensure_non_negative("tax percent", self.tax_percent)?;
        Ok(())
    }
}

/// Landed price of a stock line, in whole paise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandedPrice {
    pub total_price_ex_tax: f64,
    pub tax_amount: f64,
    pub total_price: f64,
}

impl LandedPrice {
    /// `price × quantity + freight + extra charges`, then tax on the rounded
    /// ex-tax total.
    pub fn compute(pricing: &StockPricing, quantity: f64) -> DomainResult<Self> {
        let price = money::decimal("price per kg", pricing.price_per_kg)?;
        let quantity = money::decimal("quantity", quantity)?;
        let freight = money::decimal("freight", pricing.freight)?;
        let extra = money::decimal("extra charges", pricing.extra_charges)?;
        let tax_percent = money::decimal("tax percent", pricing.tax_percent)?;

        let ex_tax = money::checked(
            "total price ex tax",
            price
                .checked_mul(quantity)
                .and_then(|v| v.checked_add(freight))
                .and_then(|v| v.checked_add(extra)),
        )?;
        let ex_tax = money::round(ex_tax);
        let tax = money::checked(
            "tax amount",
            ex_tax
                .checked_mul(tax_percent)
                .and_then(|v| v.checked_div(Decimal::from(100))),
        )?;
        let tax = money::round(tax);
        let total = money::checked("total price", ex_tax.checked_add(tax))?;

        Ok(Self {
            total_price_ex_tax: money::amount("total price ex tax", ex_tax)?,
            tax_amount: money::amount("tax amount", tax)?,
            total_price: money::amount("total price", total)?,
        })
    }
}

/// A received batch of stock with its landed price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLine {
    id: StockLineId,
    #[serde(flatten)]
    kind: StockKind,
    company_name: String,
    #[serde(flatten)]
    pricing: StockPricing,
    #[serde(flatten)]
    landed: LandedPrice,
    received_at: DateTime<Utc>,
}

impl StockLine {
    /// Validate a receipt and compute its landed price.
    pub fn receive(
        id: StockLineId,
        kind: StockKind,
        company_name: impl Into<String>,
        pricing: StockPricing,
        received_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let company_name = company_name.into();
        DomainError::ensure_not_blank("company name", &company_name)?;
        kind.validate()?;
        pricing.validate()?;

        let landed = LandedPrice::compute(&pricing, kind.priced_quantity())?;
        let line = Self {
            id,
            kind,
            company_name: company_name.trim().to_string(),
            pricing,
            landed,
            received_at,
        };
        tracing::debug!(
            stock_line_id = %line.id,
            kind = line.kind(),
            total_price = line.landed.total_price,
            "stock received"
        );
        Ok(line)
    }

    /// Replace the price inputs and recompute the landed price.
    ///
    /// On error the line is left unchanged.
    pub fn reprice(&mut self, pricing: StockPricing) -> DomainResult<()> {
        pricing.validate()?;
        self.landed = LandedPrice::compute(&pricing, self.kind.priced_quantity())?;
        self.pricing = pricing;
        tracing::debug!(
            stock_line_id = %self.id,
            kind = self.kind(),
            total_price = self.landed.total_price,
            "stock repriced"
        );
        Ok(())
    }

    pub fn stock_kind(&self) -> &StockKind {
        &self.kind
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn pricing(&self) -> &StockPricing {
        &self.pricing
    }

    pub fn landed(&self) -> &LandedPrice {
        &self.landed
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

impl Entity for StockLine {
    type Id = StockLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn kind(&self) -> &'static str {
        self.kind.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reel() -> StockKind {
        StockKind::PaperReel {
            gsm: 140,
            bf: "18".to_string(),
            size: "42 in".to_string(),
            total_weight_kg: 250.5,
        }
    }

    fn pricing() -> StockPricing {
        StockPricing {
            price_per_kg: 42.5,
            freight: 300.0,
            extra_charges: 50.0,
            tax_percent: 12.0,
        }
    }

    fn receive(kind: StockKind, pricing: StockPricing) -> DomainResult<StockLine> {
        StockLine::receive(
            StockLineId::new(AggregateId::new()),
            kind,
            "Bharat Paper Mills",
            pricing,
            Utc::now(),
        )
    }

    #[test]
    fn paper_reel_is_priced_by_weight() {
        let line = receive(reel(), pricing()).unwrap();
        assert_eq!(line.landed().total_price_ex_tax, 10_996.25);
        assert_eq!(line.landed().tax_amount, 1_319.55);
        assert_eq!(line.landed().total_price, 12_315.8);
        assert_eq!(line.kind(), "paper_reel");
    }

    #[test]
    fn half_paise_tax_rounds_up() {
        let coil = StockKind::PinCoil {
            coil_type: "Round".to_string(),
            total_qty: 1,
        };
        let line = receive(
            coil,
            StockPricing {
                price_per_kg: 100.5,
                tax_percent: 1.0,
                ..StockPricing::default()
            },
        )
        .unwrap();
        assert_eq!(line.landed().total_price_ex_tax, 100.5);
        assert_eq!(line.landed().tax_amount, 1.01);
        assert_eq!(line.landed().total_price, 101.51);
    }

    #[test]
    fn out_of_range_price_is_rejected() {
        let err = receive(
            reel(),
            StockPricing {
                price_per_kg: 1e27,
                ..pricing()
            },
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("out of range")));
    }

    #[test]
    fn ink_is_priced_by_can_count() {
        let ink = StockKind::Ink {
            color: "Blue".to_string(),
            weight_per_can: 20.0,
            total_qty: 4,
        };
        let line = receive(
            ink,
            StockPricing {
                price_per_kg: 150.0,
                tax_percent: 18.0,
                ..StockPricing::default()
            },
        )
        .unwrap();
        assert_eq!(line.landed().total_price_ex_tax, 600.0);
        assert_eq!(line.landed().tax_amount, 108.0);
        assert_eq!(line.landed().total_price, 708.0);
    }

    #[test]
    fn negative_money_is_rejected() {
        for bad in [
            StockPricing {
                freight: -1.0,
                ..pricing()
            },
            StockPricing {
                tax_percent: -5.0,
                ..pricing()
            },
            StockPricing {
                price_per_kg: f64::NAN,
                ..pricing()
            },
        ] {
            let err = receive(reel(), bad).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn blank_company_is_rejected() {
        let err = StockLine::receive(
            StockLineId::new(AggregateId::new()),
            reel(),
            "  ",
            pricing(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("company")));
    }

    #[test]
    fn zero_gsm_reel_is_rejected() {
        let kind = StockKind::PaperReel {
            gsm: 0,
            bf: "16".to_string(),
            size: "36 in".to_string(),
            total_weight_kg: 100.0,
        };
        assert!(receive(kind, pricing()).is_err());
    }

    #[test]
    fn reprice_recomputes_totals() {
        let mut line = receive(reel(), pricing()).unwrap();
        line.reprice(StockPricing {
            tax_percent: 0.0,
            ..pricing()
        })
        .unwrap();
        assert_eq!(line.landed().tax_amount, 0.0);
        assert_eq!(line.landed().total_price, 10_996.25);
    }

    #[test]
    fn failed_reprice_keeps_previous_price() {
        let mut line = receive(reel(), pricing()).unwrap();
        let before = *line.landed();
        assert!(line
            .reprice(StockPricing {
                extra_charges: -10.0,
                ..pricing()
            })
            .is_err());
        assert_eq!(*line.landed(), before);
        assert_eq!(line.pricing().extra_charges, 50.0);
    }

    #[test]
    fn serializes_flat_with_kind_tag() {
        let line = receive(
            StockKind::PinCoil {
                coil_type: "Flat".to_string(),
                total_qty: 12,
            },
            StockPricing {
                price_per_kg: 95.0,
                ..StockPricing::default()
            },
        )
        .unwrap();
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["kind"], "pin_coil");
        assert_eq!(json["total_qty"], 12);
        assert_eq!(json["total_price"], 1140.0);
        assert_eq!(json["company_name"], "Bharat Paper Mills");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: tax never lowers the landed price, and zero tax
            /// leaves it at the ex-tax total.
            #[test]
            fn tax_only_adds(
                price in 0.0f64..500.0,
                freight in 0.0f64..5_000.0,
                qty in 1u32..1_000,
                tax in 0.0f64..40.0,
            ) {
                let kind = StockKind::PastingGum {
                    gum_type: "Starch".to_string(),
                    weight_per_bag: 25.0,
                    total_qty: qty,
                };
                let taxed = receive(kind.clone(), StockPricing {
                    price_per_kg: price,
                    freight,
                    extra_charges: 0.0,
                    tax_percent: tax,
                }).unwrap();
                prop_assert!(taxed.landed().total_price >= taxed.landed().total_price_ex_tax);

                let untaxed = receive(kind, StockPricing {
                    price_per_kg: price,
                    freight,
                    extra_charges: 0.0,
                    tax_percent: 0.0,
                }).unwrap();
                prop_assert_eq!(untaxed.landed().total_price, untaxed.landed().total_price_ex_tax);
            }
        }
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use corrugate_catalog::TemplateId;
use corrugate_core::{Aggregate, AggregateId, AggregateRoot, DomainError};
use corrugate_events::Event;

use crate::costing::OrderCosting;

/// Box order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub AggregateId);

impl OrderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order status lifecycle.
///
/// `draft → pending → approved → in_production → completed`; a pending order
/// can be sent back to draft, and any open order can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Draft,
    Pending,
    Approved,
    InProduction,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (from, Cancelled) => !from.is_terminal(),
            (Draft, Pending) => true,
            (Pending, Approved) | (Pending, Draft) => true,
            (Approved, InProduction) => true,
            (InProduction, Completed) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::InProduction => "in_production",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "draft" => Ok(OrderStatus::Draft),
            "pending" => Ok(OrderStatus::Pending),
            "approved" => Ok(OrderStatus::Approved),
            "in_production" => Ok(OrderStatus::InProduction),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::validation(format!("invalid status: {other:?}"))),
        }
    }
}

/// Aggregate root: BoxOrder.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxOrder {
    id: OrderId,
    order_number: String,
    customer_name: String,
    template_id: Option<TemplateId>,
    quantity: u32,
    delivery_date: Option<NaiveDate>,
    notes: String,
    status: OrderStatus,
    costing: Option<OrderCosting>,
    version: u64,
    created: bool,
}

impl BoxOrder {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: OrderId) -> Self {
        Self {
            id,
            order_number: String::new(),
            customer_name: String::new(),
            template_id: None,
            quantity: 0,
            delivery_date: None,
            notes: String::new(),
            status: OrderStatus::Draft,
            costing: None,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn template_id(&self) -> Option<TemplateId> {
        self.template_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn delivery_date(&self) -> Option<NaiveDate> {
        self.delivery_date
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn costing(&self) -> Option<&OrderCosting> {
        self.costing.as_ref()
    }

    /// Suggested price per box from the recorded costing, if any.
    pub fn unit_price(&self) -> Option<f64> {
        self.costing.as_ref().map(|c| c.manufacturing.unit_price())
    }
}

impl AggregateRoot for BoxOrder {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: PlaceOrder. Template existence is checked by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub order_id: OrderId,
    pub order_number: String,
    pub customer_name: String,
    pub template_id: TemplateId,
    pub quantity: u32,
    pub delivery_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ChangeStatus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeStatus {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RecordCosting. Replaces any earlier costing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordCosting {
    pub order_id: OrderId,
    pub costing: OrderCosting,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderCommand {
    PlaceOrder(PlaceOrder),
    ChangeStatus(ChangeStatus),
    RecordCosting(RecordCosting),
}

/// Event: OrderPlaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub order_number: String,
    pub customer_name: String,
    pub template_id: TemplateId,
    pub quantity: u32,
    pub delivery_date: NaiveDate,
    pub notes: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StatusChanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChanged {
    pub order_id: OrderId,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CostingRecorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostingRecorded {
    pub order_id: OrderId,
    pub costing: OrderCosting,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderPlaced(OrderPlaced),
    StatusChanged(StatusChanged),
    CostingRecorded(CostingRecorded),
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderPlaced(_) => "orders.order.placed",
            OrderEvent::StatusChanged(_) => "orders.order.status_changed",
            OrderEvent::CostingRecorded(_) => "orders.order.costing_recorded",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderPlaced(e) => e.occurred_at,
            OrderEvent::StatusChanged(e) => e.occurred_at,
            OrderEvent::CostingRecorded(e) => e.occurred_at,
        }
    }
}

impl Aggregate for BoxOrder {
    type Command = OrderCommand;
    type Event = OrderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            OrderEvent::OrderPlaced(e) => {
                self.id = e.order_id;
                self.order_number = e.order_number.clone();
                self.customer_name = e.customer_name.clone();
                self.template_id = Some(e.template_id);
                self.quantity = e.quantity;
                self.delivery_date = Some(e.delivery_date);
                self.notes = e.notes.clone();
                self.status = OrderStatus::Draft;
                self.costing = None;
                self.created = true;
            }
            OrderEvent::StatusChanged(e) => {
                self.status = e.to;
            }
            OrderEvent::CostingRecorded(e) => {
                self.costing = Some(e.costing.clone());
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::PlaceOrder(cmd) => self.handle_place(cmd),
            OrderCommand::ChangeStatus(cmd) => self.handle_change_status(cmd),
            OrderCommand::RecordCosting(cmd) => self.handle_record_costing(cmd),
        }
    }
}

impl BoxOrder {
    fn ensure_order_id(&self, order_id: OrderId) -> Result<(), DomainError> {
        if self.id != order_id {
            return Err(DomainError::invariant("order_id mismatch"));
        }
        Ok(())
    }

    fn handle_place(&self, cmd: &PlaceOrder) -> Result<Vec<OrderEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("order already exists"));
        }
        DomainError::ensure_not_blank("order number", &cmd.order_number)?;
        DomainError::ensure_not_blank("customer name", &cmd.customer_name)?;
        if cmd.quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        if cmd.delivery_date < cmd.occurred_at.date_naive() {
            return Err(DomainError::validation("delivery date cannot be in the past"));
        }

        Ok(vec![OrderEvent::OrderPlaced(OrderPlaced {
            order_id: cmd.order_id,
            order_number: cmd.order_number.trim().to_string(),
            customer_name: cmd.customer_name.trim().to_string(),
            template_id: cmd.template_id,
            quantity: cmd.quantity,
            delivery_date: cmd.delivery_date,
            notes: cmd.notes.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_change_status(&self, cmd: &ChangeStatus) -> Result<Vec<OrderEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_order_id(cmd.order_id)?;

        if self.status == cmd.status {
            return Err(DomainError::conflict(format!("order is already {}", cmd.status)));
        }
        if !self.status.can_transition_to(cmd.status) {
            return Err(DomainError::invariant(format!(
                "cannot move order from {} to {}",
                self.status, cmd.status
            )));
        }

        Ok(vec![OrderEvent::StatusChanged(StatusChanged {
            order_id: cmd.order_id,
            from: self.status,
            to: cmd.status,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_record_costing(&self, cmd: &RecordCosting) -> Result<Vec<OrderEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_order_id(cmd.order_id)?;

        if self.status.is_terminal() {
            return Err(DomainError::invariant(format!(
                "cannot recost a {} order",
                self.status
            )));
        }
        if cmd.costing.manufacturing.quantity != self.quantity {
            return Err(DomainError::invariant(format!(
                "costing is for {} boxes but the order is for {}",
                cmd.costing.manufacturing.quantity, self.quantity
            )));
        }

        Ok(vec![OrderEvent::CostingRecorded(CostingRecorded {
            order_id: cmd.order_id,
            costing: cmd.costing.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::{ManufacturingCost, MaterialRequirement};
    use std::collections::BTreeMap;

    fn test_order_id() -> OrderId {
        OrderId::new(AggregateId::new())
    }

    fn test_template_id() -> TemplateId {
        TemplateId::new(AggregateId::new())
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn place_cmd(order_id: OrderId) -> PlaceOrder {
        PlaceOrder {
            order_id,
            order_number: "SO-1042".to_string(),
            customer_name: "Sharma Foods".to_string(),
            template_id: test_template_id(),
            quantity: 500,
            delivery_date: test_time().date_naive() + chrono::Days::new(14),
            notes: String::new(),
            occurred_at: test_time(),
        }
    }

    fn placed(order_id: OrderId) -> BoxOrder {
        let mut order = BoxOrder::empty(order_id);
        order
            .execute(&OrderCommand::PlaceOrder(place_cmd(order_id)))
            .unwrap();
        order
    }

    fn change(order: &mut BoxOrder, status: OrderStatus) -> Result<Vec<OrderEvent>, DomainError> {
        let order_id = order.id_typed();
        order.execute(&OrderCommand::ChangeStatus(ChangeStatus {
            order_id,
            status,
            occurred_at: test_time(),
        }))
    }

    fn costing_for(quantity: u32) -> OrderCosting {
        OrderCosting {
            material: MaterialRequirement {
                layer_weights_kg: BTreeMap::new(),
                total_paper_weight_kg: 120.5,
                paper_cost: 9640.0,
                gum_cost: 0.0,
                ink_cost: 0.0,
            },
            manufacturing: ManufacturingCost::new(quantity, 9640.0, 0.0, 2892.0, 0.0, 15.0)
                .unwrap(),
        }
    }

    #[test]
    fn place_order_starts_in_draft() {
        let order_id = test_order_id();
        let order = placed(order_id);
        assert_eq!(order.status(), OrderStatus::Draft);
        assert_eq!(order.order_number(), "SO-1042");
        assert_eq!(order.quantity(), 500);
        assert_eq!(order.version(), 1);
        assert!(order.costing().is_none());
    }

    #[test]
    fn place_order_rejects_zero_quantity() {
        let order_id = test_order_id();
        let cmd = PlaceOrder {
            quantity: 0,
            ..place_cmd(order_id)
        };
        let err = BoxOrder::empty(order_id)
            .handle(&OrderCommand::PlaceOrder(cmd))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn place_order_rejects_blank_customer() {
        let order_id = test_order_id();
        let cmd = PlaceOrder {
            customer_name: " ".to_string(),
            ..place_cmd(order_id)
        };
        assert!(BoxOrder::empty(order_id).handle(&OrderCommand::PlaceOrder(cmd)).is_err());
    }

    #[test]
    fn place_order_rejects_past_delivery() {
        let order_id = test_order_id();
        let cmd = PlaceOrder {
            delivery_date: test_time().date_naive() - chrono::Days::new(1),
            ..place_cmd(order_id)
        };
        assert!(BoxOrder::empty(order_id).handle(&OrderCommand::PlaceOrder(cmd)).is_err());
    }

    #[test]
    fn full_lifecycle_reaches_completed() {
        let mut order = placed(test_order_id());
        for status in [
            OrderStatus::Pending,
            OrderStatus::Approved,
            OrderStatus::InProduction,
            OrderStatus::Completed,
        ] {
            let events = change(&mut order, status).unwrap();
            assert_eq!(events[0].event_type(), "orders.order.status_changed");
        }
        assert_eq!(order.status(), OrderStatus::Completed);
        assert_eq!(order.version(), 5);
    }

    #[test]
    fn skipping_a_step_is_rejected() {
        let mut order = placed(test_order_id());
        let err = change(&mut order, OrderStatus::InProduction).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(msg) if msg.contains("draft to in_production")));
    }

    #[test]
    fn completed_orders_cannot_be_cancelled() {
        let mut order = placed(test_order_id());
        for status in [
            OrderStatus::Pending,
            OrderStatus::Approved,
            OrderStatus::InProduction,
            OrderStatus::Completed,
        ] {
            change(&mut order, status).unwrap();
        }
        assert!(change(&mut order, OrderStatus::Cancelled).is_err());
    }

    #[test]
    fn same_status_is_a_conflict() {
        let mut order = placed(test_order_id());
        let err = change(&mut order, OrderStatus::Draft).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn status_parses_from_snake_case() {
        assert_eq!("in_production".parse::<OrderStatus>().unwrap(), OrderStatus::InProduction);
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn record_costing_stores_costing() {
        let order_id = test_order_id();
        let mut order = placed(order_id);
        order
            .execute(&OrderCommand::RecordCosting(RecordCosting {
                order_id,
                costing: costing_for(500),
                occurred_at: test_time(),
            }))
            .unwrap();

        let costing = order.costing().unwrap();
        assert_eq!(costing.manufacturing.total_cost, 12_532.0);
        assert_eq!(order.unit_price(), Some(28.82));
    }

    #[test]
    fn record_costing_rejects_quantity_mismatch() {
        let order_id = test_order_id();
        let order = placed(order_id);
        let err = order
            .handle(&OrderCommand::RecordCosting(RecordCosting {
                order_id,
                costing: costing_for(400),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn cancelled_orders_cannot_be_recosted() {
        let order_id = test_order_id();
        let mut order = placed(order_id);
        change(&mut order, OrderStatus::Cancelled).unwrap();
        let err = order
            .handle(&OrderCommand::RecordCosting(RecordCosting {
                order_id,
                costing: costing_for(500),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_status() -> impl Strategy<Value = OrderStatus> {
            prop_oneof![
                Just(OrderStatus::Draft),
                Just(OrderStatus::Pending),
                Just(OrderStatus::Approved),
                Just(OrderStatus::InProduction),
                Just(OrderStatus::Completed),
                Just(OrderStatus::Cancelled),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: whatever status sequence is requested, terminal
            /// orders never change status again.
            #[test]
            fn terminal_status_is_final(requests in prop::collection::vec(any_status(), 1..20)) {
                let mut order = placed(test_order_id());
                let mut terminal_at: Option<OrderStatus> = None;

                for status in requests {
                    let before = order.status();
                    let result = change(&mut order, status);
                    if let Some(t) = terminal_at {
                        prop_assert!(result.is_err());
                        prop_assert_eq!(order.status(), t);
                    } else if result.is_ok() {
                        prop_assert!(before.can_transition_to(status));
                    }
                    if order.status().is_terminal() {
                        terminal_at = Some(order.status());
                    }
                }
            }
        }
    }
}

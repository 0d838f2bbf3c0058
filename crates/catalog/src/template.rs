use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use corrugate_calculator::{BoxDimensions, BoxParameters, FluteType, PaperSpec, PlyCount};
use corrugate_core::{Aggregate, AggregateId, AggregateRoot, DomainError, ExpectedVersion};
use corrugate_events::Event;

/// Box template identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub AggregateId);

impl TemplateId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// The editable fields of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDetails {
    pub name: String,
    pub dimensions: BoxDimensions,
    pub flute: FluteType,
    pub plies: PlyCount,
    pub print_color: String,
    pub paper: PaperSpec,
}

impl TemplateDetails {
    fn validate(&self) -> Result<(), DomainError> {
        DomainError::ensure_not_blank("template name", &self.name)?;
        self.dimensions.validate()?;
        self.paper.validate_for(self.plies)?;
        Ok(())
    }
}

/// Aggregate root: BoxTemplate.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxTemplate {
    id: TemplateId,
    details: Option<TemplateDetails>,
    deleted: bool,
    version: u64,
}

impl BoxTemplate {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: TemplateId) -> Self {
        Self {
            id,
            details: None,
            deleted: false,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> TemplateId {
        self.id
    }

    pub fn details(&self) -> Option<&TemplateDetails> {
        self.details.as_ref()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// A template can be ordered once it exists and until it is deleted.
    pub fn is_orderable(&self) -> bool {
        self.details.is_some() && !self.deleted
    }

    /// Calculator input for an order of `quantity` boxes of this template.
    pub fn parameters(
        &self,
        quantity: u32,
        paper_cost_per_kg: Option<f64>,
        profit_margin_pct: Option<f64>,
    ) -> Result<BoxParameters, DomainError> {
        if self.deleted {
            return Err(DomainError::invariant("deleted templates cannot be calculated"));
        }
        let details = self.details.as_ref().ok_or_else(DomainError::not_found)?;
        Ok(BoxParameters {
            dimensions: details.dimensions,
            flute: details.flute,
            plies: details.plies,
            paper: details.paper.clone(),
            paper_cost_per_kg,
            quantity,
            profit_margin_pct,
        })
    }
}

impl AggregateRoot for BoxTemplate {
    type Id = TemplateId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateTemplate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTemplate {
    pub template_id: TemplateId,
    pub details: TemplateDetails,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReviseTemplate. Replaces every editable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviseTemplate {
    pub template_id: TemplateId,
    #[serde(default)]
    pub expected_version: ExpectedVersion,
    pub details: TemplateDetails,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeleteTemplate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTemplate {
    pub template_id: TemplateId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateCommand {
    CreateTemplate(CreateTemplate),
    ReviseTemplate(ReviseTemplate),
    DeleteTemplate(DeleteTemplate),
}

/// Event: TemplateCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateCreated {
    pub template_id: TemplateId,
    pub details: TemplateDetails,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TemplateRevised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRevised {
    pub template_id: TemplateId,
    pub details: TemplateDetails,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TemplateDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDeleted {
    pub template_id: TemplateId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateEvent {
    TemplateCreated(TemplateCreated),
    TemplateRevised(TemplateRevised),
    TemplateDeleted(TemplateDeleted),
}

impl Event for TemplateEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TemplateEvent::TemplateCreated(_) => "catalog.template.created",
            TemplateEvent::TemplateRevised(_) => "catalog.template.revised",
            TemplateEvent::TemplateDeleted(_) => "catalog.template.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            TemplateEvent::TemplateCreated(e) => e.occurred_at,
            TemplateEvent::TemplateRevised(e) => e.occurred_at,
            TemplateEvent::TemplateDeleted(e) => e.occurred_at,
        }
    }
}

impl Aggregate for BoxTemplate {
    type Command = TemplateCommand;
    type Event = TemplateEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            TemplateEvent::TemplateCreated(e) => {
                self.id = e.template_id;
                self.details = Some(e.details.clone());
                self.deleted = false;
            }
            TemplateEvent::TemplateRevised(e) => {
                self.details = Some(e.details.clone());
            }
            TemplateEvent::TemplateDeleted(_) => {
                self.deleted = true;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            TemplateCommand::CreateTemplate(cmd) => self.handle_create(cmd),
            TemplateCommand::ReviseTemplate(cmd) => self.handle_revise(cmd),
            TemplateCommand::DeleteTemplate(cmd) => self.handle_delete(cmd),
        }
    }
}

impl BoxTemplate {
    fn ensure_template_id(&self, template_id: TemplateId) -> Result<(), DomainError> {
        if self.id != template_id {
            return Err(DomainError::invariant("template_id mismatch"));
        }
        Ok(())
    }

    fn ensure_live(&self) -> Result<(), DomainError> {
        if self.details.is_none() {
            return Err(DomainError::not_found());
        }
        if self.deleted {
            return Err(DomainError::conflict("template is deleted"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateTemplate) -> Result<Vec<TemplateEvent>, DomainError> {
        if self.details.is_some() {
            return Err(DomainError::conflict("template already exists"));
        }
        // Name uniqueness across templates is checked by the record store.
        cmd.details.validate()?;

        Ok(vec![TemplateEvent::TemplateCreated(TemplateCreated {
            template_id: cmd.template_id,
            details: cmd.details.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_revise(&self, cmd: &ReviseTemplate) -> Result<Vec<TemplateEvent>, DomainError> {
        self.ensure_live()?;
        self.ensure_template_id(cmd.template_id)?;
        cmd.expected_version.check(self.version)?;
        cmd.details.validate()?;

        if self.details.as_ref() == Some(&cmd.details) {
            return Ok(Vec::new());
        }

        Ok(vec![TemplateEvent::TemplateRevised(TemplateRevised {
            template_id: cmd.template_id,
            details: cmd.details.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_delete(&self, cmd: &DeleteTemplate) -> Result<Vec<TemplateEvent>, DomainError> {
        self.ensure_live()?;
        self.ensure_template_id(cmd.template_id)?;

        Ok(vec![TemplateEvent::TemplateDeleted(TemplateDeleted {
            template_id: cmd.template_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

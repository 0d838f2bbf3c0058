//! Box template catalog (event-sourced).
//!
//! A template is the reusable specification of a box: dimensions, flute, ply
//! count, print colour and the paper grade of every layer. Orders reference
//! templates; the calculator reads them.

pub mod template;

pub use template::{
    BoxTemplate, CreateTemplate, DeleteTemplate, ReviseTemplate, TemplateCommand, TemplateCreated,
    TemplateDeleted, TemplateDetails, TemplateEvent, TemplateId, TemplateRevised,
};

//! Entity structs for all Cascade domain objects.
//!
//! Entities are rebuilt from the remote store on every run and never
//! persisted. All structs derive `Serialize`, `Deserialize`, and `JsonSchema`
//! so they can appear in the run report.

mod field;
mod item;
mod project;
mod record;

pub use field::{CategoricalField, FieldOption, ProjectField, ProjectSchema};
pub use item::{ItemPage, TrackedItem};
pub use project::ProjectRef;
pub use record::ParentLink;

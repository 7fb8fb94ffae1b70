//! # cascade-sync
//!
//! Propagates single-select field values from ancestor issues of a
//! configured type down to their descendant project items.
//!
//! - [`AncestorResolver`] walks parent links upward with a visited set and a
//!   bounded step counter.
//! - [`select_eligible`] intersects configured names with the project's
//!   single-select fields.
//! - [`FieldSyncEngine`] copies ancestor options onto one descendant.
//! - [`SyncDriver`] runs the whole pass and returns a
//!   [`SyncReport`](cascade_core::responses::SyncReport).

pub mod driver;
pub mod engine;
pub mod error;
pub mod fields;
pub mod observer;
pub mod resolver;

pub use driver::SyncDriver;
pub use engine::FieldSyncEngine;
pub use error::SyncError;
pub use fields::select_eligible;
pub use observer::{NoopObserver, SyncObserver};
pub use resolver::{AncestorResolver, Resolution};

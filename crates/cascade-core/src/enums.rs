//! Field kinds, skip reasons, field outcomes, and the run state machine.
//!
//! Plain enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Data-carrying enums are internally tagged so the run report stays flat.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Data type of a project field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    SingleSelect,
    Text,
    Number,
    Date,
    Iteration,
    /// Built-in or future field types (assignees, labels, milestone, ...).
    Other,
}

impl FieldKind {
    /// Only single-select fields carry categorical values.
    #[must_use]
    pub const fn is_categorical(self) -> bool {
        matches!(self, Self::SingleSelect)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleSelect => "single_select",
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Iteration => "iteration",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RunState
// ---------------------------------------------------------------------------

/// Lifecycle of one synchronization run.
///
/// ```text
/// loading_schema → selecting_fields → loading_items → processing → done
///                                                      processing → processing
/// (any non-terminal) → aborted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    LoadingSchema,
    SelectingFields,
    LoadingItems,
    Processing,
    Done,
    Aborted,
}

impl RunState {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::LoadingSchema => &[Self::SelectingFields, Self::Aborted],
            Self::SelectingFields => &[Self::LoadingItems, Self::Aborted],
            Self::LoadingItems => &[Self::Processing, Self::Done, Self::Aborted],
            Self::Processing => &[Self::Processing, Self::Done, Self::Aborted],
            Self::Done | Self::Aborted => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoadingSchema => "loading_schema",
            Self::SelectingFields => "selecting_fields",
            Self::LoadingItems => "loading_items",
            Self::Processing => "processing",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MissReason
// ---------------------------------------------------------------------------

/// Why the ancestor walk ended without a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    /// Reached a record with no parent.
    Root,
    /// Revisited a record already on the walked chain.
    Cycle,
    /// Hit the hop limit before reaching a root.
    DepthExceeded,
}

impl MissReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Cycle => "cycle",
            Self::DepthExceeded => "depth_exceeded",
        }
    }
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SkipReason
// ---------------------------------------------------------------------------

/// Why an item was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Draft item, nothing to walk from.
    NoLinkedRecord,
    AncestorNotFound { miss: MissReason },
    /// An ancestor exists but is not an item of this project.
    AncestorNotTracked { ancestor_record_id: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLinkedRecord => f.write_str("no_linked_record"),
            Self::AncestorNotFound { miss } => write!(f, "ancestor_not_found ({miss})"),
            Self::AncestorNotTracked { ancestor_record_id } => {
                write!(f, "ancestor_not_tracked ({ancestor_record_id})")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// FieldStatus
// ---------------------------------------------------------------------------

/// Outcome of one field on one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FieldStatus {
    /// The mutation was issued and acknowledged.
    Updated {
        option_id: String,
        option_name: Option<String>,
    },
    /// Dry run: the mutation would have been issued.
    Planned {
        option_id: String,
        option_name: Option<String>,
    },
    /// The ancestor has no value for this field; the item was not touched.
    SkippedNoAncestorValue,
    /// The store refused this one mutation.
    Rejected { message: String },
}

impl FieldStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Updated { .. } => "updated",
            Self::Planned { .. } => "planned",
            Self::SkippedNoAncestorValue => "skipped",
            Self::Rejected { .. } => "rejected",
        }
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

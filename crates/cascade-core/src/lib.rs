//! # cascade-core
//!
//! Core types and error types for Cascade.
//!
//! This crate provides the foundational types shared across all Cascade crates:
//! - Entity structs for project schema, tracked items, and parent links
//! - Enums for field kinds, skip reasons, field outcomes, and the run state machine
//! - Cross-cutting error types
//! - Run report types rendered by the CLI

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;

/// Maximum number of parent hops the ancestor walk may take.
pub const MAX_ANCESTOR_DEPTH: usize = 50;

/// Issue type label used when no ancestor type is configured.
pub const DEFAULT_ANCESTOR_TYPE: &str = "Initiative";

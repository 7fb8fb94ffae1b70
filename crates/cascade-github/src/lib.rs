//! # cascade-github
//!
//! Data source gateway for Cascade.
//!
//! Talks to the GitHub GraphQL API to:
//! - load an organization project's id and field schema
//! - page through project items with their single-select values
//! - read an issue's parent and the parent's issue type
//! - set a single-select value on one project item
//!
//! The [`ProjectGateway`] trait is the seam the sync engine depends on;
//! [`GithubClient`] is the networked implementation and [`MemoryGateway`]
//! the in-memory one.

pub mod client;
pub mod gateway;
pub mod memory;
pub mod retry;

mod error;
mod graphql;
mod http;
mod items;
mod mutation;
mod queries;
mod records;
mod schema;
mod wire;

pub use client::GithubClient;
pub use error::GatewayError;
pub use gateway::ProjectGateway;
pub use memory::{MemoryGateway, Mutation};
pub use retry::RetryPolicy;

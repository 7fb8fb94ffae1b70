//! Upward walk from a record to its nearest ancestor of a given type.

use std::collections::HashSet;

use cascade_core::MAX_ANCESTOR_DEPTH;
use cascade_core::enums::MissReason;
use cascade_github::{GatewayError, ProjectGateway};

/// Outcome of one ancestor lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    NotFound(MissReason),
}

/// Resolves the nearest ancestor whose type label matches a target.
///
/// The walk is iterative and bounded: every record is visited at most once
/// and the walk stops once the step counter exceeds [`MAX_ANCESTOR_DEPTH`].
pub struct AncestorResolver<'a, G: ProjectGateway + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: ProjectGateway + ?Sized> AncestorResolver<'a, G> {
    pub const fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Walk parent links upward from `start_id` until a parent typed
    /// `target_type` is found.
    ///
    /// The start record itself is never a candidate. A parent without a
    /// readable type label does not match and the walk continues through it.
    ///
    /// # Errors
    ///
    /// Propagates gateway errors from the parent lookups unchanged.
    pub async fn resolve(
        &self,
        start_id: &str,
        target_type: &str,
    ) -> Result<Resolution, GatewayError> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut steps = 0_usize;
        let mut current = start_id.to_string();

        loop {
            if visited.contains(&current) {
                tracing::debug!(record_id = start_id, at = %current, "ancestor walk hit a cycle");
                return Ok(Resolution::NotFound(MissReason::Cycle));
            }
            if steps > MAX_ANCESTOR_DEPTH {
                tracing::debug!(record_id = start_id, steps, "ancestor walk exceeded depth");
                return Ok(Resolution::NotFound(MissReason::DepthExceeded));
            }

            let link = self.gateway.record_parent(&current).await?;
            steps += 1;

            let matched = link.parent_matches(target_type);
            let Some(parent_id) = link.parent_id else {
                return Ok(Resolution::NotFound(MissReason::Root));
            };
            if matched {
                tracing::trace!(record_id = start_id, ancestor = %parent_id, steps, "ancestor found");
                return Ok(Resolution::Found(parent_id));
            }

            visited.insert(std::mem::replace(&mut current, parent_id));
        }
    }
}

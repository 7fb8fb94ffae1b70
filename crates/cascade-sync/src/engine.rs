//! Copies selected options from an ancestor item onto a descendant item.

use cascade_core::entities::{CategoricalField, TrackedItem};
use cascade_core::enums::FieldStatus;
use cascade_core::responses::FieldOutcome;
use cascade_github::{GatewayError, ProjectGateway};

/// Applies ancestor field values to descendants, one mutation per field.
pub struct FieldSyncEngine<'a, G: ProjectGateway + ?Sized> {
    gateway: &'a G,
    dry_run: bool,
}

impl<'a, G: ProjectGateway + ?Sized> FieldSyncEngine<'a, G> {
    pub const fn new(gateway: &'a G, dry_run: bool) -> Self {
        Self { gateway, dry_run }
    }

    /// Copy every field in `fields` from `ancestor` onto `item`.
    ///
    /// Unset ancestor values leave the descendant untouched. Set values are
    /// written unconditionally, without comparing against the descendant's
    /// current value. A store-side rejection only affects its own field.
    ///
    /// # Errors
    ///
    /// Returns the first transport, authorization, or rate-limit failure.
    pub async fn apply(
        &self,
        project_id: &str,
        item: &TrackedItem,
        ancestor: &TrackedItem,
        fields: &[CategoricalField],
    ) -> Result<Vec<FieldOutcome>, GatewayError> {
        let mut outcomes = Vec::with_capacity(fields.len());

        for field in fields {
            let Some(option_id) = ancestor.selected_option(&field.name) else {
                tracing::debug!(item_id = %item.id, field = %field.name, "ancestor has no value");
                outcomes.push(FieldOutcome {
                    field: field.name.clone(),
                    status: FieldStatus::SkippedNoAncestorValue,
                });
                continue;
            };
            let option_name = field.option_label(option_id).map(str::to_string);

            if self.dry_run {
                tracing::info!(
                    item_id = %item.id,
                    field = %field.name,
                    option_id,
                    "would set field (dry run)"
                );
                outcomes.push(FieldOutcome {
                    field: field.name.clone(),
                    status: FieldStatus::Planned {
                        option_id: option_id.to_string(),
                        option_name,
                    },
                });
                continue;
            }

            let status = match self
                .gateway
                .set_item_field_option(project_id, &item.id, &field.id, option_id)
                .await
            {
                Ok(()) => {
                    tracing::info!(item_id = %item.id, field = %field.name, option_id, "set field");
                    FieldStatus::Updated {
                        option_id: option_id.to_string(),
                        option_name,
                    }
                }
                Err(e) if e.is_rejection() => {
                    tracing::warn!(item_id = %item.id, field = %field.name, error = %e, "update rejected");
                    FieldStatus::Rejected {
                        message: e.to_string(),
                    }
                }
                Err(e) => return Err(e),
            };
            outcomes.push(FieldOutcome {
                field: field.name.clone(),
                status,
            });
        }

        Ok(outcomes)
    }
}

//! Single-select value mutation.

use crate::client::GithubClient;
use crate::error::GatewayError;
use crate::queries::SET_FIELD_OPTION;

impl GithubClient {
    /// Select `option_id` in `field_id` on `item_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::GraphQl`] when the store refuses the update,
    /// or any transport error.
    pub async fn update_item_field_option(
        &self,
        project_id: &str,
        item_id: &str,
        field_id: &str,
        option_id: &str,
    ) -> Result<(), GatewayError> {
        let variables = serde_json::json!({
            "project": project_id,
            "item": item_id,
            "field": field_id,
            "option": option_id,
        });
        self.execute::<serde_json::Value>("set_item_field_option", SET_FIELD_OPTION, variables)
            .await?
            .into_data()?;
        Ok(())
    }
}

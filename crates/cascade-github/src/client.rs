//! reqwest-backed GraphQL client for the GitHub API.

use async_trait::async_trait;
use cascade_config::SyncSettings;
use cascade_core::entities::{ItemPage, ParentLink, ProjectRef, ProjectSchema};
use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::gateway::ProjectGateway;
use crate::graphql::{GraphQlRequest, GraphQlResponse};
use crate::http::check_response;
use crate::retry::RetryPolicy;

/// Opts in to the issue hierarchy fields on github.com.
const GRAPHQL_FEATURES: &str = "sub_issues,issue_types";

/// HTTP client for the GitHub GraphQL API.
pub struct GithubClient {
    pub(crate) http: reqwest::Client,
    api_url: String,
    token: String,
    pub(crate) page_size: u32,
    retry: RetryPolicy,
}

impl GithubClient {
    /// Build a client from validated run settings.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// cannot be built.
    pub fn from_settings(settings: &SyncSettings) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("cascade/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: settings.api_url.clone(),
            token: settings.token.clone(),
            page_size: settings.page_size,
            retry: RetryPolicy::with_attempts(settings.max_attempts),
        })
    }

    /// Replace the retry policy (tests use a zero-delay policy).
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// POST one GraphQL document, retrying transient failures.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<GraphQlResponse<T>, GatewayError> {
        let this = self;
        let variables = &variables;
        self.retry
            .run(operation, move || async move {
                let request = GraphQlRequest {
                    query,
                    variables: variables.clone(),
                };
                let resp = this
                    .http
                    .post(&this.api_url)
                    .bearer_auth(&this.token)
                    .header("GraphQL-Features", GRAPHQL_FEATURES)
                    .json(&request)
                    .send()
                    .await
                    .map_err(GatewayError::from_transport)?;
                let resp = check_response(resp).await?;
                resp.json::<GraphQlResponse<T>>().await.map_err(|e| {
                    if e.is_timeout() {
                        GatewayError::Timeout(e.to_string())
                    } else {
                        GatewayError::Parse(format!("{operation}: {e}"))
                    }
                })
            })
            .await
    }
}

#[async_trait]
impl ProjectGateway for GithubClient {
    async fn project_schema(&self, project: &ProjectRef) -> Result<ProjectSchema, GatewayError> {
        self.fetch_project_schema(project).await
    }

    async fn list_items_page(
        &self,
        project: &ProjectRef,
        after: Option<&str>,
    ) -> Result<ItemPage, GatewayError> {
        self.fetch_items_page(project, after).await
    }

    async fn record_parent(&self, record_id: &str) -> Result<ParentLink, GatewayError> {
        self.fetch_record_parent(record_id).await
    }

    async fn set_item_field_option(
        &self,
        project_id: &str,
        item_id: &str,
        field_id: &str,
        option_id: &str,
    ) -> Result<(), GatewayError> {
        self.update_item_field_option(project_id, item_id, field_id, option_id)
            .await
    }
}

//! GraphQL request/response envelope.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    /// Data only when the operation reported no errors at all.
    pub fn into_data(self) -> Result<T, GatewayError> {
        if !self.errors.is_empty() {
            return Err(classify(self.errors));
        }
        self.data
            .ok_or_else(|| GatewayError::Parse("response had neither data nor errors".into()))
    }

    /// Data even when some fields failed to resolve; the field-level errors
    /// are handed back for logging.
    pub fn into_partial_data(self) -> Result<(T, Vec<GraphQlError>), GatewayError> {
        match self.data {
            Some(data) => Ok((data, self.errors)),
            None if self.errors.is_empty() => Err(GatewayError::Parse(
                "response had neither data nor errors".into(),
            )),
            None => Err(classify(self.errors)),
        }
    }
}

fn classify(errors: Vec<GraphQlError>) -> GatewayError {
    let has_kind = |kind: &str| errors.iter().any(|e| e.kind.as_deref() == Some(kind));
    let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();

    if has_kind("FORBIDDEN") {
        GatewayError::Forbidden {
            message: messages.join("; "),
        }
    } else if has_kind("RATE_LIMITED") {
        GatewayError::RateLimited {
            retry_after_secs: 60,
        }
    } else if errors.iter().all(|e| e.kind.as_deref() == Some("NOT_FOUND")) {
        GatewayError::NotFound {
            what: messages.join("; "),
        }
    } else {
        GatewayError::GraphQl { messages }
    }
}

//! Raw HTTP webhook channel.
//!
//! Sends one JSON POST per dispatch directly to the analytics endpoint. Not
//! tenant-scoped: the request fires exactly once regardless of how many
//! tenant domains the event implicates. The response status is deliberately
//! not inspected and there is no retry.

use crate::context::AuthenticationContext;
use crate::error::PublishError;
use crate::payload::field_or_placeholder;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Default webhook request timeout.
const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP POST webhook channel.
pub struct WebhookChannel {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl WebhookChannel {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Build the request body for `context`.
    ///
    /// The shape is independent of the stream payload tuple: top-level
    /// `apiKey` and `eventType`, nested `event_properties` (result) and
    /// `user_properties` (application, username). Unset fields carry the
    /// placeholder sentinel.
    fn body(&self, context: &AuthenticationContext) -> serde_json::Value {
        let result = if context.authn_success {
            "SUCCESS"
        } else {
            "FAILURE"
        };

        json!({
            "apiKey": self.api_key,
            "eventType": field_or_placeholder(context.event_type.as_deref()),
            "event_properties": {
                "type": result,
            },
            "user_properties": {
                "application": field_or_placeholder(context.service_provider.as_deref()),
                "username": field_or_placeholder(context.username.as_deref()),
            },
        })
    }

    /// Issue the single POST for this dispatch.
    ///
    /// Only transport faults surface as errors; any HTTP response, 2xx or
    /// not, counts as delivered.
    pub async fn publish(&self, context: &AuthenticationContext) -> Result<(), PublishError> {
        let body = self.body(context);

        debug!(endpoint = %self.endpoint, "Posting webhook event");

        self.client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PublishError::Timeout {
                        timeout: WEBHOOK_TIMEOUT,
                    }
                } else if e.is_connect() {
                    PublishError::ConnectionFailed {
                        endpoint: self.endpoint.clone(),
                        cause: e.to_string(),
                    }
                } else {
                    PublishError::SendFailed {
                        cause: e.to_string(),
                    }
                }
            })?;

        Ok(())
    }
}

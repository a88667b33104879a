//! Error types for the authn-publisher crate.

use std::time::Duration;
use thiserror::Error;

/// Errors raised by the channel publishers and configuration loading.
///
/// None of these ever reach the authentication pipeline that raised the
/// event: the dispatcher logs them and returns normally. They exist so the
/// channels report faults explicitly instead of suppressing them internally.
#[derive(Debug, Error)]
pub enum PublishError {
    // Configuration errors (raised once, at registration)
    /// Required configuration property is missing.
    #[error("configuration missing: {key}")]
    ConfigMissing { key: String },

    /// Configuration property has an invalid value.
    #[error("configuration invalid for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Stream channel errors
    /// Failed to serialize an event for publishing.
    #[error("failed to serialize event {event_type}: {cause}")]
    SerializationFailed { event_type: String, cause: String },

    /// The stream sink rejected a publish attempt.
    #[error("failed to publish to stream {stream_id} for tenant {tenant_domain}: {cause}")]
    StreamPublishFailed {
        stream_id: String,
        tenant_domain: String,
        cause: String,
    },

    // Webhook channel errors
    /// Could not connect to the webhook endpoint.
    #[error("webhook connect to {endpoint} failed: {cause}")]
    ConnectionFailed { endpoint: String, cause: String },

    /// The webhook request timed out.
    #[error("webhook request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// The webhook request failed in transit.
    #[error("webhook send failed: {cause}")]
    SendFailed { cause: String },
}

impl PublishError {
    /// Returns true if this error is transient (a later dispatch may succeed).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PublishError::StreamPublishFailed { .. }
                | PublishError::ConnectionFailed { .. }
                | PublishError::Timeout { .. }
                | PublishError::SendFailed { .. }
        )
    }

    /// Returns true if this is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PublishError::ConfigMissing { .. } | PublishError::ConfigInvalid { .. }
        )
    }
}

/// Error surface of the [`AuthEventHandler`](crate::dispatcher::AuthEventHandler)
/// trait.
///
/// [`EventDispatcher`](crate::dispatcher::EventDispatcher) never returns this:
/// publishing is advisory, so every channel failure is logged and swallowed.
/// The type exists for handler implementations that do participate in the
/// host pipeline's outcome.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The handler could not process the event.
    #[error("event handler failed for {event_name}: {cause}")]
    HandlerFailed { event_name: String, cause: String },
}

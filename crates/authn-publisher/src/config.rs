//! Publisher configuration management.
//!
//! Configuration is parsed once from the host-supplied module property map at
//! registration time and is read-only afterwards. Every dispatch reads the
//! same immutable snapshot, so no locking is needed for concurrent dispatches.

use crate::error::PublishError;
use crate::payload::PayloadTemplate;
use std::collections::HashMap;
use std::str::FromStr;

/// Property enabling or disabling the publisher. Absent or false means the
/// dispatcher is a no-op.
pub const ENABLE_PROPERTY: &str = "customLoginDataPublisher.enable";

/// Property holding the analytics API key stamped into every payload.
pub const API_KEY_PROPERTY: &str = "customLoginDataPublisher.apiKey";

/// Property holding the webhook endpoint URL.
pub const WEBHOOK_ENDPOINT_PROPERTY: &str = "customLoginDataPublisher.webhookEndpoint";

/// Property selecting the payload template (`legacy` or `extended`).
pub const PAYLOAD_TEMPLATE_PROPERTY: &str = "customLoginDataPublisher.payloadTemplate";

/// Process-wide publisher configuration.
///
/// Set once at host-runtime registration, read on every dispatch.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Whether publishing is enabled at all.
    pub enabled: bool,
    /// API key stamped into payloads and the webhook body.
    pub api_key: String,
    /// Webhook endpoint URL for the HTTP channel.
    pub webhook_endpoint: String,
    /// Which payload template the target analytics stream expects.
    pub template: PayloadTemplate,
    /// Raw module properties as supplied by the host.
    properties: HashMap<String, String>,
}

impl PublisherConfig {
    /// Parse configuration from the host-supplied module property map.
    ///
    /// An absent or false `customLoginDataPublisher.enable` yields a disabled
    /// configuration; the remaining properties are then optional. When
    /// enabled, the API key and webhook endpoint are required.
    pub fn from_properties(properties: HashMap<String, String>) -> Result<Self, PublishError> {
        let enabled = properties
            .get(ENABLE_PROPERTY)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        let api_key = match properties.get(API_KEY_PROPERTY) {
            Some(v) => v.clone(),
            None if enabled => {
                return Err(PublishError::ConfigMissing {
                    key: API_KEY_PROPERTY.to_string(),
                })
            }
            None => String::new(),
        };

        let webhook_endpoint = match properties.get(WEBHOOK_ENDPOINT_PROPERTY) {
            Some(v) => v.clone(),
            None if enabled => {
                return Err(PublishError::ConfigMissing {
                    key: WEBHOOK_ENDPOINT_PROPERTY.to_string(),
                })
            }
            None => String::new(),
        };

        let template = match properties.get(PAYLOAD_TEMPLATE_PROPERTY) {
            Some(v) => PayloadTemplate::from_str(v)?,
            None => PayloadTemplate::Legacy,
        };

        Ok(Self {
            enabled,
            api_key,
            webhook_endpoint,
            template,
            properties,
        })
    }

    /// Look up a raw module property by key.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> PublisherConfigBuilder {
        PublisherConfigBuilder::new()
    }

    /// A disabled configuration; every dispatch through it is a no-op.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            webhook_endpoint: String::new(),
            template: PayloadTemplate::Legacy,
            properties: HashMap::new(),
        }
    }
}

/// Builder for [`PublisherConfig`].
#[derive(Debug, Default)]
pub struct PublisherConfigBuilder {
    enabled: bool,
    api_key: Option<String>,
    webhook_endpoint: Option<String>,
    template: Option<PayloadTemplate>,
    properties: HashMap<String, String>,
}

impl PublisherConfigBuilder {
    /// Create a new builder. Publishing starts disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable publishing.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the analytics API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the webhook endpoint URL.
    pub fn webhook_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.webhook_endpoint = Some(endpoint.into());
        self
    }

    /// Select the payload template.
    #[must_use]
    pub fn template(mut self, template: PayloadTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Attach a raw module property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Build the configuration.
    ///
    /// When enabled, the API key and webhook endpoint must have been set.
    pub fn build(self) -> Result<PublisherConfig, PublishError> {
        if self.enabled && self.api_key.is_none() {
            return Err(PublishError::ConfigMissing {
                key: API_KEY_PROPERTY.to_string(),
            });
        }
        if self.enabled && self.webhook_endpoint.is_none() {
            return Err(PublishError::ConfigMissing {
                key: WEBHOOK_ENDPOINT_PROPERTY.to_string(),
            });
        }

        Ok(PublisherConfig {
            enabled: self.enabled,
            api_key: self.api_key.unwrap_or_default(),
            webhook_endpoint: self.webhook_endpoint.unwrap_or_default(),
            template: self.template.unwrap_or(PayloadTemplate::Legacy),
            properties: self.properties,
        })
    }
}

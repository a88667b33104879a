//! Analytics payload construction.
//!
//! The payload is an ordered, fixed-arity tuple whose field order and count
//! are part of the wire contract with the analytics stream. Two named
//! templates exist; which one is active is a configuration choice matching
//! the schema version of the target stream.

use crate::context::AuthenticationContext;
use crate::error::PublishError;
use serde::Serialize;
use std::str::FromStr;

/// Sentinel substituted for any context field that is unset.
///
/// Downstream schema consumers always receive a well-typed value; an unset
/// field is never rendered as null or the empty string.
pub const NOT_AVAILABLE: &str = "NOT_AVAILABLE";

/// A single attribute in a payload or metadata array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Str(String),
    Bool(bool),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(s) => Some(s),
            AttributeValue::Bool(_) => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Str(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// Which payload shape the target analytics stream expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadTemplate {
    /// Five fields: apiKey, eventType, username, result, serviceProvider.
    #[default]
    Legacy,
    /// Eight fields: apiKey, eventType, username, userStoreDomain,
    /// tenantDomain, serviceProvider, identityProvider, authenticationSuccess.
    Extended,
}

impl FromStr for PayloadTemplate {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "extended" => Ok(Self::Extended),
            _ => Err(PublishError::ConfigInvalid {
                key: crate::config::PAYLOAD_TEMPLATE_PROPERTY.to_string(),
                reason: format!("unknown payload template: {s}"),
            }),
        }
    }
}

/// An ordered analytics payload tuple.
///
/// Constructed fresh per event and never mutated afterwards. Each publish
/// call receives its own clone. Timestamps are not part of the payload; the
/// stream channel stamps them at publish time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Vec<AttributeValue>);

impl Payload {
    /// Build the payload for `context` according to `template`.
    ///
    /// Pure and deterministic: the same context always yields a structurally
    /// identical payload. Never fails; unset fields degrade to
    /// [`NOT_AVAILABLE`].
    pub fn build(template: PayloadTemplate, api_key: &str, context: &AuthenticationContext) -> Self {
        let result = if context.authn_success {
            "SUCCESS"
        } else {
            "FAILURE"
        };

        let values = match template {
            PayloadTemplate::Legacy => vec![
                AttributeValue::from(api_key),
                replace_if_not_available(context.event_type.as_deref()),
                replace_if_not_available(context.username.as_deref()),
                AttributeValue::from(result),
                replace_if_not_available(context.service_provider.as_deref()),
            ],
            PayloadTemplate::Extended => vec![
                AttributeValue::from(api_key),
                replace_if_not_available(context.event_type.as_deref()),
                replace_if_not_available(context.username.as_deref()),
                replace_if_not_available(context.user_store_domain.as_deref()),
                replace_if_not_available(context.tenant_domain.as_deref()),
                replace_if_not_available(context.service_provider.as_deref()),
                replace_if_not_available(context.identity_provider.as_deref()),
                AttributeValue::from(context.authn_success),
            ],
        };

        Self(values)
    }

    /// The ordered attribute values.
    pub fn values(&self) -> &[AttributeValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Replace-if-not-available policy for optional context fields.
fn replace_if_not_available(value: Option<&str>) -> AttributeValue {
    match value {
        Some(v) if !v.is_empty() => AttributeValue::from(v),
        _ => AttributeValue::from(NOT_AVAILABLE),
    }
}

/// The sentinel-substituted string form of an optional context field.
///
/// Shared by the webhook body builder, which renders flat strings rather
/// than payload attributes.
pub(crate) fn field_or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AuthenticationContext;

    fn full_context() -> AuthenticationContext {
        AuthenticationContext::builder()
            .username("alice")
            .user_store_domain("PRIMARY")
            .tenant_domain("carbon.super")
            .service_provider("app1")
            .identity_provider("LOCAL")
            .event_type("AUTHENTICATION_SUCCESS")
            .authn_success(true)
            .build()
    }

    #[test]
    fn test_legacy_template_field_order() {
        let payload = Payload::build(PayloadTemplate::Legacy, "my_api_key", &full_context());

        assert_eq!(
            payload.values(),
            &[
                AttributeValue::from("my_api_key"),
                AttributeValue::from("AUTHENTICATION_SUCCESS"),
                AttributeValue::from("alice"),
                AttributeValue::from("SUCCESS"),
                AttributeValue::from("app1"),
            ]
        );
    }

    #[test]
    fn test_extended_template_field_order() {
        let payload = Payload::build(PayloadTemplate::Extended, "my_api_key", &full_context());

        assert_eq!(
            payload.values(),
            &[
                AttributeValue::from("my_api_key"),
                AttributeValue::from("AUTHENTICATION_SUCCESS"),
                AttributeValue::from("alice"),
                AttributeValue::from("PRIMARY"),
                AttributeValue::from("carbon.super"),
                AttributeValue::from("app1"),
                AttributeValue::from("LOCAL"),
                AttributeValue::from(true),
            ]
        );
    }

    #[test]
    fn test_failure_result_string() {
        let context = AuthenticationContext::builder()
            .username("bob")
            .authn_success(false)
            .build();
        let payload = Payload::build(PayloadTemplate::Legacy, "key", &context);

        assert_eq!(payload.values()[3], AttributeValue::from("FAILURE"));
    }

    #[test]
    fn test_unset_fields_become_placeholder() {
        let context = AuthenticationContext::builder().build();
        let payload = Payload::build(PayloadTemplate::Legacy, "key", &context);

        assert_eq!(payload.values()[1], AttributeValue::from(NOT_AVAILABLE));
        assert_eq!(payload.values()[2], AttributeValue::from(NOT_AVAILABLE));
        assert_eq!(payload.values()[4], AttributeValue::from(NOT_AVAILABLE));
    }

    #[test]
    fn test_empty_string_becomes_placeholder() {
        let context = AuthenticationContext::builder().username("").build();
        let payload = Payload::build(PayloadTemplate::Legacy, "key", &context);

        assert_eq!(payload.values()[2], AttributeValue::from(NOT_AVAILABLE));
    }

    #[test]
    fn test_build_is_idempotent() {
        let context = full_context();
        let first = Payload::build(PayloadTemplate::Extended, "key", &context);
        let second = Payload::build(PayloadTemplate::Extended, "key", &context);

        assert_eq!(first, second);
    }

    #[test]
    fn test_template_arity() {
        let context = full_context();
        assert_eq!(Payload::build(PayloadTemplate::Legacy, "k", &context).len(), 5);
        assert_eq!(Payload::build(PayloadTemplate::Extended, "k", &context).len(), 8);
    }

    #[test]
    fn test_template_from_str() {
        assert_eq!("legacy".parse::<PayloadTemplate>().unwrap(), PayloadTemplate::Legacy);
        assert_eq!(
            "Extended".parse::<PayloadTemplate>().unwrap(),
            PayloadTemplate::Extended
        );
        assert!("v2".parse::<PayloadTemplate>().is_err());
    }

    #[test]
    fn test_attribute_value_serialization() {
        assert_eq!(
            serde_json::to_string(&AttributeValue::from("x")).unwrap(),
            "\"x\""
        );
        assert_eq!(serde_json::to_string(&AttributeValue::from(true)).unwrap(), "true");

        let payload = Payload(vec![AttributeValue::from("a"), AttributeValue::from(false)]);
        assert_eq!(serde_json::to_string(&payload).unwrap(), "[\"a\",false]");
    }
}

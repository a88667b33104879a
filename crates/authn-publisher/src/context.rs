//! Authentication event and context types.
//!
//! These mirror the data the authentication framework attaches to each
//! lifecycle notification. The framework owns the data; the dispatcher only
//! reads it.

use serde_json::Value;
use std::collections::HashMap;

/// Event name raised when a single authentication step succeeds.
pub const AUTHENTICATION_STEP_SUCCESS: &str = "AUTHENTICATION_STEP_SUCCESS";
/// Event name raised when a single authentication step fails.
pub const AUTHENTICATION_STEP_FAILURE: &str = "AUTHENTICATION_STEP_FAILURE";
/// Event name raised when the overall authentication flow succeeds.
pub const AUTHENTICATION_SUCCESS: &str = "AUTHENTICATION_SUCCESS";
/// Event name raised when the overall authentication flow fails.
pub const AUTHENTICATION_FAILURE: &str = "AUTHENTICATION_FAILURE";

/// Session lifecycle names the framework also raises. Recognized but not
/// published by this dispatcher.
pub const SESSION_CREATE: &str = "SESSION_CREATE";
pub const SESSION_UPDATE: &str = "SESSION_UPDATE";
pub const SESSION_TERMINATE: &str = "SESSION_TERMINATE";

/// Parameter key under which the framework lists the tenant domains that
/// should receive the event.
pub const PUBLISHING_TENANT_DOMAINS_PARAM: &str = "publishingTenantDomains";

/// Context attached to an authentication lifecycle notification.
///
/// Every string field may be absent; the payload builder substitutes the
/// [`NOT_AVAILABLE`](crate::payload::NOT_AVAILABLE) sentinel for unset
/// fields.
#[derive(Debug, Clone, Default)]
pub struct AuthenticationContext {
    pub username: Option<String>,
    pub user_store_domain: Option<String>,
    pub tenant_domain: Option<String>,
    /// Service-provider (application) name the user authenticated to.
    pub service_provider: Option<String>,
    pub identity_provider: Option<String>,
    /// Overall authentication result.
    pub authn_success: bool,
    /// Event-type label the framework stamped on the notification.
    pub event_type: Option<String>,
    /// Auxiliary parameters, including the tenant domains to notify.
    pub parameters: HashMap<String, Value>,
}

impl AuthenticationContext {
    /// Create a new context builder.
    #[must_use]
    pub fn builder() -> AuthenticationContextBuilder {
        AuthenticationContextBuilder::default()
    }

    /// Look up an auxiliary parameter by key.
    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }
}

/// Builder for [`AuthenticationContext`].
#[derive(Debug, Default)]
pub struct AuthenticationContextBuilder {
    context: AuthenticationContext,
}

impl AuthenticationContextBuilder {
    pub fn username(mut self, value: impl Into<String>) -> Self {
        self.context.username = Some(value.into());
        self
    }

    pub fn user_store_domain(mut self, value: impl Into<String>) -> Self {
        self.context.user_store_domain = Some(value.into());
        self
    }

    pub fn tenant_domain(mut self, value: impl Into<String>) -> Self {
        self.context.tenant_domain = Some(value.into());
        self
    }

    pub fn service_provider(mut self, value: impl Into<String>) -> Self {
        self.context.service_provider = Some(value.into());
        self
    }

    pub fn identity_provider(mut self, value: impl Into<String>) -> Self {
        self.context.identity_provider = Some(value.into());
        self
    }

    #[must_use]
    pub fn authn_success(mut self, value: bool) -> Self {
        self.context.authn_success = value;
        self
    }

    pub fn event_type(mut self, value: impl Into<String>) -> Self {
        self.context.event_type = Some(value.into());
        self
    }

    pub fn parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.parameters.insert(key.into(), value);
        self
    }

    /// Set the tenant domains that should receive the event.
    pub fn publishing_tenant_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list: Vec<Value> = domains
            .into_iter()
            .map(|d| Value::String(d.into()))
            .collect();
        self.context
            .parameters
            .insert(PUBLISHING_TENANT_DOMAINS_PARAM.to_string(), Value::Array(list));
        self
    }

    #[must_use]
    pub fn build(self) -> AuthenticationContext {
        self.context
    }
}

/// A typed authentication lifecycle notification.
///
/// Immutable once raised; owned by the authentication framework.
#[derive(Debug, Clone)]
pub enum AuthenticationEvent {
    StepSuccess(AuthenticationContext),
    StepFailure(AuthenticationContext),
    AuthnSuccess(AuthenticationContext),
    AuthnFailure(AuthenticationContext),
}

impl AuthenticationEvent {
    /// Classify a host event-name string into a typed event.
    ///
    /// Returns `None` for names outside the authentication enumeration. If
    /// the context carries no event-type label, the name is stamped on it so
    /// payloads always carry the label the event arrived under.
    pub fn from_name(name: &str, mut context: AuthenticationContext) -> Option<Self> {
        if context.event_type.is_none() {
            context.event_type = Some(name.to_string());
        }
        match name {
            AUTHENTICATION_STEP_SUCCESS => Some(Self::StepSuccess(context)),
            AUTHENTICATION_STEP_FAILURE => Some(Self::StepFailure(context)),
            AUTHENTICATION_SUCCESS => Some(Self::AuthnSuccess(context)),
            AUTHENTICATION_FAILURE => Some(Self::AuthnFailure(context)),
            _ => None,
        }
    }

    /// The event name this variant corresponds to.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StepSuccess(_) => AUTHENTICATION_STEP_SUCCESS,
            Self::StepFailure(_) => AUTHENTICATION_STEP_FAILURE,
            Self::AuthnSuccess(_) => AUTHENTICATION_SUCCESS,
            Self::AuthnFailure(_) => AUTHENTICATION_FAILURE,
        }
    }

    /// The context carried by the event.
    pub fn context(&self) -> &AuthenticationContext {
        match self {
            Self::StepSuccess(ctx)
            | Self::StepFailure(ctx)
            | Self::AuthnSuccess(ctx)
            | Self::AuthnFailure(ctx) => ctx,
        }
    }
}

/// Whether `name` is a session lifecycle event this dispatcher deliberately
/// does not publish.
pub fn is_session_event(name: &str) -> bool {
    matches!(name, SESSION_CREATE | SESSION_UPDATE | SESSION_TERMINATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_name_classifies_all_variants() {
        let ctx = AuthenticationContext::default();

        assert!(matches!(
            AuthenticationEvent::from_name(AUTHENTICATION_STEP_SUCCESS, ctx.clone()),
            Some(AuthenticationEvent::StepSuccess(_))
        ));
        assert!(matches!(
            AuthenticationEvent::from_name(AUTHENTICATION_STEP_FAILURE, ctx.clone()),
            Some(AuthenticationEvent::StepFailure(_))
        ));
        assert!(matches!(
            AuthenticationEvent::from_name(AUTHENTICATION_SUCCESS, ctx.clone()),
            Some(AuthenticationEvent::AuthnSuccess(_))
        ));
        assert!(matches!(
            AuthenticationEvent::from_name(AUTHENTICATION_FAILURE, ctx),
            Some(AuthenticationEvent::AuthnFailure(_))
        ));
    }

    #[test]
    fn test_from_name_rejects_unknown_names() {
        let ctx = AuthenticationContext::default();
        assert!(AuthenticationEvent::from_name("PASSWORD_RESET", ctx).is_none());
    }

    #[test]
    fn test_from_name_stamps_event_type() {
        let ctx = AuthenticationContext::default();
        let event = AuthenticationEvent::from_name(AUTHENTICATION_SUCCESS, ctx).unwrap();
        assert_eq!(
            event.context().event_type.as_deref(),
            Some(AUTHENTICATION_SUCCESS)
        );
    }

    #[test]
    fn test_from_name_keeps_existing_event_type() {
        let ctx = AuthenticationContext::builder().event_type("custom-label").build();
        let event = AuthenticationEvent::from_name(AUTHENTICATION_FAILURE, ctx).unwrap();
        assert_eq!(event.context().event_type.as_deref(), Some("custom-label"));
    }

    #[test]
    fn test_event_name_round_trip() {
        let ctx = AuthenticationContext::default();
        let event = AuthenticationEvent::from_name(AUTHENTICATION_STEP_FAILURE, ctx).unwrap();
        assert_eq!(event.name(), AUTHENTICATION_STEP_FAILURE);
    }

    #[test]
    fn test_session_event_names() {
        assert!(is_session_event(SESSION_CREATE));
        assert!(is_session_event(SESSION_UPDATE));
        assert!(is_session_event(SESSION_TERMINATE));
        assert!(!is_session_event(AUTHENTICATION_SUCCESS));
        assert!(!is_session_event("SOMETHING_ELSE"));
    }

    #[test]
    fn test_builder_tenant_domains_parameter() {
        let ctx = AuthenticationContext::builder()
            .publishing_tenant_domains(["t1", "t2"])
            .build();

        assert_eq!(
            ctx.parameter(PUBLISHING_TENANT_DOMAINS_PARAM),
            Some(&json!(["t1", "t2"]))
        );
    }
}

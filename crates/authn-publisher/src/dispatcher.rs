//! The authentication-event dispatcher.
//!
//! Receives lifecycle notifications from the authentication framework,
//! decides whether publishing is enabled, shapes the payload, and fans out to
//! both channels. Publishing is advisory: no failure inside the dispatcher
//! ever reaches the authentication pipeline.

use crate::config::PublisherConfig;
use crate::context::{is_session_event, AuthenticationContext, AuthenticationEvent};
use crate::error::DispatchError;
use crate::payload::Payload;
use crate::stream::{EventStreamSink, StreamChannel};
use crate::tenant::{TenantDomainSet, TenantFlow};
use crate::webhook::WebhookChannel;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, trace};
use uuid::Uuid;

/// Narrow handler capability the host registers through composition.
#[async_trait]
pub trait AuthEventHandler: Send + Sync {
    /// Handle one authentication lifecycle notification.
    async fn handle(&self, event: AuthenticationEvent) -> Result<(), DispatchError>;
}

/// Routes authentication events to the stream and webhook channels.
///
/// Holds no mutable state: concurrent dispatches share the immutable
/// configuration, the sink handle, and the tenant-flow runtime without
/// locking. A dispatch is a direct await chain with no queueing or spawned
/// work; the caller resumes once both channels have finished their attempts.
pub struct EventDispatcher {
    config: Arc<PublisherConfig>,
    stream: StreamChannel,
    webhook: WebhookChannel,
}

impl EventDispatcher {
    /// Create a dispatcher with explicitly injected collaborators.
    pub fn new(
        config: Arc<PublisherConfig>,
        sink: Arc<dyn EventStreamSink>,
        tenant_flow: Arc<dyn TenantFlow>,
    ) -> Self {
        let webhook = WebhookChannel::new(&config.webhook_endpoint, &config.api_key);
        Self {
            config,
            stream: StreamChannel::new(sink, tenant_flow),
            webhook,
        }
    }

    /// String-level entry point for hosts that deliver events by name.
    ///
    /// Unrecognized names are logged at error level and do not abort the
    /// host pipeline. Session lifecycle names are recognized no-ops.
    pub async fn handle_named(
        &self,
        name: &str,
        context: AuthenticationContext,
    ) -> Result<(), DispatchError> {
        match AuthenticationEvent::from_name(name, context) {
            Some(event) => self.handle(event).await,
            None if is_session_event(name) => {
                debug!(event_name = name, "Session events are not published");
                Ok(())
            }
            None => {
                error!(event_name = name, "Unhandled event name");
                Ok(())
            }
        }
    }

    async fn publish(&self, event: &AuthenticationEvent) {
        let dispatch_id = Uuid::new_v4();
        let context = event.context();

        let payload = Payload::build(self.config.template, &self.config.api_key, context);
        let tenants = TenantDomainSet::from_context(context);

        debug!(
            %dispatch_id,
            event_name = event.name(),
            tenant_count = tenants.len(),
            "Dispatching authentication event"
        );

        // Per-tenant failures are logged inside the channel; the loop there
        // continues with the remaining tenants.
        self.stream.publish_per_tenant(&payload, &tenants).await;

        if let Err(e) = self.webhook.publish(context).await {
            error!(
                %dispatch_id,
                event_name = event.name(),
                error = %e,
                "Webhook publish failed"
            );
        }
    }
}

#[async_trait]
impl AuthEventHandler for EventDispatcher {
    /// Dispatch one event to both channels.
    ///
    /// Always returns `Ok(())`: disabled configuration is a silent no-op and
    /// channel failures are logged, never propagated, so the authentication
    /// pipeline is never blocked by publishing.
    async fn handle(&self, event: AuthenticationEvent) -> Result<(), DispatchError> {
        if !self.config.enabled {
            trace!(event_name = event.name(), "Publishing disabled, skipping");
            return Ok(());
        }

        self.publish(&event).await;
        Ok(())
    }
}

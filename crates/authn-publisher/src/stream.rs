//! Structured event-stream channel.
//!
//! Publishes one analytics event per implicated tenant domain to a named,
//! versioned event stream. The sink transport is external and injected
//! behind the [`EventStreamSink`] trait.

use crate::error::PublishError;
use crate::payload::{AttributeValue, Payload};
use crate::tenant::{TenantDomainSet, TenantFlow, TenantFlowScope};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

/// Stream the analytics backend consumes authentication data from.
pub const CUSTOM_AUTH_DATA_STREAM: &str = "org.wso2.is.analytics.stream.CustomAuthData:1.0.0";

/// A structured event as handed to the stream sink.
///
/// The timestamp is stamped at publish time, not at payload-build time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamEvent {
    /// Named, versioned stream identifier.
    pub stream_id: String,
    /// Wall-clock epoch milliseconds at publish time.
    pub timestamp: i64,
    /// Tenant-specific metadata, distinct from the payload.
    pub metadata: Vec<AttributeValue>,
    /// Correlation attributes. Always absent for this stream.
    pub correlation: Option<Vec<AttributeValue>>,
    /// The ordered payload tuple.
    pub payload: Payload,
}

impl StreamEvent {
    /// Assemble an event for one tenant domain, stamped with the current
    /// wall-clock time. The payload is cloned so each publish call owns its
    /// own instance.
    pub fn for_tenant(payload: &Payload, tenant_domain: &str) -> Self {
        Self {
            stream_id: CUSTOM_AUTH_DATA_STREAM.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            metadata: vec![AttributeValue::from(tenant_domain)],
            correlation: None,
            payload: payload.clone(),
        }
    }
}

/// Seam to the external event-stream transport.
///
/// Implementations must be safe for concurrent use; the dispatcher shares one
/// sink handle across all dispatches without locking.
#[async_trait]
pub trait EventStreamSink: Send + Sync {
    /// Publish a single event to its stream.
    async fn publish(&self, event: StreamEvent) -> Result<(), PublishError>;
}

/// Per-tenant fan-out over the stream sink.
pub struct StreamChannel {
    sink: Arc<dyn EventStreamSink>,
    tenant_flow: Arc<dyn TenantFlow>,
}

impl StreamChannel {
    pub fn new(sink: Arc<dyn EventStreamSink>, tenant_flow: Arc<dyn TenantFlow>) -> Self {
        Self { sink, tenant_flow }
    }

    /// Publish `payload` once per tenant domain, in set order.
    ///
    /// Each iteration runs under a scoped tenant flow; the scope is released
    /// on every exit path. A failed publish is logged and the loop continues
    /// with the next tenant, so one tenant's failure never blocks the others.
    pub async fn publish_per_tenant(&self, payload: &Payload, tenants: &TenantDomainSet) {
        for tenant_domain in tenants.iter() {
            let _scope = TenantFlowScope::enter(self.tenant_flow.as_ref(), tenant_domain);

            let event = StreamEvent::for_tenant(payload, tenant_domain);
            debug!(
                stream_id = CUSTOM_AUTH_DATA_STREAM,
                tenant_domain, "Publishing stream event"
            );

            if let Err(e) = self.sink.publish(event).await {
                error!(
                    stream_id = CUSTOM_AUTH_DATA_STREAM,
                    tenant_domain,
                    error = %e,
                    "Stream publish failed"
                );
            }
        }
    }
}

//! # authn-publisher
//!
//! Multi-tenant authentication-event publishing dispatcher.
//!
//! Receives lifecycle notifications from an authentication pipeline (step
//! success/failure, overall success/failure), converts each into a normalized
//! analytics payload, and fans it out to external sinks on behalf of every
//! tenant domain implicated by the event.
//!
//! ## Channels
//!
//! - **Stream channel**: a structured [`StreamEvent`] published to an
//!   injected [`EventStreamSink`], once per tenant domain, each under a
//!   scoped tenant flow.
//! - **Webhook channel**: a single JSON HTTP POST per dispatch, tenant
//!   agnostic.
//!
//! Publishing is best-effort and advisory: every internal failure is logged
//! and swallowed, so the authentication pipeline that raised the event is
//! never blocked or aborted by a publishing fault.
//!
//! ## Example
//!
//! ```rust,ignore
//! use authn_publisher::{
//!     AuthEventHandler, AuthenticationContext, EventDispatcher, PublisherConfig,
//! };
//! use std::sync::Arc;
//!
//! let config = PublisherConfig::from_properties(host_properties)?;
//! let dispatcher = EventDispatcher::new(Arc::new(config), sink, tenant_flow);
//!
//! // Registered with the host runtime; invoked per lifecycle notification.
//! dispatcher
//!     .handle_named("AUTHENTICATION_SUCCESS", context)
//!     .await?;
//! ```

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod payload;
pub mod stream;
pub mod tenant;
pub mod webhook;

// Re-exports for convenience
pub use config::{PublisherConfig, PublisherConfigBuilder};
pub use context::{AuthenticationContext, AuthenticationContextBuilder, AuthenticationEvent};
pub use dispatcher::{AuthEventHandler, EventDispatcher};
pub use error::{DispatchError, PublishError};
pub use payload::{AttributeValue, Payload, PayloadTemplate, NOT_AVAILABLE};
pub use stream::{EventStreamSink, StreamChannel, StreamEvent, CUSTOM_AUTH_DATA_STREAM};
pub use tenant::{TenantDomainSet, TenantFlow, TenantFlowScope};
pub use webhook::WebhookChannel;

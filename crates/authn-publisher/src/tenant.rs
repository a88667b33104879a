//! Tenant-domain resolution and tenant-flow scoping.
//!
//! The tenant-context runtime itself is external; this module defines the
//! seam ([`TenantFlow`]) and the scoped guard that keeps enter/exit pairing
//! structural instead of convention-based.

use crate::context::{AuthenticationContext, PUBLISHING_TENANT_DOMAINS_PARAM};
use serde_json::Value;

/// Ordered set of tenant domains implicated by an event.
///
/// Order is preserved from the context parameter; the stream channel
/// publishes per tenant in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantDomainSet(Vec<String>);

impl TenantDomainSet {
    /// Resolve the tenant domains from the context's parameter map.
    ///
    /// Reads the `publishingTenantDomains` parameter as a JSON array of
    /// strings. Absent, empty, or malformed values yield an empty set;
    /// non-string entries are skipped. Domain identifiers are not validated
    /// here; that is the tenant-context runtime's responsibility.
    pub fn from_context(context: &AuthenticationContext) -> Self {
        let domains = match context.parameter(PUBLISHING_TENANT_DOMAINS_PARAM) {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        };
        Self(domains)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for TenantDomainSet {
    fn from(domains: Vec<String>) -> Self {
        Self(domains)
    }
}

/// Seam to the external tenant-context runtime.
///
/// Entering a tenant flow affects only the current execution; implementations
/// must tolerate interleaved enter/exit pairs from concurrent dispatches.
pub trait TenantFlow: Send + Sync {
    /// Switch the current execution into `tenant_domain`.
    fn enter(&self, tenant_domain: &str);

    /// Restore the previous execution context.
    fn exit(&self, tenant_domain: &str);
}

/// Scoped tenant-flow acquisition.
///
/// Entering returns a guard; the matching exit runs on drop, on every path:
/// success, logged publish failure, or unexpected fault.
pub struct TenantFlowScope<'a> {
    flow: &'a dyn TenantFlow,
    tenant_domain: &'a str,
}

impl<'a> TenantFlowScope<'a> {
    /// Enter `tenant_domain` on the given runtime.
    pub fn enter(flow: &'a dyn TenantFlow, tenant_domain: &'a str) -> Self {
        flow.enter(tenant_domain);
        Self {
            flow,
            tenant_domain,
        }
    }
}

impl Drop for TenantFlowScope<'_> {
    fn drop(&mut self) {
        self.flow.exit(self.tenant_domain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingFlow {
        calls: Mutex<Vec<String>>,
    }

    impl TenantFlow for RecordingFlow {
        fn enter(&self, tenant_domain: &str) {
            self.calls.lock().unwrap().push(format!("enter:{tenant_domain}"));
        }

        fn exit(&self, tenant_domain: &str) {
            self.calls.lock().unwrap().push(format!("exit:{tenant_domain}"));
        }
    }

    #[test]
    fn test_resolve_ordered_domains() {
        let ctx = AuthenticationContext::builder()
            .publishing_tenant_domains(["t1", "t2", "t3"])
            .build();

        let set = TenantDomainSet::from_context(&ctx);
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_resolve_absent_parameter_is_empty() {
        let ctx = AuthenticationContext::default();
        assert!(TenantDomainSet::from_context(&ctx).is_empty());
    }

    #[test]
    fn test_resolve_empty_array_is_empty() {
        let ctx = AuthenticationContext::builder()
            .parameter(PUBLISHING_TENANT_DOMAINS_PARAM, json!([]))
            .build();
        assert!(TenantDomainSet::from_context(&ctx).is_empty());
    }

    #[test]
    fn test_resolve_non_array_is_empty() {
        let ctx = AuthenticationContext::builder()
            .parameter(PUBLISHING_TENANT_DOMAINS_PARAM, json!("t1"))
            .build();
        assert!(TenantDomainSet::from_context(&ctx).is_empty());
    }

    #[test]
    fn test_resolve_skips_non_string_entries() {
        let ctx = AuthenticationContext::builder()
            .parameter(PUBLISHING_TENANT_DOMAINS_PARAM, json!(["t1", 7, "t2"]))
            .build();

        let set = TenantDomainSet::from_context(&ctx);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["t1", "t2"]);
    }

    #[test]
    fn test_scope_pairs_enter_and_exit() {
        let flow = RecordingFlow::default();
        {
            let _scope = TenantFlowScope::enter(&flow, "t1");
            assert_eq!(*flow.calls.lock().unwrap(), vec!["enter:t1"]);
        }
        assert_eq!(*flow.calls.lock().unwrap(), vec!["enter:t1", "exit:t1"]);
    }

    #[test]
    fn test_scope_exits_on_panic() {
        let flow = RecordingFlow::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = TenantFlowScope::enter(&flow, "t1");
            panic!("publish blew up");
        }));

        assert!(result.is_err());
        assert_eq!(*flow.calls.lock().unwrap(), vec!["enter:t1", "exit:t1"]);
    }
}

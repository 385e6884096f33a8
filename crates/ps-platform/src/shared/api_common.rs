//! Helpers shared by the HTTP routers

use axum::http::HeaderMap;
use serde::Deserialize;
use uuid::Uuid;

use crate::usecase::ExecutionContext;

pub const PRINCIPAL_HEADER: &str = "x-principal-id";
pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// Principal recorded on events when the caller does not identify itself
pub const SYSTEM_PRINCIPAL: &str = "system";

/// `?tenantId=` query parameter
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantQuery {
    pub tenant_id: Uuid,
}

/// Build the execution context for a request from its headers.
///
/// Authentication happens upstream; the gateway forwards the principal id.
pub fn execution_context(headers: &HeaderMap) -> ExecutionContext {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    };

    let principal_id = header(PRINCIPAL_HEADER).unwrap_or_else(|| SYSTEM_PRINCIPAL.to_string());
    match header(CORRELATION_HEADER) {
        Some(correlation_id) => ExecutionContext::with_correlation(principal_id, correlation_id),
        None => ExecutionContext::create(principal_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_context_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(PRINCIPAL_HEADER, HeaderValue::from_static("admin-7"));
        headers.insert(CORRELATION_HEADER, HeaderValue::from_static("corr-1"));

        let ctx = execution_context(&headers);
        assert_eq!(ctx.principal_id, "admin-7");
        assert_eq!(ctx.correlation_id, "corr-1");
    }

    #[test]
    fn test_context_defaults_to_system() {
        let ctx = execution_context(&HeaderMap::new());
        assert_eq!(ctx.principal_id, SYSTEM_PRINCIPAL);
        assert_eq!(ctx.correlation_id, ctx.execution_id);
    }
}

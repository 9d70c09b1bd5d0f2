//! Request Context
//!
//! Carried from the transport into every control operation.

use std::time::Instant;

use uuid::Uuid;

/// Per-request metadata for tracing
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request ID for tracing
    pub request_id: Uuid,

    /// Request path as seen by the transport, empty for direct calls
    pub path: String,

    started_at: Instant,
}

impl RequestContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            path: path.into(),
            started_at: Instant::now(),
        }
    }

    /// Context for calls that do not come through the transport
    pub fn detached() -> Self {
        Self::new("")
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::detached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_request_ids() {
        let a = RequestContext::new("/users/get");
        let b = RequestContext::new("/users/get");
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.path, "/users/get");
        assert!(RequestContext::detached().path.is_empty());
    }
}

//! Handler Adapter
//!
//! Per-request state machine, terminal on the first failure:
//!
//! 1. Match the path against the compiled pattern, else transport 404.
//! 2. Decode the body, else a failure envelope without touching the store.
//! 3. Invoke the bound control operation.
//! 4. Encode the envelope. Status is always 200; `OK` carries the outcome.

use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use regex::Regex;

use crate::control::{Control, ControlError, Envelope, Operation, RequestContext};
use crate::record::Codec;

/// Construction-time switches for an adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct AdapterOptions {
    /// Log decoded templates and outgoing envelopes at info level
    pub verbose: bool,
}

/// Raw transport response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl AdapterResponse {
    fn delivered(body: Vec<u8>) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: b"404 page not found".to_vec(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }
}

impl IntoResponse for AdapterResponse {
    fn into_response(self) -> Response {
        let content_type = if self.status == StatusCode::OK {
            "application/json"
        } else {
            "text/plain; charset=utf-8"
        };
        (self.status, [(header::CONTENT_TYPE, content_type)], self.body).into_response()
    }
}

/// Binds one control operation to a path pattern
pub struct HandlerAdapter {
    pattern: Regex,
    operation: Operation,
    control: Arc<Control>,
    options: AdapterOptions,
}

impl HandlerAdapter {
    /// Create an adapter for an arbitrary path regex
    pub fn new(
        pattern: &str,
        operation: Operation,
        control: Arc<Control>,
        options: AdapterOptions,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            operation,
            control,
            options,
        })
    }

    /// Create an adapter matching exactly `path`, with an optional trailing slash
    pub fn for_path(
        path: &str,
        operation: Operation,
        control: Arc<Control>,
        options: AdapterOptions,
    ) -> Result<Self, regex::Error> {
        let pattern = format!("^{}/?$", regex::escape(path.trim_end_matches('/')));
        Self::new(&pattern, operation, control, options)
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }

    /// Run one request through the adapter
    pub async fn handle(&self, path: &str, body: &[u8]) -> AdapterResponse {
        if !self.matches(path) {
            tracing::debug!(path, pattern = self.pattern(), "path does not match route");
            return AdapterResponse::not_found();
        }

        let ctx = RequestContext::new(path);
        let envelope = match Codec::decode(body) {
            Ok(template) => {
                if self.options.verbose {
                    tracing::info!(
                        request_id = %ctx.request_id,
                        operation = %self.operation,
                        template = ?template,
                        "request decoded"
                    );
                }
                let result = self.control.invoke(self.operation, &ctx, Some(template)).await;
                if let Err(err) = &result {
                    log_failure(&ctx, self.operation, err);
                }
                Envelope::from_result(result)
            }
            Err(err) => {
                let err = ControlError::from(err);
                log_failure(&ctx, self.operation, &err);
                Envelope::failure(&err)
            }
        };

        let body = Codec::encode(&envelope);
        if self.options.verbose {
            let elapsed_ms = ctx.elapsed_ms();
            tracing::info!(
                request_id = %ctx.request_id,
                elapsed_ms = %elapsed_ms,
                response = %String::from_utf8_lossy(&body),
                "response encoded"
            );
        }
        AdapterResponse::delivered(body)
    }
}

fn log_failure(ctx: &RequestContext, operation: Operation, err: &ControlError) {
    if err.is_store_failure() {
        tracing::error!(request_id = %ctx.request_id, %operation, error = %err, "store failure");
    } else {
        tracing::warn!(
            request_id = %ctx.request_id,
            %operation,
            code = err.code(),
            error = %err,
            "request failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, RecordStore};

    fn adapter(operation: Operation) -> (HandlerAdapter, Arc<Control>) {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        let control = Arc::new(Control::new(store));
        let adapter = HandlerAdapter::for_path(
            "/users/get",
            operation,
            control.clone(),
            AdapterOptions::default(),
        )
        .unwrap();
        (adapter, control)
    }

    fn envelope(resp: &AdapterResponse) -> Envelope {
        serde_json::from_slice(&resp.body).unwrap()
    }

    #[test]
    fn test_for_path_pattern() {
        let (adapter, _) = adapter(Operation::Get);
        assert!(adapter.matches("/users/get"));
        assert!(adapter.matches("/users/get/"));
        assert!(!adapter.matches("/users/get/extra"));
        assert!(!adapter.matches("/users/getter"));
        assert!(!adapter.matches("/other"));
    }

    #[tokio::test]
    async fn test_mismatch_is_transport_not_found() {
        let (adapter, _) = adapter(Operation::Get);
        let resp = adapter.handle("/nowhere", b"{}").await;
        assert!(resp.is_not_found());
    }

    #[tokio::test]
    async fn test_decode_failure_never_reaches_store() {
        let (adapter, control) = adapter(Operation::Create);

        let resp = adapter.handle("/users/get", b"{not json").await;
        assert_eq!(resp.status, StatusCode::OK);

        let env = envelope(&resp);
        assert!(!env.ok);
        assert_eq!(env.code.as_deref(), Some("USER_DECODE_ERROR"));
        assert_eq!(control.store().len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_control_failure_is_enveloped() {
        let (adapter, _) = adapter(Operation::Get);

        let resp = adapter.handle("/users/get", b"{\"name\":\"fry\"}").await;
        assert_eq!(resp.status, StatusCode::OK);

        let env = envelope(&resp);
        assert!(!env.ok);
        assert_eq!(env.code.as_deref(), Some("USER_NOT_FOUND"));
        assert!(env.users.is_none());
    }

    #[tokio::test]
    async fn test_success_round_trip() {
        let (adapter, control) = adapter(Operation::Get);
        control
            .create(
                &RequestContext::detached(),
                Some(crate::record::Record::named("bender")),
            )
            .await
            .unwrap();

        let resp = adapter.handle("/users/get", b"{\"name\":\"bender\"}").await;
        let env = envelope(&resp);
        assert!(env.ok);
        assert_eq!(env.users.unwrap()[0].name, "bender");
    }
}

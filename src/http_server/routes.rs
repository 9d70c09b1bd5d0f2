//! Route table
//!
//! Binds each control operation to a configured path and dispatches
//! requests to the first adapter whose pattern matches.

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::Uri;
use serde::{Deserialize, Serialize};

use super::adapter::{AdapterOptions, AdapterResponse, HandlerAdapter};
use crate::control::{Control, Operation};

/// Paths for each operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub create: String,
    pub get: String,
    pub delete: String,
    pub delete_many: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            create: "/users/create".to_string(),
            get: "/users/get".to_string(),
            delete: "/users/delete".to_string(),
            delete_many: "/users/delete-many".to_string(),
        }
    }
}

impl RouteConfig {
    pub fn path(&self, op: Operation) -> &str {
        match op {
            Operation::Create => &self.create,
            Operation::Get => &self.get,
            Operation::Delete => &self.delete,
            Operation::DeleteMany => &self.delete_many,
        }
    }

    /// Paths must be absolute, distinct and must not shadow `/health`
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for op in Operation::ALL {
            let path = self.path(op).trim_end_matches('/');
            if !self.path(op).starts_with('/') || path.is_empty() {
                return Err(format!("route for {} must be an absolute path", op));
            }
            if path == "/health" {
                return Err(format!("route for {} collides with /health", op));
            }
            if !seen.insert(path) {
                return Err(format!("route {} is bound to more than one operation", path));
            }
        }
        Ok(())
    }
}

/// All adapters served by one server
pub struct RouteTable {
    control: Arc<Control>,
    adapters: Vec<HandlerAdapter>,
}

impl RouteTable {
    pub fn new(
        control: Arc<Control>,
        config: &RouteConfig,
        options: AdapterOptions,
    ) -> Result<Self, regex::Error> {
        let adapters = Operation::ALL
            .into_iter()
            .map(|op| HandlerAdapter::for_path(config.path(op), op, control.clone(), options))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { control, adapters })
    }

    pub fn control(&self) -> &Arc<Control> {
        &self.control
    }

    pub fn adapters(&self) -> &[HandlerAdapter] {
        &self.adapters
    }

    /// Adapter responsible for `path`
    pub fn route(&self, path: &str) -> Option<&HandlerAdapter> {
        self.adapters.iter().find(|a| a.matches(path))
    }

    pub async fn dispatch(&self, path: &str, body: &[u8]) -> AdapterResponse {
        match self.route(path) {
            Some(adapter) => adapter.handle(path, body).await,
            None => {
                tracing::debug!(path, "no route");
                AdapterResponse::not_found()
            }
        }
    }
}

/// Fallback handler feeding every non-health request through the table
pub async fn dispatch_handler(
    State(routes): State<Arc<RouteTable>>,
    uri: Uri,
    body: Bytes,
) -> AdapterResponse {
    routes.dispatch(uri.path(), &body).await
}

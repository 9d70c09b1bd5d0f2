//! # HTTP Server Module
//!
//! Exposes control operations over HTTP. Each route is a [`HandlerAdapter`]
//! that matches the request path, decodes the body into a record template,
//! runs one control operation and writes the resulting envelope.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/users/create` - Create a user
//! - `/users/get` - Fetch users matching a template
//! - `/users/delete` - Delete the newest user matching a template
//! - `/users/delete-many` - Delete every user matching a template
//!
//! Route paths are configurable through [`RouteConfig`].

pub mod adapter;
pub mod config;
pub mod observability_routes;
pub mod routes;
pub mod server;

pub use adapter::{AdapterOptions, AdapterResponse, HandlerAdapter};
pub use config::HttpServerConfig;
pub use routes::{RouteConfig, RouteTable};
pub use server::HttpServer;

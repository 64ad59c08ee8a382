//! HTTP API for the HR backend: configuration, shared state, auth, RBAC
//! extractors, handlers, and the route tree.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

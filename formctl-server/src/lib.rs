//! formctl-server: persistence and HTTP API for dynamic forms
//!
//! - [`db`]: pooled SQLite access through a named-parameter gateway, the form
//!   repository and a transactional unit of work
//! - [`models`]: validated request shapes
//! - [`http`]: axum routes under `/api/formapi`

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, FormRepo, UnitOfWork};
pub use http::{run_server, ApiError, ServerConfig};

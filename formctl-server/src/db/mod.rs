//! Database layer - pool, gateway, repositories, unit of work
//!
//! # Design Principles
//!
//! - One pooled connection per logical operation, released on drop
//! - Parameters are always bound, never spliced into statement text
//! - Insert-only writes; multi-statement writes go through a `UnitOfWork`

pub mod error;
pub mod gateway;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod statement;
pub mod unit_of_work;

pub use error::DbError;
pub use gateway::DbSession;
pub use pool::{create_pool, create_pool_with_options, open};
pub use repos::FormRepo;
pub use statement::{Params, SqlValue};
pub use unit_of_work::{TxState, UnitOfWork};

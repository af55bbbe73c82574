//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows a `DbSession`, so it runs inside whatever transaction the
//!   session holds
//! - Owns its SQL text; every value is a named, bound parameter
//! - Absent rows are `None`, not errors

pub mod forms;

pub use forms::FormRepo;

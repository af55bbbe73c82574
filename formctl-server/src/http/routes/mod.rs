//! Route handlers organized by resource

pub mod forms;
pub mod health;

//! formctl-core: the dynamic form schema
//!
//! A form is a titled, ordered list of option-set fields. This crate holds
//! the in-memory shape only; persistence and the HTTP surface live in
//! `formctl-server`.

pub mod config;
pub mod error;
pub mod options;
pub mod schema;

pub use config::FormctlConfig;
pub use error::{FormError, Result};
pub use options::{OptionSet, OPTION_DELIMITER};
pub use schema::{Field, FieldId, Form, FormId};

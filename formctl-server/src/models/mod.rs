//! Request models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod label;
pub mod submission;
pub mod title;
pub mod validation;

pub use label::FieldLabel;
pub use submission::{FieldSubmission, FormSubmission};
pub use title::FormTitle;
pub use validation::ValidationError;

//! Shared building blocks for the todo workspace.
//!
//! - [`Eff`]: a lazily-run asynchronous computation producing a `Result`
//! - [`Validator`] and [`FieldError`]: accumulate every field failure instead
//!   of stopping at the first one

pub mod eff;
pub mod validation;

pub use eff::Eff;
pub use validation::{FieldError, Validator};

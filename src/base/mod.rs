//! Foundation types for the tg model.
//!
//! This module provides the pieces every other layer leans on:
//! - [`ModelError`] - Decode/encode failures at the wire boundary
//! - [`sanitize_key`] - Type-expression to identifier normalization
//!
//! This module has NO dependencies on other tgmodel modules.

mod error;
mod sanitize;

pub use error::{ModelError, Result};
pub use sanitize::sanitize_key;

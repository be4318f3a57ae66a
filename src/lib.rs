//! # tg-model
//!
//! Runtime description of analyzed source types plus the `@tg` annotation
//! language attached to their comments.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! plugin      → Request decoding, synthetic ctx/err fields
//!   ↓
//! model       → Package / Service / Method / Type, flattened envelope codec
//!   ↓
//! annotation  → `// @tg key=value` scanning, Tags and typed readers
//!   ↓
//! base        → Errors, key sanitization
//! ```
//!
//! Data flows one way: comment text → [`Tags`] → attached to model entities
//! → encoded package → external generation step.

/// Foundation: errors and key sanitization
pub mod base;

/// Annotation engine: directive scanning and typed access
pub mod annotation;

/// Type model and its wire envelope
pub mod model;

/// Plugin request boundary
pub mod plugin;

pub use annotation::{DirectiveSyntax, Tags, parse_comment, parse_lines};
pub use base::{ModelError, Result, sanitize_key};
pub use model::{
    FieldInfo, FieldTypeInfo, MethodInfo, PackageInfo, ServiceInfo, TypeDescriptor, TypeDetail,
    TypeFlags, TypeInfo, decode_package, encode_package,
};

//! Plugin boundary — what a generation plugin receives.
//!
//! The transport that delivers requests is not part of this crate. This
//! module only turns request bytes into [`PluginOptions`] and a ready-to-use
//! [`PackageInfo`](crate::model::PackageInfo).

mod augment;
mod request;

pub use augment::{CONTEXT_KIND, CONTEXT_PARAM, CONTEXT_PKG, ERROR_KIND, ERROR_RETURN, augment};
pub use request::{Description, PluginOptions, PluginRequest, decode_request};

//! Synthetic `ctx` / `err` signature fields.

use crate::model::{FieldInfo, PackageInfo, TypeInfo};

/// Name of the injected leading parameter.
pub const CONTEXT_PARAM: &str = "ctx";
/// Kind of the injected leading parameter.
pub const CONTEXT_KIND: &str = "context.Context";
/// Package that declares [`CONTEXT_KIND`].
pub const CONTEXT_PKG: &str = "context";
/// Name of the injected trailing return.
pub const ERROR_RETURN: &str = "err";
/// Kind of the injected trailing return.
pub const ERROR_KIND: &str = "error";

/// Give every method a leading `ctx context.Context` parameter and a
/// trailing `err error` return, and register `context.Context` as a type.
///
/// Not idempotent: a second call adds a second pair of synthetic fields.
pub fn augment(package: &mut PackageInfo) {
    let mut augmented = 0usize;
    for service in &mut package.services {
        for method in &mut service.methods {
            method
                .parameters
                .insert(0, FieldInfo::new(CONTEXT_PARAM, CONTEXT_KIND));
            method.returns.push(FieldInfo::scalar(ERROR_RETURN, ERROR_KIND));
            augmented += 1;
        }
    }

    if augmented > 0 {
        package.register_type(TypeInfo::scalar(CONTEXT_KIND, CONTEXT_PKG));
    }
    tracing::debug!(methods = augmented, "injected synthetic ctx/err fields");
}

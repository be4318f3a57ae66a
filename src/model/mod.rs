//! Type model — the structural description of analyzed declarations.
//!
//! ## Entity hierarchy
//!
//! ```text
//! PackageInfo
//!   ├─ imports:  alias → path
//!   ├─ services: [ServiceInfo] ─ methods: [MethodInfo] ─ parameters/returns: [FieldInfo]
//!   ├─ types:    name → TypeInfo ─ detail: TypeDetail (one variant)
//!   └─ annotations: Tags
//! ```
//!
//! Cross references between types are by name only, so the model holds no
//! cycles even when the described type graph does.

mod descriptor;
mod detail;
mod package;
mod type_info;

pub use descriptor::{FieldTypeInfo, TypeDescriptor, TypeFlags};
pub use detail::{TypeDetail, kind};
pub use package::{FieldInfo, MethodInfo, PackageInfo, ServiceInfo};
pub use type_info::TypeInfo;

use serde::{Deserialize, Deserializer};

use crate::base::{ModelError, Result};

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Decode `null` as the field's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a package description produced by the analyzer.
pub fn decode_package(bytes: &[u8]) -> Result<PackageInfo> {
    let package: PackageInfo = serde_json::from_slice(bytes).map_err(ModelError::Decode)?;
    tracing::debug!(
        services = package.services.len(),
        types = package.types.len(),
        "decoded package description"
    );
    Ok(package)
}

/// Encode a package description for the generation step.
pub fn encode_package(package: &PackageInfo) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec(package).map_err(ModelError::Encode)?;
    tracing::debug!(
        services = package.services.len(),
        types = package.types.len(),
        bytes = bytes.len(),
        "encoded package description"
    );
    Ok(bytes)
}

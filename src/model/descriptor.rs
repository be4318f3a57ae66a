//! Lightweight type references used inside nested payloads.

use serde::{Deserialize, Serialize};

use super::{is_false, null_as_default};

/// Flags shared by every shape that refers to a type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeFlags {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub inline: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_pointer: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_alias: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_embedded: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_scalar: bool,
}

impl TypeFlags {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A reference to a type by kind name plus flags.
///
/// Never carries nested detail: the referenced type's full shape lives in the
/// package's type map under its name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDescriptor {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(flatten)]
    pub flags: TypeFlags,
}

impl TypeDescriptor {
    /// A plain reference to `kind`.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            flags: TypeFlags::default(),
        }
    }

    /// A scalar reference (`int`, `string`, `error`, ...).
    pub fn scalar(kind: impl Into<String>) -> Self {
        let mut descriptor = Self::new(kind);
        descriptor.flags.is_scalar = true;
        descriptor
    }

    /// Mark the reference as a pointer.
    pub fn pointer(mut self) -> Self {
        self.flags.is_pointer = true;
        self
    }

    /// True for the default descriptor, which the envelope omits.
    pub fn is_zero(&self) -> bool {
        self.kind.is_empty() && self.flags.is_empty()
    }
}

/// A struct field inside a struct type's detail.
///
/// The field's type is referenced by kind name, like [`TypeDescriptor`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTypeInfo {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(flatten)]
    pub ty: TypeDescriptor,
}

impl FieldTypeInfo {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

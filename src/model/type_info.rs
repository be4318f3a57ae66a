//! Type entities and the flattened wire envelope.
//!
//! A [`TypeInfo`] encodes as one object: the common fields, then `kind` and
//! the active variant's payload hoisted to the top level.
//!
//! ```text
//! {"name": "UserList", "kind": "slice", "elementType": {"kind": "User"}}
//! ```
//!
//! The union itself is never written as a nested object, and payload keys of
//! other variants never appear.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::annotation::Tags;

use super::descriptor::{FieldTypeInfo, TypeDescriptor, TypeFlags};
use super::null_as_default;
use super::detail::{TypeDetail, kind};
use super::package::MethodInfo;

/// A named type known to the package.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: String,
    /// `None` for placeholders that are only known by name so far.
    pub detail: Option<TypeDetail>,
    pub flags: TypeFlags,
    pub annotations: Tags,
    /// Import path of the declaring package, when not the local one.
    pub pkg: String,
}

impl TypeInfo {
    /// A type with the given shape.
    pub fn new(name: impl Into<String>, detail: TypeDetail) -> Self {
        Self {
            name: name.into(),
            detail: Some(detail),
            ..Self::default()
        }
    }

    /// A detail-less scalar placeholder from package `pkg`.
    pub fn scalar(name: impl Into<String>, pkg: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: TypeFlags {
                is_scalar: true,
                ..TypeFlags::default()
            },
            pkg: pkg.into(),
            ..Self::default()
        }
    }

    pub fn with_annotations(mut self, annotations: Tags) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The active variant's discriminator, if any.
    pub fn kind(&self) -> Option<&str> {
        self.detail.as_ref().map(TypeDetail::kind)
    }

    /// A descriptor referring to this type by name.
    pub fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor {
            kind: self.name.clone(),
            flags: self.flags,
        }
    }
}

impl Serialize for TypeInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if !self.name.is_empty() {
            map.serialize_entry("name", &self.name)?;
        }
        flag_entry(&mut map, "inline", self.flags.inline)?;
        flag_entry(&mut map, "isPointer", self.flags.is_pointer)?;
        flag_entry(&mut map, "isAlias", self.flags.is_alias)?;
        flag_entry(&mut map, "isEmbedded", self.flags.is_embedded)?;
        flag_entry(&mut map, "isScalar", self.flags.is_scalar)?;
        if !self.annotations.is_empty() {
            map.serialize_entry("annotations", &self.annotations)?;
        }
        if !self.pkg.is_empty() {
            map.serialize_entry("pkg", &self.pkg)?;
        }
        if let Some(detail) = &self.detail {
            detail.serialize_payload(&mut map)?;
        }
        map.end()
    }
}

fn flag_entry<M: SerializeMap>(map: &mut M, key: &'static str, set: bool) -> Result<(), M::Error> {
    if set {
        map.serialize_entry(key, &true)?;
    }
    Ok(())
}

/// Every key any variant may carry, all optional and `null`-tolerant.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    inline: bool,
    #[serde(deserialize_with = "null_as_default")]
    is_pointer: bool,
    #[serde(deserialize_with = "null_as_default")]
    is_alias: bool,
    #[serde(deserialize_with = "null_as_default")]
    is_embedded: bool,
    #[serde(deserialize_with = "null_as_default")]
    is_scalar: bool,
    annotations: Tags,
    #[serde(deserialize_with = "null_as_default")]
    pkg: String,
    #[serde(deserialize_with = "null_as_default")]
    kind: String,
    key_type: Option<TypeDescriptor>,
    value_type: Option<TypeDescriptor>,
    element_type: Option<TypeDescriptor>,
    length: Option<u64>,
    fields: Option<Vec<FieldTypeInfo>>,
    methods: Option<Vec<MethodInfo>>,
    parameters: Option<Vec<TypeDescriptor>>,
    returns: Option<Vec<TypeDescriptor>>,
}

impl RawEnvelope {
    /// Payload keys present in the input.
    fn present_payload_keys(&self) -> Vec<&'static str> {
        [
            ("keyType", self.key_type.is_some()),
            ("valueType", self.value_type.is_some()),
            ("elementType", self.element_type.is_some()),
            ("length", self.length.is_some()),
            ("fields", self.fields.is_some()),
            ("methods", self.methods.is_some()),
            ("parameters", self.parameters.is_some()),
            ("returns", self.returns.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, present)| present.then_some(key))
        .collect()
    }

    fn take_detail(&mut self) -> Option<TypeDetail> {
        let detail = match self.kind.as_str() {
            "" => return None,
            kind::MAP => TypeDetail::Map {
                key_type: self.key_type.take().unwrap_or_default(),
                value_type: self.value_type.take().unwrap_or_default(),
            },
            kind::SLICE => TypeDetail::Slice {
                element_type: self.element_type.take().unwrap_or_default(),
            },
            kind::ARRAY => TypeDetail::Array {
                element_type: self.element_type.take().unwrap_or_default(),
                length: self.length.take().unwrap_or_default(),
            },
            kind::CHAN | kind::CHANNEL_ALIAS => TypeDetail::Channel {
                value_type: self.value_type.take().unwrap_or_default(),
            },
            kind::STRUCT => TypeDetail::Struct {
                fields: self.fields.take().unwrap_or_default(),
            },
            kind::INTERFACE => TypeDetail::Interface {
                methods: self.methods.take().unwrap_or_default(),
            },
            kind::FUNC | kind::FUNCTION_ALIAS => TypeDetail::Function {
                parameters: self.parameters.take().unwrap_or_default(),
                returns: self.returns.take().unwrap_or_default(),
            },
            other => TypeDetail::Basic {
                kind: other.to_owned(),
            },
        };
        Some(detail)
    }
}

impl From<RawEnvelope> for TypeInfo {
    fn from(mut raw: RawEnvelope) -> Self {
        let detail = raw.take_detail();

        let stray = raw.present_payload_keys();
        if !stray.is_empty() {
            tracing::warn!(
                name = %raw.name,
                kind = %raw.kind,
                fields = ?stray,
                "dropping payload fields that do not belong to the type's kind"
            );
        }

        TypeInfo {
            name: raw.name,
            detail,
            flags: TypeFlags {
                inline: raw.inline,
                is_pointer: raw.is_pointer,
                is_alias: raw.is_alias,
                is_embedded: raw.is_embedded,
                is_scalar: raw.is_scalar,
            },
            annotations: raw.annotations,
            pkg: raw.pkg,
        }
    }
}

impl<'de> Deserialize<'de> for TypeInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawEnvelope::deserialize(deserializer).map(TypeInfo::from)
    }
}

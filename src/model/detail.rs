//! The closed set of type shapes.

use serde::ser::SerializeMap;

use super::descriptor::{FieldTypeInfo, TypeDescriptor};
use super::package::MethodInfo;

/// Wire discriminators for [`TypeDetail`] variants.
pub mod kind {
    pub const MAP: &str = "map";
    pub const SLICE: &str = "slice";
    pub const ARRAY: &str = "array";
    pub const CHAN: &str = "chan";
    pub const STRUCT: &str = "struct";
    pub const INTERFACE: &str = "interface";
    pub const FUNC: &str = "func";

    /// Accepted on decode, never emitted.
    pub const CHANNEL_ALIAS: &str = "channel";
    /// Accepted on decode, never emitted.
    pub const FUNCTION_ALIAS: &str = "function";
}

/// Shape of a type. Exactly one variant is active per [`TypeInfo`](super::TypeInfo).
///
/// Nested payloads use [`TypeDescriptor`] rather than a full type, so
/// encoding never re-expands a type that is registered elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeDetail {
    Map {
        key_type: TypeDescriptor,
        value_type: TypeDescriptor,
    },
    Slice {
        element_type: TypeDescriptor,
    },
    Array {
        element_type: TypeDescriptor,
        length: u64,
    },
    Channel {
        value_type: TypeDescriptor,
    },
    Struct {
        fields: Vec<FieldTypeInfo>,
    },
    Interface {
        methods: Vec<MethodInfo>,
    },
    Function {
        parameters: Vec<TypeDescriptor>,
        returns: Vec<TypeDescriptor>,
    },
    /// A scalar or named primitive. `kind` is the type's own name (`int`, `string`).
    Basic {
        kind: String,
    },
}

impl TypeDetail {
    /// The `kind` discriminator written to the envelope.
    pub fn kind(&self) -> &str {
        match self {
            TypeDetail::Map { .. } => kind::MAP,
            TypeDetail::Slice { .. } => kind::SLICE,
            TypeDetail::Array { .. } => kind::ARRAY,
            TypeDetail::Channel { .. } => kind::CHAN,
            TypeDetail::Struct { .. } => kind::STRUCT,
            TypeDetail::Interface { .. } => kind::INTERFACE,
            TypeDetail::Function { .. } => kind::FUNC,
            TypeDetail::Basic { kind } => kind.as_str(),
        }
    }

    /// Envelope keys this variant may write besides `kind`.
    pub fn payload_keys(&self) -> &'static [&'static str] {
        match self {
            TypeDetail::Map { .. } => &["keyType", "valueType"],
            TypeDetail::Slice { .. } => &["elementType"],
            TypeDetail::Array { .. } => &["elementType", "length"],
            TypeDetail::Channel { .. } => &["valueType"],
            TypeDetail::Struct { .. } => &["fields"],
            TypeDetail::Interface { .. } => &["methods"],
            TypeDetail::Function { .. } => &["parameters", "returns"],
            TypeDetail::Basic { .. } => &[],
        }
    }

    /// Write `kind` and this variant's payload into an envelope map.
    ///
    /// Zero-valued descriptors, empty lists and a zero length are omitted.
    /// A `Basic` detail with an empty kind writes nothing, matching how a
    /// detail-less type decodes.
    pub(crate) fn serialize_payload<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        if !self.kind().is_empty() {
            map.serialize_entry("kind", self.kind())?;
        }
        match self {
            TypeDetail::Map {
                key_type,
                value_type,
            } => {
                descriptor_entry(map, "keyType", key_type)?;
                descriptor_entry(map, "valueType", value_type)?;
            }
            TypeDetail::Slice { element_type } => {
                descriptor_entry(map, "elementType", element_type)?;
            }
            TypeDetail::Array {
                element_type,
                length,
            } => {
                descriptor_entry(map, "elementType", element_type)?;
                if *length != 0 {
                    map.serialize_entry("length", length)?;
                }
            }
            TypeDetail::Channel { value_type } => {
                descriptor_entry(map, "valueType", value_type)?;
            }
            TypeDetail::Struct { fields } => {
                list_entry(map, "fields", fields)?;
            }
            TypeDetail::Interface { methods } => {
                list_entry(map, "methods", methods)?;
            }
            TypeDetail::Function {
                parameters,
                returns,
            } => {
                list_entry(map, "parameters", parameters)?;
                list_entry(map, "returns", returns)?;
            }
            TypeDetail::Basic { .. } => {}
        }
        Ok(())
    }
}

fn descriptor_entry<M: SerializeMap>(
    map: &mut M,
    key: &'static str,
    descriptor: &TypeDescriptor,
) -> Result<(), M::Error> {
    if descriptor.is_zero() {
        return Ok(());
    }
    map.serialize_entry(key, descriptor)
}

fn list_entry<M: SerializeMap, T: serde::Serialize>(
    map: &mut M,
    key: &'static str,
    items: &[T],
) -> Result<(), M::Error> {
    if items.is_empty() {
        return Ok(());
    }
    map.serialize_entry(key, items)
}

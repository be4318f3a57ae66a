//! Package, service, method and signature field entities.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::annotation::Tags;

use super::{is_false, null_as_default};
use super::type_info::TypeInfo;

/// A field in a method signature (parameter or return).
///
/// Lightweight: the type is named by `kind` and resolved through
/// [`PackageInfo::types`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldInfo {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_variadic: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_pointer: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_scalar: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_inline: bool,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub annotations: Tags,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn scalar(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            is_scalar: true,
            ..Self::new(name, kind)
        }
    }
}

/// One method of a service interface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MethodInfo {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<FieldInfo>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<FieldInfo>,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub annotations: Tags,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A discovered interface and its methods.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceInfo {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodInfo>,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub annotations: Tags,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub pkg: String,
}

impl ServiceInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Top-level container produced by the analyzer.
///
/// `types` is the canonical set of distinct types referenced anywhere in the
/// package. Fields and descriptors refer to its entries by name only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageInfo {
    /// Import alias → import path.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "IndexMap::is_empty")]
    pub imports: IndexMap<String, String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceInfo>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "IndexMap::is_empty")]
    pub types: IndexMap<String, TypeInfo>,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub annotations: Tags,
}

impl PackageInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a service by name.
    pub fn service(&self, name: &str) -> Option<&ServiceInfo> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Look up a registered type by name.
    pub fn type_info(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    /// Register `info` under its name unless a type with that name exists.
    ///
    /// Returns `true` if the type was inserted.
    pub fn register_type(&mut self, info: TypeInfo) -> bool {
        if self.types.contains_key(&info.name) {
            return false;
        }
        self.types.insert(info.name.clone(), info);
        true
    }

    /// Iterate over every method of every service.
    pub fn methods(&self) -> impl Iterator<Item = (&ServiceInfo, &MethodInfo)> + '_ {
        self.services
            .iter()
            .flat_map(|service| service.methods.iter().map(move |method| (service, method)))
    }

    /// Resolve a signature field's type through the type map.
    pub fn resolve(&self, field: &FieldInfo) -> Option<&TypeInfo> {
        self.types.get(&field.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TypeDescriptor, TypeDetail};
    use serde_json::json;

    fn sample() -> PackageInfo {
        let mut method = MethodInfo::new("Get");
        method.parameters.push(FieldInfo::scalar("id", "int"));
        method.returns.push(FieldInfo::new("user", "User"));

        let mut service = ServiceInfo::new("Users");
        service.methods.push(method);

        let mut package = PackageInfo::new();
        package.imports.insert("ctx".into(), "context".into());
        package.services.push(service);
        package.register_type(TypeInfo::new(
            "User",
            TypeDetail::Struct {
                fields: vec![],
            },
        ));
        package
    }

    #[test]
    fn test_lookup() {
        let package = sample();
        let service = package.service("Users").unwrap();
        let method = service.method("Get").unwrap();

        assert_eq!(method.parameters[0].kind, "int");
        assert_eq!(
            package.resolve(&method.returns[0]).map(|t| t.name.as_str()),
            Some("User")
        );
        assert!(package.resolve(&method.parameters[0]).is_none());
        assert_eq!(package.methods().count(), 1);
    }

    #[test]
    fn test_register_type_keeps_first() {
        let mut package = sample();
        let replacement = TypeInfo::new(
            "User",
            TypeDetail::Slice {
                element_type: TypeDescriptor::new("X"),
            },
        );

        assert!(!package.register_type(replacement));
        assert_eq!(package.type_info("User").unwrap().kind(), Some("struct"));
    }

    #[test]
    fn test_empty_collections_omitted() {
        let value = serde_json::to_value(PackageInfo::new()).unwrap();
        assert_eq!(value, json!({}));

        let value = serde_json::to_value(MethodInfo::new("Ping")).unwrap();
        assert_eq!(value, json!({"name": "Ping"}));
    }

    #[test]
    fn test_decode_any_field_order() {
        let package: PackageInfo = serde_json::from_value(json!({
            "types": {"User": {"kind": "struct", "name": "User"}},
            "annotations": {"version": "2"},
            "services": [{"pkg": "svc", "name": "Users", "methods": [{"name": "Get"}]}]
        }))
        .unwrap();

        assert_eq!(package.services[0].pkg, "svc");
        assert_eq!(package.annotations.get("version"), Some("2"));
        assert!(package.imports.is_empty());
    }
}

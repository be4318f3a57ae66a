//! Request envelope sent to a generation plugin.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::base::{ModelError, Result};
use crate::model::{PackageInfo, decode_package, encode_package, null_as_default};

use super::augment::augment;

/// Wire request: a base64 package description plus free-form flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRequest {
    /// Base64 of the encoded [`PackageInfo`].
    #[serde(rename = "Pr", default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub flags: IndexMap<String, String>,
}

impl PluginRequest {
    /// Build a request carrying `package`.
    pub fn with_package(package: &PackageInfo) -> Result<Self> {
        let bytes = encode_package(package)?;
        Ok(Self {
            payload: Some(STANDARD.encode(bytes)),
            flags: IndexMap::new(),
        })
    }

    pub fn flag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.flags.insert(name.into(), value.into());
        self
    }

    /// The decoded payload bytes; empty when no payload was sent.
    pub fn payload_bytes(&self) -> Result<Vec<u8>> {
        match self.payload.as_deref() {
            None | Some("") => Ok(Vec::new()),
            Some(encoded) => Ok(STANDARD.decode(encoded)?),
        }
    }
}

/// Plugin switches derived from the request flags.
///
/// Boolean switches are set by the flag's presence, whatever its value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PluginOptions {
    /// Value of the `Version` flag.
    pub version: String,
    /// `help` or `h`.
    pub help: bool,
    /// `doc`.
    pub doc: bool,
    /// `source`.
    pub source: bool,
    /// `desc`.
    pub description: bool,
}

impl PluginOptions {
    pub fn from_flags(flags: &IndexMap<String, String>) -> Self {
        Self {
            version: flags.get("Version").cloned().unwrap_or_default(),
            help: flags.contains_key("help") || flags.contains_key("h"),
            doc: flags.contains_key("doc"),
            source: flags.contains_key("source"),
            description: flags.contains_key("desc"),
        }
    }
}

/// Reply to a `desc` request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(rename = "Desc", default, skip_serializing_if = "String::is_empty")]
    pub desc: String,
    #[serde(rename = "Version", default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

/// Decode a plugin request into its options and package.
///
/// When a payload is present the package is decoded and every method gets
/// the synthetic `ctx`/`err` fields. Without a payload the package is empty.
pub fn decode_request(bytes: &[u8]) -> Result<(PluginOptions, PackageInfo)> {
    let request: PluginRequest = serde_json::from_slice(bytes).map_err(|err| {
        tracing::warn!(error = %err, "error deserializing plugin request");
        ModelError::Request(err)
    })?;
    let options = PluginOptions::from_flags(&request.flags);

    let payload = request.payload_bytes()?;
    if payload.is_empty() {
        return Ok((options, PackageInfo::default()));
    }

    let mut package = decode_package(&payload).inspect_err(|err| {
        tracing::warn!(error = %err, "error deserializing package payload");
    })?;
    augment(&mut package);

    Ok((options, package))
}

//! Configuration module
//!
//! The location rules file keeps the field names existing deployments already use,
//! so a `proxy.json` written for earlier releases loads unchanged:
//!
//! ```json
//! { "Locations": [ { "Prefix": "^/img/", "StorageBucketName": "media", ... } ] }
//! ```
//!
//! These are raw records; [`crate::rules::RuleSet`] compiles and validates them.

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::storage_types::StorageBackend;

/// Top-level shape of the rules file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationsFile {
    #[serde(rename = "Locations", default)]
    pub locations: Vec<LocationConfig>,
}

/// One location record as written in the rules file.
#[derive(Clone, Default, Deserialize)]
pub struct LocationConfig {
    #[serde(rename = "Prefix")]
    pub prefix: String,

    #[serde(rename = "StorageEndpoint", default)]
    pub storage_endpoint: String,

    #[serde(rename = "StorageAccessKey", default, deserialize_with = "empty_as_none")]
    pub storage_access_key: Option<String>,

    #[serde(
        rename = "StorageSecretAccessKey",
        default,
        deserialize_with = "empty_as_none"
    )]
    pub storage_secret_access_key: Option<String>,

    #[serde(rename = "StorageBucketName", default)]
    pub storage_bucket_name: String,

    #[serde(
        rename = "StorageBucketLocation",
        default,
        deserialize_with = "empty_as_none"
    )]
    pub storage_bucket_location: Option<String>,

    #[serde(rename = "StorageUseSSL", default)]
    pub storage_use_ssl: bool,

    /// URL rewriting: pattern applied to the request path
    #[serde(rename = "RegExpMatch", default, deserialize_with = "empty_as_none")]
    pub regexp_match: Option<String>,

    /// URL rewriting: replacement template, `$1` style
    #[serde(rename = "RegExpSub", default, deserialize_with = "empty_as_none")]
    pub regexp_sub: Option<String>,

    /// Time to add to the current time for the Expires header
    #[serde(rename = "Expires", default, deserialize_with = "empty_as_none")]
    pub expires: Option<String>,

    #[serde(rename = "CacheControl", default, deserialize_with = "empty_as_none")]
    pub cache_control: Option<String>,

    /// Redirect `?query` requests to the bare path
    #[serde(rename = "DropParams", default)]
    pub drop_params: bool,
}

impl LocationConfig {
    pub fn storage_backend(&self) -> StorageBackend {
        StorageBackend {
            endpoint: self.storage_endpoint.clone(),
            access_key: self.storage_access_key.clone(),
            secret_key: self.storage_secret_access_key.clone(),
            bucket: self.storage_bucket_name.clone(),
            region: self.storage_bucket_location.clone(),
            use_tls: self.storage_use_ssl,
        }
    }
}

impl std::fmt::Debug for LocationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationConfig")
            .field("prefix", &self.prefix)
            .field("backend", &self.storage_backend())
            .field("regexp_match", &self.regexp_match)
            .field("regexp_sub", &self.regexp_sub)
            .field("expires", &self.expires)
            .field("cache_control", &self.cache_control)
            .field("drop_params", &self.drop_params)
            .finish()
    }
}

fn empty_as_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(de)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl LocationsFile {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}

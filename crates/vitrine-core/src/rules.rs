//! Location rules and path resolution.
//!
//! A [`RuleSet`] is compiled once from the configuration file and never changes
//! afterwards; request handlers share it behind an `Arc` and read it without
//! locking. Rules are tried in declaration order and the first whose prefix
//! pattern matches the request path wins.

use std::path::Path;

use chrono::TimeDelta;
use regex::Regex;

use crate::config::{LocationConfig, LocationsFile};
use crate::duration::parse_duration;
use crate::error::ConfigError;
use crate::storage_types::StorageBackend;

/// Path rewrite: every match of `pattern` is replaced with `template`.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pattern: Regex,
    template: String,
}

impl Rewrite {
    pub fn new(pattern: Regex, template: impl Into<String>) -> Self {
        Self {
            pattern,
            template: template.into(),
        }
    }

    pub fn apply(&self, path: &str) -> String {
        self.pattern
            .replace_all(path, self.template.as_str())
            .into_owned()
    }
}

/// One compiled location.
#[derive(Debug, Clone)]
pub struct LocationRule {
    prefix: Regex,
    rewrite: Option<Rewrite>,
    drop_query_params: bool,
    cache_control: Option<String>,
    expires_after: Option<TimeDelta>,
    backend: StorageBackend,
}

impl LocationRule {
    /// Compile a raw record. `index` is only used to locate errors.
    pub fn compile(index: usize, config: &LocationConfig) -> Result<Self, ConfigError> {
        let prefix = compile_pattern(index, &config.prefix)?;

        let rewrite = match (&config.regexp_match, &config.regexp_sub) {
            (Some(pattern), Some(template)) => Some(Rewrite::new(
                compile_pattern(index, pattern)?,
                template.clone(),
            )),
            (Some(pattern), None) => {
                return Err(ConfigError::MissingRewriteTemplate {
                    index,
                    pattern: pattern.clone(),
                })
            }
            (None, _) => None,
        };

        let expires_after = config
            .expires
            .as_deref()
            .map(|value| {
                parse_duration(value).map_err(|reason| ConfigError::InvalidDuration {
                    index,
                    value: value.to_string(),
                    reason,
                })
            })
            .transpose()?;

        Ok(Self {
            prefix,
            rewrite,
            drop_query_params: config.drop_params,
            cache_control: config.cache_control.clone(),
            expires_after,
            backend: config.storage_backend(),
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.prefix.is_match(path)
    }

    /// Storage key for `path`: the rewrite result, or the path verbatim.
    ///
    /// An empty rewrite result is returned as-is; storage reports it as missing.
    pub fn resolve_key(&self, path: &str) -> String {
        match &self.rewrite {
            Some(rewrite) => rewrite.apply(path),
            None => path.to_string(),
        }
    }

    pub fn prefix_pattern(&self) -> &str {
        self.prefix.as_str()
    }

    pub fn drop_query_params(&self) -> bool {
        self.drop_query_params
    }

    pub fn cache_control(&self) -> Option<&str> {
        self.cache_control.as_deref()
    }

    pub fn expires_after(&self) -> Option<TimeDelta> {
        self.expires_after
    }

    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }
}

fn compile_pattern(index: usize, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        index,
        pattern: pattern.to_string(),
        source,
    })
}

/// A matched rule and its position in the set.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatch<'a> {
    pub index: usize,
    pub rule: &'a LocationRule,
}

impl RuleMatch<'_> {
    pub fn resolve_key(&self, path: &str) -> String {
        self.rule.resolve_key(path)
    }
}

/// Ordered, immutable collection of location rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<LocationRule>,
}

impl RuleSet {
    /// Compile every record; the first invalid one fails the whole set.
    pub fn from_config(locations: &[LocationConfig]) -> Result<Self, ConfigError> {
        if locations.is_empty() {
            return Err(ConfigError::NoLocations);
        }

        let rules = locations
            .iter()
            .enumerate()
            .map(|(index, config)| LocationRule::compile(index, config))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Read, parse and compile a rules file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = LocationsFile::load(path)?;
        Self::from_config(&file.locations)
    }

    /// First rule whose prefix pattern matches `path`.
    pub fn resolve(&self, path: &str) -> Option<RuleMatch<'_>> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(path))
            .map(|(index, rule)| RuleMatch { index, rule })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationRule> {
        self.rules.iter()
    }
}

//! Startup validation of compiled location rules
//!
//! The rules compiler checks patterns and durations; this adds the HTTP-level
//! checks that would otherwise fail on every matching request.

use anyhow::{anyhow, Result};
use axum::http::HeaderValue;
use vitrine_core::RuleSet;

pub fn validate_rules(rules: &RuleSet) -> Result<()> {
    for (index, rule) in rules.iter().enumerate() {
        if let Some(cache_control) = rule.cache_control() {
            HeaderValue::from_str(cache_control).map_err(|_| {
                anyhow!(
                    "Location {}: CacheControl {:?} is not a valid header value",
                    index,
                    cache_control
                )
            })?;
        }

        if rule.backend().bucket.is_empty() {
            tracing::warn!(
                rule = index,
                prefix = rule.prefix_pattern(),
                "Location has no StorageBucketName; every fetch will fail"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::LocationConfig;

    fn location(cache_control: Option<&str>) -> LocationConfig {
        LocationConfig {
            prefix: "^/img/".to_string(),
            storage_bucket_name: "media".to_string(),
            cache_control: cache_control.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_accepts_plain_cache_control() {
        let rules = RuleSet::from_config(&[location(Some("public, max-age=60"))]).unwrap();
        assert!(validate_rules(&rules).is_ok());
    }

    #[test]
    fn test_rejects_cache_control_with_newline() {
        let rules = RuleSet::from_config(&[location(None), location(Some("public\nx"))]).unwrap();
        let err = validate_rules(&rules).unwrap_err();
        assert!(err.to_string().contains("Location 1"));
    }
}

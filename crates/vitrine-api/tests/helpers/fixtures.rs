//! Test fixtures: location records and object bodies.

use vitrine_core::LocationConfig;

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Location serving `bucket` for paths matching `prefix`, no directives.
pub fn location(prefix: &str, bucket: &str) -> LocationConfig {
    LocationConfig {
        prefix: prefix.to_string(),
        storage_endpoint: "minio.test:9000".to_string(),
        storage_bucket_name: bucket.to_string(),
        ..Default::default()
    }
}

/// `/img/<name>` served from `originals/<name>` in the `media` bucket.
pub fn image_location() -> LocationConfig {
    LocationConfig {
        regexp_match: Some("^/img/(.+)$".to_string()),
        regexp_sub: Some("originals/$1".to_string()),
        ..location("^/img/", "media")
    }
}

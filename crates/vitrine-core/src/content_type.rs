//! Content-Type inference from object keys.
//!
//! A fixed table covers the image formats the proxy is mostly used for; any other
//! extension goes through the `mime_guess` registry. Keys without an extension,
//! or with one neither source knows, are served as `application/octet-stream`.

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
];

/// Extension after the last `.` of the key's path component, if any.
fn extension(key: &str) -> Option<&str> {
    let path = key.split(['?', '#']).next().unwrap_or(key);
    path.rfind('.').map(|pos| &path[pos + 1..])
}

/// Infer the MIME type to serve an object under.
pub fn infer_content_type(key: &str) -> String {
    let Some(ext) = extension(key) else {
        return DEFAULT_CONTENT_TYPE.to_string();
    };
    if ext.is_empty() {
        return DEFAULT_CONTENT_TYPE.to_string();
    }

    let lowered = ext.to_ascii_lowercase();
    if let Some((_, mime)) = IMAGE_TYPES.iter().find(|(name, _)| *name == lowered) {
        return (*mime).to_string();
    }

    mime_guess::from_ext(&lowered)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

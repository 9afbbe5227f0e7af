//! TLS configuration for `--tls`
//!
//! TLS 1.2 and 1.3 only, ECDHE key exchange over P-256 or P-384, AEAD cipher
//! suites in server preference order. HTTP/1.1 is the only ALPN protocol.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum_server::tls_rustls::RustlsConfig;
use rustls::crypto::aws_lc_rs::{self, cipher_suite, kx_group};
use rustls::crypto::CryptoProvider;
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};

fn crypto_provider() -> CryptoProvider {
    CryptoProvider {
        cipher_suites: vec![
            cipher_suite::TLS13_AES_256_GCM_SHA384,
            cipher_suite::TLS13_CHACHA20_POLY1305_SHA256,
            cipher_suite::TLS13_AES_128_GCM_SHA256,
            cipher_suite::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
            cipher_suite::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
            cipher_suite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
            cipher_suite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
            cipher_suite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
            cipher_suite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
        ],
        kx_groups: vec![kx_group::SECP256R1, kx_group::SECP384R1],
        ..aws_lc_rs::default_provider()
    }
}

/// Build the rustls server configuration from PEM files.
pub fn server_config(cert_path: &Path, key_path: &Path) -> Result<rustls::ServerConfig> {
    let certs = CertificateDer::pem_file_iter(cert_path)
        .with_context(|| format!("Failed to open TLS certificate {}", cert_path.display()))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to parse TLS certificate {}", cert_path.display()))?;
    if certs.is_empty() {
        anyhow::bail!("No certificate found in {}", cert_path.display());
    }

    let key = PrivateKeyDer::from_pem_file(key_path)
        .with_context(|| format!("Failed to load TLS key {}", key_path.display()))?;

    let mut config = rustls::ServerConfig::builder_with_provider(Arc::new(crypto_provider()))
        .with_protocol_versions(&[&rustls::version::TLS13, &rustls::version::TLS12])
        .context("Unsupported TLS protocol versions")?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("TLS certificate and key do not form a valid pair")?;

    config.ignore_client_order = true;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(config)
}

pub fn rustls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig> {
    Ok(RustlsConfig::from_config(Arc::new(server_config(
        cert_path, key_path,
    )?)))
}

//! Loading RSA key material from PEM

use std::path::Path;

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{traits::PublicKeyParts, RsaPrivateKey, RsaPublicKey};
use x509_parser::prelude::*;

use crate::error::{QrError, Result};

/// Parse a PKCS#8 (`PRIVATE KEY`) or PKCS#1 (`RSA PRIVATE KEY`) PEM
pub fn load_private_key_pem(pem: &str) -> Result<RsaPrivateKey> {
    let key = RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| QrError::InvalidKey(format!("Failed to parse RSA private key: {}", e)))?;

    log::info!("Loaded RSA private key, size: {} bits", key.size() * 8);
    Ok(key)
}

/// Read and parse a private key PEM file
pub fn load_private_key_file<P: AsRef<Path>>(path: P) -> Result<RsaPrivateKey> {
    log::info!("Reading signing key: {}", path.as_ref().display());
    let pem = std::fs::read_to_string(path)?;
    load_private_key_pem(&pem)
}

/// Extract the RSA public key from a PEM X.509 certificate.
///
/// Only the key is taken; validity and chain are not checked.
pub fn load_certificate_public_key(pem_bytes: &[u8]) -> Result<RsaPublicKey> {
    let (_, pem) = parse_x509_pem(pem_bytes)
        .map_err(|e| QrError::InvalidKey(format!("Failed to parse PEM: {}", e)))?;

    let (_, cert) = X509Certificate::from_der(&pem.contents)
        .map_err(|e| QrError::InvalidKey(format!("Failed to parse certificate: {}", e)))?;

    log::debug!("Certificate subject: {}", cert.subject());
    log::debug!("Certificate issuer: {}", cert.issuer());

    let key = RsaPublicKey::from_public_key_der(cert.public_key().raw)
        .map_err(|e| QrError::InvalidKey(format!("Failed to parse RSA public key: {}", e)))?;

    log::info!("Loaded certificate public key, size: {} bits", key.size() * 8);
    Ok(key)
}

/// Parse a certificate, SPKI (`PUBLIC KEY`) or PKCS#1 (`RSA PUBLIC KEY`) PEM
pub fn load_public_key_pem(pem: &str) -> Result<RsaPublicKey> {
    if pem.contains("BEGIN CERTIFICATE") {
        return load_certificate_public_key(pem.as_bytes());
    }

    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| QrError::InvalidKey(format!("Failed to parse RSA public key: {}", e)))
}

/// Read and parse a certificate or public key PEM file
pub fn load_public_key_file<P: AsRef<Path>>(path: P) -> Result<RsaPublicKey> {
    let pem = std::fs::read_to_string(path)?;
    load_public_key_pem(&pem)
}

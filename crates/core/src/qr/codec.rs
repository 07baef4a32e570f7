//! Big-integer and DEFLATE codec for QR payloads
//!
//! A secure QR carries its payload as a decimal big integer whose big-endian
//! bytes are a compressed stream. UIDAI samples are gzip-framed; fixtures are
//! written back zlib-framed, which is what the issuer's reader tooling emits.

use std::io::{Read, Write};
use std::str::FromStr;

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use num_bigint::BigUint;

use crate::error::{QrError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Interpret bytes as an unsigned big-endian integer
pub fn bytes_to_bigint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Minimal big-endian bytes of `n`. Leading zero bytes of the original input are not recovered.
pub fn bigint_to_bytes(n: &BigUint) -> Vec<u8> {
    n.to_bytes_be()
}

/// DEFLATE-compress into a zlib stream
pub fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(|e| QrError::Codec(format!("Failed to compress: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| QrError::Codec(format!("Failed to finish compression: {}", e)))
}

/// Inflate a gzip or zlib stream
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    let read = if bytes.starts_with(&GZIP_MAGIC) {
        GzDecoder::new(bytes).read_to_end(&mut out)
    } else {
        ZlibDecoder::new(bytes).read_to_end(&mut out)
    };

    read.map_err(|e| QrError::Codec(format!("Failed to decompress: {}", e)))?;

    log::debug!("Decompressed {} bytes into {} bytes", bytes.len(), out.len());
    Ok(out)
}

/// Decode a decimal QR string into the decompressed payload
pub fn decode_qr_string(qr: &str) -> Result<Vec<u8>> {
    let qr = qr.trim();
    if qr.is_empty() || !qr.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QrError::Codec("QR data must be a decimal integer".to_string()));
    }

    let n = BigUint::from_str(qr).map_err(|e| QrError::Codec(e.to_string()))?;
    decompress(&bigint_to_bytes(&n))
}

/// Compress a payload and render it as a decimal QR string
pub fn encode_qr_string(payload: &[u8]) -> Result<String> {
    let compressed = compress(payload)?;
    log::debug!("Compressed {} bytes into {} bytes", payload.len(), compressed.len());
    Ok(bytes_to_bigint(&compressed).to_str_radix(10))
}

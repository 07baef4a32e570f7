//! Signing and verifying QR payloads with RSA PKCS#1 v1.5 over SHA-256

use std::path::Path;

use rsa::{traits::PublicKeyParts, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::crypto::keys::{load_private_key_file, load_private_key_pem};
use crate::error::{QrError, Result};

/// Produces the signature appended to a synthesized payload
pub trait RecordSigner: Send + Sync {
    /// Sign the full V2 payload
    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>>;

    /// Length in bytes of every signature this signer produces
    fn signature_len(&self) -> usize;
}

/// Hash-then-sign with a fixed RSA test key, as the issuer does with its own key
pub struct RsaSha256Signer {
    key: RsaPrivateKey,
}

impl RsaSha256Signer {
    pub fn new(key: RsaPrivateKey) -> Self {
        Self { key }
    }

    pub fn from_pem(pem: &str) -> Result<Self> {
        load_private_key_pem(pem).map(Self::new)
    }

    pub fn from_pem_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_private_key_file(path).map(Self::new)
    }

    pub fn public_key(&self) -> RsaPublicKey {
        self.key.to_public_key()
    }
}

impl RecordSigner for RsaSha256Signer {
    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let hash = Sha256::digest(payload);
        log::debug!("Payload hash (SHA256): {}", hex::encode(hash));

        let signature = self.key.sign(Pkcs1v15Sign::new::<Sha256>(), &hash)?;
        log::debug!("Signature size: {} bytes", signature.len());
        Ok(signature)
    }

    fn signature_len(&self) -> usize {
        self.key.size()
    }
}

/// Verify a PKCS#1 v1.5 signature over the SHA-256 digest of `payload`
pub fn verify_signature(public_key: &RsaPublicKey, payload: &[u8], signature: &[u8]) -> Result<()> {
    let hash = Sha256::digest(payload);

    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &hash, signature)
        .map_err(|e| QrError::SignatureVerificationFailed(e.to_string()))?;

    log::info!("✓ Signature verification successful");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::test_key;
    use rsa::pkcs8::{EncodePrivateKey, LineEnding};

    fn signer() -> RsaSha256Signer {
        RsaSha256Signer::new(test_key().clone())
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = signer();
        let payload = b"V2\xff3\xff2697".to_vec();

        let signature = signer.sign(&payload).unwrap();
        assert_eq!(signature.len(), signer.signature_len());
        assert_eq!(signature.len(), 256);

        assert!(verify_signature(&signer.public_key(), &payload, &signature).is_ok());
    }

    #[test]
    fn test_signature_is_deterministic() {
        let signer = signer();
        assert_eq!(signer.sign(b"payload").unwrap(), signer.sign(b"payload").unwrap());
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let signer = signer();
        let signature = signer.sign(b"payload").unwrap();

        let result = verify_signature(&signer.public_key(), b"payloaD", &signature);
        assert!(matches!(result, Err(QrError::SignatureVerificationFailed(_))));

        let mut bad = signature.clone();
        bad[10] ^= 0x01;
        assert!(verify_signature(&signer.public_key(), b"payload", &bad).is_err());
    }

    #[test]
    fn test_signer_from_pem() {
        let pem = test_key().to_pkcs8_pem(LineEnding::LF).unwrap();
        let signer = RsaSha256Signer::from_pem(&pem).unwrap();
        assert_eq!(signer.public_key(), test_key().to_public_key());
    }
}

//! Signing collaborator and key material for re-signed fixtures

pub mod keys;
pub mod signer;

pub use keys::{load_certificate_public_key, load_private_key_file, load_private_key_pem, load_public_key_file, load_public_key_pem};
pub use signer::{verify_signature, RecordSigner, RsaSha256Signer};

/// 2048-bit key shared by the unit tests; generating one is slow.
#[cfg(test)]
pub(crate) fn test_key() -> &'static rsa::RsaPrivateKey {
    use std::sync::OnceLock;

    static KEY: OnceLock<rsa::RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        rsa::RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("failed to generate test key")
    })
}

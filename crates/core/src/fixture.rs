//! Synthesizing re-signed V2 test fixtures
//!
//! A fixture starts from a legacy UIDAI payload, has its requested fields
//! swapped, its photo scrubbed and its timestamp refreshed, is upgraded to
//! the V2 layout, and is re-signed with a test key. The result is compressed
//! and rendered as the decimal string a QR reader would hand to the prover.

use chrono::{DateTime, Utc};
use rsa::{traits::PublicKeyParts, RsaPublicKey};

use crate::crypto::signer::{verify_signature, RecordSigner};
use crate::error::{QrError, Result};
use crate::qr::codec::{decode_qr_string, encode_qr_string};
use crate::qr::framer::read_identity;
use crate::qr::migrate::upgrade_to_v2;
use crate::qr::photo::randomize_photo;
use crate::qr::splice::replace_field;
use crate::qr::timestamp::{read_timestamp, restamp_record};
use crate::qr::types::{FrameLayout, IdentityFields, MutationRequest};

/// A decompressed QR payload split into signed data and trailing signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFixture {
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
}

impl DecodedFixture {
    pub fn layout(&self) -> FrameLayout {
        FrameLayout::detect(&self.payload)
    }

    pub fn identity(&self) -> Result<IdentityFields> {
        read_identity(&self.payload, self.layout())
    }

    pub fn timestamp(&self) -> Result<String> {
        read_timestamp(&self.payload, self.layout())
    }
}

/// Decode a QR string and strip the trailing `signature_len`-byte signature
pub fn decode_fixture(qr: &str, signature_len: usize) -> Result<DecodedFixture> {
    let mut payload = decode_qr_string(qr)?;
    if payload.len() <= signature_len {
        return Err(QrError::InvalidInput(format!(
            "Payload of {} bytes cannot hold a {}-byte signature",
            payload.len(),
            signature_len
        )));
    }

    let signature = payload.split_off(payload.len() - signature_len);
    log::debug!("Decoded {} payload bytes, {} signature bytes", payload.len(), signature.len());

    Ok(DecodedFixture { payload, signature })
}

/// Decode a fixture and check its signature against `public_key`
pub fn verify_fixture(qr: &str, public_key: &RsaPublicKey) -> Result<DecodedFixture> {
    let decoded = decode_fixture(qr, public_key.size())?;
    verify_signature(public_key, &decoded.payload, &decoded.signature)?;
    Ok(decoded)
}

/// Apply `mutations` to a legacy record, upgrade it to V2 and sign it, stamped with the current time
pub fn synthesize_fixture<S>(seed_record: &[u8], mutations: &MutationRequest, signer: &S) -> Result<String>
where
    S: RecordSigner + ?Sized,
{
    synthesize_fixture_at(seed_record, mutations, signer, Utc::now())
}

/// [`synthesize_fixture`] with an explicit issuance time
pub fn synthesize_fixture_at<S>(
    seed_record: &[u8],
    mutations: &MutationRequest,
    signer: &S,
    now: DateTime<Utc>,
) -> Result<String>
where
    S: RecordSigner + ?Sized,
{
    let payload = build_payload(seed_record, mutations, now)?;

    let signature = signer.sign(&payload)?;
    if signature.len() != signer.signature_len() {
        return Err(QrError::Crypto(format!(
            "Signer produced {} bytes, expected {}",
            signature.len(),
            signer.signature_len()
        )));
    }

    let mut signed = payload;
    signed.extend_from_slice(&signature);

    let qr = encode_qr_string(&signed)?;
    log::info!("✓ Synthesized V2 fixture: {} signed bytes, {} digits", signed.len(), qr.len());
    Ok(qr)
}

/// Decode a signed legacy QR, drop its signature and synthesize a fixture from the rest
pub fn synthesize_from_qr<S>(
    qr: &str,
    seed_signature_len: usize,
    mutations: &MutationRequest,
    signer: &S,
) -> Result<String>
where
    S: RecordSigner + ?Sized,
{
    let seed = decode_fixture(qr, seed_signature_len)?;
    synthesize_fixture(&seed.payload, mutations, signer)
}

/// The unsigned V2 payload for a seed record
pub fn build_payload(seed_record: &[u8], mutations: &MutationRequest, now: DateTime<Utc>) -> Result<Vec<u8>> {
    mutations.validate()?;

    if FrameLayout::detect(seed_record) != FrameLayout::Legacy {
        return Err(QrError::InvalidInput("Seed record is already in the V2 layout".to_string()));
    }

    log::info!("Synthesizing fixture from {}-byte seed record", seed_record.len());

    let mut record = seed_record.to_vec();
    for (field, value) in mutations.field_updates() {
        record = replace_field(&record, FrameLayout::Legacy, field, value.as_bytes())?;
        log::info!("✓ Set {}", field.name());
    }

    if mutations.photo {
        record = randomize_photo(&record, record.len(), FrameLayout::Legacy)?;
        log::info!("✓ Randomized photo");
    }

    record = restamp_record(&record, now)?;
    upgrade_to_v2(&record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{test_key, RsaSha256Signer};
    use crate::qr::framer::field_body_range;
    use crate::qr::types::{IdField, LEGACY_FRAME_FIELDS, SENTINEL};

    /// Signs with a fixed 256-byte pattern; keeps pipeline tests independent of RSA
    struct PatternSigner;

    impl RecordSigner for PatternSigner {
        fn sign(&self, payload: &[u8]) -> Result<Vec<u8>> {
            Ok((0..256).map(|i| (i as u8) ^ (payload.len() as u8)).collect())
        }

        fn signature_len(&self) -> usize {
            256
        }
    }

    struct ShortSigner;

    impl RecordSigner for ShortSigner {
        fn sign(&self, _payload: &[u8]) -> Result<Vec<u8>> {
            Ok(vec![1, 2, 3])
        }

        fn signature_len(&self) -> usize {
            256
        }
    }

    fn seed_record() -> Vec<u8> {
        let fields: [&str; LEGACY_FRAME_FIELDS] = [
            "3",
            "269720190308114407437",
            "Sumit Kumar",
            "01-01-1984",
            "M",
            "C/O Ishwar Chand",
            "East Delhi",
            "",
            "B-31, 3rd Floor",
            "",
            "110051",
            "Krishna Nagar",
            "Delhi",
            "Radhey Shyam Park Extension",
            "Gandhi Nagar",
            "Krishna Nagar",
        ];
        let mut record = Vec::new();
        for field in fields {
            record.extend_from_slice(field.as_bytes());
            record.push(SENTINEL);
        }
        record.extend_from_slice(&[0xff, 0x4f, 0xff, 0x51]);
        record.extend((0..300u32).map(|i| (i % 200) as u8));
        record
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T00:00:00.250Z").unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_build_payload_without_mutations() {
        let seed = seed_record();
        let payload = build_payload(&seed, &MutationRequest::default(), now()).unwrap();

        assert_eq!(payload.len(), seed.len() + 8);
        let identity = read_identity(&payload, FrameLayout::V2).unwrap();
        assert_eq!(identity.version.as_deref(), Some("V2"));
        assert_eq!(identity.reference_id, "269720240601053000250");
        assert_eq!(identity.name, "Sumit Kumar");
        assert_eq!(identity.phone_last4.as_deref(), Some("1234"));
        assert!(payload.ends_with(&seed[seed.len() - 300..]));
    }

    #[test]
    fn test_build_payload_with_field_mutations() {
        let request = MutationRequest {
            dob: Some("01-08-1955".to_string()),
            gender: Some("F".to_string()),
            pincode: Some("560001".to_string()),
            state: Some("Karnataka".to_string()),
            photo: false,
        };
        let payload = build_payload(&seed_record(), &request, now()).unwrap();

        let identity = read_identity(&payload, FrameLayout::V2).unwrap();
        assert_eq!(identity.dob, "01-08-1955");
        assert_eq!(identity.gender, "F");
        assert_eq!(identity.pincode, "560001");
        assert_eq!(identity.state, "Karnataka");
        assert_eq!(identity.post_office, "Krishna Nagar");
        assert_eq!(identity.street, "Radhey Shyam Park Extension");
    }

    #[test]
    fn test_build_payload_fills_empty_seed_field() {
        let seed = seed_record();
        let state = field_body_range(&seed, IdField::State.index()).unwrap();
        let mut blank = seed[..state.start].to_vec();
        blank.extend_from_slice(&seed[state.end..]);

        let request = MutationRequest { state: Some("Delhi".to_string()), ..Default::default() };
        let payload = build_payload(&blank, &request, now()).unwrap();

        assert_eq!(payload.len(), seed.len() + 8);
        let identity = read_identity(&payload, FrameLayout::V2).unwrap();
        assert_eq!(identity.state, "Delhi");
        assert_eq!(identity.street, "Radhey Shyam Park Extension");
    }

    #[test]
    fn test_build_payload_randomizes_photo() {
        let seed = seed_record();
        let request = MutationRequest { photo: true, ..Default::default() };
        let payload = build_payload(&seed, &request, now()).unwrap();

        assert_eq!(payload.len(), seed.len() + 8);
        assert_ne!(&payload[payload.len() - 300..], &seed[seed.len() - 300..]);
    }

    #[test]
    fn test_build_payload_rejects_bad_input() {
        let request = MutationRequest { gender: Some("male".to_string()), ..Default::default() };
        assert!(matches!(build_payload(&seed_record(), &request, now()), Err(QrError::InvalidInput(_))));

        let v2 = build_payload(&seed_record(), &MutationRequest::default(), now()).unwrap();
        assert!(matches!(build_payload(&v2, &MutationRequest::default(), now()), Err(QrError::InvalidInput(_))));

        let truncated = seed_record()[..40].to_vec();
        assert!(build_payload(&truncated, &MutationRequest::default(), now()).is_err());
    }

    #[test]
    fn test_synthesize_and_decode() {
        let qr = synthesize_fixture_at(&seed_record(), &MutationRequest::default(), &PatternSigner, now()).unwrap();
        let decoded = decode_fixture(&qr, 256).unwrap();

        assert_eq!(decoded.layout(), FrameLayout::V2);
        assert_eq!(decoded.signature, PatternSigner.sign(&decoded.payload).unwrap());
        assert_eq!(decoded.timestamp().unwrap(), "20240601053000250");
        assert_eq!(decoded.identity().unwrap().get(IdField::State), Some("Delhi"));
    }

    #[test]
    fn test_synthesize_rejects_wrong_signature_length() {
        let result = synthesize_fixture(&seed_record(), &MutationRequest::default(), &ShortSigner);
        assert!(matches!(result, Err(QrError::Crypto(_))));
    }

    #[test]
    fn test_synthesize_from_qr_strips_seed_signature() {
        let mut signed_seed = seed_record();
        signed_seed.extend_from_slice(&[0xAB; 256]);
        let seed_qr = encode_qr_string(&signed_seed).unwrap();

        let qr = synthesize_from_qr(&seed_qr, 256, &MutationRequest::default(), &PatternSigner).unwrap();
        let decoded = decode_fixture(&qr, 256).unwrap();
        assert_eq!(decoded.payload.len(), seed_record().len() + 8);
    }

    #[test]
    fn test_verify_fixture_with_rsa() {
        let signer = RsaSha256Signer::new(test_key().clone());
        let request = MutationRequest { state: Some("Delhi".to_string()), ..Default::default() };

        let qr = synthesize_fixture(&seed_record(), &request, &signer).unwrap();
        let decoded = verify_fixture(&qr, &signer.public_key()).unwrap();
        assert_eq!(decoded.identity().unwrap().state, "Delhi");

        let other = synthesize_fixture(&seed_record(), &request, &PatternSigner).unwrap();
        assert!(matches!(
            verify_fixture(&other, &signer.public_key()),
            Err(QrError::SignatureVerificationFailed(_))
        ));
    }

    #[test]
    fn test_decode_fixture_too_short() {
        let qr = encode_qr_string(b"short").unwrap();
        assert!(matches!(decode_fixture(&qr, 256), Err(QrError::InvalidInput(_))));
    }
}

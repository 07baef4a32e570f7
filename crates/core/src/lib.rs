//! Aadhaar QR Fixture Library
//!
//! This library turns the official UIDAI secure QR sample into signed
//! Aadhaar QR V2 test fixtures: decode the compressed big-integer payload,
//! swap selected personal-data fields and the photo, refresh the issuance
//! timestamp, upgrade the framing to V2 and re-sign with a test key.

pub mod crypto;
pub mod error;
pub mod fixture;
pub mod qr;

pub use error::{QrError, Result};
pub use fixture::{
    build_payload, decode_fixture, synthesize_fixture, synthesize_fixture_at, synthesize_from_qr, verify_fixture,
    DecodedFixture,
};

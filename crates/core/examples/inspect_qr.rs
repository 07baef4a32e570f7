//! Example: Decode a secure QR payload and print its fields
//!
//! Usage:
//!   cargo run --example inspect_qr -- [qr_decimal_string]
//!
//! Without an argument the bundled UIDAI sample is decoded.

use aadhar_qr_core::decode_fixture;
use aadhar_qr_core::qr::sample::UIDAI_TEST_QR;
use aadhar_qr_core::qr::{record_issue_time, IdField, UIDAI_SIGNATURE_LEN};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let qr = args.get(1).map(String::as_str).unwrap_or(UIDAI_TEST_QR);

    println!("🔍 Decoding QR payload ({} digits)", qr.len());
    println!();

    match decode_fixture(qr, UIDAI_SIGNATURE_LEN) {
        Ok(decoded) => {
            println!("✅ Decoded {:?} record", decoded.layout());
            println!("   Payload:   {} bytes", decoded.payload.len());
            println!("   Signature: {} bytes", decoded.signature.len());
            println!();

            let identity = match decoded.identity() {
                Ok(identity) => identity,
                Err(e) => {
                    eprintln!("❌ Error reading fields: {:?}", e);
                    std::process::exit(1);
                }
            };

            println!("📋 Fields:");
            for field in decoded.layout().fields() {
                println!("  {:<36} {}", field.name(), identity.get(*field).unwrap_or(""));
            }

            println!();
            if let Ok(stamp) = decoded.timestamp() {
                println!("🕒 Issued (IST): {}", stamp);
            }
            if let Ok(issued) = record_issue_time(&decoded.payload, decoded.layout()) {
                println!("   Unix (hour):  {}", issued);
            }
            if let Some(last4) = identity.aadhaar_last4() {
                println!("   Aadhaar last 4: {}", last4);
            }
            println!("   DOB field: {}", identity.get(IdField::Dob).unwrap_or(""));
        }
        Err(e) => {
            eprintln!("❌ Error decoding QR: {:?}", e);
            std::process::exit(1);
        }
    }
}

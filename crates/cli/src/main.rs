//! CLI tool for Aadhaar QR V2 test fixtures
//!
//! Turns the UIDAI secure QR sample into re-signed V2 fixtures and inspects
//! or verifies the resulting QR strings.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use aadhar_qr_core::crypto::{load_public_key_file, RecordSigner, RsaSha256Signer};
use aadhar_qr_core::qr::sample::UIDAI_TEST_QR;
use aadhar_qr_core::qr::{locate_photo, record_issue_time, MutationRequest, UIDAI_SIGNATURE_LEN};
use aadhar_qr_core::{decode_fixture, synthesize_from_qr, verify_fixture};

#[derive(Parser)]
#[command(name = "aadhar-qr")]
#[command(about = "Signed Aadhaar QR V2 fixtures for prover tests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize one V2 fixture
    Generate {
        /// Signing key (PKCS#8 or PKCS#1 PEM)
        #[arg(short, long)]
        key: PathBuf,

        /// Seed QR string or file holding one (defaults to the UIDAI sample)
        #[arg(short, long)]
        seed: Option<String>,

        /// Date of birth, DD-MM-YYYY
        #[arg(long)]
        dob: Option<String>,

        /// Gender (M, F or T)
        #[arg(long)]
        gender: Option<String>,

        /// Six-digit pincode
        #[arg(long)]
        pincode: Option<String>,

        /// State name
        #[arg(long)]
        state: Option<String>,

        /// Replace the photo with random bytes
        #[arg(long)]
        photo: bool,

        /// Write the QR string here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Synthesize one fixture per request in a JSON file
    Batch {
        /// Signing key (PKCS#8 or PKCS#1 PEM)
        #[arg(short, long)]
        key: PathBuf,

        /// JSON array of mutation requests
        #[arg(short, long)]
        requests: PathBuf,

        /// Seed QR string or file holding one (defaults to the UIDAI sample)
        #[arg(short, long)]
        seed: Option<String>,
    },

    /// Synthesize the three reference fixtures from the UIDAI sample
    Demo {
        /// Signing key (PKCS#8 or PKCS#1 PEM)
        #[arg(short, long)]
        key: PathBuf,
    },

    /// Decode a QR string and print its fields
    Inspect {
        /// QR string or file holding one
        #[arg(short, long)]
        qr: String,

        /// Length of the trailing signature in bytes
        #[arg(long, default_value_t = UIDAI_SIGNATURE_LEN)]
        signature_len: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a fixture's signature
    Verify {
        /// QR string or file holding one
        #[arg(short, long)]
        qr: String,

        /// Certificate or public key PEM
        #[arg(short, long)]
        cert: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match cli.command {
        Commands::Generate { key, seed, dob, gender, pincode, state, photo, output } => {
            let request = MutationRequest { dob, gender, pincode, state, photo };
            cmd_generate(key, seed, request, output)
        }
        Commands::Batch { key, requests, seed } => cmd_batch(key, requests, seed),
        Commands::Demo { key } => cmd_demo(key),
        Commands::Inspect { qr, signature_len, json } => cmd_inspect(qr, signature_len, json),
        Commands::Verify { qr, cert } => cmd_verify(qr, cert),
    }
}

/// A QR argument is read from disk when it names an existing file
fn read_qr_arg(arg: &str) -> Result<String> {
    let path = Path::new(arg);
    let qr = if path.is_file() {
        log::debug!("Reading QR string from {}", path.display());
        std::fs::read_to_string(path)?
    } else {
        arg.to_string()
    };

    let qr = qr.trim().to_string();
    if qr.is_empty() {
        anyhow::bail!("QR string is empty");
    }
    Ok(qr)
}

fn seed_qr(seed: Option<String>) -> Result<String> {
    match seed {
        Some(seed) => read_qr_arg(&seed),
        None => {
            log::debug!("Using the bundled UIDAI sample as seed");
            Ok(UIDAI_TEST_QR.to_string())
        }
    }
}

fn load_signer(key: &Path) -> Result<RsaSha256Signer> {
    let signer = RsaSha256Signer::from_pem_file(key)?;
    log::info!("Loaded signing key from {}", key.display());
    println!("🔑 Signing key: {} ({} byte signatures)", key.display(), signer.signature_len());
    Ok(signer)
}

fn describe(request: &MutationRequest) -> String {
    let mut parts: Vec<String> = request
        .field_updates()
        .into_iter()
        .map(|(field, value)| format!("{}={}", field.name(), value))
        .collect();
    if request.photo {
        parts.push("photo".to_string());
    }

    if parts.is_empty() {
        "no changes".to_string()
    } else {
        parts.join(", ")
    }
}

fn cmd_generate(key: PathBuf, seed: Option<String>, request: MutationRequest, output: Option<PathBuf>) -> Result<()> {
    println!("🔐 Generating V2 fixture ({})...", describe(&request));
    println!();

    let signer = load_signer(&key)?;
    let seed = seed_qr(seed)?;
    let qr = synthesize_from_qr(&seed, UIDAI_SIGNATURE_LEN, &request, &signer)?;

    println!("✅ Fixture generated successfully!");
    println!("   Digits: {}", qr.len());
    match output {
        Some(path) => {
            std::fs::write(&path, &qr)?;
            println!("   Saved to: {}", path.display());
        }
        None => {
            println!();
            println!("{}", qr);
        }
    }

    Ok(())
}

fn cmd_batch(key: PathBuf, requests_file: PathBuf, seed: Option<String>) -> Result<()> {
    println!("📦 Generating fixture batch from {}...", requests_file.display());
    println!();

    let json = std::fs::read_to_string(&requests_file)?;
    let requests: Vec<MutationRequest> = serde_json::from_str(&json)?;
    log::info!("Parsed {} mutation requests", requests.len());
    if requests.is_empty() {
        anyhow::bail!("No mutation requests in {}", requests_file.display());
    }

    let signer = load_signer(&key)?;
    let seed = seed_qr(seed)?;
    run_requests(&seed, &requests, &signer)
}

fn cmd_demo(key: PathBuf) -> Result<()> {
    println!("📚 Generating reference fixtures from the UIDAI sample...");
    println!();

    let requests = [
        MutationRequest {
            pincode: Some("110051".to_string()),
            state: Some("Delhi".to_string()),
            photo: true,
            ..Default::default()
        },
        MutationRequest {
            dob: Some("01-01-1985".to_string()),
            photo: true,
            ..Default::default()
        },
        MutationRequest {
            dob: Some("01-08-1955".to_string()),
            gender: Some("F".to_string()),
            photo: true,
            ..Default::default()
        },
    ];

    let signer = load_signer(&key)?;
    run_requests(UIDAI_TEST_QR, &requests, &signer)
}

fn run_requests(seed: &str, requests: &[MutationRequest], signer: &dyn RecordSigner) -> Result<()> {
    println!("Number of fixtures: {}", requests.len());
    println!();

    for (i, request) in requests.iter().enumerate() {
        log::debug!("Request {}: {:?}", i + 1, request);
        let qr = synthesize_from_qr(seed, UIDAI_SIGNATURE_LEN, request, signer)?;
        println!("{}. {}", i + 1, describe(request));
        println!("{}", qr);
        println!();
    }

    println!("✅ {} fixtures generated", requests.len());
    Ok(())
}

fn cmd_inspect(qr: String, signature_len: usize, json: bool) -> Result<()> {
    let qr = read_qr_arg(&qr)?;
    let decoded = decode_fixture(&qr, signature_len)?;
    log::info!("Decoded {} digits into {} payload bytes", qr.len(), decoded.payload.len());

    let layout = decoded.layout();
    let identity = decoded.identity()?;
    let timestamp = decoded.timestamp()?;
    let issued_at = record_issue_time(&decoded.payload, layout)?;
    let photo = locate_photo(&decoded.payload, decoded.payload.len(), layout)?;

    if json {
        let report = serde_json::json!({
            "layout": layout,
            "payload_len": decoded.payload.len(),
            "signature_len": decoded.signature.len(),
            "timestamp": timestamp,
            "issued_at": issued_at,
            "photo_len": photo.len,
            "fields": identity,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("📄 Decoded {:?} record", layout);
    println!();
    println!("  Payload:   {} bytes", decoded.payload.len());
    println!("  Signature: {} bytes", decoded.signature.len());
    println!("  Photo:     {} bytes", photo.len);
    println!("  Issued:    {} (unix {})", timestamp, issued_at);
    println!();
    println!("Personal Information:");
    if let Some(version) = &identity.version {
        println!("  Version:  {}", version);
    }
    println!("  Name:     {}", identity.name);
    println!("  DOB:      {}", identity.dob);
    println!("  Gender:   {}", identity.gender);
    println!("  Aadhaar:  XXXX-XXXX-{}", identity.aadhaar_last4().unwrap_or("????"));
    if let Some(phone) = &identity.phone_last4 {
        println!("  Phone:    XXXXXX{}", phone);
    }
    println!();
    println!("Address:");
    println!("  C/O:          {}", identity.care_of);
    println!("  House:        {}", identity.house);
    println!("  Street:       {}", identity.street);
    println!("  Landmark:     {}", identity.landmark);
    println!("  Location:     {}", identity.location);
    println!("  VTC:          {}", identity.vtc);
    println!("  Post Office:  {}", identity.post_office);
    println!("  Sub-district: {}", identity.sub_district);
    println!("  District:     {}", identity.district);
    println!("  State:        {}", identity.state);
    println!("  Pincode:      {}", identity.pincode);

    Ok(())
}

fn cmd_verify(qr: String, cert: PathBuf) -> Result<()> {
    println!("🔍 Verifying fixture signature...");
    println!();

    let qr = read_qr_arg(&qr)?;
    let public_key = load_public_key_file(&cert)?;

    match verify_fixture(&qr, &public_key) {
        Ok(decoded) => {
            println!("✅ Signature is VALID!");
            println!("   {:?} record, {} payload bytes", decoded.layout(), decoded.payload.len());
            Ok(())
        }
        Err(e) => {
            log::warn!("Verification against {} failed: {}", cert.display(), e);
            println!("❌ Signature is INVALID!");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_qr_arg_literal_and_file() {
        env_logger::try_init().ok();

        assert_eq!(read_qr_arg(" 12345\n").unwrap(), "12345");
        assert!(read_qr_arg("   ").is_err());

        let path = std::env::temp_dir().join(format!("aadhar-qr-arg-{}.txt", std::process::id()));
        std::fs::write(&path, "987654321\n").unwrap();
        let qr = read_qr_arg(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(qr, "987654321");
    }

    #[test]
    fn test_seed_defaults_to_sample() {
        env_logger::try_init().ok();

        assert_eq!(seed_qr(None).unwrap(), UIDAI_TEST_QR);
        assert_eq!(seed_qr(Some("42".to_string())).unwrap(), "42");
    }

    #[test]
    fn test_describe_request() {
        assert_eq!(describe(&MutationRequest::default()), "no changes");

        let request = MutationRequest {
            pincode: Some("110051".to_string()),
            state: Some("Delhi".to_string()),
            photo: true,
            ..Default::default()
        };
        assert_eq!(describe(&request), "pincode=110051, state=Delhi, photo");
    }

    #[test]
    fn test_missing_key_file() {
        env_logger::try_init().ok();
        assert!(load_signer(Path::new("nonexistent.pem")).is_err());
    }
}

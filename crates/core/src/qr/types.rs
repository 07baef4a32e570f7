//! Layout constants and data structures for the Aadhaar secure QR record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{QrError, Result};

/// Reserved byte separating fields in the record. Never valid field content.
pub const SENTINEL: u8 = 255;

/// Number of sentinel-terminated fields in front of the photo in a legacy record.
///
/// Every sentinel count used by the framer, the photo locator and the version
/// migrator is derived from this one constant.
pub const LEGACY_FRAME_FIELDS: usize = 16;

/// `"V2"` followed by a sentinel, prepended by the version upgrade
pub const V2_MARKER: [u8; 3] = [b'V', b'2', SENTINEL];

/// Mock last four digits of the phone number, inserted after the VTC field
pub const MOCK_PHONE_SUFFIX: [u8; 5] = [b'1', b'2', b'3', b'4', SENTINEL];

/// Byte offset of the issuance timestamp inside a legacy record
pub const TIMESTAMP_OFFSET: usize = 6;

/// Width of the `YYYYMMDDHHMMSSmmm` issuance timestamp
pub const TIMESTAMP_LEN: usize = 17;

/// Signature length of the 2048-bit RSA keys UIDAI signs with
pub const UIDAI_SIGNATURE_LEN: usize = 256;

/// Identity fields of the secure QR, in record order.
///
/// The discriminant is the field's ordinal. On a legacy record that is also its
/// split position; on a V2 record it is the index of the sentinel preceding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdField {
    EmailMobilePresentBitIndicator = 0,
    ReferenceId = 1,
    Name = 2,
    Dob = 3,
    Gender = 4,
    CareOf = 5,
    District = 6,
    Landmark = 7,
    House = 8,
    Location = 9,
    PinCode = 10,
    PostOffice = 11,
    State = 12,
    Street = 13,
    SubDistrict = 14,
    Vtc = 15,
    PhoneNumberLast4 = 16,
}

impl IdField {
    /// All fields in record order
    pub const ALL: [IdField; 17] = [
        IdField::EmailMobilePresentBitIndicator,
        IdField::ReferenceId,
        IdField::Name,
        IdField::Dob,
        IdField::Gender,
        IdField::CareOf,
        IdField::District,
        IdField::Landmark,
        IdField::House,
        IdField::Location,
        IdField::PinCode,
        IdField::PostOffice,
        IdField::State,
        IdField::Street,
        IdField::SubDistrict,
        IdField::Vtc,
        IdField::PhoneNumberLast4,
    ];

    /// Ordinal position of the field
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            IdField::EmailMobilePresentBitIndicator => "email_mobile_present_bit_indicator",
            IdField::ReferenceId => "reference_id",
            IdField::Name => "name",
            IdField::Dob => "dob",
            IdField::Gender => "gender",
            IdField::CareOf => "care_of",
            IdField::District => "district",
            IdField::Landmark => "landmark",
            IdField::House => "house",
            IdField::Location => "location",
            IdField::PinCode => "pincode",
            IdField::PostOffice => "post_office",
            IdField::State => "state",
            IdField::Street => "street",
            IdField::SubDistrict => "sub_district",
            IdField::Vtc => "vtc",
            IdField::PhoneNumberLast4 => "phone_number_last4",
        }
    }
}

// The field table must cover the legacy frame plus the V2 phone suffix, in ordinal order.
const _: () = {
    assert!(IdField::ALL.len() == LEGACY_FRAME_FIELDS + 1);
    let mut i = 0;
    while i < IdField::ALL.len() {
        assert!(IdField::ALL[i] as usize == i);
        i += 1;
    }
};

/// Framing of a decoded record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameLayout {
    /// UIDAI sample layout: 16 fields, then the photo
    Legacy,
    /// `V2` marker field, the 16 legacy fields, the phone suffix, then the photo
    V2,
}

impl FrameLayout {
    /// Sentinels in front of the photo
    pub const fn frame_sentinels(self) -> usize {
        match self {
            FrameLayout::Legacy => LEGACY_FRAME_FIELDS,
            FrameLayout::V2 => LEGACY_FRAME_FIELDS + 2,
        }
    }

    /// Split position of identity field 0
    pub const fn field_shift(self) -> usize {
        match self {
            FrameLayout::Legacy => 0,
            FrameLayout::V2 => 1,
        }
    }

    /// Byte offset of the issuance timestamp
    pub const fn timestamp_offset(self) -> usize {
        match self {
            FrameLayout::Legacy => TIMESTAMP_OFFSET,
            FrameLayout::V2 => TIMESTAMP_OFFSET + V2_MARKER.len(),
        }
    }

    /// Identity fields present in this layout
    pub fn fields(self) -> &'static [IdField] {
        match self {
            FrameLayout::Legacy => &IdField::ALL[..LEGACY_FRAME_FIELDS],
            FrameLayout::V2 => &IdField::ALL,
        }
    }

    /// Detect the layout from the leading version marker
    pub fn detect(record: &[u8]) -> Self {
        if record.starts_with(&V2_MARKER) {
            FrameLayout::V2
        } else {
            FrameLayout::Legacy
        }
    }
}

/// Caller-supplied changes to a seed record. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationRequest {
    /// Date of birth in DD-MM-YYYY format
    pub dob: Option<String>,

    /// Gender: M/F/T
    pub gender: Option<String>,

    /// PIN code digits
    pub pincode: Option<String>,

    /// State name
    pub state: Option<String>,

    /// Replace the photo with random bytes of the same length
    pub photo: bool,
}

impl MutationRequest {
    /// Check every supplied value before any buffer is touched
    pub fn validate(&self) -> Result<()> {
        if let Some(ref dob) = self.dob {
            if dob.len() != 10 || NaiveDate::parse_from_str(dob, "%d-%m-%Y").is_err() {
                return Err(QrError::InvalidInput(format!(
                    "Date of birth must be DD-MM-YYYY, got '{}'",
                    dob
                )));
            }
        }

        if let Some(ref gender) = self.gender {
            if !matches!(gender.as_str(), "M" | "F" | "T") {
                return Err(QrError::InvalidInput(format!(
                    "Gender must be one of M, F, T, got '{}'",
                    gender
                )));
            }
        }

        if let Some(ref pincode) = self.pincode {
            if pincode.is_empty() || !pincode.chars().all(|c| c.is_ascii_digit()) {
                return Err(QrError::InvalidInput(format!(
                    "PIN code must contain only digits (0-9), got '{}'",
                    pincode
                )));
            }
        }

        if let Some(ref state) = self.state {
            if state.trim().is_empty() {
                return Err(QrError::InvalidInput("State cannot be empty".to_string()));
            }
        }

        Ok(())
    }

    /// Text replacements in the order they are applied
    pub fn field_updates(&self) -> Vec<(IdField, &str)> {
        [
            (IdField::Dob, self.dob.as_deref()),
            (IdField::Gender, self.gender.as_deref()),
            (IdField::PinCode, self.pincode.as_deref()),
            (IdField::State, self.state.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

/// Decoded text fields of a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFields {
    /// Version marker, present on V2 records only
    pub version: Option<String>,
    pub email_mobile_indicator: String,
    /// Last 4 digits of the Aadhaar number followed by the issuance timestamp
    pub reference_id: String,
    pub name: String,
    /// Date of birth in DD-MM-YYYY format
    pub dob: String,
    pub gender: String,
    pub care_of: String,
    pub district: String,
    pub landmark: String,
    pub house: String,
    pub location: String,
    pub pincode: String,
    pub post_office: String,
    pub state: String,
    pub street: String,
    pub sub_district: String,
    pub vtc: String,
    /// Present on V2 records only
    pub phone_last4: Option<String>,
}

impl IdentityFields {
    pub fn get(&self, field: IdField) -> Option<&str> {
        let value = match field {
            IdField::EmailMobilePresentBitIndicator => &self.email_mobile_indicator,
            IdField::ReferenceId => &self.reference_id,
            IdField::Name => &self.name,
            IdField::Dob => &self.dob,
            IdField::Gender => &self.gender,
            IdField::CareOf => &self.care_of,
            IdField::District => &self.district,
            IdField::Landmark => &self.landmark,
            IdField::House => &self.house,
            IdField::Location => &self.location,
            IdField::PinCode => &self.pincode,
            IdField::PostOffice => &self.post_office,
            IdField::State => &self.state,
            IdField::Street => &self.street,
            IdField::SubDistrict => &self.sub_district,
            IdField::Vtc => &self.vtc,
            IdField::PhoneNumberLast4 => return self.phone_last4.as_deref(),
        };
        Some(value.as_str())
    }

    pub fn set(&mut self, field: IdField, value: String) {
        match field {
            IdField::EmailMobilePresentBitIndicator => self.email_mobile_indicator = value,
            IdField::ReferenceId => self.reference_id = value,
            IdField::Name => self.name = value,
            IdField::Dob => self.dob = value,
            IdField::Gender => self.gender = value,
            IdField::CareOf => self.care_of = value,
            IdField::District => self.district = value,
            IdField::Landmark => self.landmark = value,
            IdField::House => self.house = value,
            IdField::Location => self.location = value,
            IdField::PinCode => self.pincode = value,
            IdField::PostOffice => self.post_office = value,
            IdField::State => self.state = value,
            IdField::Street => self.street = value,
            IdField::SubDistrict => self.sub_district = value,
            IdField::Vtc => self.vtc = value,
            IdField::PhoneNumberLast4 => self.phone_last4 = Some(value),
        }
    }

    /// Parse the date of birth string into a NaiveDate
    pub fn parse_dob(&self) -> std::result::Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(&self.dob, "%d-%m-%Y")
    }

    /// Last 4 digits of the Aadhaar number, taken from the reference id
    pub fn aadhaar_last4(&self) -> Option<&str> {
        self.reference_id.get(..4)
    }
}

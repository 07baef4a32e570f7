//! Secure QR record handling: codec, framing, splicing and the V2 upgrade

pub mod codec;
pub mod framer;
pub mod migrate;
pub mod photo;
pub mod sample;
pub mod splice;
pub mod timestamp;
pub mod types;

pub use codec::{bigint_to_bytes, bytes_to_bigint, compress, decode_qr_string, decompress, encode_qr_string};
pub use framer::{end_of_frame, field_body_range, find_field_range, read_identity, split_fields, FieldFrame};
pub use migrate::upgrade_to_v2;
pub use photo::{locate_photo, randomize_photo, PhotoRange};
pub use splice::{insert_bytes, replace_field, splice_bytes};
pub use timestamp::{date_to_unix, format_timestamp, parse_timestamp, read_timestamp, record_issue_time, restamp_record};
pub use types::*;

//! Legacy to V2 framing upgrade

use crate::error::{QrError, Result};
use crate::qr::framer::end_of_frame;
use crate::qr::splice::insert_bytes;
use crate::qr::types::{FrameLayout, LEGACY_FRAME_FIELDS, MOCK_PHONE_SUFFIX, V2_MARKER};

/// Turn a legacy record into the secure QR V2 layout.
///
/// Adds the `V2` marker field in front and a mock phone suffix after the VTC
/// field. The suffix offset is taken from the record before the marker is
/// prepended; doing it the other way round would shift it by three bytes.
pub fn upgrade_to_v2(record: &[u8]) -> Result<Vec<u8>> {
    if FrameLayout::detect(record) == FrameLayout::V2 {
        return Err(QrError::InvalidInput("Record already carries the V2 marker".to_string()));
    }

    let suffix_at = end_of_frame(record, LEGACY_FRAME_FIELDS)?;
    log::debug!("Inserting phone suffix at offset {}", suffix_at);

    let with_suffix = insert_bytes(record, suffix_at, &MOCK_PHONE_SUFFIX)?;
    let upgraded = insert_bytes(&with_suffix, 0, &V2_MARKER)?;

    log::info!("Upgraded record to V2: {} -> {} bytes", record.len(), upgraded.len());
    Ok(upgraded)
}

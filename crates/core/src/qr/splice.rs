//! Splice-and-shift buffer surgery
//!
//! Every mutation of a record goes through [`splice_bytes`], which replaces an
//! **inclusive** range `[start, end]`. The range is one byte wider than the
//! usual half-open slice: field replacement and timestamp offsets are all
//! computed against this convention, so it must not be "fixed" to `start..end`.

use crate::error::{QrError, Result};
use crate::qr::framer::field_body_range;
use crate::qr::types::{FrameLayout, IdField};

/// Replace bytes `start..=end` of `record` with `replacement`, shifting the tail.
///
/// Requires `start <= end < record.len()`. Otherwise returns
/// [`QrError::InvalidRange`] and leaves `record` untouched.
pub fn splice_bytes(record: &[u8], replacement: &[u8], start: usize, end: usize) -> Result<Vec<u8>> {
    if start > end || end >= record.len() {
        log::warn!(
            "Rejected splice [{}, {}] on buffer of length {}",
            start,
            end,
            record.len()
        );
        return Err(QrError::InvalidRange {
            start,
            end,
            len: record.len(),
        });
    }

    let mut out = Vec::with_capacity(record.len() - (end - start + 1) + replacement.len());
    out.extend_from_slice(&record[..start]);
    out.extend_from_slice(replacement);
    out.extend_from_slice(&record[end + 1..]);
    Ok(out)
}

/// Insert `bytes` before index `at`. `at == record.len()` appends.
pub fn insert_bytes(record: &[u8], at: usize, bytes: &[u8]) -> Result<Vec<u8>> {
    if at > record.len() {
        return Err(QrError::InvalidRange {
            start: at,
            end: at,
            len: record.len(),
        });
    }

    let mut out = Vec::with_capacity(record.len() + bytes.len());
    out.extend_from_slice(&record[..at]);
    out.extend_from_slice(bytes);
    out.extend_from_slice(&record[at..]);
    Ok(out)
}

/// Replace the body of `field`, locating it on the current buffer.
///
/// Offsets are re-resolved on every call, so earlier splices that changed the
/// record length are accounted for. An empty body has no inclusive range, so the
/// value is inserted in front of the field's closing sentinel instead.
pub fn replace_field(record: &[u8], layout: FrameLayout, field: IdField, value: &[u8]) -> Result<Vec<u8>> {
    if !layout.fields().contains(&field) {
        return Err(QrError::InvalidInput(format!(
            "Field {} is not part of the {:?} layout",
            field.name(),
            layout
        )));
    }

    let body = field_body_range(record, field.index() + layout.field_shift())?;
    log::debug!(
        "Replacing {} at [{}, {}) with {} bytes",
        field.name(),
        body.start,
        body.end,
        value.len()
    );

    if body.is_empty() {
        log::warn!("{} is empty in the seed, inserting at {}", field.name(), body.start);
        return insert_bytes(record, body.start, value);
    }

    splice_bytes(record, value, body.start, body.end - 1)
}

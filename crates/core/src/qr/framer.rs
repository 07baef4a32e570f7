//! Sentinel-delimited field framing

use std::ops::Range;

use crate::error::{QrError, Result};
use crate::qr::types::{FrameLayout, IdentityFields, SENTINEL};

/// Fields split off the front of a record, with the absolute position of each closing sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFrame<'a> {
    pub fields: Vec<&'a [u8]>,
    pub delimiters: Vec<usize>,
}

/// Split the first `max_fields` sentinel-terminated fields off `record`.
///
/// Bytes after the last consumed sentinel (the photo, the signature) are not returned.
/// A record with fewer sentinels yields fewer fields.
pub fn split_fields(record: &[u8], max_fields: usize) -> FieldFrame<'_> {
    let mut fields = Vec::with_capacity(max_fields);
    let mut delimiters = Vec::with_capacity(max_fields);
    let mut field_start = 0;

    for (i, &byte) in record.iter().enumerate() {
        if delimiters.len() == max_fields {
            break;
        }
        if byte == SENTINEL {
            fields.push(&record[field_start..i]);
            delimiters.push(i);
            field_start = i + 1;
        }
    }

    FieldFrame { fields, delimiters }
}

fn sentinel_positions(record: &[u8]) -> impl Iterator<Item = usize> + '_ {
    record
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == SENTINEL)
        .map(|(i, _)| i)
}

/// Range from the `field_index`-th sentinel (zero-based) up to the next one.
///
/// `start` is the sentinel itself; the field body is `start + 1..end`. On a V2
/// record `IdField::X.index()` addresses field `X` directly.
pub fn find_field_range(record: &[u8], field_index: usize) -> Result<Range<usize>> {
    let mut positions = sentinel_positions(record).skip(field_index);

    match (positions.next(), positions.next()) {
        (Some(start), Some(end)) => Ok(start..end),
        _ => Err(QrError::FieldNotFound {
            index: field_index + 1,
            found: sentinel_positions(record).count(),
        }),
    }
}

/// Index just past the `sentinel_count`-th sentinel
pub fn end_of_frame(record: &[u8], sentinel_count: usize) -> Result<usize> {
    if sentinel_count == 0 {
        return Ok(0);
    }

    sentinel_positions(record)
        .nth(sentinel_count - 1)
        .map(|pos| pos + 1)
        .ok_or_else(|| QrError::FieldNotFound {
            index: sentinel_count - 1,
            found: sentinel_positions(record).count(),
        })
}

/// Body range of the field at split position `position`
pub fn field_body_range(record: &[u8], position: usize) -> Result<Range<usize>> {
    if position == 0 {
        let end = end_of_frame(record, 1)? - 1;
        return Ok(0..end);
    }

    let range = find_field_range(record, position - 1)?;
    Ok(range.start + 1..range.end)
}

/// Decode every framed text field of a record
pub fn read_identity(record: &[u8], layout: FrameLayout) -> Result<IdentityFields> {
    let frame = split_fields(record, layout.frame_sentinels());
    if frame.delimiters.len() < layout.frame_sentinels() {
        return Err(QrError::FieldNotFound {
            index: layout.frame_sentinels() - 1,
            found: frame.delimiters.len(),
        });
    }

    let text = |bytes: &[u8]| String::from_utf8_lossy(bytes).to_string();

    let mut identity = IdentityFields::default();
    if layout == FrameLayout::V2 {
        identity.version = Some(text(frame.fields[0]));
    }
    for &field in layout.fields() {
        identity.set(field, text(frame.fields[field.index() + layout.field_shift()]));
    }

    log::debug!("Read {} fields from {:?} record", layout.fields().len(), layout);
    Ok(identity)
}

//! Locating and scrubbing the trailing photo sub-record

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{QrError, Result};
use crate::qr::framer::end_of_frame;
use crate::qr::splice::splice_bytes;
use crate::qr::types::FrameLayout;

/// Photo bytes span `start + 1..start + 1 + len`; `start` is the last frame sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoRange {
    pub start: usize,
    pub len: usize,
}

impl PhotoRange {
    pub fn bytes<'a>(&self, record: &'a [u8]) -> &'a [u8] {
        &record[self.start + 1..self.start + 1 + self.len]
    }
}

/// Find the photo that follows the layout's frame and runs up to `total_len`
pub fn locate_photo(record: &[u8], total_len: usize, layout: FrameLayout) -> Result<PhotoRange> {
    if total_len > record.len() {
        return Err(QrError::InvalidRange {
            start: 0,
            end: total_len,
            len: record.len(),
        });
    }

    let begin = end_of_frame(record, layout.frame_sentinels())?;
    if begin > total_len {
        return Err(QrError::InvalidRange {
            start: begin,
            end: total_len,
            len: record.len(),
        });
    }

    Ok(PhotoRange {
        start: begin - 1,
        len: total_len - begin,
    })
}

/// Overwrite the photo with CSPRNG bytes of the same length
pub fn randomize_photo(record: &[u8], total_len: usize, layout: FrameLayout) -> Result<Vec<u8>> {
    let photo = locate_photo(record, total_len, layout)?;
    log::debug!("Photo located at [{}, {}), {} bytes", photo.start + 1, total_len, photo.len);

    let mut noise = vec![0u8; photo.len];
    OsRng.fill_bytes(&mut noise);

    // An empty photo leaves end below start and is rejected by the splicer.
    splice_bytes(record, &noise, photo.start + 1, photo.start + photo.len)
}

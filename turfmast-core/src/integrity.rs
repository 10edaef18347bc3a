use sha1::{Digest, Sha1};

use crate::layout::EXPECTED_SHA1;
use crate::{RandomiserError, Result};

pub fn digest(bytes: &[u8]) -> [u8; 20] {
    let hash = Sha1::digest(bytes);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash);
    out
}

pub fn to_hex(digest: &[u8]) -> String {
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Refuse anything but the one P1 image the layout tables describe.
///
/// `bytes` must be the file exactly as read, before any word swapping.
pub fn verify(bytes: &[u8]) -> Result<()> {
    let actual = digest(bytes);
    if actual != EXPECTED_SHA1 {
        return Err(RandomiserError::ChecksumMismatch {
            expected: to_hex(&EXPECTED_SHA1),
            actual: to_hex(&actual),
        });
    }
    Ok(())
}

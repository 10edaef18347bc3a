//! Big-endian encoding helpers.
//!
//! Everything the game reads is big-endian (68k), independent of the host,
//! so these never consult the host byte order.

pub const fn to_big16(val: u16) -> [u8; 2] {
    val.to_be_bytes()
}

pub const fn to_big32(val: u32) -> [u8; 4] {
    val.to_be_bytes()
}

pub const fn to_big64(val: u64) -> [u8; 8] {
    val.to_be_bytes()
}

pub const fn from_big16(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

pub const fn from_big32(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

pub const fn from_big64(bytes: [u8; 8]) -> u64 {
    u64::from_be_bytes(bytes)
}

/// Swap the two bytes of every 16-bit word in place.
///
/// Dumped P1 images store each word byte-swapped, so this toggles between
/// the on-disk order and the CPU's view of the data. A trailing odd byte is
/// left where it is.
pub fn swap16_all(buf: &mut [u8]) {
    for word in buf.chunks_exact_mut(2) {
        word.swap(0, 1);
    }
}

use crate::endian::{from_big16, from_big32, swap16_all, to_big16, to_big32};

/// Stored pointers are CPU addresses; flipping this bit turns one into a byte
/// offset within the P1 image.
pub const POINTER_MASK: u32 = 0x10_0000;

/// The whole P1 program image.
///
/// Accessors index the buffer directly: every offset comes from the fixed
/// layout of the one supported (hash-verified) image, so an out-of-range
/// offset is a bug in the layout tables and panics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
    data: Vec<u8>,
}

impl Image {
    pub fn new(data: Vec<u8>) -> Self {
        Image { data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Toggle between on-disk word order and working (CPU) order.
    pub fn swap_words(&mut self) {
        swap16_all(&mut self.data);
    }

    pub fn read_u16(&self, offset: usize) -> u16 {
        from_big16([self.data[offset], self.data[offset + 1]])
    }

    pub fn write_u16(&mut self, offset: usize, val: u16) {
        self.data[offset..offset + 2].copy_from_slice(&to_big16(val));
    }

    pub fn read_u32(&self, offset: usize) -> u32 {
        from_big32([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ])
    }

    pub fn write_u32(&mut self, offset: usize, val: u32) {
        self.data[offset..offset + 4].copy_from_slice(&to_big32(val));
    }

    pub fn read_n(&self, offset: usize, n: usize) -> &[u8] {
        &self.data[offset..offset + n]
    }

    pub fn write_n(&mut self, offset: usize, bytes: &[u8]) {
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Dereference the masked pointer stored at `offset`.
    pub fn resolve_pointer(&self, offset: usize) -> usize {
        (self.read_u32(offset) ^ POINTER_MASK) as usize
    }
}

use rand::RngCore;

pub const COURSE_COUNT: usize = 4;
pub const HOLES_PER_COURSE: usize = 18;
pub const SLOT_COUNT: usize = COURSE_COUNT * HOLES_PER_COURSE;

/// One of the 72 holes, identified by its 0-based course and hole number.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct HoleSlot {
    pub course: u8,
    pub hole: u8,
}

impl HoleSlot {
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < SLOT_COUNT);
        HoleSlot {
            course: (index / HOLES_PER_COURSE) as u8,
            hole: (index % HOLES_PER_COURSE) as u8,
        }
    }

    pub fn index(self) -> usize {
        self.course as usize * HOLES_PER_COURSE + self.hole as usize
    }

    /// Decode a 16-bit reference field: course in the high byte, 1-based hole
    /// in the low byte.
    pub fn from_field16(field: u16) -> Self {
        HoleSlot {
            course: (field >> 8) as u8,
            hole: ((field & 0xFF) as u8).wrapping_sub(1),
        }
    }

    pub fn to_field16(self) -> u16 {
        ((self.course as u16) << 8) | (self.hole as u16 + 1)
    }

    /// Decode a 32-bit reference field: course in the high half, 1-based hole
    /// in the low half.
    ///
    /// Panics if either half does not fit the byte-sized slot, the same way an
    /// out-of-range 16-bit field fails when it is looked up in a permutation.
    pub fn from_field32(field: u32) -> Self {
        let course = u8::try_from(field >> 16);
        let hole = u8::try_from((field & 0xFFFF).wrapping_sub(1));
        match (course, hole) {
            (Ok(course), Ok(hole)) => HoleSlot { course, hole },
            _ => panic!("hole reference {:#010X} out of range", field),
        }
    }

    pub fn to_field32(self) -> u32 {
        ((self.course as u32) << 16) | (self.hole as u32 + 1)
    }
}

/// Old slot -> new slot mapping over all 72 holes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Permutation {
    old_to_new: [u8; SLOT_COUNT],
}

impl Permutation {
    pub fn identity() -> Self {
        let mut old_to_new = [0u8; SLOT_COUNT];
        for (i, slot) in old_to_new.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Permutation { old_to_new }
    }

    /// Fisher-Yates over the identity, one draw per position except the last.
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut perm = Self::identity();
        for i in 0..SLOT_COUNT - 1 {
            let remaining = (SLOT_COUNT - i) as u32;
            let j = i + (rng.next_u32() % remaining) as usize;
            perm.old_to_new.swap(i, j);
        }
        perm
    }

    pub fn apply(&self, old: HoleSlot) -> HoleSlot {
        HoleSlot::from_index(self.old_to_new[old.index()] as usize)
    }

    pub fn inverse(&self) -> Self {
        let mut old_to_new = [0u8; SLOT_COUNT];
        for (old, &new) in self.old_to_new.iter().enumerate() {
            old_to_new[new as usize] = old as u8;
        }
        Permutation { old_to_new }
    }

    /// `(old, new)` pairs in old-slot order.
    pub fn moves(&self) -> impl Iterator<Item = (HoleSlot, HoleSlot)> + '_ {
        self.old_to_new
            .iter()
            .enumerate()
            .map(|(old, &new)| (HoleSlot::from_index(old), HoleSlot::from_index(new as usize)))
    }

    #[cfg(test)]
    pub(crate) fn swapping(a: usize, b: usize) -> Self {
        let mut perm = Self::identity();
        perm.old_to_new.swap(a, b);
        perm
    }
}

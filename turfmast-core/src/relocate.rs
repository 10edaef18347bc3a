use tracing::debug;

use crate::image::Image;
use crate::layout::{FieldWidth, ReferenceTable, RegionDescriptor};
use crate::slot::{HoleSlot, Permutation, HOLES_PER_COURSE};

/// Move every hole's record in `region` to the slot `perm` assigns it.
///
/// All four course tables are staged before the first write, since a record
/// written early may land on a source that has not been read yet.
pub fn shuffle(image: &mut Image, perm: &Permutation, region: &RegionDescriptor) {
    let span = HOLES_PER_COURSE * region.stride;
    let staged: Vec<Vec<u8>> = region
        .bases
        .iter()
        .map(|&base| image.read_n(base, span).to_vec())
        .collect();

    for (old, new) in perm.moves() {
        let src_off = old.hole as usize * region.stride;
        let record = &staged[old.course as usize][src_off..src_off + region.size];
        let dst = region.bases[new.course as usize] + new.hole as usize * region.stride;
        image.write_n(dst, record);
    }

    debug!(region = region.name, "relocated {} records", perm.moves().count());
}

/// Rewrite a run of 16-bit (course, hole) references through `perm`.
///
/// `stride` is in words. Stops at the first field equal to `terminator`
/// (left as is) or after `count` fields. With no count the table must
/// contain the terminator. Returns the number of fields rewritten.
pub fn reindex16(
    image: &mut Image,
    perm: &Permutation,
    offset: usize,
    stride: usize,
    terminator: u16,
    count: Option<usize>,
) -> usize {
    let mut off = offset;
    let mut rewritten = 0;
    for _ in 0..count.unwrap_or(usize::MAX) {
        let field = image.read_u16(off);
        if field == terminator {
            break;
        }
        let slot = perm.apply(HoleSlot::from_field16(field));
        image.write_u16(off, slot.to_field16());
        rewritten += 1;
        off += stride * 2;
    }
    rewritten
}

/// 32-bit counterpart of [`reindex16`]; `stride` is in longwords.
pub fn reindex32(
    image: &mut Image,
    perm: &Permutation,
    offset: usize,
    stride: usize,
    terminator: u32,
    count: Option<usize>,
) -> usize {
    let mut off = offset;
    let mut rewritten = 0;
    for _ in 0..count.unwrap_or(usize::MAX) {
        let field = image.read_u32(off);
        if field == terminator {
            break;
        }
        let slot = perm.apply(HoleSlot::from_field32(field));
        image.write_u32(off, slot.to_field32());
        rewritten += 1;
        off += stride * 4;
    }
    rewritten
}

pub fn reindex_table(image: &mut Image, perm: &Permutation, table: &ReferenceTable) -> usize {
    let rewritten = match table.width {
        FieldWidth::Word => reindex16(
            image,
            perm,
            table.offset,
            table.stride,
            table.terminator as u16,
            table.count,
        ),
        FieldWidth::Long => reindex32(
            image,
            perm,
            table.offset,
            table.stride,
            table.terminator,
            table.count,
        ),
    };
    debug!(table = table.name, "rewrote {} references", rewritten);
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::SLOT_COUNT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    // Course tables deliberately out of address order, like the real image.
    const TEST_REGION: RegionDescriptor = RegionDescriptor {
        name: "test records",
        bases: [0x100, 0x300, 0x400, 0x200],
        size: 5,
        stride: 6,
    };

    const WORD_TABLE: ReferenceTable = ReferenceTable {
        name: "test words",
        width: FieldWidth::Word,
        offset: 0x500,
        stride: 2,
        terminator: 0xFFFF,
        count: None,
    };

    const LONG_TABLE: ReferenceTable = ReferenceTable {
        name: "test longs",
        width: FieldWidth::Long,
        offset: 0x600,
        stride: 1,
        terminator: 0,
        count: Some(4),
    };

    /// Every record starts with its own slot number, padding bytes are 0xEE,
    /// and the gap byte between records is 0xCC.
    fn tagged_image() -> Image {
        let mut image = Image::new(vec![0xAA; 0x800]);
        for index in 0..SLOT_COUNT {
            let slot = HoleSlot::from_index(index);
            let off = TEST_REGION.bases[slot.course as usize] + slot.hole as usize * TEST_REGION.stride;
            image.write_n(off, &[index as u8, 0xEE, 0xEE, 0xEE, 0xEE, 0xCC]);
        }
        image
    }

    fn write_words(image: &mut Image, table: &ReferenceTable, slots: &[usize]) {
        for (i, &slot) in slots.iter().enumerate() {
            let off = table.offset + i * table.stride * 2;
            image.write_u16(off, HoleSlot::from_index(slot).to_field16());
        }
    }

    fn record_at(image: &Image, slot: HoleSlot) -> u8 {
        let off = TEST_REGION.bases[slot.course as usize] + slot.hole as usize * TEST_REGION.stride;
        image.read_n(off, 1)[0]
    }

    #[test]
    fn shuffle_places_each_record_at_its_new_slot() {
        let mut image = tagged_image();
        let perm = Permutation::generate(&mut Pcg32::seed_from_u64(3));

        shuffle(&mut image, &perm, &TEST_REGION);

        for (old, new) in perm.moves() {
            assert_eq!(record_at(&image, new) as usize, old.index());
        }
    }

    #[test]
    fn shuffle_leaves_gap_bytes_and_other_data_alone() {
        let original = tagged_image();
        let mut image = original.clone();
        let perm = Permutation::generate(&mut Pcg32::seed_from_u64(11));

        shuffle(&mut image, &perm, &TEST_REGION);

        for index in 0..SLOT_COUNT {
            let slot = HoleSlot::from_index(index);
            let gap = TEST_REGION.bases[slot.course as usize]
                + slot.hole as usize * TEST_REGION.stride
                + TEST_REGION.size;
            assert_eq!(image.read_n(gap, 1), &[0xCC]);
        }
        assert_eq!(image.read_n(0, 0x100), original.read_n(0, 0x100));
        assert_eq!(image.read_n(0x500, 0x300), original.read_n(0x500, 0x300));
    }

    #[test]
    fn shuffle_then_inverse_restores_the_image() {
        let original = tagged_image();
        let mut image = original.clone();
        let perm = Permutation::generate(&mut Pcg32::seed_from_u64(0xBEEF));

        shuffle(&mut image, &perm, &TEST_REGION);
        assert_ne!(image, original);
        shuffle(&mut image, &perm.inverse(), &TEST_REGION);
        assert_eq!(image, original);
    }

    #[test]
    fn reindex16_maps_fields_up_to_the_terminator() {
        let mut image = Image::new(vec![0; 0x800]);
        write_words(&mut image, &WORD_TABLE, &[0, 5, 71, 30]);
        image.write_u16(WORD_TABLE.offset + 4 * 4, 0xFFFF);
        // Past the terminator: must survive untouched.
        image.write_u16(WORD_TABLE.offset + 5 * 4, 0x0001);
        let perm = Permutation::generate(&mut Pcg32::seed_from_u64(99));

        let rewritten = reindex_table(&mut image, &perm, &WORD_TABLE);

        assert_eq!(rewritten, 4);
        for (i, &old) in [0usize, 5, 71, 30].iter().enumerate() {
            let field = image.read_u16(WORD_TABLE.offset + i * 4);
            assert_eq!(
                HoleSlot::from_field16(field),
                perm.apply(HoleSlot::from_index(old))
            );
        }
        assert_eq!(image.read_u16(WORD_TABLE.offset + 4 * 4), 0xFFFF);
        assert_eq!(image.read_u16(WORD_TABLE.offset + 5 * 4), 0x0001);
    }

    #[test]
    fn reindex16_does_not_touch_words_between_strided_fields() {
        let mut image = Image::new(vec![0x77; 0x800]);
        write_words(&mut image, &WORD_TABLE, &[1, 2]);
        image.write_u16(WORD_TABLE.offset + 2 * 4, 0xFFFF);
        let perm = Permutation::generate(&mut Pcg32::seed_from_u64(5));

        reindex_table(&mut image, &perm, &WORD_TABLE);

        assert_eq!(image.read_u16(WORD_TABLE.offset + 2), 0x7777);
        assert_eq!(image.read_u16(WORD_TABLE.offset + 6), 0x7777);
    }

    #[test]
    fn reindex32_honours_count_without_terminator() {
        let mut image = Image::new(vec![0; 0x800]);
        let slots = [3usize, 40, 17, 54, 9];
        for (i, &slot) in slots.iter().enumerate() {
            image.write_u32(LONG_TABLE.offset + i * 4, HoleSlot::from_index(slot).to_field32());
        }
        let perm = Permutation::generate(&mut Pcg32::seed_from_u64(1234));

        let rewritten = reindex_table(&mut image, &perm, &LONG_TABLE);

        assert_eq!(rewritten, 4);
        for (i, &old) in slots[..4].iter().enumerate() {
            let field = image.read_u32(LONG_TABLE.offset + i * 4);
            assert_eq!(
                HoleSlot::from_field32(field),
                perm.apply(HoleSlot::from_index(old))
            );
        }
        // Fifth field is beyond the count.
        assert_eq!(
            image.read_u32(LONG_TABLE.offset + 16),
            HoleSlot::from_index(9).to_field32()
        );
    }

    #[test]
    fn reindex16_honours_count_without_terminator() {
        // Shaped like the water-plane table: counted, four words apart.
        let mut image = Image::new(vec![0x55; 0x800]);
        let slots = [12usize, 66, 33, 1];
        for (i, &slot) in slots.iter().enumerate() {
            image.write_u16(0x700 + i * 8, HoleSlot::from_index(slot).to_field16());
        }
        let perm = Permutation::generate(&mut Pcg32::seed_from_u64(4321));

        let rewritten = reindex16(&mut image, &perm, 0x700, 4, 0x0000, Some(2));

        assert_eq!(rewritten, 2);
        for (i, &old) in slots[..2].iter().enumerate() {
            let field = image.read_u16(0x700 + i * 8);
            assert_eq!(
                HoleSlot::from_field16(field),
                perm.apply(HoleSlot::from_index(old))
            );
        }
        assert_eq!(image.read_u16(0x700 + 2), 0x5555);
        assert_eq!(image.read_u16(0x700 + 2 * 8), HoleSlot::from_index(33).to_field16());
        assert_eq!(image.read_u16(0x700 + 3 * 8), HoleSlot::from_index(1).to_field16());
    }

    #[test]
    fn reindex32_stops_at_terminator_before_count() {
        let mut image = Image::new(vec![0; 0x800]);
        image.write_u32(LONG_TABLE.offset, HoleSlot::from_index(0).to_field32());
        image.write_u32(LONG_TABLE.offset + 8, 0x0003_0012);
        let perm = Permutation::swapping(0, 71);

        let rewritten = reindex32(&mut image, &perm, LONG_TABLE.offset, 1, 0, Some(4));

        assert_eq!(rewritten, 1);
        assert_eq!(image.read_u32(LONG_TABLE.offset), 0x0003_0012);
        assert_eq!(image.read_u32(LONG_TABLE.offset + 4), 0);
        // Beyond the terminator at +4, so still pointing at slot 71.
        assert_eq!(image.read_u32(LONG_TABLE.offset + 8), 0x0003_0012);
    }

    #[test]
    fn identity_permutation_leaves_image_byte_identical() {
        let mut original = tagged_image();
        write_words(&mut original, &WORD_TABLE, &[0, 17, 18, 71]);
        original.write_u16(WORD_TABLE.offset + 4 * 4, 0xFFFF);
        for (i, slot) in [10usize, 20, 30, 40].iter().enumerate() {
            original.write_u32(LONG_TABLE.offset + i * 4, HoleSlot::from_index(*slot).to_field32());
        }
        let mut image = original.clone();
        let perm = Permutation::identity();

        shuffle(&mut image, &perm, &TEST_REGION);
        reindex_table(&mut image, &perm, &WORD_TABLE);
        reindex_table(&mut image, &perm, &LONG_TABLE);

        assert_eq!(image, original);
    }

    #[test]
    fn swapping_first_and_last_slot_only_moves_those_references() {
        let mut original = tagged_image();
        write_words(&mut original, &WORD_TABLE, &[0, 12, 71, 40, 0]);
        original.write_u16(WORD_TABLE.offset + 5 * 4, 0xFFFF);
        let mut image = original.clone();
        let perm = Permutation::swapping(0, 71);

        shuffle(&mut image, &perm, &TEST_REGION);
        reindex_table(&mut image, &perm, &WORD_TABLE);

        let first = HoleSlot::from_index(0);
        let last = HoleSlot::from_index(71);
        assert_eq!(image.read_u16(WORD_TABLE.offset), last.to_field16());
        assert_eq!(image.read_u16(WORD_TABLE.offset + 4), original.read_u16(WORD_TABLE.offset + 4));
        assert_eq!(image.read_u16(WORD_TABLE.offset + 8), first.to_field16());
        assert_eq!(image.read_u16(WORD_TABLE.offset + 12), original.read_u16(WORD_TABLE.offset + 12));
        assert_eq!(image.read_u16(WORD_TABLE.offset + 16), last.to_field16());
        assert_eq!(record_at(&image, first), 71);
        assert_eq!(record_at(&image, last), 0);

        // Everything but the two records and the three rewritten fields matches.
        let mut expected = original.clone();
        shuffle(&mut expected, &perm, &TEST_REGION);
        for off in [0usize, 8, 16] {
            let swapped = if expected.read_u16(WORD_TABLE.offset + off) == first.to_field16() {
                last
            } else {
                first
            };
            expected.write_u16(WORD_TABLE.offset + off, swapped.to_field16());
        }
        assert_eq!(image, expected);
    }
}

use crate::image::Image;
use crate::layout::{CourseDescriptor, HOLE_DATA_OBJECTS_PTR, HOLE_INFO_STRIDE};
use crate::slot::HOLES_PER_COURSE;

/// Marks the end of a hole's object list.
pub const OBJECT_LIST_END: u16 = 0xFFFF;
/// Bytes per object: type/flags, x, y.
pub const OBJECT_SIZE: usize = 6;

/// Tree types that any course can use; each course draws one of them.
pub const GENERIC_TREE_TYPES: [u8; 3] = [0x4, 0x5, 0xA];

/// Offset of the first object of the `hole`-th entry in a hole-info table.
pub(crate) fn objects_offset(image: &Image, hole_info: usize, hole: usize) -> usize {
    let hole_data = image.resolve_pointer(hole_info + hole * HOLE_INFO_STRIDE);
    image.resolve_pointer(hole_data + HOLE_DATA_OBJECTS_PTR)
}

/// Retype every tree on the course's holes to the course's own tree type,
/// keeping the flag byte. Returns the number of objects changed.
///
/// Must run after the hole data has been relocated.
pub fn patch_trees(image: &mut Image, course: &CourseDescriptor) -> usize {
    let mut patched = 0;
    for hole in 0..HOLES_PER_COURSE {
        let mut obj = objects_offset(image, course.hole_info, hole);
        loop {
            let type_flags = image.read_u16(obj);
            if type_flags == OBJECT_LIST_END {
                break;
            }
            let kind = (type_flags >> 8) as u8;
            if GENERIC_TREE_TYPES.contains(&kind) {
                image.write_u16(obj, ((course.tree_type as u16) << 8) | (type_flags & 0xFF));
                patched += 1;
            }
            obj += OBJECT_SIZE;
        }
    }
    patched
}

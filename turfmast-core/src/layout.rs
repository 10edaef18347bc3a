//! Fixed offsets of the supported P1 image.
//!
//! Adding or removing a relocated table is a change to one of the arrays
//! below; the routines that consume them never name an offset themselves.

use crate::slot::COURSE_COUNT;

/// SHA-1 of the only image these tables describe.
pub const EXPECTED_SHA1: [u8; 20] = [
    0xe7, 0xef, 0x87, 0xe1, 0xde, 0x21, 0xd2, 0xbb, 0x17, 0xef, 0x17, 0xbb, 0x08, 0x65, 0x7e, 0x92,
    0x36, 0x3f, 0x0e, 0x9a,
];

/// Distance between consecutive holes' entries in a course's hole-info table.
pub const HOLE_INFO_STRIDE: usize = 24;

/// Offsets from a hole's data block to its masked pin and object pointers.
pub const HOLE_DATA_PINS_PTR: usize = 2;
pub const HOLE_DATA_OBJECTS_PTR: usize = 6;

#[derive(Copy, Clone, Debug)]
pub struct CourseDescriptor {
    pub name: &'static str,
    pub hole_info: usize,
    /// Tree object type drawn with this course's scenery.
    pub tree_type: u8,
}

pub const COURSES: [CourseDescriptor; COURSE_COUNT] = [
    CourseDescriptor { name: "Course 1", hole_info: 0x157B6C, tree_type: 0xA },
    CourseDescriptor { name: "Course 2", hole_info: 0x157EFC, tree_type: 0x5 },
    CourseDescriptor { name: "Course 3", hole_info: 0x1580C4, tree_type: 0x5 },
    CourseDescriptor { name: "Course 4", hole_info: 0x157D34, tree_type: 0x4 },
];

/// A table with one fixed-size record per hole, 18 records per course.
#[derive(Copy, Clone, Debug)]
pub struct RegionDescriptor {
    pub name: &'static str,
    pub bases: [usize; COURSE_COUNT],
    pub size: usize,
    pub stride: usize,
}

pub const REGIONS: &[RegionDescriptor] = &[
    RegionDescriptor {
        name: "hole data",
        bases: [
            COURSES[0].hole_info,
            COURSES[1].hole_info,
            COURSES[2].hole_info,
            COURSES[3].hole_info,
        ],
        size: 24,
        stride: HOLE_INFO_STRIDE,
    },
    RegionDescriptor {
        name: "preview audio cues",
        bases: [0x17A280 + 2, 0x17A2EC + 2, 0x17A358 + 2, 0x17A3C4 + 2],
        size: 4,
        stride: 6,
    },
    RegionDescriptor {
        name: "preview graphic pointers",
        bases: [0x17A74C, 0x17A794, 0x17A7DC, 0x17A824],
        size: 4,
        stride: 4,
    },
    RegionDescriptor {
        name: "preview yard ranges",
        bases: [0x17A9E0, 0x17AA16, 0x17AA4C, 0x17AA82],
        size: 3,
        stride: 3,
    },
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FieldWidth {
    /// 8-bit course, 8-bit hole.
    Word,
    /// 16-bit course, 16-bit hole.
    Long,
}

/// A list of encoded (course, hole) references somewhere in the image.
#[derive(Copy, Clone, Debug)]
pub struct ReferenceTable {
    pub name: &'static str,
    pub width: FieldWidth,
    pub offset: usize,
    /// Distance between fields, in units of the field width.
    pub stride: usize,
    pub terminator: u32,
    /// `None` scans until the terminator.
    pub count: Option<usize>,
}

pub const REFERENCE_TABLES: &[ReferenceTable] = &[
    ReferenceTable {
        name: "alternate wind meter position",
        width: FieldWidth::Word,
        offset: 0x155622,
        stride: 1,
        terminator: 0x0000,
        count: None,
    },
    ReferenceTable {
        name: "cliff face sprites",
        width: FieldWidth::Word,
        offset: 0x1614E4,
        stride: 5,
        terminator: 0xFFFF,
        count: None,
    },
    ReferenceTable {
        name: "waterfall splash cue at hole start",
        width: FieldWidth::Word,
        offset: 0x161522,
        stride: 1,
        terminator: 0xFFFF,
        count: None,
    },
    ReferenceTable {
        name: "animating water planes",
        width: FieldWidth::Word,
        offset: 0x161C18,
        stride: 4,
        terminator: 0x0000,
        count: Some(2),
    },
    ReferenceTable {
        name: "preview topdown x-coord",
        width: FieldWidth::Word,
        offset: 0x17A86C,
        stride: 2,
        terminator: 0xFFFF,
        count: None,
    },
    ReferenceTable {
        name: "demo holes",
        width: FieldWidth::Long,
        offset: 0x10F2EA,
        stride: 1,
        terminator: 0x0000_0000,
        count: Some(5),
    },
    ReferenceTable {
        name: "holes with cliffs",
        width: FieldWidth::Long,
        offset: 0x15A1DC,
        stride: 2,
        terminator: 0xFFFF_FFFF,
        count: None,
    },
];

// Title screen banner.
pub const BANNER_TEXT: usize = 0xFFFC0;
pub const BANNER_TEXT_ADDR: u32 = 0x2FFFC0;
pub const BANNER_TEXT_PTRS: [usize; 2] = [0x17EEDE, 0x17EECE];
pub const BANNER_LAYOUT_WORDS: [usize; 2] = [0x17EEE6, 0x17EECA];
pub const BANNER_LAYOUT: u16 = 0x7097;
pub const WATERMARK: usize = 0xFFFE0;
/// Room for each of the banner and the watermark.
pub const BANNER_CAPACITY: usize = 0x20;

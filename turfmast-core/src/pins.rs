use rand::RngCore;
use std::f32::consts::TAU;
use tracing::warn;

use crate::image::Image;
use crate::layout::{CourseDescriptor, HOLE_DATA_PINS_PTR, HOLE_INFO_STRIDE};
use crate::slot::HOLES_PER_COURSE;
use crate::trees::{objects_offset, OBJECT_LIST_END, OBJECT_SIZE};

pub const PINS_PER_HOLE: usize = 8;
/// Pins land within this distance of the green's centre.
pub const PIN_RADIUS: f32 = 64.0;

const GREEN_OBJECT_TYPE: u8 = 0x00;

/// Uniform float in [0, 1) from one 32-bit draw.
fn draw01<R: RngCore + ?Sized>(rng: &mut R) -> f32 {
    rng.next_u32() as f32 / 4_294_967_296.0
}

/// Point uniformly distributed over the disk of radius [`PIN_RADIUS`].
///
/// The square root on the radius keeps the density even across the area;
/// without it pins cluster around the centre.
pub(crate) fn sample_disk<R: RngCore + ?Sized>(rng: &mut R) -> (f32, f32) {
    let radius = PIN_RADIUS * draw01(rng).sqrt();
    let theta = draw01(rng) * TAU;
    (radius * theta.cos(), radius * theta.sin())
}

/// Position of the first green object in the list at `objects`, if any.
fn find_green(image: &Image, mut objects: usize) -> Option<(u16, u16)> {
    loop {
        let type_flags = image.read_u16(objects);
        if type_flags == OBJECT_LIST_END {
            return None;
        }
        if (type_flags >> 8) as u8 == GREEN_OBJECT_TYPE {
            return Some((image.read_u16(objects + 2), image.read_u16(objects + 4)));
        }
        objects += OBJECT_SIZE;
    }
}

/// Scatter fresh pin positions around each green on the course. Returns the
/// number of holes updated.
pub fn randomize_pins<R: RngCore + ?Sized>(
    image: &mut Image,
    course: &CourseDescriptor,
    rng: &mut R,
) -> usize {
    let mut updated = 0;
    for hole in 0..HOLES_PER_COURSE {
        let hole_data = image.resolve_pointer(course.hole_info + hole * HOLE_INFO_STRIDE);
        let pins = image.resolve_pointer(hole_data + HOLE_DATA_PINS_PTR);
        let objects = objects_offset(image, course.hole_info, hole);

        let Some((green_x, green_y)) = find_green(image, objects) else {
            warn!(course = course.name, hole = hole + 1, "no green object, pins left as is");
            continue;
        };

        for pin in 0..PINS_PER_HOLE {
            let (dx, dy) = sample_disk(rng);
            let off = pins + pin * 4;
            image.write_u16(off, green_x.wrapping_add_signed(dx.round() as i16));
            image.write_u16(off + 2, green_y.wrapping_add_signed(dy.round() as i16));
        }
        updated += 1;
    }
    updated
}

use crate::image::Image;
use crate::layout::{
    BANNER_CAPACITY, BANNER_LAYOUT, BANNER_LAYOUT_WORDS, BANNER_TEXT, BANNER_TEXT_ADDR,
    BANNER_TEXT_PTRS, WATERMARK,
};

pub const VERSION_MAJOR: &str = env!("CARGO_PKG_VERSION_MAJOR");
pub const VERSION_MINOR: &str = env!("CARGO_PKG_VERSION_MINOR");

/// End-of-string byte of the game's title text.
const TEXT_END: u8 = 0xFE;

pub fn banner_text(seed: u32) -> String {
    format!("TurfMastRand V{}.{} Seed {:08X}", VERSION_MAJOR, VERSION_MINOR, seed)
}

pub fn watermark_text(seed: u32) -> String {
    format!("TurfMastRandV{}.{}Seed{:08X}GLHF", VERSION_MAJOR, VERSION_MINOR, seed)
}

/// Show the randomiser version and seed on the title screen.
///
/// The image must be in working (CPU) word order.
pub fn write_title_banner(image: &mut Image, seed: u32) {
    let mut text = banner_text(seed).into_bytes();
    text.push(TEXT_END);
    text.truncate(BANNER_CAPACITY);
    image.write_n(BANNER_TEXT, &text);

    for ptr in BANNER_TEXT_PTRS {
        image.write_u32(ptr, BANNER_TEXT_ADDR);
    }
    for word in BANNER_LAYOUT_WORDS {
        image.write_u16(word, BANNER_LAYOUT);
    }
}

/// Plain ASCII marker readable in a hex dump of the output file.
///
/// The image must be back in on-disk word order.
pub fn write_watermark(image: &mut Image, seed: u32) {
    let mut text = watermark_text(seed).into_bytes();
    text.truncate(BANNER_CAPACITY);
    image.write_n(WATERMARK, &text);
}

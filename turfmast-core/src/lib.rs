use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

pub mod banner;
pub mod endian;
pub mod image;
pub mod integrity;
pub mod layout;
pub mod pins;
pub mod relocate;
pub mod slot;
pub mod spoiler;
pub mod trees;

use image::Image;
use layout::{COURSES, REFERENCE_TABLES, REGIONS};
use slot::Permutation;
use spoiler::{spoiler_path, SpoilerLog};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomiserSettings {
    pub seed: u32,
    pub randomize_holes: bool,
    pub randomize_pins: bool,
    pub write_spoiler: bool,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl RandomiserSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.randomize_holes && !self.randomize_pins {
            return Err(RandomiserError::Config(
                "nothing to do: enable hole shuffling and/or pin randomisation".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RandomiserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("expected P1 SHA-1 to be {expected} but it was {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

pub type Result<T> = std::result::Result<T, RandomiserError>;

/// Increment of the reference PCG32 initializer; keeps seeds compatible
/// with earlier releases of the tool.
pub const PCG_STREAM: u64 = 0xda3e_39cb_94b9_5bdb;
const HOLE_SEED_SALT: u32 = 0x10_0000;
const PIN_SEED_SALT: u32 = 0x20_0000;

/// Parse a seed as typed by a user: hexadecimal, optional `0x` prefix.
pub fn parse_seed(text: &str) -> Result<u32> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u32::from_str_radix(digits, 16)
        .map_err(|e| RandomiserError::Config(format!("seed '{}' is not hexadecimal: {}", text, e)))
}

pub fn seeded_rng(seed: u32, salt: u32) -> Pcg32 {
    Pcg32::new(seed.wrapping_add(salt) as u64, PCG_STREAM)
}

/// Move every hole to its new slot and fix up everything that refers to it.
///
/// The image must be in working word order.
pub fn shuffle_holes(image: &mut Image, perm: &Permutation) {
    for region in REGIONS {
        relocate::shuffle(image, perm, region);
    }
    for table in REFERENCE_TABLES {
        relocate::reindex_table(image, perm, table);
    }
    for course in &COURSES {
        let patched = trees::patch_trees(image, course);
        debug!(course = course.name, "retyped {} trees", patched);
    }
}

/// Apply the selected randomisations, banner and watermark to an image that
/// has already passed [`integrity::verify`]. `image` is in on-disk order on
/// entry and on return. Returns the hole permutation when holes were shuffled.
pub fn run_image(image: &mut Image, settings: &RandomiserSettings) -> Option<Permutation> {
    image.swap_words();

    let permutation = settings.randomize_holes.then(|| {
        let mut rng = seeded_rng(settings.seed, HOLE_SEED_SALT);
        let perm = Permutation::generate(&mut rng);
        shuffle_holes(image, &perm);
        info!("shuffled {} holes", slot::SLOT_COUNT);
        perm
    });

    if settings.randomize_pins {
        let mut rng = seeded_rng(settings.seed, PIN_SEED_SALT);
        let holes: usize = COURSES
            .iter()
            .map(|course| pins::randomize_pins(image, course, &mut rng))
            .sum();
        info!("generated pins for {} holes", holes);
    }

    banner::write_title_banner(image, settings.seed);
    image.swap_words();
    banner::write_watermark(image, settings.seed);

    permutation
}

pub fn run(settings: RandomiserSettings) -> Result<()> {
    settings.validate()?;

    if !settings.input_path.exists() {
        return Err(RandomiserError::Config(format!(
            "Input path does not exist: {}",
            settings.input_path.display()
        )));
    }

    let bytes = fs::read(&settings.input_path)?;
    integrity::verify(&bytes)?;
    info!(
        "verified {} ({} bytes)",
        settings.input_path.display(),
        bytes.len()
    );

    let mut image = Image::new(bytes);
    let permutation = run_image(&mut image, &settings);

    if let Some(parent) = settings.output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&settings.output_path, image.as_bytes())?;
    info!("wrote {}", settings.output_path.display());

    if settings.write_spoiler {
        let path = spoiler_path(&settings.output_path);
        SpoilerLog::new(&settings, permutation.as_ref()).write(&path)?;
        info!("spoiler log: {}", path.display());
    }

    Ok(())
}

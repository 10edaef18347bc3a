use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::banner::{VERSION_MAJOR, VERSION_MINOR};
use crate::slot::Permutation;
use crate::{RandomiserSettings, Result};

/// Where one hole is played after shuffling. Course and hole numbers are
/// 1-based, as shown in game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolePlacement {
    pub course: u8,
    pub hole: u8,
    pub original_course: u8,
    pub original_hole: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoilerLog {
    pub version: String,
    pub seed: String,
    pub holes_shuffled: bool,
    pub pins_randomized: bool,
    /// In play order; empty when holes were not shuffled.
    pub holes: Vec<HolePlacement>,
}

impl SpoilerLog {
    pub fn new(settings: &RandomiserSettings, permutation: Option<&Permutation>) -> Self {
        let holes = permutation
            .map(|perm| {
                perm.inverse()
                    .moves()
                    .map(|(new, old)| HolePlacement {
                        course: new.course + 1,
                        hole: new.hole + 1,
                        original_course: old.course + 1,
                        original_hole: old.hole + 1,
                    })
                    .collect()
            })
            .unwrap_or_default();

        SpoilerLog {
            version: format!("{}.{}", VERSION_MAJOR, VERSION_MINOR),
            seed: format!("{:08X}", settings.seed),
            holes_shuffled: settings.randomize_holes,
            pins_randomized: settings.randomize_pins,
            holes,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// `<output>.spoiler.json` next to the patched image.
pub fn spoiler_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".spoiler.json");
    PathBuf::from(name)
}

use std::path::{Path, PathBuf};

/// Directory the icons are written to when none is given
pub const DEFAULT_ICON_DIR: &str = "public/icons";

/// Icon sizes generated by default, in order
pub const DEFAULT_SIZES: [u32; 2] = [192, 512];

/// One square icon and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPreset {
    pub size: u32,
    pub path: PathBuf,
}

impl IconPreset {
    pub fn new(size: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            size,
            path: path.into(),
        }
    }

    pub fn file_name(size: u32) -> String {
        format!("icon-{}.png", size)
    }
}

/// Ordered size-to-path mapping of the icons to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet {
    presets: Vec<IconPreset>,
}

impl IconSet {
    /// `icon-<size>.png` for each size under `dir`. Repeated sizes are dropped.
    pub fn in_dir(dir: impl AsRef<Path>, sizes: &[u32]) -> Self {
        let dir = dir.as_ref();
        let mut presets: Vec<IconPreset> = Vec::with_capacity(sizes.len());
        for &size in sizes {
            if presets.iter().any(|p| p.size == size) {
                continue;
            }
            presets.push(IconPreset::new(size, dir.join(IconPreset::file_name(size))));
        }
        Self { presets }
    }

    pub fn presets(&self) -> &[IconPreset] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self::in_dir(DEFAULT_ICON_DIR, &DEFAULT_SIZES)
    }
}

use anyhow::{bail, Context, Result};
use indicatif::ProgressBar;
use png_encoder::{decode, DecodedPng};
use std::path::Path;
use tokio::fs;

use crate::config::IconSet;
use crate::generator::{GeneratedIcon, IconGenerator};

pub struct IconCommands<'a> {
    generator: &'a IconGenerator,
}

impl<'a> IconCommands<'a> {
    pub fn new(generator: &'a IconGenerator) -> Self {
        Self { generator }
    }

    /// Write every preset in order, one at a time
    pub async fn generate_set_with_progress(
        &self,
        set: &IconSet,
        progress: &ProgressBar,
    ) -> Result<Vec<GeneratedIcon>> {
        if set.is_empty() {
            bail!("No icon sizes given");
        }

        let mut written = Vec::with_capacity(set.len());
        for preset in set.presets() {
            progress.set_message(format!("{}", preset.path.display()));
            let icon = self
                .generator
                .generate(preset.size, preset.size, &preset.path)
                .await?;
            written.push(icon);
            progress.inc(1);
        }

        Ok(written)
    }

    pub async fn generate_single(
        &self,
        width: u32,
        height: u32,
        output: &Path,
    ) -> Result<GeneratedIcon> {
        self.generator.generate(width, height, output).await
    }

    /// Read back a PNG and check it with the library decoder
    pub async fn inspect(&self, file: &Path) -> Result<DecodedPng> {
        let data = fs::read(file)
            .await
            .with_context(|| format!("Failed to read file: {:?}", file))?;

        decode(&data).with_context(|| format!("Not a valid icon PNG: {:?}", file))
    }
}

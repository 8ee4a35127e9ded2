use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use s4_rle::RleTexture;
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::commands::create_output;

#[derive(Args)]
pub struct RgbaArgs {
    /// An input RLE2 texture
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// The file to write tightly packed RGBA8 texels to
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl RgbaArgs {
    pub fn handle(&self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let texture = RleTexture::parse(data)?;
        let rgba = texture.to_rgba()?;

        info!(
            "writing {}x{} RGBA8 texels to {}",
            texture.width(),
            texture.height(),
            self.output.display()
        );
        create_output(&self.output, self.overwrite)?
            .write_all(&rgba)
            .into_diagnostic()
    }
}

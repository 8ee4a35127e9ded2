use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use s4_rle::RleTexture;
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::commands::create_output;

#[derive(Args)]
pub struct DdsArgs {
    /// An input RLE2 texture
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// The DDS file to write
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl DdsArgs {
    pub fn handle(&self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let texture = RleTexture::parse(data)?;
        let dds = texture.to_dds()?;

        info!(
            "writing {}x{} texture with {} mips to {}",
            texture.width(),
            texture.height(),
            texture.mip_count(),
            self.output.display()
        );
        create_output(&self.output, self.overwrite)?
            .write_all(&dds)
            .into_diagnostic()
    }
}

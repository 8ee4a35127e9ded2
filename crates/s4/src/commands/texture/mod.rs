pub mod dds;
pub mod rgba;

#[derive(clap::Subcommand)]
pub enum TextureCommands {
    /// Convert a run-length texture to a DDS file
    Dds(dds::DdsArgs),
    /// Decompress the top mip of a run-length texture to raw RGBA8
    Rgba(rgba::RgbaArgs),
}

impl TextureCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            TextureCommands::Dds(dds) => dds.handle(),
            TextureCommands::Rgba(rgba) => rgba.handle(),
        }
    }
}

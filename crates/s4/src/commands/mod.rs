pub mod package;
pub mod texture;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle package files
    Package {
        #[command(subcommand)]
        command: package::PackageCommands,
    },
    /// Handle run-length textures
    Texture {
        #[command(subcommand)]
        command: texture::TextureCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Package { command } => command.handle(),
            Commands::Texture { command } => command.handle(),
        }
    }
}

/// Create `path`, refusing to replace an existing file unless `overwrite` is set
pub(crate) fn create_output(
    path: &std::path::Path,
    overwrite: bool,
) -> miette::Result<std::fs::File> {
    use miette::{Context, IntoDiagnostic};

    if overwrite {
        std::fs::File::create(path)
    } else {
        std::fs::File::create_new(path)
    }
    .into_diagnostic()
    .context(format!("creating {}", path.display()))
}

use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use s4_package::Package;
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::commands::create_output;

#[derive(Args)]
pub struct ExtractArgs {
    /// An input package file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let package = Package::new(&data)?;

        std::fs::create_dir_all(&self.directory)
            .into_diagnostic()
            .context(format!("creating {}", &self.directory.display()))?;

        for entry in package.entries() {
            let key = entry.key;
            let p = self.directory.join(format!(
                "{:08X}_{:08X}_{}.bin",
                key.resource_type, key.group, key.instance
            ));
            info!("writing {}", p.display());

            let stream = package.entry_stream(entry)?;
            create_output(&p, self.overwrite)?
                .write_all(&stream)
                .into_diagnostic()?;
        }
        Ok(())
    }
}

use clap::Args;
use itertools::Itertools;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream::Stdout};
use s4_package::{CompressionMethod, Package};
use std::path::PathBuf;

#[derive(Args)]
pub struct ListArgs {
    /// An input package file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Only print the number of resources of each type
    #[arg(long, default_value_t = false)]
    summary: bool,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let package = Package::new(&data)?;

        if self.summary {
            for (resource_type, count) in package
                .entries()
                .iter()
                .counts_by(|entry| entry.key.resource_type)
                .into_iter()
                .sorted()
            {
                println!("{resource_type:08X} {count:>6}");
            }
            return Ok(());
        }

        for entry in package.entries() {
            let codec = match entry.compression {
                CompressionMethod::None => "raw".to_string(),
                CompressionMethod::Zlib => "zlib".to_string(),
                CompressionMethod::Other(id) => format!("{id:04X}"),
            };
            println!(
                "{} {:>5} {:>10} {:>10}",
                entry.key,
                codec.if_supports_color(Stdout, |c| c.cyan()),
                entry.file_size,
                entry.mem_size
            );
        }
        Ok(())
    }
}

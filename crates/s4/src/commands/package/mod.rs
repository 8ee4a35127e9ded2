pub mod extract;
pub mod list;

#[derive(clap::Subcommand)]
pub enum PackageCommands {
    /// List the resources in a package
    List(list::ListArgs),
    /// Extract every resource of a package into a directory
    Extract(extract::ExtractArgs),
}

impl PackageCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            PackageCommands::List(list) => list.handle(),
            PackageCommands::Extract(extract) => extract.handle(),
        }
    }
}

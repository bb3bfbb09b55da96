use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Cache path of a jar, optionally followed by `!/entry`
    /// (falls back to the EXAMPLE environment variable)
    pub path: Option<String>,

    /// Print a JSON report instead of the bare URL
    #[arg(long)]
    pub json: bool,

    /// Only print the coordinates and source path, without network access
    #[arg(long, conflicts_with = "json")]
    pub offline: bool,
}

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// ompload – upload files or piped data to omploader and print the URLs
#[derive(Parser, Debug)]
#[command(
    name = "ompload",
    version,
    about,
    disable_version_flag = true,
    after_help = "You can supply a list of files or data via stdin (or both)."
)]
pub struct Cli {
    /// Files to upload, in order
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Only output errors and warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Only output URLs
    #[arg(short, long)]
    pub url: bool,

    /// File name on omploader for when piping data via stdin
    #[arg(short, long, value_name = "NAME")]
    pub filename: Option<String>,

    /// Disable copying of the URLs to the clipboard
    #[arg(short, long)]
    pub no_clip: bool,

    /// Show version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

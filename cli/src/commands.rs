pub mod survey;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "surveyor")]
#[command(version, about = "Check and analyze response times of servers.")]
pub struct CommandLine {
    /// Path to the file containing a list of servers, one per line
    pub file_path: PathBuf,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

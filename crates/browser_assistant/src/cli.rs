use crate::tools::core::Capability;
use clap::Parser;
use std::path::PathBuf;

/// Define the application arguments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Offer the vision (screenshot/coordinate) tool catalog instead of
    /// the structural snapshot catalog
    #[arg(long)]
    pub vision: bool,

    /// Capability allow-list, e.g. --caps history,pdf. Omitting the flag
    /// offers every tool of the selected catalog; core tools are always
    /// offered.
    #[arg(long, value_delimiter = ',')]
    pub caps: Vec<Capability>,

    /// Keep the browser running when the client disconnects
    #[arg(long)]
    pub keep_open: bool,

    /// Run the browser with a visible window
    #[arg(long)]
    pub headed: bool,

    /// Path to the browser executable
    #[arg(long)]
    pub executable: Option<PathBuf>,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse() -> Self {
        <Args as Parser>::parse()
    }
}

use std::path::PathBuf;

use clap::Parser;
use skycast_core::Units;

#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather and daily forecast in your terminal.")]
pub struct Cli {
    /// City name or "lat,lon" (defaults to the configured location)
    pub location: Option<String>,
    /// Use the device's approximate position instead of a named location
    #[arg(long, conflicts_with = "location")]
    pub here: bool,
    /// Keep prompting for locations after the first load
    #[arg(short, long)]
    pub interactive: bool,
    /// Path to the config file
    #[arg(env = "SKYCAST_CONFIG", short, long)]
    pub config: Option<PathBuf>,
    /// Measurement system (metric, imperial or standard)
    #[arg(env = "SKYCAST_UNITS", short, long)]
    pub units: Option<Units>,
}

/// A line of interactive input
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Skip,
    Here,
    Quit,
    Search(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => Command::Skip,
            ":here" => Command::Here,
            ":quit" | ":q" => Command::Quit,
            text => Command::Search(text),
        }
    }
}

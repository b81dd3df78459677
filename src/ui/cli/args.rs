// Wed Jan 15 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rawstruct")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Named field access over raw memory blocks", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered type names
    Types,
    /// Print the fields and offsets of a layout file
    Inspect(InspectArgs),
    /// Allocate an instance of a layout, assign fields and dump it
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub layout: PathBuf,

    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct DumpArgs {
    pub layout: PathBuf,

    /// name=value, may be repeated
    #[arg(short, long = "set")]
    pub set: Vec<String>,

    #[arg(short, long)]
    pub width: Option<usize>,
}

impl DumpArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.width == Some(0) {
            return Err("Width must be greater than 0".to_string());
        }
        for assignment in &self.set {
            if !assignment.contains('=') {
                return Err(format!("Expected name=value, got '{}'", assignment));
            }
        }
        Ok(())
    }

    /// Splits each assignment at its first `=`.
    pub fn assignments(&self) -> Vec<(&str, &str)> {
        self.set
            .iter()
            .filter_map(|a| a.split_once('='))
            .map(|(name, value)| (name.trim(), value.trim()))
            .collect()
    }
}

//! CLI interface for twistmap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Map banks of MIDI rotary encoders to typed application parameters
#[derive(Parser)]
#[command(name = "twistmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Connect to the controller and map events until interrupted
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "twistmap.yaml")]
        config: PathBuf,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "twistmap.yaml")]
        config: PathBuf,
    },

    /// List available MIDI input ports
    Ports,

    /// Generate an example configuration file
    Init,
}

//! Command-line interface

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bluesignal-server")]
#[command(about = "BlueSignal report verification and streaming server", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Override the bind address from the configuration file
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Turn repository push hooks into build jobs
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Args {
    /// Jaeger agent endpoint (disabled as default)
    #[clap(long)]
    pub telemetry_url: Option<String>,

    /// Token expected in the hook URL
    #[clap(long)]
    pub token: Option<String>,

    /// Bind IP (127.0.0.1:3000 as default)
    #[clap(long)]
    pub bind_ip: Option<String>,

    /// Spool directory for queued jobs
    #[clap(long)]
    pub queue_dir: Option<String>,

    /// Queue broker URL
    #[clap(long)]
    pub queue_url: Option<String>,

    /// Queue name (build as default)
    #[clap(long)]
    pub queue_name: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: SubCommand,
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Run server
    Serve,
    /// Validate a push event payload without queueing it
    Check(CheckCommand),
}

#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Payload file, or "-" to read from stdin
    #[clap(parse(from_os_str))]
    pub file: PathBuf,
}

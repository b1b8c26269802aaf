use std::path::PathBuf;

use clap::Parser;

/// hud: routes pointer input across stacked surfaces and relays their messages.
#[derive(Parser, Debug)]
#[command(name = "hud", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. "hud=debug").
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

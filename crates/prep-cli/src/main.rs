//! Order Feature Preprocessing - Command Line Entry Point

use clap::Parser;
use prep_cli::{run, Args};

fn main() -> anyhow::Result<()> {
    run(Args::parse())
}

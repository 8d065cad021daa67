//! CLI subcommand for `chromsearch find` (threshold alignment search).
use anyhow::Result;
use chromsearch::AlignParams;
use clap::Args;

use crate::read_args::{print_hit, ReadArgs};

/// Options for the `find` subcommand.
#[derive(Debug, Args)]
pub struct FindCmd {
    #[command(flatten)]
    pub input: ReadArgs,
    /// Start position: first candidate going forward, last one going backward.
    #[arg(long, default_value_t = 0)]
    pub from: usize,
    /// Report the rightmost hit starting at or before `--from`.
    #[arg(long)]
    pub backward: bool,
    /// Minimum percent identity.
    #[arg(long, default_value_t = AlignParams::default().min_percent)]
    pub min_percent: i32,
}

pub fn run(cmd: FindCmd) -> Result<()> {
    let read = cmd.input.to_read()?;
    let params = AlignParams { min_percent: cmd.min_percent };
    let hit = if cmd.backward {
        read.search_by_alignment_backward(cmd.from, cmd.input.query(), params.min_percent)
    } else {
        read.search_by_alignment_forward(cmd.from, cmd.input.query(), params.min_percent)
    };
    print_hit(hit);
    Ok(())
}

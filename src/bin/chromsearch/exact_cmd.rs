//! CLI subcommand for `chromsearch exact` (exact IUPAC pattern search).
use anyhow::Result;
use clap::Args;

use crate::read_args::ReadArgs;

/// Options for the `exact` subcommand.
#[derive(Debug, Args)]
pub struct ExactCmd {
    #[command(flatten)]
    pub input: ReadArgs,
    #[arg(long, default_value_t = 0)]
    pub from: usize,
    /// Report the rightmost match starting at or before `--from`.
    #[arg(long)]
    pub backward: bool,
    /// Also accept the reverse complement of the query.
    #[arg(long)]
    pub both_strands: bool,
}

pub fn run(cmd: ExactCmd) -> Result<()> {
    let read = cmd.input.to_read()?;
    let found = if cmd.backward {
        read.search_sequence_backward(cmd.from, cmd.input.query(), cmd.both_strands)
    } else {
        read.search_sequence_forward(cmd.from, cmd.input.query(), cmd.both_strands)
    };
    match found {
        Some(pos) => println!("{pos}"),
        None => println!("not found"),
    }
    Ok(())
}

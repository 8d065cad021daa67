//! CLI subcommands for `chromsearch vector5` and `chromsearch vector3`.
use anyhow::Result;
use chromsearch::{Searcher, VectorParams};
use clap::Args;

use crate::read_args::{print_hit, ReadArgs};

/// Threshold options shared by both vector searches.
#[derive(Debug, Args)]
pub struct VectorOpts {
    /// Minimum percent identity.
    #[arg(long, default_value_t = VectorParams::default().min_percent)]
    pub min_percent: i32,
    /// Query bases the threshold is computed over.
    #[arg(long, default_value_t = VectorParams::default().min_match)]
    pub min_match: usize,
}

impl VectorOpts {
    fn params(&self) -> VectorParams {
        VectorParams { min_percent: self.min_percent, min_match: self.min_match }
    }
}

/// Options for the `vector5` subcommand.
#[derive(Debug, Args)]
pub struct Vector5Cmd {
    #[command(flatten)]
    pub input: ReadArgs,
    #[command(flatten)]
    pub opts: VectorOpts,
}

/// Options for the `vector3` subcommand.
#[derive(Debug, Args)]
pub struct Vector3Cmd {
    #[command(flatten)]
    pub input: ReadArgs,
    /// First read position scanned.
    #[arg(long, default_value_t = 0)]
    pub from: usize,
    #[command(flatten)]
    pub opts: VectorOpts,
}

pub fn run_5(cmd: Vector5Cmd) -> Result<()> {
    let read = cmd.input.to_read()?;
    let params = cmd.opts.params();
    let hit = Searcher::new().vector_search_5(
        &read,
        cmd.input.query(),
        params.min_percent,
        params.min_match,
    );
    print_hit(hit);
    Ok(())
}

pub fn run_3(cmd: Vector3Cmd) -> Result<()> {
    let read = cmd.input.to_read()?;
    let params = cmd.opts.params();
    let hit = Searcher::new().vector_search_3(
        &read,
        cmd.from,
        cmd.input.query(),
        params.min_percent,
        params.min_match,
    );
    print_hit(hit);
    Ok(())
}

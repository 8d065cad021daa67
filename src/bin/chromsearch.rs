//! Command-line interface for the `chromsearch` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/chromsearch/`:
//! - `find_cmd.rs`
//! - `exact_cmd.rs`
//! - `vector_cmd.rs` (`vector5` and `vector3`)
//!
//! Every subcommand prints one line: `position<TAB>score`, the position alone
//! for exact matches, or `not found`.
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "chromsearch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Ambiguity-aware primer and vector search in sequencing reads",
    disable_help_subcommand = true
)]
struct Cli {
    /// Log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Threshold alignment search, leftmost hit or rightmost before a limit.
    Find(find_cmd::FindCmd),
    /// Exact IUPAC pattern search.
    Exact(exact_cmd::ExactCmd),
    /// Leading vector search; reports where the vector ends.
    Vector5(vector_cmd::Vector5Cmd),
    /// Trailing vector search; reports where the vector starts.
    Vector3(vector_cmd::Vector3Cmd),
}

#[path = "chromsearch/read_args.rs"] mod read_args;
#[path = "chromsearch/find_cmd.rs"] mod find_cmd;
#[path = "chromsearch/exact_cmd.rs"] mod exact_cmd;
#[path = "chromsearch/vector_cmd.rs"] mod vector_cmd;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    chromsearch::initialize();

    match cli.command {
        Command::Find(cmd) => find_cmd::run(cmd),
        Command::Exact(cmd) => exact_cmd::run(cmd),
        Command::Vector5(cmd) => vector_cmd::run_5(cmd),
        Command::Vector3(cmd) => vector_cmd::run_3(cmd),
    }
}

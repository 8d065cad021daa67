//! Read and query arguments shared by every subcommand.
use anyhow::{Context, Result};
use chromsearch::{qualities_from_phred33, NucleotideRead, SearchHit};
use clap::Args;

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Read bases (IUPAC codes, case-insensitive).
    #[arg(long, value_name = "SEQ")]
    pub read: String,
    /// Per-base qualities, Phred+33 encoded as in FASTQ.
    #[arg(long, value_name = "PHRED33")]
    pub quality: Option<String>,
    /// Name echoed in log output.
    #[arg(long)]
    pub name: Option<String>,
    /// Query sequence (primer or vector).
    #[arg(long, value_name = "SEQ")]
    pub query: String,
}

impl ReadArgs {
    pub fn to_read(&self) -> Result<NucleotideRead> {
        let read = match &self.quality {
            Some(text) => {
                let qualities = qualities_from_phred33(text).context("parse --quality")?;
                if qualities.len() != self.read.len() {
                    log::warn!(
                        "{} qualities for {} bases; padding or truncating",
                        qualities.len(),
                        self.read.len()
                    );
                }
                NucleotideRead::with_qualities(self.read.as_bytes(), qualities)?
            }
            None => NucleotideRead::new(self.read.as_bytes()),
        };
        let read = match &self.name {
            Some(name) => read.with_name(name.as_str()),
            None => read,
        };
        log::info!(
            "read {} length={} gc={:.1}% qualities={}",
            read.name().unwrap_or("-"),
            read.len(),
            read.percent_gc(),
            read.has_valid_quality()
        );
        Ok(read)
    }

    pub fn query(&self) -> &[u8] {
        self.query.as_bytes()
    }
}

pub fn print_hit(hit: SearchHit) {
    match hit {
        SearchHit::Match { position, score } => println!("{position}\t{score}"),
        SearchHit::NoMatch => println!("not found"),
    }
}

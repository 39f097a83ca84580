use clap::Parser;
use color_eyre::{eyre::eyre, Report};
use crossterm::{
    queue,
    style::{self, Stylize},
};
use std::{
    fmt::Display,
    io::{self, Write},
};
use tracing_subscriber::EnvFilter;

use rope_bytestring::{rope, RopeByteString, RopeOptions, DEFAULT_CHUNK_SIZE};

/// Walks through the rope operations on a few sample inputs.
#[derive(Parser, Debug)]
#[command(name = "ropebytes", about = "Rope byte string demo")]
struct Args {
    /// Maximum bytes per leaf (out-of-range values fall back to the default)
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Rebalance whenever a concatenation leaves the tree unbalanced
    #[arg(long)]
    balance: bool,

    /// Number of fragments joined in the depth comparison
    #[arg(long, default_value_t = 1000)]
    fragments: usize,

    /// Byte values for a custom rope, e.g. `ropebytes 15 14 13`
    bytes: Vec<u8>,
}

impl Args {
    fn options(&self) -> RopeOptions {
        RopeOptions::new()
            .with_chunk_size(self.chunk_size)
            .with_maintain_balance(self.balance)
    }
}

fn print_line<W>(w: &mut W, label: &str, value: impl Display) -> io::Result<()>
where
    W: io::Write,
{
    queue!(
        w,
        style::PrintStyledContent(format!("{:>14} ", label).bold()),
        style::Print(value),
        style::Print("\n")
    )
}

fn fragments(count: usize, options: &RopeOptions) -> RopeByteString {
    (0..count).fold(RopeByteString::with_options(&[], options), |acc, i| {
        let fragment = [(i % 256) as u8, (i / 256 % 256) as u8];
        acc.concat(&RopeByteString::with_options(&fragment, options))
    })
}

fn run<W>(w: &mut W, args: &Args) -> Result<(), Report>
where
    W: io::Write,
{
    if args.fragments == 0 {
        return Err(eyre!("--fragments must be at least 1"));
    }

    let options = args.options();
    tracing::debug!(
        ?options,
        effective_chunk_size = options.effective_chunk_size(),
        "using options"
    );

    let empty = RopeByteString::new();
    print_line(w, "empty", format!("{} ({})", empty.is_empty(), empty))?;

    let s1 = rope![1, 2, 3];
    let s2 = rope![4, 5, 6];
    print_line(w, "s1", &s1)?;
    print_line(w, "s2", &s2)?;
    print_line(w, "s1 + s2", &s1 + &s2)?;

    let bytes = if args.bytes.is_empty() {
        (1..=15).rev().collect()
    } else {
        args.bytes.clone()
    };
    let custom = RopeByteString::with_options(&bytes, &options);
    let listed: Vec<String> = custom.bytes().map(|b| b.to_string()).collect();
    print_line(w, "bytes", &custom)?;
    print_line(w, "as list", format!("[{}]", listed.join(", ")))?;
    print_line(w, "second half", custom.substring_from(custom.len() / 2)?)?;
    print_line(
        w,
        "leaves/depth",
        format!("{}/{}", custom.leaf_count(), custom.depth()),
    )?;

    let balanced = fragments(args.fragments, &options.with_maintain_balance(true));
    let unbalanced = fragments(args.fragments, &options.with_maintain_balance(false));
    print_line(
        w,
        "balanced",
        format!("size={} depth={}", balanced.len(), balanced.depth()),
    )?;
    print_line(
        w,
        "unbalanced",
        format!("size={} depth={}", unbalanced.len(), unbalanced.depth()),
    )?;
    print_line(
        w,
        "rebalanced",
        format!("depth={}", unbalanced.rebalance().depth()),
    )?;
    print_line(w, "same content", balanced == unbalanced)?;

    w.flush()?;
    Ok(())
}

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "starting");

    let mut stdout = io::stdout();
    run(&mut stdout, &args)
}

//! Prints the tokens of a file, one per line.
//!
//! ```text
//! cargo run --example split_file -- <path> [encoding] [separators]
//! ```
//!
//! Set `RUST_LOG=splitstream=trace` to watch the refills.
#![allow(missing_docs)]

use std::{env, error::Error, process::ExitCode};

use splitstream::{SeparatorSet, Splitter, TextEncoding};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let path = args.next().ok_or("missing <path> argument")?;
    let encoding = match args.next() {
        Some(label) => {
            TextEncoding::for_label(&label).ok_or_else(|| format!("unknown encoding {label:?}"))?
        }
        None => TextEncoding::UTF_8,
    };
    let separators = match args.next() {
        Some(chars) => SeparatorSet::try_from(chars.as_str())?,
        None => SeparatorSet::newlines(),
    };

    let splitter = Splitter::open_with_encoding(&path, encoding, separators)?;
    for (i, token) in splitter.enumerate() {
        println!("{i}\t{:?}", token?);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

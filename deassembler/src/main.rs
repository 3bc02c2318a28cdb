use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
    process::exit,
};

use anyhow::Context;
use clap::Parser;
use libdeassembler::{Deassembler, Endian};

/// Writes the instructions of a binary image as text, one per line.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    input: PathBuf,
    output: PathBuf,

    /// Read words most significant byte first.
    #[arg(short, long)]
    big_endian: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = deassemble(Args::parse()) {
        eprintln!("{:#}", e);
        exit(1);
    }
}

fn deassemble(args: Args) -> anyhow::Result<()> {
    let endian = if args.big_endian {
        Endian::Big
    } else {
        Endian::Little
    };

    let code = fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    log::info!("Read {} bytes from {}", code.len(), args.input.display());

    let output = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut output = BufWriter::new(output);

    let mut count = 0;
    for instruction in Deassembler::new(code.into_iter(), endian) {
        let instruction =
            instruction.with_context(|| format!("Failed to decode instruction {}", count))?;

        writeln!(output, "{}", instruction)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
        count += 1;
    }

    output
        .flush()
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("Wrote {} instructions to {}", count, args.output.display());
    Ok(())
}

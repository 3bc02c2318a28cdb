use std::{
    fs,
    path::PathBuf,
    process::exit,
    time::{Duration, Instant},
};

use anyhow::{anyhow, Context};
use clap::Parser;
use command::{Command, CommandError};
use libdcpu::{Register, Word};
use libdeassembler::Endian;
use libemulator::Emulator;

mod command;

const DEFAULT_INSTRUCTION_LIMIT: usize = 1_000_000;
const DEFAULT_DUMP_LENGTH: usize = 64;
const DEFAULT_DISASSEMBLY_COUNT: usize = 8;
const WORDS_PER_DUMP_ROW: usize = 8;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Binary image loaded at address 0.
    image_path: PathBuf,

    /// Read image words most significant byte first.
    #[arg(short, long)]
    big_endian: bool,
}

enum Flow {
    Continue,
    Quit,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let mut emulator = match load(&args) {
        Ok(emulator) => emulator,
        Err(e) => {
            eprintln!("{:#}", e);
            exit(1);
        }
    };

    if let Err(e) = emulate(&mut emulator) {
        eprintln!("{:#}", e);
        exit(1);
    }
}

fn load(args: &Args) -> anyhow::Result<Emulator> {
    let endian = if args.big_endian {
        Endian::Big
    } else {
        Endian::Little
    };

    let image = fs::read(&args.image_path)
        .with_context(|| format!("Failed to read image {}", args.image_path.display()))?;

    let program = libdeassembler::words_from_bytes(&image, endian)
        .map_err(|_| anyhow!("Image has an odd number of bytes ({})", image.len()))?;
    log::info!(
        "Loaded {} words from {}",
        program.len(),
        args.image_path.display()
    );

    Emulator::new(&program)
}

fn emulate(emulator: &mut Emulator) -> anyhow::Result<()> {
    let mut last_cmd_time = Duration::ZERO;

    loop {
        print_state(emulator, last_cmd_time);

        let Some(cmd) = Command::prompt()? else {
            return Ok(());
        };

        let start_time = Instant::now();
        let flow = execute_command(&cmd, emulator);
        last_cmd_time = start_time.elapsed();

        match flow {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => return Ok(()),
            Err(e) => eprintln!("!> {:#}", e),
        }
    }
}

fn print_state(emulator: &Emulator, last_cmd_time: Duration) {
    let registers = emulator
        .reg_file
        .iter()
        .map(|(register, value)| format!("{}: 0x{:04x}", register, value))
        .collect::<Vec<_>>()
        .join(", ");

    println!(
        "<<<   PC: 0x{:04x}, SP: 0x{:04x}, EX: 0x{:04x}, {}, {} ms ({} ns)   >>>",
        emulator.pc,
        emulator.sp,
        emulator.ex(),
        registers,
        last_cmd_time.as_millis(),
        last_cmd_time.as_nanos(),
    );
}

fn execute_command(cmd: &Command, emulator: &mut Emulator) -> anyhow::Result<Flow> {
    let mut args = cmd.args();

    let Some(name) = args.name() else {
        return Ok(Flow::Continue);
    };

    match name {
        "e" => {
            let instruction_count = args.next_number_or(1usize)?;
            args.finish()?;

            for _ in 0..instruction_count {
                let pc = emulator.pc;
                let instruction = emulator.execute_instruction()?;

                if instruction_count == 1 {
                    println!("0x{:04x}: {}", pc, instruction);
                }
            }

            if instruction_count != 1 {
                println!("Executed {} instructions", instruction_count);
            }
        }
        "eb" => {
            let break_pc: Word = args.next_number()?;
            let instruction_limit = args.next_number_or(DEFAULT_INSTRUCTION_LIMIT)?;
            args.finish()?;

            let executed = emulator.execute_until_pc(break_pc, instruction_limit)?;
            println!("Executed {} instructions", executed);
        }
        "er" => {
            let register_name = args.next()?;
            let register = Register::from_name(register_name)
                .ok_or_else(|| CommandError::UnknownRegister(register_name.to_owned()))?;
            let break_value: Word = args.next_number()?;
            let instruction_limit = args.next_number_or(DEFAULT_INSTRUCTION_LIMIT)?;
            args.finish()?;

            let executed = emulator.execute_until(instruction_limit, |emulator| {
                emulator.register(register) == break_value
            })?;
            println!("Executed {} instructions", executed);
        }
        "d" => {
            let begin: Word = args.next_number_or(0)?;
            let length = args.next_number_or(DEFAULT_DUMP_LENGTH)?;
            args.finish()?;

            for row_start in (0..length).step_by(WORDS_PER_DUMP_ROW) {
                let row_addr = begin.wrapping_add(row_start as Word);
                let row = (row_start..length.min(row_start + WORDS_PER_DUMP_ROW))
                    .map(|offset| emulator.memory.word(begin.wrapping_add(offset as Word)))
                    .map(|word| format!("{:04x}", word))
                    .collect::<Vec<_>>()
                    .join(" ");

                println!("0x{:04x}: {}", row_addr, row);
            }
        }
        "dis" => {
            let addr = args.next_number_or(emulator.pc)?;
            let count = args.next_number_or(DEFAULT_DISASSEMBLY_COUNT)?;
            args.finish()?;

            for (addr, instruction) in emulator.memory.disassemble(addr, count) {
                match instruction {
                    Ok(instruction) => println!("0x{:04x}: {}", addr, instruction),
                    Err(e) => println!("0x{:04x}: <{}>", addr, e),
                }
            }
        }
        "jmp" => {
            emulator.pc = args.next_number()?;
            args.finish()?;
        }
        "reset" => {
            args.finish()?;
            emulator.reset();
        }

        "q" => return Ok(Flow::Quit),
        _ => Err(CommandError::UnknownCommand(name.to_owned()))?,
    }

    Ok(Flow::Continue)
}

//! CLI command implementations.

use std::fs;
use std::path::Path;

use regvm_common::{Instruction, Program, Register};
use regvm_vm::{RuntimeError, StdoutSink, VmConfig, VM};
use tracing::debug;

use crate::options::{init_tracing, parse_run_options};

/// Assemble a .rvm text file to .rvmb binary.
pub fn assemble(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: assemble requires an input file");
        eprintln!("Usage: regvm assemble <input.rvm> [-o output.rvmb]");
        return Err(1);
    }

    let input = &args[0];

    // Parse -o flag
    let output = match &args[1..] {
        [] if input.ends_with(".rvm") => format!("{input}b"),
        [] => format!("{input}.rvmb"),
        [flag, path] if flag == "-o" => path.clone(),
        [flag] if flag == "-o" => {
            eprintln!("error: -o requires an output path");
            return Err(1);
        }
        [_, ..] => {
            let extra = args[1..].join(" ");
            eprintln!("error: unexpected arguments '{extra}'");
            eprintln!("Usage: regvm assemble <input.rvm> [-o output.rvmb]");
            return Err(1);
        }
    };

    let program = assemble_file(input)?;
    let bytes = program.to_bytes();

    fs::write(&output, &bytes).map_err(|e| {
        eprintln!("error: cannot write '{output}': {e}");
        1
    })?;

    eprintln!(
        "assembled {} words ({} bytes) -> {output}",
        program.len(),
        bytes.len()
    );
    Ok(())
}

/// Disassemble a .rvmb binary to text.
pub fn disassemble(args: &[String]) -> Result<(), i32> {
    let Some(input) = args.first() else {
        eprintln!("error: disassemble requires an input file");
        eprintln!("Usage: regvm disassemble <input.rvmb> [--listing]");
        return Err(1);
    };

    let program = read_binary(input)?;
    let text = if args[1..].iter().any(|a| a == "--listing") {
        regvm_assembler::listing(&program)
    } else {
        regvm_assembler::disassemble(&program)
    };

    let text = text.map_err(|e| {
        eprintln!("error: invalid program: {e}");
        1
    })?;
    print!("{text}");
    Ok(())
}

/// Execute a program. `.rvm` files are assembled first; anything else is
/// read as binary.
pub fn run(args: &[String]) -> Result<(), i32> {
    let options = parse_run_options(args)?;
    let Some(input) = options.positional.first() else {
        eprintln!("error: run requires an input file");
        eprintln!("Usage: regvm run <input.rvm|input.rvmb> [options]");
        return Err(1);
    };

    let program = if Path::new(input).extension().is_some_and(|ext| ext == "rvm") {
        assemble_file(input)?
    } else {
        read_binary(input)?
    };

    init_tracing(options.trace);
    execute(&program, options.config)
}

/// Execute the built-in demo program.
pub fn demo(args: &[String]) -> Result<(), i32> {
    let options = parse_run_options(args)?;
    if let Some(extra) = options.positional.first() {
        eprintln!("error: demo takes no input file, got '{extra}'");
        return Err(1);
    }

    init_tracing(options.trace);
    execute(&demo_program(), options.config)
}

/// Load, move, store, load, push, pop and add-from-memory in sequence.
/// Prints 291, 291, 1, 582.
fn demo_program() -> Program {
    Program::from_instructions(&[
        Instruction::Ldi {
            reg: Register::A,
            value: 0x123,
        },
        Instruction::Mov {
            src: Register::A,
            dst: Register::B,
        },
        Instruction::Out { reg: Register::B },
        Instruction::Stv {
            reg: Register::B,
            addr: 0,
        },
        Instruction::Ldm {
            reg: Register::C,
            addr: 0,
        },
        Instruction::Out { reg: Register::C },
        Instruction::Ldi {
            reg: Register::D,
            value: 1,
        },
        Instruction::Psh { reg: Register::D },
        Instruction::Pop { reg: Register::E },
        Instruction::Out { reg: Register::E },
        Instruction::Adm {
            reg: Register::A,
            addr: 0,
        },
        Instruction::Out { reg: Register::A },
    ])
}

fn execute(program: &Program, config: VmConfig) -> Result<(), i32> {
    let mut vm = VM::with_sink(config, StdoutSink).map_err(|e| {
        eprintln!("error: invalid configuration: {e}");
        1
    })?;

    match vm.run(program) {
        Ok(summary) => {
            debug!(registers = ?vm.registers(), flags = ?vm.flags(), "final state");
            if summary.halted {
                eprintln!("halted after {} instructions", summary.executed);
            }
            Ok(())
        }
        Err(e) => {
            report_runtime_error(&e);
            Err(3)
        }
    }
}

fn report_runtime_error(e: &RuntimeError) {
    eprintln!("runtime error ({}): {e}", e.kind());
}

fn assemble_file(path: &str) -> Result<Program, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;

    regvm_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

fn read_binary(path: &str) -> Result<Program, i32> {
    let bytes = fs::read(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;

    Program::from_bytes(&bytes).map_err(|e| {
        eprintln!("error: invalid binary: {e}");
        1
    })
}

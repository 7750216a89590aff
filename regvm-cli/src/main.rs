//! regvm CLI: assemble, disassemble, and execute register-VM programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage/input/format/assembly/config error
//! - 3: Runtime error

mod commands;
mod options;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "assemble" => commands::assemble(&args[2..]),
        "disassemble" => commands::disassemble(&args[2..]),
        "run" => commands::run(&args[2..]),
        "demo" => commands::demo(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: regvm <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  assemble <input.rvm> [-o output.rvmb]   Assemble text to binary");
    eprintln!("  disassemble <input.rvmb> [--listing]    Disassemble binary to text");
    eprintln!("  run <input.rvm|input.rvmb> [options]    Execute a program");
    eprintln!("  demo [options]                          Execute the built-in demo program");
    eprintln!();
    eprintln!("Options for run and demo:");
    eprintln!("  --memory-size N       Data memory cells (default 65536)");
    eprintln!("  --stack-size N        Data stack slots (default 128)");
    eprintln!("  --call-stack-size N   Call stack slots (default 64)");
    eprintln!("  --trace               Log every executed instruction to stderr");
}

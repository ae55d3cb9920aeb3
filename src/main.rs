mod cli;

use std::io::{self, Read, Write};
use std::{env, fs};

use bfmeta::frontend::tape_dumper::TapeDumper;
use bfmeta::{Halt, Machine};
use tracing_subscriber::EnvFilter;

use crate::cli::{CliOptions, InputSource};

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match CliOptions::parse(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if options.help {
        print_usage();
        return;
    }

    let Some(filename) = options.filename.as_deref() else {
        print_usage();
        std::process::exit(1);
    };

    let source = match fs::read(filename) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read '{}': {}", filename, e);
            std::process::exit(1);
        }
    };

    std::process::exit(run_program(&source, &options));
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_usage() {
    println!("BFMETA - Brainfuck with program and data on one tape");
    println!();
    println!("Usage:");
    println!("  bfmeta <file>             Run a program");
    println!("  bfmeta --raw <file>       Load source bytes without decoding escapes");
    println!("  bfmeta --limit=N <file>   Stop after N steps (default 1000000)");
    println!("  bfmeta --eof=0|255 <file> Byte read by ',' at end of input");
    println!("  bfmeta --input=TEXT       Use TEXT as program input");
    println!("  bfmeta --stdin            Read program input from stdin");
    println!("  bfmeta --trace <file>     Print the tape after every step");
    println!("  bfmeta --tape <file>      Print the final tape");
    println!("  bfmeta --no-color         Disable ANSI colors in tape output");
    println!("  bfmeta --help, -h         Show this help");
}

fn run_program(source: &[u8], options: &CliOptions) -> i32 {
    let mut machine = Machine::with_options(source, options.machine.clone());

    match &options.input {
        InputSource::None => {}
        InputSource::Text(text) => machine.append_input(text),
        InputSource::Stdin => {
            let mut input = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut input) {
                eprintln!("Failed to read stdin: {}", e);
                return 1;
            }
            machine.append_input(&input);
        }
    }

    let mut dumper = TapeDumper::new();
    if options.no_color {
        dumper = dumper.no_color();
    }

    if options.trace {
        while !machine.is_done() {
            machine.step();
            eprintln!("{}", dumper.trace_line(&machine));
        }
    }
    let halt = machine.run_to_completion();

    let mut stdout = io::stdout();
    if let Err(e) = stdout
        .write_all(machine.output().as_bytes())
        .and_then(|_| stdout.flush())
    {
        eprintln!("Failed to write output: {}", e);
        return 1;
    }

    if options.tape {
        eprint!("{}", dumper.render(&machine));
    }

    if !machine.error().is_empty() {
        eprint!("{}", machine.error());
    }

    match halt {
        Halt::End if machine.load_error().is_none() => 0,
        _ => 2,
    }
}

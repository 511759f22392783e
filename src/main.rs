use std::{fs, process::ExitCode};

use addyscript::{parse, tokenize};
use clap::Parser;

/// addy checks AddyScript scripts and shows how they are tokenized and
/// parsed.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells addy to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Prints the tokens of the script, one per line.
    #[arg(short, long)]
    tokens: bool,

    /// Prints the syntax tree of the script.
    #[arg(short, long)]
    ast: bool,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (script, file_name) = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => (script, args.contents),
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        (args.contents, "<command line>".to_string())
    };

    if args.tokens {
        for token in tokenize(&script) {
            println!("{}:{}\t{:?}\t{}",
                     token.span.start.line,
                     token.span.start.column(),
                     token.kind,
                     token.text());
        }
    }

    match parse(&script, &file_name) {
        Ok(program) => {
            if args.ast {
                println!("{program:#?}");
            } else {
                println!("ok");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

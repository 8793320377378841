use std::{
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::PathBuf,
    process,
    time::Instant,
};

use clap::{ArgAction, Parser};
use log::LevelFilter;
use monkey::{
    errors::diagnostics::Diagnostics,
    lexer::lexer::tokenize,
    parser::parser::parse_source,
    render_error,
};

const PROMPT: &str = ">> ";

/// Parse Monkey source into an abstract syntax tree.
#[derive(Parser)]
#[command(name = "monkey", version, about = "Parse Monkey source into an abstract syntax tree")]
struct Cli {
    /// Source file to parse; starts a REPL when omitted
    file: Option<PathBuf>,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let result = match &cli.file {
        Some(file) => run_file(file, cli.tokens),
        None => run_repl(cli.tokens),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("error: {}", error);
            process::exit(2);
        }
    }
}

/// Parses a whole file. Returns whether it was free of syntax errors.
fn run_file(path: &PathBuf, show_tokens: bool) -> io::Result<bool> {
    let source = read_to_string(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    if show_tokens {
        print_tokens(&source, &file_name);
    }

    let start = Instant::now();
    let (program, diagnostics) = parse_source(&source, Some(file_name));
    log::info!("Parsed in {:?}", start.elapsed());

    if !diagnostics.is_empty() {
        print_diagnostics(&diagnostics, &source);
        return Ok(false);
    }

    println!("{}", program);
    Ok(true)
}

fn run_repl(show_tokens: bool) -> io::Result<bool> {
    println!("Hello and welcome to the Monkey Language REPL");
    println!("Feel free to type in commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("{}", PROMPT);
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;

        if show_tokens {
            print_tokens(&line, "shell");
        }

        let (program, diagnostics) = parse_source(&line, None);
        if diagnostics.is_empty() {
            println!("{}", program);
        } else {
            print_diagnostics(&diagnostics, &line);
        }

        print!("{}", PROMPT);
        stdout.flush()?;
    }

    println!();
    Ok(true)
}

fn print_tokens(source: &str, file_name: &str) {
    for token in tokenize(source.to_string(), Some(file_name.to_string())) {
        println!("{:>5} {}", token.span.start.0, token);
    }
}

fn print_diagnostics(diagnostics: &Diagnostics, source: &str) {
    for error in diagnostics {
        eprintln!("{}\n", render_error(error, source));
    }
}

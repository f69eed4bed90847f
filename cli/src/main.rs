use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use syntax::token::END_OF_INPUT;
use syntax::{Scanner, Tokens};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "bl",
    version,
    about = "Parses BL programs and prints them back in canonical form"
)]
struct Cli {
    /// BL source file. Reads standard input when omitted.
    input: Option<PathBuf>,

    /// Parse the input as a block of statements instead of a whole program.
    #[arg(short, long)]
    statement: bool,

    /// Print the token stream and stop.
    #[arg(short, long)]
    tokens: bool,

    /// Log filter, e.g. `debug` or `syntax=trace`.
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match log_filter(&cli.log_level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn log_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .with_context(|| format!("invalid log filter \"{directives}\""))
}

fn run(cli: &Cli) -> Result<String> {
    let source = match &cli.input {
        Some(path) => read_file(path)?,
        None => read_stdin()?,
    };

    let mut tokens = scan(&source)?;
    debug!(tokens = tokens.len(), "scanned source");

    if cli.tokens {
        return Ok(tokens.to_string());
    }

    let output = if cli.statement {
        let block = syntax::parse_block(&mut tokens).context("failed to parse statements")?;
        match tokens.front() {
            Some(END_OF_INPUT) => block.to_string(),
            Some(found) => bail!("expected end of input after statements, found \"{found}\""),
            None => bail!("token stream ended without an end of input marker"),
        }
    } else {
        syntax::parse_program(&mut tokens)
            .context("failed to parse program")?
            .to_string()
    };

    Ok(output)
}

fn scan(source: &str) -> Result<Tokens> {
    let scanner = Scanner::new(Cursor::new(source));
    Ok(scanner.scan_tokens()?)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_stdin() -> Result<String> {
    let mut contents = String::new();
    std::io::stdin()
        .read_to_string(&mut contents)
        .context("failed to read standard input")?;
    Ok(contents)
}

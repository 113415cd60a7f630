use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use lox_syntax as lox;

use lox::ast_printer::AstPrinter;
use lox::error::LoxError;
use lox::expr::Expr;
use lox::parser::Parser;
use lox::reporter::StderrReporter;
use lox::scanner::{scan_tokens, Scanner};
use lox::source_printer::SourcePrinter;
use lox::token::Token;

/// `EX_DATAERR` from sysexits.h: malformed input.
const EX_DATAERR: i32 = 65;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox expression front end", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize { filename: Option<PathBuf> },

    /// Parses input from a file as a single expression and prints its AST
    Parse {
        filename: Option<PathBuf>,

        /// Print the AST as JSON instead of the parenthesized form
        #[arg(long)]
        json: bool,

        /// Ignore tokens left over after the expression
        #[arg(long)]
        allow_trailing: bool,
    },

    /// Parses a single expression and prints it back as Lox source
    Format { filename: Option<PathBuf> },
}

/// Reads the contents of a file as UTF‑8 text
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    let text: String = String::from_utf8(buf)
        .map_err(LoxError::from)
        .context(format!("File {:?} is not valid UTF-8", filename))?;

    Ok(text)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'lox_syntax::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("lox_syntax::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Scan `source`, printing lexical errors. Exits with 65 if there were any.
fn scan_or_exit(source: &str) -> Vec<Token<'_>> {
    let (tokens, errors) = scan_tokens(source);

    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{}", e);
        }

        debug!("Scanning failed with {} errors, exiting with code 65", errors.len());

        process::exit(EX_DATAERR);
    }

    tokens
}

/// Parse one expression, or exit with 65 once the reporter has printed the
/// diagnostic.
fn parse_or_exit<'a>(tokens: &'a [Token<'a>], allow_trailing: bool) -> Expr<'a> {
    let mut reporter = StderrReporter::new();

    let result = {
        let mut parser = Parser::new(tokens, &mut reporter);

        if allow_trailing {
            parser.parse()
        } else {
            parser.parse_complete()
        }
    };

    match result {
        Ok(expr) => {
            info!("Expression parsed successfully");
            expr
        }

        Err(e) => {
            debug!("Parse debug: {}", e);

            // Failures that never reached the reporter still need a message.
            if !reporter.had_error() {
                eprintln!("{}", e);
            }

            process::exit(EX_DATAERR);
        }
    }
}

fn no_input(command: &str) {
    info!("No filepath provided for {}", command);

    println!("No input filepath was provided. Exiting...");
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        Builder::new()
            .filter_level(log::LevelFilter::Off)
            .parse_default_env()
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename } => match filename {
            Some(filename) => {
                info!("Running Tokenize subcommand");
                let source = read_file(filename)?;
                let mut tokenized = true;

                for result in Scanner::new(&source) {
                    match result {
                        Ok(token) => {
                            println!("{}", token);
                        }

                        Err(e) => {
                            tokenized = false;

                            debug!("Tokenization debug: {}", e);

                            eprintln!("{}", e);
                        }
                    }
                }

                if !tokenized {
                    debug!("Tokenization failed, exiting with code 65");

                    process::exit(EX_DATAERR);
                }

                info!("Tokenization completed successfully");
            }

            None => no_input("Tokenize"),
        },

        Commands::Parse {
            filename,
            json,
            allow_trailing,
        } => match filename {
            Some(filename) => {
                info!("Running Parse subcommand");
                let source = read_file(filename)?;
                let tokens = scan_or_exit(&source);
                let expr = parse_or_exit(&tokens, allow_trailing);

                let output: String = if json {
                    serde_json::to_string_pretty(&expr).context("Failed to serialize AST")?
                } else {
                    AstPrinter::print(&expr)
                };

                debug!("AST: {}", output);
                println!("{}", output);

                info!("Parse subcommand completed");
            }

            None => no_input("Parse"),
        },

        Commands::Format { filename } => match filename {
            Some(filename) => {
                info!("Running Format subcommand");
                let source = read_file(filename)?;
                let tokens = scan_or_exit(&source);
                let expr = parse_or_exit(&tokens, false);

                println!("{}", SourcePrinter::print(&expr));

                info!("Format subcommand completed");
            }

            None => no_input("Format"),
        },
    }

    Ok(())
}

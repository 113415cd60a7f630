use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser as ClapParser;
use log::info;

use lox_syntax::generate_ast::write_ast;

/// `EX_USAGE` from sysexits.h.
const EX_USAGE: i32 = 64;

#[derive(ClapParser, Debug)]
#[command(version, about = "Generates the expression AST declarations", long_about = None)]
struct Cli {
    /// Directory that receives expr.rs
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Off)
        .parse_default_env()
        .init();

    let args: Cli = match Cli::try_parse() {
        Ok(args) => args,

        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }

        Err(_) => {
            eprintln!("Usage: generate_ast <output directory>");
            process::exit(EX_USAGE);
        }
    };

    let path: PathBuf = write_ast(&args.output_dir)
        .with_context(|| format!("Failed to generate AST into {:?}", args.output_dir))?;

    info!("Generated {:?}", path);

    Ok(())
}

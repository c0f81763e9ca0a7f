//! `sjson` CLI: format, minify and validate documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Pretty-print (stdin → stdout, 2-space indent)
//! echo '{"id":"potion","stackSize":5}' | sjson fmt
//!
//! # Pretty-print from file to file with a custom indent
//! sjson fmt -i save.json -o save.pretty.json --indent 4
//!
//! # Strip all optional whitespace
//! sjson minify -i save.json
//!
//! # Validate only
//! sjson check -i save.json
//!
//! # Tighten the nesting limit for untrusted input
//! sjson --max-depth 16 check -i upload.json
//! ```

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use satchel_json::{dump, parse_with, ParseOptions, Value, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "sjson",
    version,
    about = "Format, minify and validate satchel-json documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum array/object nesting accepted by the parser
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_DEPTH_LIMIT as u64)
    )]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Pretty-print a document
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Spaces per nesting level
        #[arg(long, default_value_t = 2)]
        indent: u16,
    },
    /// Print a document on a single line
    Minify {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate a document and report the first syntax error
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = ParseOptions::default().with_max_depth(cli.max_depth);

    match cli.command {
        Commands::Fmt {
            input,
            output,
            indent,
        } => {
            let doc = load(input.as_deref(), &options)?;
            write_output(output.as_deref(), &dump(&doc, i32::from(indent)))?;
        }
        Commands::Minify { input, output } => {
            let doc = load(input.as_deref(), &options)?;
            write_output(output.as_deref(), &dump(&doc, -1))?;
        }
        Commands::Check { input } => {
            load(input.as_deref(), &options)?;
            println!("ok");
        }
    }

    Ok(())
}

fn load(path: Option<&str>, options: &ParseOptions) -> Result<Value> {
    let text = read_input(path)?;
    parse_with(&text, options).context("Invalid document")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

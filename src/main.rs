//! kvconf CLI
//!
//! Entry point for the `kvconf` command-line tool: parse
//! configuration files and inspect the result.

use clap::{Parser, Subcommand};
use kvconf::Config;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "kvconf")]
#[command(about = "Line-oriented keyword/token configuration reader", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse files and print every section with its entries
    Dump {
        /// Token delimiter characters (default: "=,")
        #[arg(long, short = 'd')]
        delimiters: Option<String>,

        /// Skip files that fail to parse instead of stopping
        #[arg(long)]
        optional: bool,

        /// Configuration files, parsed in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the token lists recorded for a keyword
    Get {
        /// Token delimiter characters (default: "=,")
        #[arg(long, short = 'd')]
        delimiters: Option<String>,

        /// Look up in this section instead of the global one
        #[arg(long, short = 's')]
        section: Option<String>,

        /// The keyword to look up
        keyword: String,

        /// Configuration files, parsed in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Verify that required keywords are present in the global section
    Check {
        /// Token delimiter characters (default: "=,")
        #[arg(long, short = 'd')]
        delimiters: Option<String>,

        /// Required keywords (comma-separated)
        #[arg(long, short = 'r', value_delimiter = ',', required = true)]
        require: Vec<String>,

        /// Configuration files, parsed in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dump {
            delimiters,
            optional,
            files,
        } => {
            let config = load(delimiters.as_deref(), optional, &files);
            dump(&config);
        }
        Commands::Get {
            delimiters,
            section,
            keyword,
            files,
        } => {
            let config = load(delimiters.as_deref(), false, &files);
            get(&config, section.as_deref(), &keyword);
        }
        Commands::Check {
            delimiters,
            require,
            files,
        } => {
            let config = load(delimiters.as_deref(), false, &files);
            check(&config, &require);
        }
    }
}

/// Parse the given files, exiting with code 2 on a parse failure.
fn load(delimiters: Option<&str>, optional: bool, files: &[PathBuf]) -> Config {
    let mut parser = kvconf::Parser::new();
    if let Some(chars) = delimiters {
        parser = parser.with_delimiters(chars);
    }
    let (config, err) = parser.parse_files(optional, files);
    if let Some(err) = err {
        eprintln!("Error: {}", err);
        process::exit(2);
    }
    config
}

fn dump(config: &Config) {
    for section in config.iter() {
        println!("[{}]", section.name());
        for entry in section.entries() {
            if entry.tokens.is_empty() {
                println!("  {}:{}: {}", entry.source, entry.lineno, entry.keyword);
            } else {
                println!(
                    "  {}:{}: {} = {}",
                    entry.source, entry.lineno, entry.keyword, entry.args
                );
            }
        }
    }
}

fn get(config: &Config, section: Option<&str>, keyword: &str) {
    let section = match section {
        Some(name) => match config.section(name) {
            Some(section) => section,
            None => {
                eprintln!("Error: no section named '{}'", name);
                process::exit(1);
            }
        },
        None => config.global(),
    };

    let entries = section.get(keyword);
    if entries.is_empty() {
        eprintln!("Error: no entry for '{}'", keyword);
        process::exit(1);
    }
    for entry in entries {
        println!("{}", entry.args);
    }
}

fn check(config: &Config, require: &[String]) {
    let keywords: Vec<&str> = require.iter().map(String::as_str).collect();
    let missing = config.missing(&keywords);
    if !missing.is_empty() {
        for keyword in &missing {
            eprintln!("Missing keyword: {}", keyword);
        }
        process::exit(1);
    }
    println!("All required keywords present");
}

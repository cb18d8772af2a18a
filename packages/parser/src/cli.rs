//! Command-line interface for the glossary parser.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use serde::Serialize;

use crate::config::PageConfig;
use crate::error::Result;
use crate::markup::{html_to_xhtml, parse_markup};
use crate::parser::parse_html;
use crate::types::GlossaryDocument;

/// Glossary Parser - Extract a glossary document from page markup.
#[derive(Parser)]
#[command(name = "glossary-parser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a glossary page and print the document as JSON.
    Parse {
        /// Glossary page (HTML)
        file: PathBuf,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the page configuration flags as JSON.
    Flags {
        /// Glossary page (HTML)
        file: PathBuf,
    },

    /// Print a short summary of a glossary page.
    Summary {
        /// Glossary page (HTML)
        file: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            file,
            pretty,
            output,
        } => parse_command(&file, pretty, output.as_deref()),
        Commands::Flags { file } => flags_command(&file),
        Commands::Summary { file } => summary_command(&file),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

/// Execute the parse command.
fn parse_command(file: &Path, pretty: bool, output: Option<&Path>) -> Result<()> {
    let markup = std::fs::read_to_string(file)?;
    let document = parse_html(&markup)?;
    let json = to_json(&document, pretty)?;

    match output {
        Some(path) => std::fs::write(path, json + "\n")?,
        None => writeln!(std::io::stdout(), "{json}")?,
    }

    Ok(())
}

/// Execute the flags command.
fn flags_command(file: &Path) -> Result<()> {
    let markup = std::fs::read_to_string(file)?;
    let xhtml = html_to_xhtml(&markup);
    let doc = parse_markup(&xhtml)?;
    let config = PageConfig::from_markup(&doc);
    writeln!(std::io::stdout(), "{}", to_json(&config, true)?)?;
    Ok(())
}

/// Execute the summary command.
fn summary_command(file: &Path) -> Result<()> {
    let markup = std::fs::read_to_string(file)?;
    let document = parse_html(&markup)?;
    print_summary(&document);
    Ok(())
}

fn print_summary(document: &GlossaryDocument) {
    let needs_updating = document.items.iter().filter(|i| i.needs_updating).count();
    let unpersisted = document.items.iter().filter(|i| !i.id_is_persisted).count();
    let terms = document.items.iter().flat_map(|i| i.terms());
    let (term_count, abbreviations) =
        terms.fold((0, 0), |(n, a), t| (n + 1, a + usize::from(t.is_abbreviation)));

    println!("  Title: {}", style(&document.title).green());
    println!("  Items: {}", document.items.len());
    println!("  Terms: {term_count} ({abbreviations} abbreviations)");
    println!("  Tags: {}", document.tags_with_descriptions.len());
    if needs_updating > 0 {
        println!("  Needs updating: {}", style(needs_updating).yellow().bold());
    }
    if unpersisted > 0 {
        println!("  Items without id: {}", style(unpersisted).yellow());
    }

    let dangling = document.dangling_references();
    if !dangling.is_empty() {
        println!("  Dangling related terms: {}", style(dangling.len()).yellow().bold());
        for (item_id, reference) in dangling {
            println!("    {item_id} -> #{reference}");
        }
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Extract schema-defined sections, fields, and tables from PDF documents.
#[derive(Debug, Parser)]
#[command(name = "pdfharvest", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract the sections declared in a schema as nested JSON
    Extract {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the YAML schema file
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,

        /// Grid detection strategy
        #[arg(long, value_enum, default_value_t = StrategyArg::Text)]
        strategy: StrategyArg,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Password for encrypted PDFs
        #[arg(long)]
        password: Option<String>,
    },

    /// Dump positioned text runs (debug aid)
    Runs {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// 1-based page number. Default: all pages
        #[arg(long)]
        page: Option<usize>,

        /// Password for encrypted PDFs
        #[arg(long)]
        password: Option<String>,
    },

    /// Report the page rectangles located for each schema section (debug aid)
    Sections {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the YAML schema file
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,

        /// Password for encrypted PDFs
        #[arg(long)]
        password: Option<String>,
    },
}

/// Grid detection strategy.
#[derive(Debug, Clone, ValueEnum)]
pub enum StrategyArg {
    /// Infer columns from text alignment
    Text,
    /// Build cells from ruling-line intersections
    Lattice,
    /// Lattice when a ruled grid is present, text otherwise
    Auto,
}

impl StrategyArg {
    /// Convert to the core library's `Strategy` enum.
    pub fn to_strategy(&self) -> pdfharvest::Strategy {
        match self {
            StrategyArg::Text => pdfharvest::Strategy::Text,
            StrategyArg::Lattice => pdfharvest::Strategy::Lattice,
            StrategyArg::Auto => pdfharvest::Strategy::Auto,
        }
    }
}

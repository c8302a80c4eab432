//! FormForge CLI
//!
//! Offline access to the placement engine: inspect a PDF, build a fillable
//! form from a layout file, or add fields to an existing PDF.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use formforge_core::{DuplicateNamePolicy, PageSize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "formforge")]
#[command(version, about = "Place fillable form fields on PDF pages")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// How to resolve two fields with the same id: last-wins or first-wins
    #[arg(long, global = true, default_value = "last-wins")]
    duplicate_names: DuplicateNamePolicy,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print page count and page sizes as JSON
    Inspect {
        pdf: PathBuf,
    },

    /// Build a new fillable PDF from a layout file
    Build {
        /// Layout JSON: {"fields": [...], "pageSize": {...}} or a bare field array
        layout: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Page width when the layout has no pageSize
        #[arg(long, default_value_t = PageSize::LETTER.width)]
        page_width: f64,

        /// Page height when the layout has no pageSize
        #[arg(long, default_value_t = PageSize::LETTER.height)]
        page_height: f64,
    },

    /// Add fillable fields to an existing PDF
    Augment {
        pdf: PathBuf,

        /// Field JSON: {"fields": [...]} or a bare field array
        fields: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    // Logs go to stderr so `inspect` output stays pipeable
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Command::Inspect { pdf } => {
            let info = commands::inspect_file(&pdf)?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Build {
            layout,
            output,
            page_width,
            page_height,
        } => {
            let fallback = PageSize::new(page_width, page_height);
            let report =
                commands::build_file(&layout, &output, fallback, args.duplicate_names)?;
            commands::print_summary(&output, &report);
        }
        Command::Augment {
            pdf,
            fields,
            output,
        } => {
            let report = commands::augment_file(&pdf, &fields, &output, args.duplicate_names)?;
            commands::print_summary(&output, &report);
        }
    }

    Ok(())
}

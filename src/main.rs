use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use docxlite_pdf::{BlockOrder, ConvertOptions};

#[derive(Parser)]
#[command(version, about = "Convert a DOCX file to PDF")]
struct Cli {
    /// Input DOCX file
    input: PathBuf,
    /// Output PDF file (defaults to the input with a .pdf extension)
    output: Option<PathBuf>,
    /// Render all paragraphs, then all tables, then all images
    #[arg(long)]
    grouped: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("pdf"));
    let options = ConvertOptions {
        order: if cli.grouped {
            BlockOrder::Grouped
        } else {
            BlockOrder::Document
        },
    };

    match docxlite_pdf::convert_with_options(&cli.input, &output, &options) {
        Ok(()) => {
            println!("{} -> {}", cli.input.display(), output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

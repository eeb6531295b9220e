//! pdfharvest CLI - extract embedded images, page renders and text from a PDF

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use pdfharvest::raster::INSTALL_HINT;
use pdfharvest::{
    check_dependencies, required_dependencies, AnalyzeOptions, Analyzer, Error, ExtractedImage,
    FailedImage, ProgressObserver, RunSummary, Stage, DEFAULT_OUTPUT_DIR,
};

#[derive(Parser)]
#[command(name = "pdfharvest")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Extract embedded images, page renders, and text from a PDF",
    long_about = None,
    after_help = "Example:\n  pdfharvest references/pdf/catalog.pdf references/extracted"
)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "PDF")]
    input: PathBuf,

    /// Output base directory; results go to <OUTPUT>/<pdf name>/
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    if !cli.input.is_file() {
        println!(
            "{}: PDF file not found: {}",
            "Error".red().bold(),
            cli.input.display()
        );
        return ExitCode::FAILURE;
    }

    let report = check_dependencies(&required_dependencies());
    if !report.all_present() {
        println!("{}", "Missing required components:".red().bold());
        for name in report.missing_names() {
            println!("  {} {}", "-".dimmed(), name);
        }
        if let Some(command) = report.install_command() {
            println!("Install with:");
            println!("  {}", command.yellow());
        }
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}: {}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = AnalyzeOptions::new().with_output_dir(&cli.output);

    let mut reporter = ConsoleReporter;
    Analyzer::new(options).analyze(&cli.input, &mut reporter)?;
    Ok(())
}

/// Prints progress the way a person watching the terminal wants it.
struct ConsoleReporter;

fn rule() -> String {
    "=".repeat(80)
}

impl ProgressObserver for ConsoleReporter {
    fn run_started(&mut self, pdf: &Path) {
        let name = pdf
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("{}", rule().dimmed());
        println!("{} - {}", "PDF HARVEST".cyan().bold(), name);
        println!("{}", rule().dimmed());
    }

    fn stage_started(&mut self, stage: Stage) {
        println!("\n{}...", stage.to_string().bold());
    }

    fn document_opened(&mut self, stage: Stage, pdf: &Path, pages: u32) {
        if stage == Stage::EmbeddedImages {
            println!("\nAnalyzing: {}", pdf.display());
            println!("Total pages: {}", pages);
        }
    }

    fn image_extracted(&mut self, image: &ExtractedImage) {
        println!(
            "  {} Extracted: {} ({}×{})",
            "✓".green(),
            image.filename,
            image.width,
            image.height
        );
    }

    fn image_failed(&mut self, failure: &FailedImage) {
        println!(
            "  {} Failed to extract image {} on page {}: {}",
            "✗".red(),
            failure.name,
            failure.page,
            failure.reason
        );
    }

    fn page_rendered(&mut self, page: u32, filename: &str) {
        println!("  {} Converted page {}: {}", "✓".green(), page, filename);
    }

    fn stage_failed(&mut self, stage: Stage, error: &Error) {
        match stage {
            Stage::EmbeddedImages => {
                println!("{} extracting images: {}", "Error".red(), error);
            }
            Stage::PageImages => {
                println!("{} converting PDF: {}", "Error".red(), error);
                println!("\n{}", INSTALL_HINT.yellow());
            }
            Stage::Text => {
                println!("{} extracting text: {}", "Error".red(), error);
            }
        }
    }

    fn stage_finished(&mut self, stage: Stage, count: usize) {
        match stage {
            Stage::EmbeddedImages => println!("\nTotal images extracted: {}", count),
            Stage::PageImages => println!("\nTotal pages converted: {}", count),
            Stage::Text => {}
        }
    }

    fn text_saved(&mut self, path: &Path) {
        println!("  {} Saved text to: {}", "✓".green(), path.display());
    }

    fn run_finished(&mut self, summary: &RunSummary, summary_path: &Path) {
        println!("\n{}", rule().dimmed());
        println!("{}", "ANALYSIS COMPLETE".green().bold());
        println!("{}", rule().dimmed());
        println!("Embedded images: {}", summary.embedded_images);
        println!("Pages converted: {}", summary.pages_converted);
        println!("Summary saved: {}", summary_path.display());
    }
}

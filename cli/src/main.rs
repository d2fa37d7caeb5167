//! pdfmd CLI - convert a PDF document to page-delimited Markdown

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

/// Input used when no path is given.
const DEFAULT_INPUT: &str =
    "APC40_Communications_Protocol_rev_1.pdf_1db97c1fdba23bacf47df0f9bf64e913.pdf";

/// Output used when no path is given.
const DEFAULT_OUTPUT: &str = "APC40_Communications_Protocol.md";

#[derive(Parser, Debug)]
#[command(name = "pdfmd")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert a PDF document to page-delimited Markdown with pipe tables", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output Markdown file (overwritten if it exists)
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match pdfmd::convert_file(&cli.input, &cli.output) {
        Ok(report) => {
            log::debug!("{:?}", report.stats);
            println!("✓ Converted PDF to Markdown: {}", report.output_path.display());
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_paths() {
        let cli = Cli::try_parse_from(["pdfmd"]).unwrap();
        assert_eq!(cli.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_explicit_paths() {
        let cli = Cli::try_parse_from(["pdfmd", "in.pdf", "out.md"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.pdf"));
        assert_eq!(cli.output, PathBuf::from("out.md"));
    }

    #[test]
    fn test_input_only() {
        let cli = Cli::try_parse_from(["pdfmd", "in.pdf"]).unwrap();
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

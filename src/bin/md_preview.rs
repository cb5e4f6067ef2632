use clap::Parser;
use learnpath::core::markdown;
use learnpath::utils::{display, logger};
use std::io::Read;

#[derive(Parser)]
#[command(name = "md-preview")]
#[command(about = "Render constrained-subset Markdown as a styled terminal document")]
struct Args {
    /// Markdown file to render (reads stdin when omitted)
    file: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    let input = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let blocks = markdown::render(&input);
    tracing::debug!("Parsed {} blocks", blocks.len());

    if blocks.is_empty() {
        tracing::warn!("Input contained no renderable blocks");
        return Ok(());
    }

    display::print_document(&blocks);
    Ok(())
}

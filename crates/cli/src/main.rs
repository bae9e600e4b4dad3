//! CLI tool for building the project presentation deck.

use anyhow::{Context, Result};
use clap::Parser;
use deck_core::deck::{DEFAULT_DARK_IMAGE, DEFAULT_LIGHT_IMAGE};
use deck_core::{project_deck, Deck, ExtractedDeck, DEFAULT_OUTPUT};
use deck_pptx::{PptxParser, PptxWriter};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Build the Mini SaaS Task Manager presentation.
#[derive(Parser, Debug)]
#[command(name = "make-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Light mode screenshot (slide 5)
    #[arg(long, default_value = DEFAULT_LIGHT_IMAGE)]
    light_image: PathBuf,

    /// Dark mode screenshot (slide 6)
    #[arg(long, default_value = DEFAULT_DARK_IMAGE)]
    dark_image: PathBuf,

    /// Load the deck definition from a JSON file instead
    #[arg(short, long)]
    content: Option<PathBuf>,

    /// Print the deck definition as JSON and exit
    #[arg(long)]
    dump_content: bool,

    /// Print the slides of an existing .pptx instead of building
    #[arg(short, long, value_name = "PPTX")]
    inspect: Option<PathBuf>,

    /// With --inspect, print JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Some(path) = &args.inspect {
        let deck = inspect(path)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&deck)?);
        } else {
            print!("{}", format_inspection(&deck));
        }
        return Ok(());
    }

    let deck = load_deck(&args)?;

    if args.dump_content {
        println!("{}", deck.to_json()?);
        return Ok(());
    }

    let report = PptxWriter::new()
        .save(&deck, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    if args.verbose {
        eprintln!(
            "  {} slides, {} pictures embedded, {} skipped",
            report.slides, report.pictures_embedded, report.pictures_skipped
        );
    }

    println!("Presentation created successfully: {}", args.output.display());

    Ok(())
}

/// The deck to build: from `--content` if given, else the project deck.
fn load_deck(args: &Args) -> Result<Deck> {
    match &args.content {
        Some(path) => {
            log::debug!("Loading deck definition from {}", path.display());
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Deck::from_json(&json).with_context(|| format!("Invalid deck in {}", path.display()))
        }
        None => Ok(project_deck(&args.light_image, &args.dark_image)),
    }
}

/// Read a .pptx back into its slides.
fn inspect(path: &Path) -> Result<ExtractedDeck> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    PptxParser::new()
        .parse(BufReader::new(file), filename)
        .map_err(|e| anyhow::anyhow!("{}", e))
}

/// Render an inspected deck as indented plain text.
fn format_inspection(deck: &ExtractedDeck) -> String {
    let mut out = format!("{}: {} slides\n", deck.filename, deck.slides.len());

    for slide in &deck.slides {
        let layout = slide
            .layout
            .map(|l| l.display_name())
            .unwrap_or("Unknown layout");
        out.push_str(&format!(
            "\n[{}] {} ({})\n",
            slide.number,
            slide.title.as_deref().unwrap_or(""),
            layout
        ));

        for p in &slide.paragraphs {
            let indent = "  ".repeat(p.level as usize + 1);
            let marker = if p.bold { "*" } else { "" };
            out.push_str(&format!("{}{}{}{}\n", indent, marker, p.text, marker));
        }

        for pic in &slide.pictures {
            out.push_str(&format!(
                "  picture {} at ({}, {}) size {}x{}\n",
                pic.target.as_deref().unwrap_or("?"),
                pic.x,
                pic.y,
                pic.cx,
                pic.cy
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{ExtractedPicture, ExtractedSlide, Layout, Paragraph};

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["make-deck"]);
        assert_eq!(args.output, PathBuf::from("Mini_SaaS_Project_Presentation.pptx"));
        assert_eq!(args.light_image, PathBuf::from(DEFAULT_LIGHT_IMAGE));
        assert!(args.inspect.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_load_default_deck() {
        let args = Args::parse_from(["make-deck", "--light-image", "a.png", "--dark-image", "b.png"]);
        let deck = load_deck(&args).unwrap();
        assert_eq!(deck.slides.len(), 8);
        assert_eq!(
            deck.slides[4].picture.as_ref().unwrap().path,
            PathBuf::from("a.png")
        );
    }

    #[test]
    fn test_format_inspection() {
        let mut deck = ExtractedDeck::new("deck.pptx");
        let mut slide = ExtractedSlide::new(1);
        slide.layout = Some(Layout::TitleAndContent);
        slide.title = Some("Key Features".to_string());
        slide.paragraphs = vec![Paragraph::plain("Top"), Paragraph::bold("Strong").with_level(1)];
        slide.pictures.push(ExtractedPicture {
            target: Some("ppt/media/image1.png".to_string()),
            x: 1,
            y: 2,
            cx: 3,
            cy: 4,
        });
        deck.add_slide(slide);

        let text = format_inspection(&deck);
        assert!(text.starts_with("deck.pptx: 1 slides\n"));
        assert!(text.contains("[1] Key Features (Title and Content)"));
        assert!(text.contains("\n  Top\n"));
        assert!(text.contains("\n    *Strong*\n"));
        assert!(text.contains("picture ppt/media/image1.png at (1, 2) size 3x4"));
    }
}

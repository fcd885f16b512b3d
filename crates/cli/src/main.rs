//! CLI tool that turns a Google Doc into a Google Slides presentation.

use anyhow::{Context, Result};
use clap::Parser;
use deck_core::{Config, DeckSynthesizer, Error, Outline, OutlineParser, ParseError, Pipeline};
use deck_google::{edit_url, DocsClient, SlidesClient};
use deck_openai::ChatCompletionClient;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Build a slide deck outline from a Google Doc and publish it to Google Slides.
#[derive(Parser, Debug)]
#[command(name = "doctor-slides")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Google Docs document ID
    document_id: Option<String>,

    /// Verbose output, including the raw model answer when it cannot be parsed
    #[arg(short, long)]
    verbose: bool,

    /// Print the outline as JSON instead of creating a presentation
    #[arg(short, long)]
    print: bool,

    /// Skip the document and the model; read the outline from a local file
    #[arg(long, value_name = "FILE", conflicts_with = "document_id")]
    from_outline: Option<PathBuf>,

    /// Environment file with API keys and settings
    #[arg(long, value_name = "FILE", default_value = ".env")]
    env_file: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    eprintln!("Here Comes Doctor Slides!");

    if needs_usage(&args) {
        return print_usage(&mut io::stderr());
    }

    let env_loaded = dotenv::from_path(&args.env_file).is_ok();

    let config = match Config::from_env() {
        Ok(config) => config.with_debug(args.verbose),
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    if config.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if env_loaded {
        log::debug!("Loaded settings from {}", args.env_file.display());
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&mut io::stderr(), &e, config.debug),
    }
}

/// Nothing to build from: no document and no outline file.
fn needs_usage(args: &Args) -> bool {
    args.document_id.is_none() && args.from_outline.is_none()
}

fn print_usage(out: &mut impl Write) -> ExitCode {
    let _ = writeln!(out, "I need a document ID to get started.");
    let _ = writeln!(out, "Usage: doctor-slides <DOCUMENT_ID>");
    ExitCode::SUCCESS
}

/// Print a diagnostic for a failed run and pick the exit status.
///
/// The raw model answer is only shown with `debug` on.
fn report(out: &mut impl Write, error: &anyhow::Error, debug: bool) -> ExitCode {
    // Write errors are ignored.
    let _ = match error.downcast_ref::<Error>() {
        Some(Error::Parse(ParseError::Empty { raw })) => {
            let apology =
                "Sorry. The model gave me garbage. I can't do anything with this. Try again?";
            if debug {
                writeln!(out, "{}\n{}", apology, raw)
            } else {
                writeln!(out, "{}", apology)
            }
        }
        _ => writeln!(out, "Error: {:#}", error),
    };

    ExitCode::FAILURE
}

fn run(args: &Args, config: &Config) -> Result<()> {
    if let Some(path) = &args.from_outline {
        return run_from_outline(path, args, config);
    }

    // Checked in main.
    let document_id = args.document_id.as_deref().unwrap_or_default();

    let api = deck_google::authorize(config)?;
    let documents = DocsClient::new(api.clone());
    let presentations = SlidesClient::new(api);
    let generator = ChatCompletionClient::from_config(config)?;
    let pipeline = Pipeline::new(&documents, &generator, &presentations);

    let outline = pipeline.outline_for(document_id)?;
    log::info!("Outline has {} slides", outline.slides.len());

    if args.print {
        return print_outline(&outline);
    }

    let presentation_id = pipeline.publish(&outline)?;
    println!("Created presentation: {}", edit_url(&presentation_id));

    Ok(())
}

/// Build a deck from a saved outline, without the document or the model.
fn run_from_outline(path: &Path, args: &Args, config: &Config) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read outline {}", path.display()))?;

    let outline = OutlineParser::new()
        .parse(&raw)
        .map_err(Error::from)?
        .with_title(experiment_title(chrono::Local::now()));

    if args.print {
        return print_outline(&outline);
    }

    let api = deck_google::authorize(config)?;
    let presentations = SlidesClient::new(api);
    let presentation_id = DeckSynthesizer::new().synthesize(&outline, &presentations)?;
    println!("Created presentation: {}", edit_url(&presentation_id));

    Ok(())
}

/// Title for decks built from a local outline file.
fn experiment_title<Tz>(now: chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("Doctor Slides Test: {}", now.format("%Y-%m-%d %H:%M:%S %z"))
}

fn print_outline(outline: &Outline) -> Result<()> {
    let json = serde_json::to_string_pretty(outline).context("Failed to encode outline")?;
    println!("{}", json);
    Ok(())
}

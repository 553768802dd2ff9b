use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use slidedeck_core::{schema, validation, Block, Deck, MediaSource, ResolvedTheme, Slide, Theme, Transition};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "slidedeck")]
#[command(about = "Validate, inspect and normalize JSON slide decks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Config file (defaults to ./slidedeck.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a deck and report problems
    Validate {
        /// Deck JSON file
        deck: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Fail on warnings as well as errors
        #[arg(long)]
        strict: bool,
    },
    /// Print each slide with its resolved theme and the deck transition
    Inspect {
        /// Deck JSON file
        deck: PathBuf,
    },
    /// Decode and re-encode a deck, making generated slide ids explicit
    Normalize {
        /// Deck JSON file
        deck: PathBuf,
        /// Write here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the JSON Schema of the deck format
    Schema {
        /// Which type to print
        #[arg(long = "type", value_enum, default_value_t = SchemaType::Deck)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SchemaType {
    Deck,
    Slide,
    Block,
    MediaSource,
    Theme,
    Transition,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref(), Path::new(".")).await?;
    init_tracing(&config);

    match cli.command {
        Commands::Validate { deck, format, strict } => {
            let strict = strict || config.strict;
            match validate_file(&deck, format, strict).await {
                Ok(()) => {}
                Err(e) => {
                    eprintln!("✗ Deck validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Inspect { deck } => {
            let deck = load_deck(&deck).await?;
            let mut out = String::new();
            render_inspection(&mut out, &deck)?;
            print!("{}", out);
        }
        Commands::Normalize { deck, output, compact } => {
            let deck = load_deck(&deck).await?;
            let json = normalize_deck(&deck, !compact && config.pretty)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, format!("{}\n", json))
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), slides = deck.slides.len(), "wrote normalized deck");
                }
                None => println!("{}", json),
            }
        }
        Commands::Schema { schema_type } => {
            let schema = schema_for(schema_type);
            let json = if config.pretty {
                serde_json::to_string_pretty(&schema)?
            } else {
                serde_json::to_string(&schema)?
            };
            println!("{}", json);
        }
    }

    Ok(())
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter.as_deref().unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read and decode a deck file
async fn load_deck(path: &Path) -> Result<Deck> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let deck = Deck::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), slides = deck.slides.len(), "loaded deck");
    Ok(deck)
}

/// Validate a deck file and report results
async fn validate_file(path: &Path, format: OutputFormat, strict: bool) -> Result<()> {
    let deck = load_deck(path).await?;
    let result = validation::validate_deck(&deck);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            if !result.errors.is_empty() {
                eprintln!("Validation errors:");
                for error in &result.errors {
                    eprintln!("  {}", error);
                }
            }
            if !result.warnings.is_empty() {
                println!("Validation warnings:");
                for warning in &result.warnings {
                    println!("  {}", warning);
                }
            }
        }
    }

    if !result.is_valid() {
        return Err(anyhow::anyhow!("Validation failed with {} errors", result.errors.len()));
    }
    if !result.passes(strict) {
        return Err(anyhow::anyhow!(
            "Validation failed with {} warnings in strict mode",
            result.warnings.len()
        ));
    }

    if format == OutputFormat::Text {
        println!("✓ Validated {} slides successfully", deck.slides.len());
    }
    Ok(())
}

/// Re-encode a decoded deck; ids generated during decoding become explicit
fn normalize_deck(deck: &Deck, pretty: bool) -> Result<String> {
    let json = if pretty { deck.to_json_pretty()? } else { deck.to_json()? };
    Ok(json)
}

fn schema_for(schema_type: SchemaType) -> serde_json::Value {
    match schema_type {
        SchemaType::Deck => schema::generate_schema::<Deck>(),
        SchemaType::Slide => schema::generate_schema::<Slide>(),
        SchemaType::Block => schema::generate_schema::<Block>(),
        SchemaType::MediaSource => schema::generate_schema::<MediaSource>(),
        SchemaType::Theme => schema::generate_schema::<Theme>(),
        SchemaType::Transition => schema::generate_schema::<Transition>(),
    }
}

/// Human-readable summary of a deck
fn render_inspection(out: &mut impl std::fmt::Write, deck: &Deck) -> std::fmt::Result {
    let transition = deck.transition();

    writeln!(out, "{}", deck.title)?;
    writeln!(
        out,
        "transition: {:?} ({:.2}s)",
        transition.effect,
        transition.animation.duration()
    )?;

    for (index, slide) in deck.slides.iter().enumerate() {
        let theme = deck.resolved_theme(index).unwrap_or_default();
        writeln!(
            out,
            "{:>3}. {} [{:?}, padding {}] {} blocks",
            index + 1,
            slide.id,
            slide.effective_alignment(),
            slide.effective_padding(),
            slide.block_count()
        )?;
        writeln!(out, "     theme: {}", describe_theme(&theme))?;
    }
    Ok(())
}

fn describe_theme(theme: &ResolvedTheme) -> String {
    format!(
        "background {} title {} subtitle {} body {} code {}",
        theme.background.to_hex(),
        theme.title.to_hex(),
        theme.subtitle.to_hex(),
        theme.body.to_hex(),
        theme.code.to_hex()
    )
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use undertone::{
    EmotionLabel, Engine, EngineConfig, HttpSink, JsonlSink, KeywordTable, Lemmatizer,
    LexiconLemmatizer, PassthroughLemmatizer, PredictionSink, contains_crisis_language,
    load_bundle, normalize, pick_label, score,
};

#[derive(Parser)]
#[command(name = "undertone")]
#[command(author, version, about = "Hybrid emotion inference over free text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a text into an emotion label with probabilities
    Predict {
        /// Text to classify
        #[arg(short, long)]
        text: Option<String>,

        /// Read the text to classify from a file instead
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory holding model.json and vectorizer.json
        #[arg(long)]
        model_dir: Option<PathBuf>,

        /// JSON lexicon file with stop words and lemmas
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Append prediction records to this JSONL file
        #[arg(long)]
        log: Option<PathBuf>,

        /// POST prediction records to this URL
        #[arg(long)]
        log_url: Option<String>,

        /// Number of labels to print
        #[arg(long, default_value = "5")]
        top: usize,

        /// Print the full prediction as JSON
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show how the rule engine sees a text, without a model
    Analyze {
        /// Text to analyze
        #[arg(short, long)]
        text: Option<String>,

        /// Read the text to analyze from a file instead
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// JSON lexicon file with stop words and lemmas
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Predict {
            text,
            input,
            model_dir,
            lexicon,
            log,
            log_url,
            top,
            json,
            verbose,
        } => {
            setup_logging(verbose);
            let text = read_text(text, input)?;
            run_predict(&text, model_dir, lexicon, log, log_url, top, json).await
        }
        Commands::Analyze {
            text,
            input,
            lexicon,
            verbose,
        } => {
            setup_logging(verbose);
            let text = read_text(text, input)?;
            analyze_text(&text, lexicon)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn read_text(text: Option<String>, input: Option<PathBuf>) -> Result<String> {
    match (text, input) {
        (Some(text), None) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file: {:?}", path)),
        (Some(_), Some(_)) => anyhow::bail!("Pass either --text or --input, not both"),
        (None, None) => anyhow::bail!("Pass --text or --input"),
    }
}

fn build_lemmatizer(lexicon: Option<PathBuf>) -> Box<dyn Lemmatizer> {
    match lexicon {
        Some(path) => match LexiconLemmatizer::load(&path) {
            Ok(lemmatizer) => {
                info!("Loaded lexicon from {:?}", path);
                Box::new(lemmatizer)
            }
            Err(err) => {
                warn!("Lexicon unavailable, skipping lemmatization: {err:#}");
                Box::new(PassthroughLemmatizer)
            }
        },
        None => Box::new(PassthroughLemmatizer),
    }
}

async fn run_predict(
    text: &str,
    model_dir: Option<PathBuf>,
    lexicon: Option<PathBuf>,
    log: Option<PathBuf>,
    log_url: Option<String>,
    top: usize,
    json: bool,
) -> Result<()> {
    let model = model_dir.as_deref().and_then(load_bundle);
    if model.is_none() {
        info!("No model loaded, using rule-based fallback");
    }

    let sink = if let Some(path) = log {
        PredictionSink::Jsonl(JsonlSink::new(path))
    } else if let Some(url) = log_url {
        PredictionSink::Http(HttpSink::new(url))
    } else {
        PredictionSink::Null
    };

    let engine = Engine::new(
        model,
        build_lemmatizer(lexicon),
        sink,
        EngineConfig::default(),
    );

    info!(
        "Classifying {} characters (model: {})",
        text.chars().count(),
        engine.model_version()
    );
    let prediction = engine.predict_emotion(text).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        println!("Label: {}", prediction.label);
        println!();
        println!("Top probabilities");
        println!("-----------------");
        for (label, prob) in prediction.distribution.ranked().into_iter().take(top) {
            println!("{:<16} {:.3}", label.name(), prob);
        }
    }

    Ok(())
}

fn analyze_text(text: &str, lexicon: Option<PathBuf>) -> Result<()> {
    let keywords = KeywordTable::default();
    let lemmatizer = build_lemmatizer(lexicon);
    let normalized = normalize(text, lemmatizer.as_ref());
    let chars = text.chars().count();
    let threshold = EngineConfig::default().chunk_threshold_chars;

    println!("Text Analysis");
    println!("=============");
    println!("Characters: {}", chars);
    println!("Normalized: {}", normalized);
    println!(
        "Crisis language: {}",
        contains_crisis_language(&keywords, text, &normalized)
    );
    println!(
        "Chunking: {}",
        if chars > threshold {
            "yes (over the single-pass threshold)"
        } else {
            "no"
        }
    );
    println!();

    let scores = score(&keywords, text, &normalized);
    println!("Rule Scores");
    println!("-----------");
    if scores.is_zero() {
        println!("(no keyword matches)");
    } else {
        for label in EmotionLabel::ALL {
            if scores.get(label) > 0 {
                println!("{:<16} {}", label.name(), scores.get(label));
            }
        }
    }
    println!();

    let (label, _) = pick_label(&scores);
    println!("Rule-based label: {label}");

    Ok(())
}

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use unicorn::config::Config;
use unicorn::{Chatbot, Dataset, MetricsCollector, MetricsSummary, QueryOutcome};

const BANNER: &str = "--- Unicorn Bot v2.0 (Context Aware) ---";

#[derive(Parser)]
#[command(name = "unicorn")]
#[command(about = "Unicorn - Company Q&A\nAsk about companies, sectors and locations in a local dataset")]
#[command(version)]
struct Cli {
  /// Configuration file (defaults to .unicorn.json or unicorn.json when present)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Company dataset CSV
  #[arg(short, long, global = true, env = "UNICORN_DATA")]
  data: Option<PathBuf>,

  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Start an interactive session (default)
  Chat,
  /// Answer a single question and exit
  Ask {
    /// Print the reply, matched companies and metrics as JSON
    #[arg(long)]
    json: bool,
    /// Question words (space-separated)
    #[arg(required = true)]
    terms: Vec<String>,
  },
  /// List the sector topics understood by broad search
  Sectors,
}

#[derive(Serialize)]
struct AskReport<'a> {
  outcome: &'a QueryOutcome,
  metrics: MetricsSummary,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let config = match &cli.config {
    Some(path) => Config::load_from_file(path)?,
    None => Config::load()?,
  }
  .with_data_path(cli.data.clone());

  init_tracing(&config, cli.verbose)?;

  match cli.command.unwrap_or(Commands::Chat) {
    Commands::Chat => {
      let dataset = load_dataset(&config.data_path)?;
      run_chat(dataset)?;
    }
    Commands::Ask { json, terms } => {
      let dataset = load_dataset(&config.data_path)?;
      ask(dataset, &terms.join(" "), json)?;
    }
    Commands::Sectors => {
      list_sectors();
    }
  }

  Ok(())
}

/// Install stderr and optional file logging
fn init_tracing(config: &Config, verbose: bool) -> Result<()> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if verbose {
      EnvFilter::new("unicorn=debug,warn")
    } else {
      EnvFilter::new("unicorn=info,warn")
    }
  });

  let file_layer = match config.log_file() {
    Some(path) => {
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
      Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
    }
    None => None,
  };

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_writer(io::stderr))
    .with(file_layer)
    .init();

  Ok(())
}

fn load_dataset(path: &Path) -> Result<Arc<Dataset>> {
  if !path.exists() {
    return Err(anyhow!("{} not found.", path.display()));
  }

  let dataset = Dataset::load(path).context("Refusing to start session")?;
  for collision in dataset.name_collisions() {
    herald::warn!(&format!(
      "Company names '{}' and '{}' differ only in case; using '{}'",
      collision.replaced, collision.kept, collision.kept
    ));
  }

  Ok(Arc::new(dataset))
}

fn run_chat(dataset: Arc<Dataset>) -> Result<()> {
  herald::announce!(BANNER);
  herald::success!(&format!("Loaded {} companies", dataset.len()));
  herald::event!("Session started");

  let mut bot = Chatbot::new(dataset);
  let mut metrics = MetricsCollector::new();
  let stdin = io::stdin();
  let mut stdout = io::stdout();

  loop {
    print!("\nYou: ");
    stdout.flush()?;

    let mut buf = Vec::new();
    if stdin.lock().read_until(b'\n', &mut buf)? == 0 {
      break;
    }
    let line = String::from_utf8_lossy(&buf);
    if is_exit_command(&line) {
      break;
    }

    let outcome = bot.process(&line, &mut metrics);
    if outcome.is_error {
      println!("{}", outcome.reply);
    } else {
      println!("Bot: {}", outcome.reply);
    }
  }

  let summary = metrics.summary();
  info!(
    total_queries = summary.total_queries,
    clarifications = summary.clarifications_triggered,
    errors = summary.errors,
    avg_latency_ms = summary.avg_latency_ms,
    "Session ended"
  );
  herald::farewell!(&format!(
    "{} turns, {} clarifications, {} errors, {:.1} ms average",
    summary.total_queries, summary.clarifications_triggered, summary.errors, summary.avg_latency_ms
  ));

  Ok(())
}

fn ask(dataset: Arc<Dataset>, question: &str, json: bool) -> Result<()> {
  let mut bot = Chatbot::new(dataset);
  let mut metrics = MetricsCollector::new();
  let outcome = bot.process(question, &mut metrics);

  if json {
    let report = AskReport { outcome: &outcome, metrics: metrics.summary() };
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    println!("{}", outcome.reply);
  }

  Ok(())
}

fn list_sectors() {
  let sectors = unicorn::sectors::SectorMap::default();
  for (topic, labels) in sectors.topics() {
    println!("{}", topic.cyan().bold());
    for label in labels {
      println!("  - {}", label);
    }
  }
}

/// Literal `exit` or `quit`, any case, ends the session
fn is_exit_command(line: &str) -> bool {
  let command = line.trim().to_lowercase();
  command == "exit" || command == "quit"
}

//! Command-line front end for the scoring core.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use lingo_core::{score_matrix, ScoringConfig, ScoringEngine, Taxonomy};

#[derive(Parser)]
#[command(name = "lingo", about = "Score language guesses by taxonomic distance")]
struct Cli {
    /// Language tree JSON file
    #[arg(short, long)]
    taxonomy: PathBuf,

    /// Scoring config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the first-release 20-point rule
    #[arg(long, conflicts_with = "config")]
    legacy: bool,

    #[arg(long)]
    max_score: Option<u32>,

    #[arg(long)]
    penalty: Option<u32>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a guess against the correct language
    Score { correct: String, guess: String },
    /// Print the comparison tree as JSON
    Tree { correct: String, guess: String },
    /// Print the full evaluation (paths, score, tree) as JSON
    Evaluate { correct: String, guess: String },
    /// Print the root-to-node path of a name
    Path { name: String },
    /// List every language name
    Languages,
    /// Autocomplete a partial language name
    Suggest {
        query: String,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Pairwise score matrix for the given languages
    Matrix { names: Vec<String> },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let taxonomy = Taxonomy::from_path(&cli.taxonomy)
        .with_context(|| format!("loading taxonomy from {}", cli.taxonomy.display()))?;
    let engine = ScoringEngine::new(taxonomy, config)?;

    match cli.command {
        Command::Score { correct, guess } => {
            let outcome = engine.score(&correct, &guess);
            match outcome.total_distance {
                Some(distance) => println!("{} (distance {})", outcome.score, distance),
                None => println!("{} (unknown language)", outcome.score),
            }
        }
        Command::Tree { correct, guess } => {
            println!("{}", engine.evaluate(&correct, &guess).tree.to_json());
        }
        Command::Evaluate { correct, guess } => {
            let evaluation = engine.evaluate(&correct, &guess);
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
        }
        Command::Path { name } => match engine.find_path(&name) {
            Some(path) => println!("{}", path),
            None => anyhow::bail!("{} is not in the taxonomy", name),
        },
        Command::Languages => {
            for name in engine.taxonomy().language_names() {
                println!("{}", name);
            }
        }
        Command::Suggest { query, limit } => {
            for name in engine.taxonomy().suggest(&query, limit) {
                println!("{}", name);
            }
        }
        Command::Matrix { names } => {
            let matrix = score_matrix(engine.taxonomy(), &names, engine.config());
            for (name, row) in names.iter().zip(matrix.outer_iter()) {
                let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                println!("{}\t{}", name, cells.join("\t"));
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<ScoringConfig> {
    let base = match (&cli.config, cli.legacy) {
        (Some(path), _) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ScoringConfig::from_json_str(&text)?
        }
        (None, true) => ScoringConfig::legacy(),
        (None, false) => ScoringConfig::default(),
    };

    let config = ScoringConfig {
        max_score: cli.max_score.unwrap_or(base.max_score),
        edge_penalty: cli.penalty.unwrap_or(base.edge_penalty),
        ..base
    };
    config.validate()?;
    Ok(config)
}

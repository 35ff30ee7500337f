mod config;
mod output;
mod parse;
mod session;

use clap::Parser;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use votesort_core::{Item, MergeSorter};

use crate::output::OutputFormat;
use crate::session::SessionEnd;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "votesort", version, about = "Rank items by choosing between pairs")]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Rank a list of items by voting on pairs
    Rank(RankArgs),
    /// Create a default config file at ~/.config/votesort/config.toml
    Init {
        /// Write the config here instead of the default location
        #[arg(long = "config")]
        path: Option<PathBuf>,
    },
}

#[derive(Parser)]
struct RankArgs {
    /// File with one item per line, or a JSON array of strings
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item (repeatable)
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// Title to leave out (repeatable, adds to the config's exclude list)
    #[arg(long)]
    exclude: Vec<String>,

    /// Shuffle seed, for a reproducible pairing order
    #[arg(long)]
    seed: Option<u64>,

    /// Replay votes from a string instead of prompting: l, r, t, ?, u (undo), y (redo)
    #[arg(long)]
    votes: Option<String>,

    /// Ranking output: "table", "text", or "json"
    #[arg(long)]
    format: Option<String>,

    /// Path to config file (default: ~/.config/votesort/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("VOTESORT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "votesort=debug,warn" } else { "votesort=warn" })
    });

    let format = env::var("VOTESORT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry.with(fmt::layer().compact().with_writer(io::stderr)).init();
        }
    }
}

/// Load items from --items (or the config's default file) plus --item flags,
/// then drop excluded titles.
fn load_items(args: &RankArgs, cfg: &config::VotesortConfig) -> Vec<Item> {
    let mut titles = Vec::new();

    let items_path = args.items.clone().or_else(|| cfg.items.as_ref().map(PathBuf::from));
    if let Some(ref path) = items_path {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read items file {}: {e}", path.display())));
        titles = parse::parse_titles(&content);
    }

    titles.extend(
        args.inline_items
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    );

    if titles.is_empty() {
        bail("No items provided. Use --items <file> or --item <title>.");
    }

    let exclude: Vec<String> = cfg.exclude.iter().chain(&args.exclude).cloned().collect();
    let items = parse::build_items(titles, &exclude);
    if items.is_empty() {
        bail("Every item was excluded; nothing left to rank.");
    }
    items
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Rank(args) => run_rank(args),
        Commands::Init { path } => {
            let path = path.unwrap_or_else(config::config_path);
            config::create_default_config(&path);
            println!("Created config at {}", path.display());
            println!("Edit it to set your default item file, exclusions, etc.");
        }
    }
}

fn run_rank(args: RankArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let format = OutputFormat::parse(args.format.as_deref().or(cfg.format.as_deref()).unwrap_or("table"));
    let seed = args.seed.or(cfg.seed);

    // Validate the script before anyone spends time voting.
    let script = args.votes.as_deref().map(|s| {
        parse::parse_script(s)
            .unwrap_or_else(|c| bail(format!("Invalid character {c:?} in --votes. Use l, r, t, ?, u, or y.")))
    });

    let items = load_items(&args, &cfg);
    info!(items = items.len(), ?seed, "loaded items");

    let started = match seed {
        Some(seed) => MergeSorter::start_seeded(items, seed),
        None => MergeSorter::start(items),
    };
    let mut sorter = started.unwrap_or_else(|e| bail(e));

    let end = match script {
        Some(commands) => session::run_script(&mut sorter, &commands),
        None => {
            let stdin = io::stdin();
            let mut stderr = io::stderr();
            session::run_interactive(&mut sorter, stdin.lock(), &mut stderr)
                .unwrap_or_else(|e| bail(format!("Terminal IO failed: {e}")))
        }
    };

    match end {
        SessionEnd::Completed => {}
        SessionEnd::Quit => bail(format!(
            "Quit at {}% with {} votes cast; no ranking produced.",
            sorter.current_progress(),
            sorter.votes_cast()
        )),
        SessionEnd::InputClosed => bail(format!(
            "Input ended at {}% before the ranking was complete.",
            sorter.current_progress()
        )),
    }

    let Some(ranking) = sorter.final_result() else {
        bail("Session ended without a ranking.");
    };

    let rendered = output::render(format, &ranking, sorter.votes_cast());
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .unwrap_or_else(|e| bail(format!("Failed to write ranking: {e}")));
}

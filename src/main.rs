use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use knightwatch::board::position::START_FEN;
use knightwatch::{Difficulty, Engine, EngineConfig};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chess move-search engine with opening book and difficulty tiers", long_about = None)]
struct Args {
    /// Engine config file (JSON); flags below override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compute one move for a position and print it
    Bestmove {
        /// Position to search (defaults to the standard start position)
        #[arg(long)]
        fen: Option<String>,

        /// easy, medium, hard or master
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Opening book JSON to use instead of the builtin one
        #[arg(long)]
        book: Option<PathBuf>,

        /// Skip the opening book
        #[arg(long)]
        no_book: bool,

        /// Search on this thread only, without starting the worker
        #[arg(long)]
        no_worker: bool,

        /// Seed for book sampling and random fallback
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the search worker over JSON lines on stdin/stdout
    Serve,
    /// Print the difficulty profile table as JSON
    Profiles,
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::load(p).with_context(|| format!("loading config {}", p.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut config = load_config(args.config.as_ref())?;

    match args.command {
        Cmd::Bestmove { fen, difficulty, book, no_book, no_worker, seed } => {
            if let Some(b) = book { config.book_path = Some(b); }
            if no_book { config.use_book = false; }
            if no_worker { config.use_worker = false; }
            if seed.is_some() { config.seed = seed; }
            let difficulty = difficulty.unwrap_or(config.difficulty);
            let fen = fen.unwrap_or_else(|| START_FEN.to_string());

            let use_worker = config.use_worker;
            let mut engine = Engine::new(config);
            if use_worker {
                if let Err(e) = engine.init_engine() {
                    log::warn!("worker unavailable, local search only: {e}");
                }
            }
            let t0 = Instant::now();
            match engine.best_move(&fen, difficulty) {
                Some(bm) => {
                    log::info!("{} via {:?} in {:?}", bm.bestmove, bm.source, t0.elapsed());
                    println!("bestmove {}", bm.bestmove);
                }
                None => println!("bestmove (none)"),
            }
        }
        Cmd::Serve => {
            let stdin = io::stdin();
            knightwatch::worker::serve_lines(stdin.lock(), io::stdout().lock())?;
        }
        Cmd::Profiles => {
            let table: Vec<_> = Difficulty::ALL.iter().map(|d| serde_json::json!({
                "difficulty": d,
                "profile": d.profile(),
                "bookBias": d.book_bias(),
            })).collect();
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
    }
    Ok(())
}

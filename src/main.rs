//! MTG Playmat - command line driver
//!
//! Runs scripted playmat sessions against a deck file and prints hand
//! layouts, mainly for debugging renderers and reproducing bug reports.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mtg_playmat_rs::{
    game::{parse_script, GameLogger, HandView, PlaymatCommand, VerbosityLevel},
    layout::HandLayoutConfig,
    loader::load_from_file_async,
    InstanceId, Playmat, PlaymatConfig,
};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::path::PathBuf;

/// Verbosity level for session output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "playmat")]
#[command(about = "MTG Playmat - single-player virtual tabletop engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted session against a deck
    Run {
        /// Deck file (.json definition or .dck)
        #[arg(value_name = "DECK")]
        deck: PathBuf,

        /// Commands to run, separated by ';' (e.g. "draw; play 3 10 10")
        #[arg(long, value_name = "COMMANDS")]
        commands: Option<String>,

        /// File with one command per line (runs after --commands)
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,

        /// Set random seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Session configuration (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Override the configured starting life
        #[arg(long)]
        starting_life: Option<i32>,

        /// Hand container width used for the final snapshot
        #[arg(long, default_value = "1200")]
        width: f32,

        /// Hand container height used for the final snapshot
        #[arg(long, default_value = "300")]
        height: f32,

        /// Verbosity level for session output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Write the final render snapshot to this file as JSON
        #[arg(long, value_name = "FILE")]
        snapshot_output: Option<PathBuf>,
    },

    /// Print hand poses for a hand of COUNT cards as JSON
    Layout {
        #[arg(value_name = "COUNT")]
        count: usize,

        #[arg(long, default_value = "1200")]
        width: f32,

        #[arg(long, default_value = "300")]
        height: f32,

        /// Index of the hovered card
        #[arg(long)]
        hovered: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            deck,
            commands,
            script,
            seed,
            config,
            starting_life,
            width,
            height,
            verbosity,
            snapshot_output,
        } => {
            let options = RunOptions {
                deck,
                commands,
                script,
                seed,
                config,
                starting_life,
                view: HandView::new(width, height),
                verbosity: verbosity.into(),
                snapshot_output,
            };
            run_session(options).await?
        }
        Commands::Layout {
            count,
            width,
            height,
            hovered,
        } => {
            let poses = HandLayoutConfig::default().layout(count, width, height, hovered);
            println!("{}", serde_json::to_string_pretty(&poses)?);
        }
    }

    Ok(())
}

struct RunOptions {
    deck: PathBuf,
    commands: Option<String>,
    script: Option<PathBuf>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    starting_life: Option<i32>,
    view: HandView,
    verbosity: VerbosityLevel,
    snapshot_output: Option<PathBuf>,
}

async fn run_session(options: RunOptions) -> Result<()> {
    let mut config = match &options.config {
        Some(path) => PlaymatConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlaymatConfig::default(),
    };
    if let Some(life) = options.starting_life {
        config = config.with_starting_life(life);
    }

    let deck = load_from_file_async(&options.deck)
        .await
        .with_context(|| format!("loading deck {}", options.deck.display()))?;

    let mut commands = Vec::new();
    if let Some(inline) = &options.commands {
        commands.extend(parse_script(inline).context("parsing --commands")?);
    }
    if let Some(path) = &options.script {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading script {}", path.display()))?;
        commands.extend(parse_script(&text).with_context(|| format!("parsing {}", path.display()))?);
    }

    let seed = options.seed.unwrap_or_else(rand::random);
    let quiet = options.verbosity == VerbosityLevel::Silent;
    if !quiet {
        println!("=== MTG Playmat ===");
        println!("Deck: {} ({} cards)", deck.name, deck.total_cards());
        println!("Using random seed: {seed}\n");
    }

    let mut playmat = Playmat::with_rng(
        deck,
        config,
        ChaCha12Rng::seed_from_u64(seed),
        GameLogger::with_verbosity(options.verbosity),
    );

    let mut rejected = 0usize;
    for command in commands {
        match command {
            PlaymatCommand::Action(action) => {
                // Rejections are already logged by the coordinator
                if playmat.apply(action).is_err() {
                    rejected += 1;
                }
            }
            PlaymatCommand::Undo => {
                if playmat.undo().is_none() && !quiet {
                    println!("  nothing to undo");
                }
            }
        }
    }

    playmat
        .check_conservation()
        .context("session ended in an inconsistent state")?;

    if !quiet {
        print_summary(&playmat, rejected);
    }

    if let Some(path) = &options.snapshot_output {
        playmat
            .snapshot(&options.view)
            .save_to_file(path)
            .with_context(|| format!("saving snapshot {}", path.display()))?;
        if !quiet {
            println!("Snapshot saved to {}", path.display());
        }
    }

    Ok(())
}

fn print_summary(playmat: &Playmat, rejected: usize) {
    println!("\n=== Session Summary ===");
    println!("Turn {}, life {}", playmat.turn(), playmat.life());
    for (zone, n) in playmat.state().zone_sizes() {
        println!("  {zone:?}: {n}");
    }
    let hand: Vec<String> = playmat
        .state()
        .zones
        .hand()
        .ids()
        .map(|id| describe(playmat, id))
        .collect();
    if !hand.is_empty() {
        println!("Hand: {}", hand.join(", "));
    }
    if rejected > 0 {
        println!("{rejected} command(s) rejected");
    }
}

fn describe(playmat: &Playmat, id: InstanceId) -> String {
    match playmat.card_name(id) {
        Some(name) => format!("{id} {name}"),
        None => id.to_string(),
    }
}

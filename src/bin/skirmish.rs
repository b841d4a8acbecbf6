//! Headless skirmish runner
//!
//! Runs an AI vs AI 2v2 battle and prints a summary.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use hexy_tactics::battle::{
    choose_action, BattleGrid, HexCoord, Roster, TurnEntry, TurnPhase, TurnScheduler,
};
use hexy_tactics::combat::{CombatClass, Faction, RngDice};
use hexy_tactics::core::BattleConfig;

/// Headless skirmish - AI vs AI on a hex grid
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Run an AI vs AI skirmish and print the result")]
struct Args {
    /// Random seed for deterministic runs (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Battle configuration TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many rounds if nobody has won
    #[arg(long, default_value_t = 50)]
    max_rounds: u32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every combat log line as it happens
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct SkirmishResult {
    outcome: String,
    rounds: u32,
    seed: u64,
    survivors: Vec<TurnEntry>,
    log: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "hexy_tactics=debug"
    } else {
        "hexy_tactics=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => BattleConfig::from_file(path)?,
        None => BattleConfig::default(),
    };
    let seed = args
        .seed
        .or(config.seed)
        .unwrap_or_else(rand::random);

    tracing::info!("Skirmish starting with seed {}", seed);

    let (roster, grid) = setup(&config);
    let mut scheduler = TurnScheduler::new(roster, grid, &config, RngDice::seeded(seed));
    scheduler.start_battle()?;

    while !scheduler.is_over() && scheduler.round() <= args.max_rounds {
        let phase = scheduler.phase();
        if phase.awaits_command() {
            let Some(actor) = scheduler.active_combatant() else {
                break;
            };
            let command = choose_action(scheduler.roster(), scheduler.grid(), actor);
            if let Err(e) = scheduler.queue_action(command) {
                tracing::warn!("AI command rejected ({}), skipping turn", e);
                scheduler.advance_turn()?;
            }
        } else if phase.is_automatic() {
            scheduler.update();
            if args.verbose && phase == TurnPhase::ExecuteAction {
                if let Some(result) = scheduler.last_result() {
                    for line in &result.messages {
                        eprintln!("[round {}] {}", scheduler.round(), line);
                    }
                }
            }
        } else {
            break;
        }
    }

    let outcome = match scheduler.phase() {
        TurnPhase::Victory => "Victory",
        TurnPhase::Defeat => "Defeat",
        _ => "Undecided",
    };
    let result = SkirmishResult {
        outcome: outcome.to_string(),
        rounds: scheduler.round(),
        seed,
        survivors: scheduler
            .turn_order()
            .into_iter()
            .filter(|entry| !entry.is_dead)
            .collect(),
        log: scheduler.log().lines().map(str::to_string).collect(),
    };

    match args.format.as_str() {
        "text" => print_text(&result),
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

/// Two adventurers on the west edge, two monsters on the east, a pair of rocks between
fn setup(config: &BattleConfig) -> (Roster, BattleGrid) {
    let edge = config.grid_radius.max(2);

    let mut roster = Roster::new();
    roster.add(
        CombatClass::Fighter
            .build("Aldric", Faction::Player)
            .at(HexCoord::new(-(edge - 1), 0)),
    );
    roster.add(
        CombatClass::Archer
            .build("Wren", Faction::Player)
            .at(HexCoord::new(-edge, 1)),
    );
    roster.add(
        CombatClass::Goblin
            .build("Snik", Faction::Enemy)
            .at(HexCoord::new(edge - 1, 0)),
    );
    roster.add(
        CombatClass::Orc
            .build("Grosh", Faction::Enemy)
            .at(HexCoord::new(edge, -1)),
    );

    let mut grid = BattleGrid::new(edge);
    grid.add_obstacle(HexCoord::new(0, 1));
    grid.add_obstacle(HexCoord::new(1, -1));

    (roster, grid)
}

fn print_text(result: &SkirmishResult) {
    println!("Skirmish Result");
    println!("===============");
    println!("Outcome: {}", result.outcome);
    println!("Rounds: {}", result.rounds);
    println!("Seed: {}", result.seed);
    println!();
    println!("Survivors:");
    for entry in &result.survivors {
        println!(
            "  {} ({:?}) {}/{} HP",
            entry.name, entry.faction, entry.current_hp, entry.max_hp
        );
    }
    println!();
    println!("Last events:");
    for line in &result.log {
        println!("  {}", line);
    }
}

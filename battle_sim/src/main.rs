//! battle_sim - Headless party-versus-boss encounter runner
//!
//! Builds a party and a boss from the difficulty presets, lets the autopilot
//! play every party turn, prints the combat log, and optionally saves or
//! resumes a battle from JSON.

mod autopilot;
mod report;
mod save;

use anyhow::{bail, Context, Result};
use autopilot::AutoPilot;
use battle_core::prelude::*;
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use save::SaveFile;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const BOSS_NAME: &str = "Ancient Giant";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ClassArg {
    Warrior,
    Mage,
    Healer,
}

impl From<ClassArg> for UnitClass {
    fn from(class: ClassArg) -> Self {
        match class {
            ClassArg::Warrior => UnitClass::Warrior,
            ClassArg::Mage => UnitClass::Mage,
            ClassArg::Healer => UnitClass::Healer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
    Hardcore,
}

impl From<DifficultyArg> for Difficulty {
    fn from(difficulty: DifficultyArg) -> Self {
        match difficulty {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Hardcore => Difficulty::Hardcore,
        }
    }
}

/// Simulate a party-versus-boss encounter
#[derive(Parser, Debug)]
#[command(name = "battle_sim", version, about, long_about = None)]
struct Args {
    /// Encounter difficulty
    #[arg(long, value_enum, default_value_t = DifficultyArg::Normal)]
    difficulty: DifficultyArg,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Party classes in roster order (3 to 4 members)
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [ClassArg::Warrior, ClassArg::Mage, ClassArg::Healer]
    )]
    party: Vec<ClassArg>,

    #[arg(long, default_value_t = 1)]
    party_level: u32,

    #[arg(long, default_value_t = 10)]
    boss_level: u32,

    /// Stop after this many rounds even if nobody has won
    #[arg(long, default_value_t = 100)]
    max_rounds: u32,

    /// Directory with constants.toml / classes.toml / skills.toml overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the final battle state here (".json" is appended when missing)
    #[arg(long)]
    save: Option<PathBuf>,

    /// Resume from a save file
    #[arg(long)]
    load: Option<PathBuf>,

    /// Log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Party, boss and the state to restore, from the CLI or from a save
struct Setup {
    party: Vec<Unit>,
    boss: Boss,
    inventory: Inventory,
    difficulty: Difficulty,
    restore: Option<RestoreState>,
}

impl Setup {
    fn into_battle(self, rules: &Ruleset, seed: u64) -> Battle<ChaCha8Rng> {
        let mut battle = Battle::with_inventory(
            self.party,
            self.boss,
            self.inventory,
            rules.constants.clone(),
            ChaCha8Rng::seed_from_u64(seed),
        );
        if let Some(restore) = &self.restore {
            battle.restore_state(restore);
        }
        battle
    }
}

fn fresh_setup(args: &Args, rules: &Ruleset) -> Result<Setup> {
    if !(3..=4).contains(&args.party.len()) {
        bail!("party must have 3 or 4 members, got {}", args.party.len());
    }

    let difficulty = Difficulty::from(args.difficulty);
    let roster: Vec<(String, UnitClass)> = args
        .party
        .iter()
        .enumerate()
        .map(|(index, &class)| {
            let class = UnitClass::from(class);
            (format!("{} {}", class, index + 1), class)
        })
        .collect();

    Ok(Setup {
        party: build_party(&roster, args.party_level, difficulty, rules)?,
        boss: build_boss(BOSS_NAME, args.boss_level, difficulty, rules)?,
        inventory: Inventory::with_starting_stock(&rules.constants.items),
        difficulty,
        restore: None,
    })
}

/// Rebuild the roster and inventory recorded in a save, then restore its HP/MP
fn loaded_setup(save: &SaveFile, rules: &Ruleset) -> Result<Setup> {
    let snapshot = &save.snapshot;
    let mut party = Vec::with_capacity(snapshot.party.len());
    for member in &snapshot.party {
        let roster = [(member.name.clone(), member.class)];
        party.extend(build_party(&roster, member.level, save.difficulty, rules)?);
    }
    let boss = build_boss(
        snapshot.boss.name.clone(),
        snapshot.boss.level,
        save.difficulty,
        rules,
    )?;

    Ok(Setup {
        party,
        boss,
        inventory: Inventory::from_items(snapshot.inventory.clone()),
        difficulty: save.difficulty,
        restore: Some(RestoreState::from(snapshot)),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let rules = match &args.config {
        Some(dir) => Ruleset::load_dir(dir)
            .with_context(|| format!("Failed to load config from {}", dir.display()))?,
        None => Ruleset::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let setup = match &args.load {
        Some(path) => {
            let save = save::load(path)?;
            info!(path = %path.display(), round = save.snapshot.round, "resuming battle");
            if args.seed.is_none() {
                warn!(saved_seed = save.seed, seed, "no --seed given, not reusing the saved seed");
            }
            loaded_setup(&save, &rules)?
        }
        None => fresh_setup(&args, &rules)?,
    };

    let difficulty = setup.difficulty;
    let mut battle = setup.into_battle(&rules, seed);

    println!("=== BATTLE START ({difficulty:?}, seed {seed}) ===");
    println!("Boss: {}", report::status(&battle.boss().unit));
    println!("Party:");
    for member in battle.party() {
        println!("  - {}", report::status(member));
    }

    let mut pilot = AutoPilot::new();
    while !battle.is_over() && battle.round() < args.max_rounds {
        let result = battle.start_round(&mut pilot);
        let view = battle.view();
        for line in result
            .events
            .iter()
            .filter_map(|event| report::describe(&view, event))
        {
            println!("{line}");
        }
    }

    println!("\n=== AFTER ROUND {} ===", battle.round());
    println!("Boss: {}", report::status(&battle.boss().unit));
    for member in battle.party() {
        println!("  - {}", report::status(member));
    }
    match battle.state() {
        BattleState::Active => println!("Round limit reached; the battle is still on"),
        state => info!(?state, rounds = battle.round(), "battle finished"),
    }

    if let Some(path) = &args.save {
        let save = SaveFile {
            difficulty,
            seed,
            snapshot: battle.snapshot(),
        };
        let written = save::save(path, &save)?;
        println!("Saved battle to {}", written.display());
    }

    Ok(())
}

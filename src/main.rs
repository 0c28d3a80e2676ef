//! Turtle Island - headless runner
//!
//! Builds the starting island, runs a number of ticks and prints a summary
//! of what happened, either as text or as JSON.

use std::path::PathBuf;

use ahash::AHashMap;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use turtle_island::core::config::SimulationConfig;
use turtle_island::core::error::Result;
use turtle_island::ecs::world::World;
use turtle_island::entity::resources::ResourceType;
use turtle_island::simulation::scenario::starting_world;
use turtle_island::simulation::tick::SimulationEvent;

/// Run the Turtle Island simulation without a display
#[derive(Parser, Debug)]
#[command(name = "turtle-island")]
#[command(about = "Run the Turtle Island agent simulation and report what happened")]
struct Args {
    /// Number of ticks to run
    #[arg(long, default_value_t = 3000)]
    ticks: u64,

    /// Seconds of simulation time per tick
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// TOML file overriding the default tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Print every event as it happens
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct AgentSummary {
    name: String,
    age: u32,
    saturation: f32,
    happiness: f32,
    health: f32,
}

#[derive(Serialize)]
struct RunSummary {
    ticks: u64,
    elapsed: f32,
    population: usize,
    groups: usize,
    sacrificed_units: u32,
    food_left: u32,
    happiness_left: u32,
    events: AHashMap<&'static str, usize>,
    agents: Vec<AgentSummary>,
}

fn summarize(world: &World, events: AHashMap<&'static str, usize>) -> RunSummary {
    let reserve_of = |resource: ResourceType| -> u32 {
        world
            .nodes
            .iter()
            .filter(|(_, node)| node.natural_resource() == Some(resource))
            .filter_map(|(_, node)| node.ledger(turtle_island::world::LedgerSlot::Reserve))
            .map(|ledger| ledger.get(resource))
            .sum()
    };
    let agents = world
        .agents
        .iter()
        .map(|(_, agent)| {
            let c = agent.characteristics();
            AgentSummary {
                name: agent.name.clone(),
                age: c.age(&world.ctx),
                saturation: c.saturation(),
                happiness: c.happiness(),
                health: c.health(),
            }
        })
        .collect();

    RunSummary {
        ticks: world.current_tick(),
        elapsed: world.now(),
        population: world.population(),
        groups: world.groups.len(),
        sacrificed_units: world
            .light_pillar()
            .and_then(|id| world.nodes.get(id))
            .map(|pillar| pillar.sacrificed_units())
            .unwrap_or(0),
        food_left: reserve_of(ResourceType::Food),
        happiness_left: reserve_of(ResourceType::Happiness),
        events,
        agents,
    }
}

fn print_text(summary: &RunSummary) {
    println!("\n=== TURTLE ISLAND ===");
    println!(
        "{} ticks, {:.1} seconds simulated",
        summary.ticks, summary.elapsed
    );
    println!(
        "Population: {}  Groups: {}  Sacrificed: {}",
        summary.population, summary.groups, summary.sacrificed_units
    );
    println!(
        "Reserves left: {} food, {} happiness",
        summary.food_left, summary.happiness_left
    );

    let mut kinds: Vec<_> = summary.events.iter().collect();
    kinds.sort();
    println!("\nEvents:");
    for (kind, count) in kinds {
        println!("  {:<18} {}", kind, count);
    }

    println!("\nAgents:");
    for agent in &summary.agents {
        println!(
            "  {:<10} age {:>3}  saturation {:.2}  happiness {:.2}  health {:.2}",
            agent.name, agent.age, agent.saturation, agent.happiness, agent.health
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("turtle_island=info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    let mut world = starting_world(config, args.seed)?;
    let mut tally: AHashMap<&'static str, usize> = AHashMap::new();

    for _ in 0..args.ticks {
        for event in world.tick(args.dt) {
            if args.verbose {
                print_event(world.current_tick(), &event, &args.format)?;
            }
            *tally.entry(event.kind()).or_insert(0) += 1;
        }
        if world.population() == 0 {
            tracing::info!(tick = world.current_tick(), "the island is empty");
            break;
        }
    }

    let summary = summarize(&world, tally);
    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_text(&summary);
    }
    Ok(())
}

fn print_event(tick: u64, event: &SimulationEvent, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string(event)?);
    } else {
        println!("[{:>6}] {:?}", tick, event);
    }
    Ok(())
}

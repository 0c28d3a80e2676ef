//! The starting island: four founders, one group and a handful of sources

use tracing::info;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::Vec2;
use crate::ecs::world::World;
use crate::entity::needs::Gender;
use crate::entity::resources::ResourceType;

/// Units in every source of the starting island
pub const SOURCE_UNITS: u32 = 100;

const FOUNDERS: [(&str, Gender, (f32, f32)); 4] = [
    ("Martin", Gender::Male, (9.0, 23.0)),
    ("Henrik", Gender::Female, (20.0, 23.0)),
    ("Tomas", Gender::Male, (23.0, 22.0)),
    ("Andreas", Gender::Female, (17.0, 17.0)),
];

const SOURCES: [(ResourceType, (f32, f32)); 5] = [
    (ResourceType::Food, (12.0, 15.0)),
    (ResourceType::Food, (21.0, 9.0)),
    (ResourceType::Happiness, (20.0, 20.0)),
    (ResourceType::Happiness, (12.0, 6.0)),
    (ResourceType::Sacrifice, (18.0, 11.0)),
];

const GROUP_POSITION: (f32, f32) = (15.0, 15.0);

/// Build the starting island from a validated config
pub fn starting_world(config: SimulationConfig, seed: u64) -> Result<World> {
    config.validate()?;
    let bounds = config.bounds();
    let mut world = World::new(config, seed);

    world.add_light_pillar(bounds.center());
    for (resource, (x, y)) in SOURCES {
        world.add_source(bounds.clamp(Vec2::new(x, y)), resource, SOURCE_UNITS);
    }
    world.found_group(bounds.clamp(Vec2::new(GROUP_POSITION.0, GROUP_POSITION.1)));
    for (name, gender, (x, y)) in FOUNDERS {
        world.spawn_founder(name, Vec2::new(x, y), gender);
    }

    info!(
        founders = world.population(),
        nodes = world.nodes.len(),
        seed,
        "starting island ready"
    );
    Ok(world)
}

//! Decision loop: turn need trials into autonomous tasks
//!
//! Trials are polled in priority order and the first one that succeeds and
//! has no task yet wins; lower-priority trials are not polled that tick.

use rand::Rng;

use crate::ecs::world::World;
use crate::entity::agent::Agent;
use crate::entity::resources::ResourceType;
use crate::tasks::gather::GetResourceTask;
use crate::tasks::goals::{SafetyTask, StrollTask};
use crate::tasks::socialize::SocializeTask;
use crate::tasks::task_list::{AutonomousTask, TaskCategory};

/// Queue at most one new autonomous task. Returns its category.
pub fn needcheck(agent: &mut Agent, world: &mut World) -> Option<TaskCategory> {
    let task = choose_task(agent, world)?;
    let category = task.category();
    agent
        .task_list
        .add(task, &agent.actor, world)
        .then_some(category)
}

fn choose_task(agent: &mut Agent, world: &mut World) -> Option<AutonomousTask> {
    let actor = &mut agent.actor;
    let tasks = &agent.task_list;
    let here = actor.position;

    if actor.characteristics.is_hungry(&mut world.ctx)
        && !tasks.has(TaskCategory::Food)
        && !world.food_sources.is_empty()
    {
        if let Some(source) = world.nearest_source(ResourceType::Food, here) {
            return Some(AutonomousTask::GetResource(GetResourceTask::food(source, actor, world)));
        }
    } else if actor.characteristics.is_depressed(&mut world.ctx)
        && !tasks.has(TaskCategory::Happiness)
        && !world.happiness_sources.is_empty()
    {
        if let Some(source) = world.nearest_source(ResourceType::Happiness, here) {
            return Some(AutonomousTask::GetResource(GetResourceTask::happiness(
                source, actor, world,
            )));
        }
    } else if actor.characteristics.is_unsafe(&mut world.ctx) && !tasks.has(TaskCategory::Safety) {
        if let Some(pillar) = world.light_pillar() {
            return Some(AutonomousTask::Safety(SafetyTask::new(pillar)));
        }
    } else if actor.characteristics.is_strolly(&mut world.ctx) && !tasks.has(TaskCategory::Stroll) {
        let destination = world.ctx.config.bounds().random_point(&mut world.ctx.rng);
        return Some(AutonomousTask::Stroll(StrollTask::new(destination)));
    } else if !tasks.has(TaskCategory::Socialize) {
        let join_chance = world.ctx.config.join_socialization_chance;
        let joinable = if world.ctx.rng.gen::<f32>() < join_chance && !world.socialize_groups.is_empty() {
            world.nearest_group(here)
        } else {
            None
        };
        let group = match joinable {
            Some(group) => group,
            None => world.found_group(here),
        };
        return Some(AutonomousTask::Socialize(SocializeTask::new(group, actor, world)));
    }
    None
}

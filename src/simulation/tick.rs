//! Tick system - orchestrates one simulation step
//!
//! 1. Advance the clock
//! 2. Apply directory changes queued during the previous tick
//! 3. Update every agent alive at the start of the tick, in creation order:
//!    recalculate needs, check for death, then run the commanded task or
//!    the decision loop plus the autonomous scheduler
//!
//! Agents born during a tick act from the next one.

use serde::Serialize;
use tracing::{info, trace, warn};

use crate::core::types::{AgentId, GroupId, NodeId, SimTime, Vec2};
use crate::ecs::world::World;
use crate::entity::agent::Agent;
use crate::simulation::needcheck::needcheck;
use crate::simulation::population::{death_check, DeathCause};
use crate::tasks::task_list::TaskCategory;

/// Events generated during a tick, returned by [`run_simulation_tick`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum SimulationEvent {
    /// The decision loop queued an autonomous task
    TaskStarted { agent: AgentId, task: TaskCategory },
    TaskCompleted { agent: AgentId, task: TaskCategory },
    /// A commanded task finished its work and its pause
    CommandFinished { agent: AgentId },
    AgentBorn {
        agent: AgentId,
        name: String,
        parents: [AgentId; 2],
    },
    AgentDied {
        agent: AgentId,
        name: String,
        age: u32,
        cause: DeathCause,
    },
    GroupFounded { group: GroupId, position: Vec2 },
    GroupDisbanded { group: GroupId },
    /// A source's natural reserve is exhausted
    SourceDepleted { node: NodeId },
}

impl SimulationEvent {
    /// Short name used for tallies
    pub fn kind(&self) -> &'static str {
        match self {
            SimulationEvent::TaskStarted { .. } => "task_started",
            SimulationEvent::TaskCompleted { .. } => "task_completed",
            SimulationEvent::CommandFinished { .. } => "command_finished",
            SimulationEvent::AgentBorn { .. } => "agent_born",
            SimulationEvent::AgentDied { .. } => "agent_died",
            SimulationEvent::GroupFounded { .. } => "group_founded",
            SimulationEvent::GroupDisbanded { .. } => "group_disbanded",
            SimulationEvent::SourceDepleted { .. } => "source_depleted",
        }
    }
}

pub fn run_simulation_tick(world: &mut World, dt: SimTime) -> Vec<SimulationEvent> {
    world.ctx.clock.advance(dt);
    world.flush_directories();

    let agents: Vec<AgentId> = world.agents.ids().collect();
    for id in agents {
        let Some(mut agent) = world.agents.check_out(id) else {
            continue;
        };
        if update_agent(&mut agent, world) {
            world.agents.check_in(id, agent);
        } else {
            world.agents.remove(id);
        }
    }

    trace!(
        tick = world.current_tick(),
        population = world.population(),
        "tick complete"
    );
    world.drain_events()
}

/// One tick of an agent's life. Returns false when the agent died.
fn update_agent(agent: &mut Agent, world: &mut World) -> bool {
    recalculate(agent, world);

    if let Some(cause) = death_check(agent, &mut world.ctx) {
        let age = agent.actor.characteristics.age(&world.ctx);
        info!(agent = %agent.id(), name = %agent.name, age, ?cause, "agent died");
        agent.task_list.remove_all(&agent.actor, world);
        agent.commanded = None;
        world.emit(SimulationEvent::AgentDied {
            agent: agent.id(),
            name: agent.name.clone(),
            age,
            cause,
        });
        return false;
    }

    let id = agent.id();
    if let Some(command) = agent.commanded.as_mut() {
        if let Err(err) = command.execute(&mut agent.actor, world) {
            warn!(agent = %id, %err, "commanded task failed");
        }
        if command.is_done() {
            agent.commanded = None;
            world.emit(SimulationEvent::CommandFinished { agent: id });
        }
        return true;
    }

    if let Some(task) = needcheck(agent, world) {
        trace!(agent = %id, ?task, "task queued");
        world.emit(SimulationEvent::TaskStarted { agent: id, task });
    }
    if let Some(task) = agent.task_list.execute(&mut agent.actor, world) {
        world.emit(SimulationEvent::TaskCompleted { agent: id, task });
    }
    true
}

fn recalculate(agent: &mut Agent, world: &World) {
    let beacon = world.beacon();
    let ctx = &world.ctx;
    let actor = &mut agent.actor;
    actor.characteristics.decay_needs(ctx.dt(), &ctx.config);
    actor
        .characteristics
        .recompute_safety(actor.position, beacon, &ctx.config);
    actor.characteristics.recompute_health(ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::entity::needs::{Gender, NeedType};

    #[test]
    fn test_tick_advances_clock() {
        let mut world = World::new(SimulationConfig::default(), 1);
        world.tick(0.25);
        world.tick(0.25);
        assert_eq!(world.current_tick(), 2);
        assert!((world.now() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_starving_agent_is_removed() {
        let mut world = World::new(SimulationConfig::default(), 1);
        let id = world.spawn_founder("Martin", Vec2::new(9.0, 23.0), Gender::Male);
        world
            .agent_mut(id)
            .unwrap()
            .actor
            .characteristics
            .set_need(NeedType::Saturation, 0.0);

        let events = world.tick(0.1);
        assert!(events
            .iter()
            .any(|e| matches!(e, SimulationEvent::AgentDied { cause: DeathCause::Starvation, .. })));
        assert!(world.agent(id).is_none());
        assert!(!world.agents.is_alive(id));
    }

    #[test]
    fn test_event_kind_names() {
        let event = SimulationEvent::GroupDisbanded { group: GroupId(1) };
        assert_eq!(event.kind(), "group_disbanded");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("GroupDisbanded"));
    }
}

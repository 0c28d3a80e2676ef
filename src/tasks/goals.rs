//! Short autonomous goals: seek the light pillar, stroll somewhere

use crate::core::error::{Result, SimError};
use crate::core::types::{NodeId, Vec2};
use crate::ecs::world::World;
use crate::entity::agent::Actor;
use crate::tasks::movement::MoveToTask;
use crate::tasks::{MoveTarget, TaskStatus};

/// Walk towards the light pillar for as long as the agent feels unsafe
#[derive(Debug, Clone)]
pub struct SafetyTask {
    move_to: MoveToTask,
    done: bool,
}

impl SafetyTask {
    pub fn new(pillar: NodeId) -> Self {
        Self {
            move_to: MoveToTask::new(MoveTarget::Node(pillar), 1.0),
            done: false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn execute(&mut self, actor: &mut Actor, world: &mut World) -> Result<TaskStatus> {
        if self.done {
            return Err(SimError::TaskAlreadyDone);
        }
        if !self.move_to.is_done() && actor.characteristics.is_unsafe(&mut world.ctx) {
            self.move_to.execute(actor, world)?;
            return Ok(TaskStatus::Pending);
        }
        self.done = true;
        Ok(TaskStatus::Done)
    }
}

/// Walk to a random point
#[derive(Debug, Clone)]
pub struct StrollTask {
    move_to: MoveToTask,
}

impl StrollTask {
    pub fn new(destination: Vec2) -> Self {
        Self {
            move_to: MoveToTask::new(MoveTarget::Point(destination), 1.0),
        }
    }

    pub fn is_done(&self) -> bool {
        self.move_to.is_done()
    }

    pub fn execute(&mut self, actor: &mut Actor, world: &World) -> Result<TaskStatus> {
        self.move_to.execute(actor, world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::AgentId;
    use crate::entity::agent::Agent;
    use crate::entity::needs::Gender;

    #[test]
    fn test_safe_agent_finishes_immediately() {
        let mut world = World::new(SimulationConfig::default(), 4);
        let pillar = world.add_light_pillar(Vec2::new(16.0, 16.0));
        let mut agent = Agent::founder(AgentId(0), "Test".into(), Vec2::new(2.0, 2.0), Gender::Male, &world.ctx);
        world.ctx.clock.advance(0.1);

        // The unsafe trial cannot roll before a full randomize interval passed
        let mut task = SafetyTask::new(pillar);
        assert_eq!(task.execute(&mut agent.actor, &mut world).unwrap(), TaskStatus::Done);
        assert_eq!(agent.actor.position, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_stroll_reaches_point() {
        let mut world = World::new(SimulationConfig::default(), 4);
        world.ctx.clock.advance(0.5);
        let mut agent = Agent::founder(AgentId(0), "Test".into(), Vec2::new(2.0, 2.0), Gender::Female, &world.ctx);
        let mut task = StrollTask::new(Vec2::new(4.0, 2.0));
        let mut steps = 0;
        while !task.is_done() {
            task.execute(&mut agent.actor, &world).unwrap();
            steps += 1;
            assert!(steps < 10);
        }
        assert!(agent.actor.position.distance(&Vec2::new(4.0, 2.0)) < 0.1);
    }
}

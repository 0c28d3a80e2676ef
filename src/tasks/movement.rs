//! Single steps, travel to a target and wobbling around a centre

use rand::Rng;
use tracing::trace;

use crate::core::context::SimContext;
use crate::core::error::{Result, SimError};
use crate::core::types::{Vec2, Velocity};
use crate::ecs::world::World;
use crate::entity::agent::Actor;
use crate::tasks::{FailReason, MoveTarget, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveMode {
    /// Replace the velocity, then step
    Steer(Velocity),
    /// Step along the current velocity
    Continue,
    /// Jump straight to a point, clamped into the world
    Teleport(Vec2),
}

/// One step of movement; always done after a single execution
#[derive(Debug, Clone)]
pub struct MoveTask {
    mode: MoveMode,
    relative_speed: f32,
    done: bool,
}

impl MoveTask {
    pub fn steer(velocity: Velocity, relative_speed: f32) -> Self {
        Self {
            mode: MoveMode::Steer(velocity),
            relative_speed,
            done: false,
        }
    }

    pub fn continue_heading(relative_speed: f32) -> Self {
        Self {
            mode: MoveMode::Continue,
            relative_speed,
            done: false,
        }
    }

    pub fn teleport(point: Vec2) -> Self {
        Self {
            mode: MoveMode::Teleport(point),
            relative_speed: 1.0,
            done: false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn execute(&mut self, actor: &mut Actor, ctx: &SimContext) -> Result<TaskStatus> {
        if self.done {
            return Err(SimError::TaskAlreadyDone);
        }
        self.done = true;

        let target = match self.mode {
            MoveMode::Teleport(point) => point,
            MoveMode::Steer(velocity) => {
                actor.velocity = velocity;
                self.step_target(actor, ctx)
            }
            MoveMode::Continue => self.step_target(actor, ctx),
        };

        let bounds = ctx.config.bounds();
        if bounds.contains(target) {
            actor.position = target;
            Ok(TaskStatus::Done)
        } else {
            actor.position = bounds.clamp(target);
            Ok(TaskStatus::Failed(FailReason::OutOfBounds))
        }
    }

    fn step_target(&self, actor: &Actor, ctx: &SimContext) -> Vec2 {
        let distance = actor.velocity.magnitude * self.relative_speed * ctx.dt();
        actor.position.step(actor.velocity.direction(), distance)
    }
}

/// Headings count as equal while their whole-radian parts match
fn same_heading(a: f32, b: f32) -> bool {
    a as i32 == b as i32
}

/// Travel towards a point, node or group over several ticks
#[derive(Debug, Clone)]
pub struct MoveToTask {
    target: MoveTarget,
    destination: Option<Vec2>,
    destination_angle: f32,
    position_set: bool,
    relative_speed: f32,
    done: bool,
}

impl MoveToTask {
    pub fn new(target: MoveTarget, relative_speed: f32) -> Self {
        Self {
            target,
            destination: None,
            destination_angle: 0.0,
            position_set: false,
            relative_speed,
            done: false,
        }
    }

    pub fn target(&self) -> MoveTarget {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn set_relative_speed(&mut self, relative_speed: f32) {
        self.relative_speed = relative_speed;
    }

    /// Make the task travel again, e.g. for the next lap of a route
    pub fn reset(&mut self) {
        self.done = false;
        self.position_set = false;
    }

    pub fn execute(&mut self, actor: &mut Actor, world: &World) -> Result<TaskStatus> {
        if self.done {
            return Err(SimError::TaskAlreadyDone);
        }
        let Some(target_point) = world.target_position(self.target) else {
            self.done = true;
            trace!(agent = %actor.id, target = ?self.target, "move target deleted");
            return Ok(TaskStatus::Failed(FailReason::TargetDeleted));
        };

        let tolerance = world.ctx.config.on_position_offset;
        let mut destination = *self.destination.get_or_insert(target_point);
        let here = actor.position;
        let mut status = TaskStatus::Pending;

        let heading_kept = same_heading(self.destination_angle, here.angle_to(&destination));
        if !here.on_position(&destination, tolerance) && (!self.position_set || heading_kept) {
            let mut step = if self.position_set {
                MoveTask::continue_heading(self.relative_speed)
            } else {
                destination = target_point;
                self.destination = Some(target_point);
                self.destination_angle = here.angle_to(&target_point);
                let velocity = Velocity::new(self.destination_angle, actor.velocity.magnitude);
                MoveTask::steer(velocity, self.relative_speed)
            };

            if let TaskStatus::Failed(reason) = step.execute(actor, &world.ctx)? {
                self.done = true;
                status = TaskStatus::Failed(reason);
            } else if actor.position.on_position(&destination, tolerance) {
                self.done = true;
            } else if !same_heading(self.destination_angle, actor.position.angle_to(&destination)) {
                // Overshot the destination during this step
                actor.position = destination;
                self.done = true;
            }
        } else {
            if self.destination_angle != here.angle_to(&destination) {
                actor.position = destination;
            }
            self.done = true;
        }

        self.position_set = destination == target_point;
        if self.done && status == TaskStatus::Pending {
            status = TaskStatus::Done;
        }
        Ok(status)
    }
}

/// Random walk that stays near a centre; never finishes on its own
#[derive(Debug, Clone)]
pub struct WobbleTask {
    center: MoveTarget,
    relative_speed: f32,
    radius: f32,
}

impl WobbleTask {
    pub fn new(center: MoveTarget, relative_speed: f32, radius: f32) -> Self {
        Self {
            center,
            relative_speed,
            radius,
        }
    }

    pub fn execute(&mut self, actor: &mut Actor, world: &mut World) -> Result<TaskStatus> {
        let here = actor.position;
        let direction = match world.target_position(self.center) {
            Some(center) if here.distance(&center) > self.radius => here.angle_to(&center),
            _ => {
                let max_turn = world.ctx.config.max_wobble_turning;
                let turn = world.ctx.rng.gen::<f32>() * max_turn;
                if world.ctx.rng.gen_bool(0.5) {
                    actor.velocity.direction() + turn
                } else {
                    actor.velocity.direction() - turn
                }
            }
        };
        let velocity = Velocity::new(direction, actor.velocity.magnitude);
        MoveTask::steer(velocity, self.relative_speed).execute(actor, &world.ctx)?;
        Ok(TaskStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::entity::agent::Agent;
    use crate::entity::needs::Gender;
    use std::f32::consts::PI;

    fn setup(position: Vec2) -> (World, Agent) {
        let mut world = World::new(SimulationConfig::default(), 5);
        world.ctx.clock.advance(0.1);
        let agent = Agent::founder(crate::core::types::AgentId(0), "Test".into(), position, Gender::Male, &world.ctx);
        (world, agent)
    }

    #[test]
    fn test_move_task_steps_once() {
        let (world, mut agent) = setup(Vec2::new(5.0, 5.0));
        let mut step = MoveTask::steer(Velocity::new(0.0, 2.0), 0.5);
        assert_eq!(step.execute(&mut agent.actor, &world.ctx).unwrap(), TaskStatus::Done);
        assert!((agent.actor.position.x - 5.1).abs() < 1e-5);
        assert!(matches!(
            step.execute(&mut agent.actor, &world.ctx),
            Err(SimError::TaskAlreadyDone)
        ));
    }

    #[test]
    fn test_move_out_of_bounds_clamps() {
        let (world, mut agent) = setup(Vec2::new(0.05, 5.0));
        let mut step = MoveTask::steer(Velocity::new(PI, 1.8), 1.0);
        let status = step.execute(&mut agent.actor, &world.ctx).unwrap();
        assert_eq!(status, TaskStatus::Failed(FailReason::OutOfBounds));
        assert_eq!(agent.actor.position.x, 0.0);
        assert!(step.is_done());
    }

    #[test]
    fn test_teleport_lands_on_point() {
        let (world, mut agent) = setup(Vec2::new(5.0, 5.0));
        let heading = agent.actor.velocity;
        let mut jump = MoveTask::teleport(Vec2::new(20.0, 12.5));
        assert_eq!(jump.execute(&mut agent.actor, &world.ctx).unwrap(), TaskStatus::Done);
        assert_eq!(agent.actor.position, Vec2::new(20.0, 12.5));
        assert_eq!(agent.actor.velocity, heading);
        assert!(matches!(
            jump.execute(&mut agent.actor, &world.ctx),
            Err(SimError::TaskAlreadyDone)
        ));
    }

    #[test]
    fn test_teleport_outside_world_clamps() {
        let (world, mut agent) = setup(Vec2::new(5.0, 5.0));
        let mut jump = MoveTask::teleport(Vec2::new(-4.0, 40.0));
        let status = jump.execute(&mut agent.actor, &world.ctx).unwrap();
        assert_eq!(status, TaskStatus::Failed(FailReason::OutOfBounds));
        assert_eq!(agent.actor.position, Vec2::new(0.0, 32.0));
        assert!(jump.is_done());
    }

    #[test]
    fn test_move_to_arrives_within_step_bound() {
        let (world, mut agent) = setup(Vec2::new(2.0, 2.0));
        let goal = Vec2::new(7.0, 3.0);
        let mut task = MoveToTask::new(MoveTarget::Point(goal), 1.0);

        let step = agent.actor.velocity.magnitude * world.ctx.dt();
        let bound = (agent.actor.position.distance(&goal) / step).ceil() as usize;
        let mut executions = 0;
        while !task.is_done() {
            task.execute(&mut agent.actor, &world).unwrap();
            executions += 1;
            assert!(executions <= bound, "took more than {} steps", bound);
        }
        assert!(agent.actor.position.distance(&goal) < world.ctx.config.on_position_offset);
    }

    #[test]
    fn test_move_to_deleted_target_gives_up() {
        let (mut world, mut agent) = setup(Vec2::new(2.0, 2.0));
        let node = world.add_flag(Vec2::new(10.0, 10.0));
        let mut task = MoveToTask::new(MoveTarget::Node(node), 1.0);
        task.execute(&mut agent.actor, &world).unwrap();
        world.delete_node(node);
        let status = task.execute(&mut agent.actor, &world).unwrap();
        assert_eq!(status, TaskStatus::Failed(FailReason::TargetDeleted));
        assert!(task.is_done());
    }

    #[test]
    fn test_wobble_returns_towards_centre() {
        let (mut world, mut agent) = setup(Vec2::new(10.0, 5.0));
        let mut wobble = WobbleTask::new(MoveTarget::Point(Vec2::new(5.0, 5.0)), 1.0, 1.0);
        let before = agent.actor.position.distance(&Vec2::new(5.0, 5.0));
        assert_eq!(wobble.execute(&mut agent.actor, &mut world).unwrap(), TaskStatus::Pending);
        let after = agent.actor.position.distance(&Vec2::new(5.0, 5.0));
        assert!(after < before);
    }

    #[test]
    fn test_wobble_stays_near_centre() {
        let (mut world, mut agent) = setup(Vec2::new(5.0, 5.0));
        let centre = Vec2::new(5.0, 5.0);
        let mut wobble = WobbleTask::new(MoveTarget::Point(centre), 1.0, 1.0);
        for _ in 0..500 {
            wobble.execute(&mut agent.actor, &mut world).unwrap();
            assert!(agent.actor.position.distance(&centre) <= 1.0 + 0.2);
        }
    }
}

//! Walk to a source, gather from it and eat on the spot until satisfied

use tracing::debug;

use crate::core::error::{Result, SimError};
use crate::core::types::NodeId;
use crate::ecs::world::World;
use crate::entity::agent::Actor;
use crate::entity::needs::{NeedType, SkillType};
use crate::entity::resources::ResourceType;
use crate::tasks::movement::{MoveToTask, WobbleTask};
use crate::tasks::transfer::{ConsumeTask, TransferTask};
use crate::tasks::{FailReason, MoveTarget, TaskStatus};

/// Food or happiness gathering. Done once the satisfied need is full or the
/// source runs dry.
#[derive(Debug, Clone)]
pub struct GetResourceTask {
    source: NodeId,
    resource: ResourceType,
    gather_counter: f32,
    move_to: MoveToTask,
    wobble: WobbleTask,
    done: bool,
}

impl GetResourceTask {
    pub fn new(source: NodeId, resource: ResourceType, actor: &Actor, world: &World) -> Self {
        let config = &world.ctx.config;
        let efficiency = actor.characteristics.efficiency(SkillType::Gather, config);
        Self {
            source,
            resource,
            gather_counter: 0.0,
            move_to: MoveToTask::new(MoveTarget::Node(source), 1.0),
            wobble: WobbleTask::new(MoveTarget::Node(source), efficiency, config.node_wobble_radius),
            done: false,
        }
    }

    pub fn food(source: NodeId, actor: &Actor, world: &World) -> Self {
        Self::new(source, ResourceType::Food, actor, world)
    }

    pub fn happiness(source: NodeId, actor: &Actor, world: &World) -> Self {
        Self::new(source, ResourceType::Happiness, actor, world)
    }

    pub fn resource(&self) -> ResourceType {
        self.resource
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn execute(&mut self, actor: &mut Actor, world: &mut World) -> Result<TaskStatus> {
        if self.done {
            return Err(SimError::TaskAlreadyDone);
        }
        if !self.move_to.is_done() {
            return self.move_to.execute(actor, world).map(|status| match status {
                TaskStatus::Failed(FailReason::TargetDeleted) => {
                    self.done = true;
                    status
                }
                _ => TaskStatus::Pending,
            });
        }
        if !world.nodes.is_alive(self.source) {
            self.done = true;
            return Ok(TaskStatus::Failed(FailReason::TargetDeleted));
        }

        let need = NeedType::satisfied_by(self.resource);
        if self.gather_counter > 1.0 {
            self.gather_counter -= 1.0;
            let mut gather = TransferTask::gather(self.source, self.resource);
            gather.execute(actor, world)?;
            if !gather.is_done() {
                debug!(agent = %actor.id, source = %self.source, "source ran dry");
                world.retire_source(self.source);
                self.done = true;
            } else {
                let mut pick_up = TransferTask::pick_up(self.source, self.resource, 1);
                pick_up.execute(actor, world)?;
                if pick_up.is_done() {
                    ConsumeTask::new(self.resource).execute(actor, &world.ctx.config)?;
                    self.done = actor.characteristics.need(need) >= 1.0;
                }
            }
        }

        self.wobble.execute(actor, world)?;
        actor.characteristics.increase_skill(SkillType::Gather, &world.ctx);
        let efficiency = actor
            .characteristics
            .efficiency(SkillType::Gather, &world.ctx.config);
        self.gather_counter += world.ctx.config.gather_speed * world.ctx.dt() * efficiency;

        Ok(if self.done {
            TaskStatus::Done
        } else {
            TaskStatus::Pending
        })
    }
}

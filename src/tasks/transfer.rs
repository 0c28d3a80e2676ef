//! Moving resource units between ledgers and consuming carried units

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::NodeId;
use crate::ecs::world::World;
use crate::entity::agent::Actor;
use crate::entity::needs::NeedType;
use crate::entity::resources::{ResourceType, Resources};
use crate::tasks::{FailReason, TaskStatus};
use crate::world::LedgerSlot;

/// One side of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ledger {
    /// Units carried by the executing agent
    Carried,
    Node(NodeId, LedgerSlot),
}

impl Ledger {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Ledger::Carried => None,
            Ledger::Node(id, _) => Some(*id),
        }
    }
}

fn resolve<'a>(ledger: Ledger, actor: &'a mut Actor, world: &'a mut World) -> Result<&'a mut Resources> {
    match ledger {
        Ledger::Carried => Ok(&mut actor.resources),
        Ledger::Node(id, slot) => world
            .nodes
            .get_mut(id)
            .ok_or(SimError::NodeDeleted(id))?
            .ledger_mut(slot)
            .ok_or(SimError::NodeDeleted(id)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Amount {
    Exactly(ResourceType, u32),
    All,
}

#[derive(Debug, Clone)]
pub struct TransferTask {
    from: Ledger,
    to: Ledger,
    amount: Amount,
    done: bool,
}

impl TransferTask {
    pub fn new(from: Ledger, to: Ledger, resource: ResourceType, amount: u32) -> Self {
        Self {
            from,
            to,
            amount: Amount::Exactly(resource, amount),
            done: false,
        }
    }

    /// Move every unit of every kind
    pub fn all(from: Ledger, to: Ledger) -> Self {
        Self {
            from,
            to,
            amount: Amount::All,
            done: false,
        }
    }

    /// One unit from a source's natural reserve onto its free pile
    pub fn gather(source: NodeId, resource: ResourceType) -> Self {
        Self::new(
            Ledger::Node(source, LedgerSlot::Reserve),
            Ledger::Node(source, LedgerSlot::Free),
            resource,
            1,
        )
    }

    /// `amount` free units of a node into the agent's hands
    pub fn pick_up(node: NodeId, resource: ResourceType, amount: u32) -> Self {
        Self::new(Ledger::Node(node, LedgerSlot::Free), Ledger::Carried, resource, amount)
    }

    /// Everything the agent carries onto a node's free pile
    pub fn leave(node: NodeId) -> Self {
        Self::all(Ledger::Carried, Ledger::Node(node, LedgerSlot::Free))
    }

    /// One free unit at the pillar onto its sacrificed pile
    pub fn sacrifice(pillar: NodeId) -> Self {
        Self::new(
            Ledger::Node(pillar, LedgerSlot::Free),
            Ledger::Node(pillar, LedgerSlot::Reserve),
            ResourceType::Sacrifice,
            1,
        )
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn reset(&mut self) {
        self.done = false;
    }

    pub fn execute(&mut self, actor: &mut Actor, world: &mut World) -> Result<TaskStatus> {
        if self.done {
            return Err(SimError::TaskAlreadyDone);
        }

        match self.amount {
            Amount::All => {
                let taken = std::mem::take(resolve(self.from, actor, world)?);
                let target = resolve(self.to, actor, world)?;
                for (resource, amount) in taken.iter() {
                    target.add(resource, amount);
                }
                self.done = true;
                Ok(TaskStatus::Done)
            }
            Amount::Exactly(resource, requested) => {
                // Check the target exists before touching the source
                resolve(self.to, actor, world)?;
                let moved = resolve(self.from, actor, world)?.remove(resource, requested);
                resolve(self.to, actor, world)?.add(resource, moved);
                trace!(agent = %actor.id, %resource, moved, requested, "transfer");

                if moved > 0 {
                    self.done = true;
                }
                Ok(match (moved, requested) {
                    (_, 0) => TaskStatus::Pending,
                    (0, _) => TaskStatus::Failed(FailReason::Empty),
                    (m, r) if m < r => TaskStatus::Failed(FailReason::Shortfall { moved: m }),
                    _ => TaskStatus::Done,
                })
            }
        }
    }
}

/// Eat or otherwise use up one carried unit
#[derive(Debug, Clone)]
pub struct ConsumeTask {
    resource: ResourceType,
    done: bool,
}

impl ConsumeTask {
    pub fn new(resource: ResourceType) -> Self {
        Self {
            resource,
            done: false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn execute(&mut self, actor: &mut Actor, config: &SimulationConfig) -> Result<TaskStatus> {
        if self.done {
            return Err(SimError::TaskAlreadyDone);
        }
        if actor.resources.remove(self.resource, 1) == 0 {
            return Ok(TaskStatus::Failed(FailReason::NothingCarried));
        }
        actor
            .characteristics
            .increase_need(NeedType::satisfied_by(self.resource), config);
        self.done = true;
        Ok(TaskStatus::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AgentId, Vec2};
    use crate::entity::agent::Agent;
    use crate::entity::needs::Gender;

    fn setup() -> (World, Agent) {
        let world = World::new(SimulationConfig::default(), 2);
        let agent = Agent::founder(AgentId(0), "Test".into(), Vec2::new(1.0, 1.0), Gender::Female, &world.ctx);
        (world, agent)
    }

    #[test]
    fn test_shortfall_moves_what_is_there() {
        let (mut world, mut agent) = setup();
        let node = world.add_flag(Vec2::new(1.0, 1.0));
        world
            .nodes
            .get_mut(node)
            .unwrap()
            .free
            .add(ResourceType::Food, 2);

        let mut task = TransferTask::pick_up(node, ResourceType::Food, 5);
        let status = task.execute(&mut agent.actor, &mut world).unwrap();
        assert_eq!(status, TaskStatus::Failed(FailReason::Shortfall { moved: 2 }));
        assert!(task.is_done());
        assert_eq!(agent.actor.resources.get(ResourceType::Food), 2);
        assert_eq!(world.nodes.get(node).unwrap().free.get(ResourceType::Food), 0);
    }

    #[test]
    fn test_empty_source_is_retryable() {
        let (mut world, mut agent) = setup();
        let node = world.add_flag(Vec2::new(1.0, 1.0));
        let mut task = TransferTask::pick_up(node, ResourceType::Food, 1);
        let status = task.execute(&mut agent.actor, &mut world).unwrap();
        assert_eq!(status, TaskStatus::Failed(FailReason::Empty));
        assert!(!task.is_done());
        assert!(!FailReason::Empty.retires_task());
    }

    #[test]
    fn test_leave_moves_every_kind() {
        let (mut world, mut agent) = setup();
        let node = world.add_flag(Vec2::new(1.0, 1.0));
        agent.actor.resources.add(ResourceType::Food, 2);
        agent.actor.resources.add(ResourceType::Sacrifice, 1);

        let mut task = TransferTask::leave(node);
        assert_eq!(task.execute(&mut agent.actor, &mut world).unwrap(), TaskStatus::Done);
        assert!(agent.actor.resources.is_empty());
        let free = &world.nodes.get(node).unwrap().free;
        assert_eq!(free.get(ResourceType::Food), 2);
        assert_eq!(free.get(ResourceType::Sacrifice), 1);
    }

    #[test]
    fn test_transfer_all_of_nothing_is_done() {
        let (mut world, mut agent) = setup();
        let node = world.add_flag(Vec2::new(1.0, 1.0));
        let mut task = TransferTask::leave(node);
        assert_eq!(task.execute(&mut agent.actor, &mut world).unwrap(), TaskStatus::Done);
        assert!(task.is_done());
    }

    #[test]
    fn test_gather_from_source_reserve() {
        let (mut world, mut agent) = setup();
        let source = world.add_source(Vec2::new(2.0, 2.0), ResourceType::Happiness, 1);
        let mut first = TransferTask::gather(source, ResourceType::Happiness);
        assert_eq!(first.execute(&mut agent.actor, &mut world).unwrap(), TaskStatus::Done);
        let mut second = TransferTask::gather(source, ResourceType::Happiness);
        assert_eq!(
            second.execute(&mut agent.actor, &mut world).unwrap(),
            TaskStatus::Failed(FailReason::Empty)
        );
        assert_eq!(world.nodes.get(source).unwrap().free.get(ResourceType::Happiness), 1);
    }

    #[test]
    fn test_deleted_node_is_an_error() {
        let (mut world, mut agent) = setup();
        let node = world.add_flag(Vec2::new(1.0, 1.0));
        world.delete_node(node);
        let mut task = TransferTask::leave(node);
        assert!(matches!(
            task.execute(&mut agent.actor, &mut world),
            Err(SimError::NodeDeleted(_))
        ));
    }

    #[test]
    fn test_consume_raises_matching_need() {
        let (world, mut agent) = setup();
        agent.actor.resources.add(ResourceType::Happiness, 1);
        let before = agent.actor.characteristics.happiness();

        let mut task = ConsumeTask::new(ResourceType::Happiness);
        assert_eq!(task.execute(&mut agent.actor, &world.ctx.config).unwrap(), TaskStatus::Done);
        assert!((agent.actor.characteristics.happiness() - (before + 0.25)).abs() < 1e-6);
        assert!(agent.actor.resources.is_empty());
    }

    #[test]
    fn test_consume_without_units_has_no_effect() {
        let (world, mut agent) = setup();
        let before = agent.actor.characteristics.saturation();
        let mut task = ConsumeTask::new(ResourceType::Food);
        let status = task.execute(&mut agent.actor, &world.ctx.config).unwrap();
        assert_eq!(status, TaskStatus::Failed(FailReason::NothingCarried));
        assert_eq!(agent.actor.characteristics.saturation(), before);
        assert!(!task.is_done());
    }
}

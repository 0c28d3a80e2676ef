//! Commanded transport along a route of nodes
//!
//! A route is a list of steps, each bound to a node: travel there, leave
//! everything carried, or pick up a kind of resource. Once committed the
//! route loops forever; steps whose node was deleted are pruned when the
//! route advances past them.

use tracing::debug;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::NodeId;
use crate::ecs::world::World;
use crate::entity::agent::Actor;
use crate::entity::needs::SkillType;
use crate::entity::resources::ResourceType;
use crate::tasks::commanded::Appetite;
use crate::tasks::movement::MoveToTask;
use crate::tasks::transfer::TransferTask;
use crate::tasks::MoveTarget;

#[derive(Debug, Clone)]
pub enum RouteStep {
    Travel(MoveToTask),
    Leave(TransferTask),
    PickUp(TransferTask),
}

impl RouteStep {
    fn is_done(&self) -> bool {
        match self {
            RouteStep::Travel(task) => task.is_done(),
            RouteStep::Leave(task) | RouteStep::PickUp(task) => task.is_done(),
        }
    }

    fn reset(&mut self) {
        match self {
            RouteStep::Travel(task) => task.reset(),
            RouteStep::Leave(task) | RouteStep::PickUp(task) => task.reset(),
        }
    }
}

#[derive(Debug, Clone)]
struct RouteOrder {
    node: NodeId,
    step: RouteStep,
}

#[derive(Debug, Clone)]
pub struct CommandedTransportTask {
    committed: bool,
    orders: Vec<RouteOrder>,
    index: usize,
    finished: bool,
}

impl CommandedTransportTask {
    /// Route starting with a visit to `first`
    pub fn new(first: NodeId) -> Self {
        let mut task = Self {
            committed: false,
            orders: Vec::new(),
            index: 0,
            finished: false,
        };
        task.push_node(first);
        task
    }

    fn push_node(&mut self, node: NodeId) {
        self.orders.push(RouteOrder {
            node,
            step: RouteStep::Travel(MoveToTask::new(MoveTarget::Node(node), 1.0)),
        });
        self.orders.push(RouteOrder {
            node,
            step: RouteStep::Leave(TransferTask::leave(node)),
        });
    }

    /// Append a visit: travel to the node and leave everything carried there
    pub fn add_node(&mut self, node: NodeId) -> Result<()> {
        if self.committed {
            return Err(SimError::RouteCommitted);
        }
        self.push_node(node);
        Ok(())
    }

    /// Pick up a load of `resource` at the most recently added node,
    /// `max_units_carried` units per lap
    pub fn add_pick_up(&mut self, resource: ResourceType, config: &SimulationConfig) -> Result<()> {
        if self.committed {
            return Err(SimError::RouteCommitted);
        }
        let node = self.orders.last().ok_or(SimError::RouteHasNoNode)?.node;
        self.orders.push(RouteOrder {
            node,
            step: RouteStep::PickUp(TransferTask::pick_up(node, resource, config.max_units_carried)),
        });
        Ok(())
    }

    pub fn set_committed(&mut self, committed: bool) {
        self.committed = committed;
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Every node still on the route, in order
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.orders.iter().map(|order| order.node).collect();
        nodes.dedup();
        nodes
    }

    pub fn step_count(&self) -> usize {
        self.orders.len()
    }

    /// All nodes of the route were deleted
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// One tick of route work. Returns true once the route is exhausted.
    pub(crate) fn do_work(&mut self, actor: &mut Actor, world: &mut World, appetite: &mut Appetite) -> Result<bool> {
        if self.finished {
            return Ok(true);
        }
        let Some(order) = self.orders.get_mut(self.index) else {
            return Err(SimError::RouteEmpty);
        };
        if order.step.is_done() {
            self.advance(world)?;
            return Ok(self.finished);
        }
        let node = order.node;
        if !world.nodes.is_alive(node) {
            self.advance(world)?;
            return Ok(self.finished);
        }

        let at_node = match &mut order.step {
            RouteStep::Travel(move_to) => {
                let efficiency = actor
                    .characteristics
                    .efficiency(SkillType::Transportation, &world.ctx.config);
                move_to.set_relative_speed(efficiency);
                move_to.execute(actor, world)?;
                move_to.is_done()
            }
            RouteStep::Leave(transfer) | RouteStep::PickUp(transfer) => {
                transfer.execute(actor, world)?;
                true
            }
        };
        if at_node {
            appetite.satisfy_at(node, actor, world)?;
        }
        if order.step.is_done() {
            self.advance(world)?;
        }
        actor
            .characteristics
            .increase_skill(SkillType::Transportation, &world.ctx);
        Ok(self.finished)
    }

    /// Move to the next step, wrapping committed routes and pruning steps
    /// whose node no longer exists
    fn advance(&mut self, world: &World) -> Result<()> {
        if self.orders.is_empty() {
            return Err(SimError::RouteEmpty);
        }
        self.index += 1;
        loop {
            if self.index >= self.orders.len() {
                if self.committed {
                    self.index = 0;
                    for order in self.orders.iter_mut() {
                        order.step.reset();
                    }
                } else {
                    self.index = self.orders.len() - 1;
                }
            }
            if world.nodes.is_alive(self.orders[self.index].node) {
                return Ok(());
            }
            let pruned = self.orders.remove(self.index);
            debug!(node = %pruned.node, "pruned deleted node from route");
            if self.orders.is_empty() {
                self.index = 0;
                self.finished = true;
                return Ok(());
            }
        }
    }
}

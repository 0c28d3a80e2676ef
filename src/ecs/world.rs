//! World - owns every agent, node and group plus the simulation context

use tracing::{debug, info};

use crate::core::config::SimulationConfig;
use crate::core::context::SimContext;
use crate::core::error::{Result, SimError};
use crate::core::types::{AgentId, GroupId, NodeId, SimTime, Vec2};
use crate::entity::agent::Agent;
use crate::entity::names::random_name;
use crate::entity::needs::{Characteristics, Gender};
use crate::entity::resources::ResourceType;
use crate::simulation::tick::{run_simulation_tick, SimulationEvent};
use crate::tasks::commanded::CommandedTask;
use crate::tasks::MoveTarget;
use crate::world::{Arena, Directory, Node, SocializeGroup};

/// The island containing all simulation objects
pub struct World {
    pub ctx: SimContext,
    pub agents: Arena<AgentId, Agent>,
    pub nodes: Arena<NodeId, Node>,
    pub groups: Arena<GroupId, SocializeGroup>,
    pub food_sources: Directory<NodeId>,
    pub happiness_sources: Directory<NodeId>,
    pub socialize_groups: Directory<GroupId>,
    light_pillar: Option<NodeId>,
    events: Vec<SimulationEvent>,
}

impl World {
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        Self {
            ctx: SimContext::new(config, seed),
            agents: Arena::new(),
            nodes: Arena::new(),
            groups: Arena::new(),
            food_sources: Directory::new(),
            happiness_sources: Directory::new(),
            socialize_groups: Directory::new(),
            light_pillar: None,
            events: Vec::new(),
        }
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: SimTime) -> Vec<SimulationEvent> {
        run_simulation_tick(self, dt)
    }

    pub fn now(&self) -> SimTime {
        self.ctx.now()
    }

    pub fn current_tick(&self) -> u64 {
        self.ctx.clock.current_tick()
    }

    pub fn spawn_founder(&mut self, name: impl Into<String>, position: Vec2, gender: Gender) -> AgentId {
        let position = self.ctx.config.bounds().clamp(position);
        let name = name.into();
        let ctx = &self.ctx;
        let id = self
            .agents
            .insert_with(|id| Agent::founder(id, name, position, gender, ctx));
        debug!(agent = %id, ?gender, "founder spawned");
        id
    }

    /// Create a newborn next to its parents. The child acts from the next tick.
    pub fn spawn_child(
        &mut self,
        position: Vec2,
        parent: (AgentId, &Characteristics),
        partner: AgentId,
    ) -> Result<AgentId> {
        let (parent_id, parent_characteristics) = parent;
        let partner_characteristics = self
            .agents
            .get(partner)
            .map(|agent| agent.characteristics())
            .ok_or(SimError::AgentNotFound(partner))?;
        let characteristics =
            Characteristics::from_parents(parent_characteristics, partner_characteristics, &mut self.ctx);
        let name = random_name(characteristics.gender(), &mut self.ctx.rng);

        let ctx = &self.ctx;
        let child_name = name.clone();
        let id = self
            .agents
            .insert_with(|id| Agent::child(id, child_name, position, characteristics, ctx));

        info!(agent = %id, %name, parents = ?(parent_id, partner), "agent born");
        self.emit(SimulationEvent::AgentBorn {
            agent: id,
            name,
            parents: [parent_id, partner],
        });
        Ok(id)
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id)
    }

    /// Run `f` with the agent moved out of the arena, so it can mutate
    /// itself and the rest of the world at the same time
    pub fn with_agent<R>(&mut self, id: AgentId, f: impl FnOnce(&mut Agent, &mut World) -> R) -> Result<R> {
        let mut agent = self.agents.check_out(id).ok_or(SimError::AgentNotFound(id))?;
        let result = f(&mut agent, self);
        self.agents.check_in(id, agent);
        Ok(result)
    }

    /// Hand a player command to an adult agent, dropping its autonomous
    /// tasks. Children ignore commands and `Ok(false)` is returned.
    pub fn set_commanded_task(&mut self, id: AgentId, task: CommandedTask) -> Result<bool> {
        self.with_agent(id, |agent, world| {
            if agent.is_child(&world.ctx) {
                return false;
            }
            agent.task_list.remove_all(&mut agent.actor, world);
            agent.commanded = Some(task);
            true
        })
    }

    pub fn add_flag(&mut self, position: Vec2) -> NodeId {
        self.nodes.insert(Node::flag(position))
    }

    /// Add a source; food and happiness sources become discoverable from the next tick
    pub fn add_source(&mut self, position: Vec2, resource: ResourceType, amount: u32) -> NodeId {
        let id = self.nodes.insert(Node::source(position, resource, amount));
        match resource {
            ResourceType::Food => self.food_sources.register(id),
            ResourceType::Happiness => self.happiness_sources.register(id),
            ResourceType::Sacrifice => {}
        }
        id
    }

    /// Place the light pillar, replacing the beacon role of any previous one
    pub fn add_light_pillar(&mut self, position: Vec2) -> NodeId {
        let id = self.nodes.insert(Node::light_pillar(position));
        self.light_pillar = Some(id);
        id
    }

    pub fn light_pillar(&self) -> Option<NodeId> {
        self.light_pillar.filter(|id| self.nodes.is_alive(*id))
    }

    /// Pillar position and influence radius
    pub fn beacon(&self) -> Option<(Vec2, f32)> {
        let pillar = self.nodes.get(self.light_pillar?)?;
        let radius = pillar.influence_radius(&self.ctx.config)?;
        Some((pillar.position, radius))
    }

    pub fn delete_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(id)?;
        self.unregister_source(id, node.natural_resource());
        if self.light_pillar == Some(id) {
            self.light_pillar = None;
        }
        debug!(node = %id, "node deleted");
        Some(node)
    }

    /// Stop advertising an exhausted source
    /// Drop a dry source from discovery; repeated calls are ignored
    pub fn retire_source(&mut self, id: NodeId) {
        let Some(resource) = self.nodes.get_mut(id).and_then(Node::mark_depleted) else {
            return;
        };
        self.unregister_source(id, Some(resource));
        info!(node = %id, "source depleted");
        self.emit(SimulationEvent::SourceDepleted { node: id });
    }

    fn unregister_source(&mut self, id: NodeId, resource: Option<ResourceType>) {
        match resource {
            Some(ResourceType::Food) => self.food_sources.unregister(id),
            Some(ResourceType::Happiness) => self.happiness_sources.unregister(id),
            _ => {}
        }
    }

    pub fn found_group(&mut self, position: Vec2) -> GroupId {
        let id = self
            .groups
            .insert_with(|id| SocializeGroup::new(id, position));
        self.socialize_groups.register(id);
        debug!(group = %id, "group founded");
        self.emit(SimulationEvent::GroupFounded { group: id, position });
        id
    }

    pub fn delete_group(&mut self, id: GroupId) {
        if self.groups.remove(id).is_some() {
            self.socialize_groups.unregister(id);
            debug!(group = %id, "group disbanded");
            self.emit(SimulationEvent::GroupDisbanded { group: id });
        }
    }

    pub fn node_position(&self, id: NodeId) -> Option<Vec2> {
        self.nodes.get(id).map(|node| node.position)
    }

    pub fn group_position(&self, id: GroupId) -> Option<Vec2> {
        self.groups.get(id).map(|group| group.position)
    }

    /// Current location of a movement target, `None` once it is deleted
    pub fn target_position(&self, target: MoveTarget) -> Option<Vec2> {
        match target {
            MoveTarget::Point(point) => Some(point),
            MoveTarget::Node(id) => self.node_position(id),
            MoveTarget::Group(id) => self.group_position(id),
        }
    }

    /// Closest live advertised source of `resource`
    pub fn nearest_source(&self, resource: ResourceType, point: Vec2) -> Option<NodeId> {
        let directory = match resource {
            ResourceType::Food => &self.food_sources,
            ResourceType::Happiness => &self.happiness_sources,
            ResourceType::Sacrifice => return None,
        };
        directory
            .nearest(point, |id| self.node_position(id))
            .filter(|id| self.nodes.is_alive(*id))
    }

    /// Closest live advertised group
    pub fn nearest_group(&self, point: Vec2) -> Option<GroupId> {
        self.socialize_groups
            .nearest(point, |id| self.group_position(id))
            .filter(|id| self.groups.is_alive(*id))
    }

    /// Apply directory changes queued during the previous tick
    pub fn flush_directories(&mut self) {
        self.food_sources.flush();
        self.happiness_sources.flush();
        self.socialize_groups.flush();
    }

    pub fn emit(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn population(&self) -> usize {
        self.agents.len()
    }
}

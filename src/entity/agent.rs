//! Individual agents and the mutable state their tasks act upon

use serde::Serialize;

use crate::core::context::SimContext;
use crate::core::trial::Randomizer;
use crate::core::types::{AgentId, Vec2, Velocity};
use crate::entity::needs::{Characteristics, Gender};
use crate::entity::resources::Resources;
use crate::tasks::commanded::CommandedTask;
use crate::tasks::task_list::TaskList;

/// The part of an agent a running task may read and write
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub id: AgentId,
    pub position: Vec2,
    pub velocity: Velocity,
    pub characteristics: Characteristics,
    /// Units the agent carries
    pub resources: Resources,
}

#[derive(Debug)]
pub struct Agent {
    pub name: String,
    pub actor: Actor,
    pub task_list: TaskList,
    pub commanded: Option<CommandedTask>,
    pub(crate) kill_trial: Randomizer,
}

impl Agent {
    /// Founder with the configured founder age
    pub fn founder(id: AgentId, name: String, position: Vec2, gender: Gender, ctx: &SimContext) -> Self {
        let characteristics = Characteristics::new(gender, ctx.config.founder_age, ctx);
        let kill_trial = Randomizer::from_probability(ctx.config.founder_kill_probability);
        Self::with_characteristics(id, name, position, characteristics, kill_trial, ctx)
    }

    /// Newborn of two parents
    pub fn child(
        id: AgentId,
        name: String,
        position: Vec2,
        characteristics: Characteristics,
        ctx: &SimContext,
    ) -> Self {
        let kill_trial = Randomizer::from_probability(ctx.config.minimum_need);
        Self::with_characteristics(id, name, position, characteristics, kill_trial, ctx)
    }

    fn with_characteristics(
        id: AgentId,
        name: String,
        position: Vec2,
        characteristics: Characteristics,
        kill_trial: Randomizer,
        ctx: &SimContext,
    ) -> Self {
        Self {
            name,
            actor: Actor {
                id,
                position,
                velocity: Velocity::new(0.0, ctx.config.individual_speed),
                characteristics,
                resources: Resources::new(),
            },
            task_list: TaskList::new(),
            commanded: None,
            kill_trial,
        }
    }

    pub fn id(&self) -> AgentId {
        self.actor.id
    }

    pub fn position(&self) -> Vec2 {
        self.actor.position
    }

    pub fn characteristics(&self) -> &Characteristics {
        &self.actor.characteristics
    }

    pub fn is_child(&self, ctx: &SimContext) -> bool {
        self.actor.characteristics.is_child(ctx)
    }

    pub fn has_commanded_task(&self) -> bool {
        self.commanded.is_some()
    }
}

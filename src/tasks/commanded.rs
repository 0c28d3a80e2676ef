//! Player-commanded work: gather, sacrifice, transport, move
//!
//! Every command runs its work until the work reports a finished cycle,
//! then idles for the pause duration before the command itself is done.
//! Agents keep eating on the job whenever they turn hungry or depressed.

use tracing::debug;

use crate::core::error::{Result, SimError};
use crate::core::types::NodeId;
use crate::ecs::world::World;
use crate::entity::agent::Actor;
use crate::entity::needs::SkillType;
use crate::entity::resources::ResourceType;
use crate::tasks::movement::{MoveToTask, WobbleTask};
use crate::tasks::pause::PauseTask;
use crate::tasks::transfer::{ConsumeTask, TransferTask};
use crate::tasks::transport::CommandedTransportTask;
use crate::tasks::{MoveTarget, TaskStatus};

/// Sticky hunger/depression flags of a working agent
#[derive(Debug, Clone, Default)]
pub struct Appetite {
    pub hungry: bool,
    pub depressed: bool,
}

impl Appetite {
    fn refresh(&mut self, actor: &mut Actor, world: &mut World) {
        if !self.hungry {
            self.hungry = actor.characteristics.is_hungry(&mut world.ctx);
        }
        if !self.depressed {
            self.depressed = actor.characteristics.is_depressed(&mut world.ctx);
        }
    }

    /// Eat food, then enjoy happiness, from the node's free pile until
    /// satisfied or the pile runs out
    pub fn satisfy_at(&mut self, node: NodeId, actor: &mut Actor, world: &mut World) -> Result<()> {
        if !world.nodes.is_alive(node) {
            return Ok(());
        }
        while self.hungry {
            if !Self::consume_one(node, ResourceType::Food, actor, world)? {
                break;
            }
            self.hungry = actor.characteristics.saturation() < 1.0;
        }
        while self.depressed {
            if !Self::consume_one(node, ResourceType::Happiness, actor, world)? {
                break;
            }
            self.depressed = actor.characteristics.happiness() < 1.0;
        }
        Ok(())
    }

    fn consume_one(node: NodeId, resource: ResourceType, actor: &mut Actor, world: &mut World) -> Result<bool> {
        let mut pick_up = TransferTask::pick_up(node, resource, 1);
        pick_up.execute(actor, world)?;
        if !pick_up.is_done() {
            return Ok(false);
        }
        ConsumeTask::new(resource).execute(actor, &world.ctx.config)?;
        Ok(true)
    }
}

/// Gather at a source until it runs dry
#[derive(Debug, Clone)]
pub struct CommandedGatherTask {
    source: NodeId,
    counter: f32,
    move_to: MoveToTask,
    wobble: Option<WobbleTask>,
}

impl CommandedGatherTask {
    pub fn new(source: NodeId) -> Self {
        Self {
            source,
            counter: 0.0,
            move_to: MoveToTask::new(MoveTarget::Node(source), 1.0),
            wobble: None,
        }
    }

    fn do_work(&mut self, actor: &mut Actor, world: &mut World, appetite: &mut Appetite) -> Result<bool> {
        if !self.move_to.is_done() {
            self.move_to.execute(actor, world)?;
            return Ok(false);
        }
        let Some(resource) = world.nodes.get(self.source).and_then(|node| node.natural_resource()) else {
            return Ok(true);
        };

        let mut finished = false;
        if self.counter > 1.0 {
            self.counter -= 1.0;
            let mut gather = TransferTask::gather(self.source, resource);
            gather.execute(actor, world)?;
            if !gather.is_done() {
                world.retire_source(self.source);
                finished = true;
            }
        }
        appetite.satisfy_at(self.source, actor, world)?;

        let config = &world.ctx.config;
        let source = self.source;
        let wobble = self.wobble.get_or_insert_with(|| {
            let efficiency = actor.characteristics.efficiency(SkillType::Gather, config);
            WobbleTask::new(MoveTarget::Node(source), efficiency, config.node_wobble_radius)
        });
        wobble.execute(actor, world)?;

        let efficiency = actor
            .characteristics
            .efficiency(SkillType::Gather, &world.ctx.config);
        self.counter += world.ctx.config.gather_speed * world.ctx.dt() * efficiency;
        actor.characteristics.increase_skill(SkillType::Gather, &world.ctx);
        Ok(finished)
    }
}

/// Sacrifice free units at the light pillar, indefinitely
#[derive(Debug, Clone)]
pub struct CommandedSacrificeTask {
    pillar: NodeId,
    counter: f32,
    move_to: MoveToTask,
    wobble: Option<WobbleTask>,
}

impl CommandedSacrificeTask {
    pub fn new(pillar: NodeId) -> Self {
        Self {
            pillar,
            counter: 0.0,
            move_to: MoveToTask::new(MoveTarget::Node(pillar), 1.0),
            wobble: None,
        }
    }

    fn do_work(&mut self, actor: &mut Actor, world: &mut World, appetite: &mut Appetite) -> Result<bool> {
        if !self.move_to.is_done() {
            self.move_to.execute(actor, world)?;
            return Ok(false);
        }
        if !world.nodes.is_alive(self.pillar) {
            return Ok(true);
        }

        if self.counter > 1.0 {
            let mut sacrifice = TransferTask::sacrifice(self.pillar);
            sacrifice.execute(actor, world)?;
            // Nothing to sacrifice keeps the counter charged for the next try
            if sacrifice.is_done() {
                self.counter -= 1.0;
                debug!(agent = %actor.id, pillar = %self.pillar, "unit sacrificed");
            }
        }
        appetite.satisfy_at(self.pillar, actor, world)?;

        let config = &world.ctx.config;
        let pillar = self.pillar;
        let wobble = self.wobble.get_or_insert_with(|| {
            let efficiency = actor.characteristics.efficiency(SkillType::Sacrifice, config);
            WobbleTask::new(MoveTarget::Node(pillar), efficiency, config.node_wobble_radius)
        });
        wobble.execute(actor, world)?;

        let efficiency = actor
            .characteristics
            .efficiency(SkillType::Sacrifice, &world.ctx.config);
        self.counter += world.ctx.config.sacrifice_speed * world.ctx.dt() * efficiency;
        actor.characteristics.increase_skill(SkillType::Sacrifice, &world.ctx);
        Ok(false)
    }
}

#[derive(Debug, Clone)]
pub enum CommandKind {
    Gather(CommandedGatherTask),
    Sacrifice(CommandedSacrificeTask),
    Transport(CommandedTransportTask),
    MoveTo(MoveToTask),
}

#[derive(Debug, Clone)]
pub struct CommandedTask {
    kind: CommandKind,
    appetite: Appetite,
    paused: bool,
    pause: PauseTask,
    done: bool,
}

impl CommandedTask {
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            appetite: Appetite::default(),
            paused: false,
            pause: PauseTask::new(),
            done: false,
        }
    }

    pub fn gather(source: NodeId) -> Self {
        Self::new(CommandKind::Gather(CommandedGatherTask::new(source)))
    }

    pub fn sacrifice(pillar: NodeId) -> Self {
        Self::new(CommandKind::Sacrifice(CommandedSacrificeTask::new(pillar)))
    }

    pub fn transport(route: CommandedTransportTask) -> Self {
        Self::new(CommandKind::Transport(route))
    }

    pub fn move_to(target: MoveTarget) -> Self {
        Self::new(CommandKind::MoveTo(MoveToTask::new(target, 1.0)))
    }

    /// The command a click on `target` stands for: sacrifice at the light
    /// pillar, gather at a source, otherwise walk there
    pub fn for_target(target: MoveTarget, world: &World) -> Self {
        if let MoveTarget::Node(id) = target {
            if let Some(node) = world.nodes.get(id) {
                if node.is_light_pillar() {
                    return Self::sacrifice(id);
                }
                if node.natural_resource().is_some() {
                    return Self::gather(id);
                }
            }
        }
        Self::move_to(target)
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn execute(&mut self, actor: &mut Actor, world: &mut World) -> Result<TaskStatus> {
        if self.done {
            return Err(SimError::TaskAlreadyDone);
        }
        self.appetite.refresh(actor, world);

        if self.paused {
            self.pause.execute(&world.ctx)?;
            self.done = self.pause.is_done();
            return Ok(if self.done {
                TaskStatus::Done
            } else {
                TaskStatus::Pending
            });
        }

        let appetite = &mut self.appetite;
        let finished = match &mut self.kind {
            CommandKind::Gather(task) => task.do_work(actor, world, appetite)?,
            CommandKind::Sacrifice(task) => task.do_work(actor, world, appetite)?,
            CommandKind::Transport(task) => task.do_work(actor, world, appetite)?,
            CommandKind::MoveTo(task) => {
                task.execute(actor, world)?;
                task.is_done()
            }
        };
        if finished {
            debug!(agent = %actor.id, "command cycle finished, pausing");
            self.paused = true;
        }
        Ok(TaskStatus::Pending)
    }
}

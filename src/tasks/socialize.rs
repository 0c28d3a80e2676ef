//! Joining a group, hanging out there and raising children

use tracing::{debug, warn};

use crate::core::error::{Result, SimError};
use crate::core::trial::Randomizer;
use crate::core::types::GroupId;
use crate::ecs::world::World;
use crate::entity::agent::Actor;
use crate::tasks::movement::{MoveToTask, WobbleTask};
use crate::tasks::{MoveTarget, TaskStatus};

/// Never finishes by itself; the scheduler ends it through
/// [`SocializeTask::remove_from_group`].
#[derive(Debug, Clone)]
pub struct SocializeTask {
    group: GroupId,
    registered: bool,
    was_child: bool,
    move_to: MoveToTask,
    wobble: WobbleTask,
    reproduce_trial: Randomizer,
    done: bool,
}

impl SocializeTask {
    pub fn new(group: GroupId, actor: &Actor, world: &World) -> Self {
        let config = &world.ctx.config;
        Self {
            group,
            registered: false,
            was_child: actor.characteristics.is_child(&world.ctx),
            move_to: MoveToTask::new(MoveTarget::Group(group), 1.0),
            wobble: Self::wobble_around(group, actor, world),
            reproduce_trial: Randomizer::from_interval(config.reproduce_interval, config.randomize_interval),
            done: false,
        }
    }

    fn wobble_around(group: GroupId, actor: &Actor, world: &World) -> WobbleTask {
        WobbleTask::new(
            MoveTarget::Group(group),
            actor.characteristics.health(),
            world.ctx.config.socialize_wobble_radius,
        )
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn execute(&mut self, actor: &mut Actor, world: &mut World) -> Result<TaskStatus> {
        if self.done {
            return Err(SimError::TaskAlreadyDone);
        }

        if !self.move_to.is_done() {
            if !world.groups.is_alive(self.group) {
                // Group dissolved before arrival: start a new one right here
                self.registered = false;
                self.group = world.found_group(actor.position);
                self.move_to = MoveToTask::new(MoveTarget::Group(self.group), 1.0);
                self.wobble = Self::wobble_around(self.group, actor, world);
                debug!(agent = %actor.id, group = %self.group, "refounded vanished group");
            } else {
                self.move_to.execute(actor, world)?;
                if self.move_to.is_done() {
                    self.register(actor, world)?;
                }
            }
            return Ok(TaskStatus::Pending);
        }

        self.check_growth(actor, world)?;
        self.try_reproduce(actor, world)?;
        self.wobble.execute(actor, world)?;
        Ok(TaskStatus::Pending)
    }

    fn register(&mut self, actor: &Actor, world: &mut World) -> Result<()> {
        let is_child = actor.characteristics.is_child(&world.ctx);
        let group = world
            .groups
            .get_mut(self.group)
            .ok_or(SimError::GroupDeleted(self.group))?;
        group.register(actor.id, actor.characteristics.gender(), is_child)?;
        self.registered = true;
        self.was_child = is_child;
        Ok(())
    }

    fn try_reproduce(&mut self, actor: &Actor, world: &mut World) -> Result<()> {
        let Some(group) = world.groups.get(self.group) else {
            return Ok(());
        };
        if !self.registered || !group.is_reproducible() {
            return Ok(());
        }
        let position = group.position;
        let modifier = actor.characteristics.health() / world.ctx.config.default_need_value;
        if !self.reproduce_trial.trial(modifier, &mut world.ctx) {
            return Ok(());
        }

        let gender = actor.characteristics.gender();
        let partner = world
            .groups
            .get(self.group)
            .and_then(|group| group.random_partner(gender, &mut world.ctx.rng));
        if let Some(partner) = partner {
            let child = world.spawn_child(position, (actor.id, &actor.characteristics), partner)?;
            debug!(agent = %actor.id, %partner, %child, "child conceived");
        }
        Ok(())
    }

    /// Move a member that has just grown up to its adult roster
    fn check_growth(&mut self, actor: &Actor, world: &mut World) -> Result<()> {
        if !self.registered || !self.was_child || actor.characteristics.is_child(&world.ctx) {
            return Ok(());
        }
        if let Some(group) = world.groups.get_mut(self.group) {
            group.child_to_adult(actor.id, actor.characteristics.gender())?;
        }
        self.was_child = false;
        Ok(())
    }

    /// Leave the group, dissolving it when this was the last member
    pub fn remove_from_group(&mut self, actor: &Actor, world: &mut World) {
        if let Err(err) = self.check_growth(actor, world) {
            warn!(agent = %actor.id, %err, "growth check failed while leaving group");
        }
        if self.registered {
            if let Some(group) = world.groups.get_mut(self.group) {
                if let Err(err) = group.unregister(actor.id) {
                    warn!(agent = %actor.id, %err, "leaving group failed");
                }
                if group.is_empty() {
                    world.delete_group(self.group);
                }
            }
            self.registered = false;
        }
        self.done = true;
    }
}

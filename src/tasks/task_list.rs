//! Fixed-slot priority scheduler for autonomous tasks
//!
//! One slot per category, checked in priority order. Only the first
//! occupied slot runs each tick, so a hungry agent stops socializing until
//! it has eaten.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::error::Result;
use crate::ecs::world::World;
use crate::entity::agent::Actor;
use crate::entity::resources::ResourceType;
use crate::tasks::gather::GetResourceTask;
use crate::tasks::goals::{SafetyTask, StrollTask};
use crate::tasks::socialize::SocializeTask;
use crate::tasks::TaskStatus;

/// Slot of an autonomous task, in descending priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskCategory {
    Food,
    Happiness,
    Safety,
    Stroll,
    Socialize,
}

impl TaskCategory {
    pub const PRIORITY: [TaskCategory; 5] = [
        TaskCategory::Food,
        TaskCategory::Happiness,
        TaskCategory::Safety,
        TaskCategory::Stroll,
        TaskCategory::Socialize,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone)]
pub enum AutonomousTask {
    GetResource(GetResourceTask),
    Safety(SafetyTask),
    Stroll(StrollTask),
    Socialize(SocializeTask),
}

impl AutonomousTask {
    pub fn category(&self) -> TaskCategory {
        match self {
            AutonomousTask::GetResource(task) => match task.resource() {
                ResourceType::Food => TaskCategory::Food,
                _ => TaskCategory::Happiness,
            },
            AutonomousTask::Safety(_) => TaskCategory::Safety,
            AutonomousTask::Stroll(_) => TaskCategory::Stroll,
            AutonomousTask::Socialize(_) => TaskCategory::Socialize,
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            AutonomousTask::GetResource(task) => task.is_done(),
            AutonomousTask::Safety(task) => task.is_done(),
            AutonomousTask::Stroll(task) => task.is_done(),
            AutonomousTask::Socialize(task) => task.is_done(),
        }
    }

    fn execute(&mut self, actor: &mut Actor, world: &mut World) -> Result<TaskStatus> {
        match self {
            AutonomousTask::GetResource(task) => task.execute(actor, world),
            AutonomousTask::Safety(task) => task.execute(actor, world),
            AutonomousTask::Stroll(task) => task.execute(actor, world),
            AutonomousTask::Socialize(task) => task.execute(actor, world),
        }
    }

    /// Release anything the task holds in the world
    fn discard(self, actor: &Actor, world: &mut World) {
        if let AutonomousTask::Socialize(mut task) = self {
            task.remove_from_group(actor, world);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskList {
    slots: [Option<AutonomousTask>; 5],
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, category: TaskCategory) -> bool {
        self.slots[category.slot()].is_some()
    }

    pub fn get(&self, category: TaskCategory) -> Option<&AutonomousTask> {
        self.slots[category.slot()].as_ref()
    }

    /// Category of the task that runs next
    pub fn current(&self) -> Option<TaskCategory> {
        self.slots.iter().flatten().map(AutonomousTask::category).next()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Insert into the task's slot unless that slot is taken. Any running
    /// socialize task is ended first so the agent leaves its group.
    pub fn add(&mut self, task: AutonomousTask, actor: &Actor, world: &mut World) -> bool {
        self.remove_socialize(actor, world);
        let slot = &mut self.slots[task.category().slot()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(task);
        true
    }

    /// Run the highest-priority task for one tick. Returns its category
    /// when it finished.
    pub fn execute(&mut self, actor: &mut Actor, world: &mut World) -> Option<TaskCategory> {
        let index = self.slots.iter().position(Option::is_some)?;
        let task = self.slots[index].as_mut()?;
        let category = task.category();

        if let Err(err) = task.execute(actor, world) {
            warn!(agent = %actor.id, ?category, %err, "task execution failed");
        }
        if !task.is_done() {
            return None;
        }

        if category == TaskCategory::Safety {
            // Reaching safety resets every other plan as well
            self.remove_all(actor, world);
        } else if let Some(task) = self.slots[index].take() {
            task.discard(actor, world);
        }
        Some(category)
    }

    pub fn remove_all(&mut self, actor: &Actor, world: &mut World) {
        for slot in self.slots.iter_mut() {
            if let Some(task) = slot.take() {
                task.discard(actor, world);
            }
        }
    }

    fn remove_socialize(&mut self, actor: &Actor, world: &mut World) {
        if let Some(task) = self.slots[TaskCategory::Socialize.slot()].take() {
            task.discard(actor, world);
        }
    }
}

//! Resumable per-tick tasks
//!
//! Every task is a small state machine that does one tick of work per
//! `execute` call and remembers where it left off. Executing a task that
//! already reports done is an error.

pub mod commanded;
pub mod gather;
pub mod goals;
pub mod movement;
pub mod pause;
pub mod socialize;
pub mod task_list;
pub mod transfer;
pub mod transport;

use serde::{Deserialize, Serialize};

use crate::core::types::{GroupId, NodeId, Vec2};

pub use commanded::{CommandKind, CommandedTask};
pub use gather::GetResourceTask;
pub use goals::{SafetyTask, StrollTask};
pub use movement::{MoveTask, MoveToTask, WobbleTask};
pub use pause::PauseTask;
pub use socialize::SocializeTask;
pub use task_list::{AutonomousTask, TaskCategory, TaskList};
pub use transfer::{ConsumeTask, Ledger, TransferTask};
pub use transport::CommandedTransportTask;

/// Outcome of a single `execute` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work continues next tick
    Pending,
    Done,
    Failed(FailReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailReason {
    /// Nothing available to transfer; the task may be retried
    Empty,
    /// Fewer units than requested were available
    Shortfall { moved: u32 },
    /// The step would have left the world and was clamped
    OutOfBounds,
    /// The target object no longer exists
    TargetDeleted,
    /// Nothing of the resource is carried; the task may be retried
    NothingCarried,
}

impl FailReason {
    /// Whether a task reporting this failure is finished
    pub fn retires_task(self) -> bool {
        !matches!(self, FailReason::Empty | FailReason::NothingCarried)
    }
}

impl TaskStatus {
    pub fn is_success(self) -> bool {
        !matches!(self, TaskStatus::Failed(_))
    }
}

/// Something an agent can walk to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveTarget {
    Point(Vec2),
    Node(NodeId),
    Group(GroupId),
}

use crate::core::context::SimContext;
use crate::core::error::{Result, SimError};
use crate::core::types::SimTime;
use crate::tasks::TaskStatus;

/// Idle until the configured pause duration has passed
#[derive(Debug, Clone, Default)]
pub struct PauseTask {
    started: Option<SimTime>,
    done: bool,
}

impl PauseTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn execute(&mut self, ctx: &SimContext) -> Result<TaskStatus> {
        if self.done {
            return Err(SimError::TaskAlreadyDone);
        }
        match self.started {
            None => self.started = Some(ctx.now()),
            Some(started) => self.done = ctx.now() - started > ctx.config.pause_duration,
        }
        Ok(if self.done {
            TaskStatus::Done
        } else {
            TaskStatus::Pending
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;

    #[test]
    fn test_pause_lasts_configured_duration() {
        let mut ctx = SimContext::new(SimulationConfig::default(), 0);
        let mut pause = PauseTask::new();
        ctx.clock.advance(1.0);
        assert_eq!(pause.execute(&ctx).unwrap(), TaskStatus::Pending);

        ctx.clock.advance(4.0);
        assert_eq!(pause.execute(&ctx).unwrap(), TaskStatus::Pending);
        ctx.clock.advance(0.5);
        assert_eq!(pause.execute(&ctx).unwrap(), TaskStatus::Done);
        assert!(pause.execute(&ctx).is_err());
    }
}

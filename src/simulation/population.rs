//! Death checks and population bookkeeping

use serde::{Deserialize, Serialize};

use crate::core::context::SimContext;
use crate::entity::agent::Agent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    Starvation,
    Depression,
    Exposure,
    /// Lost the kill trial; likely once health has fallen below the offset
    Natural,
}

/// Decide whether the agent dies this tick
pub fn death_check(agent: &mut Agent, ctx: &mut SimContext) -> Option<DeathCause> {
    let minimum = ctx.config.minimum_need;
    let characteristics = &agent.actor.characteristics;

    if characteristics.saturation() < minimum {
        return Some(DeathCause::Starvation);
    }
    if characteristics.happiness() < minimum {
        return Some(DeathCause::Depression);
    }
    if characteristics.safety() < minimum {
        return Some(DeathCause::Exposure);
    }

    let health = characteristics.health();
    let modifier = (ctx.config.death_probability_offset - health) / health;
    agent
        .kill_trial
        .trial(modifier, ctx)
        .then_some(DeathCause::Natural)
}

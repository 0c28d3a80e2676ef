//! Simulation context threaded through every task execution
//!
//! Bundles the clock, the tunables and the single seeded random source so
//! that nothing reaches for a global.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::clock::SimClock;
use crate::core::config::SimulationConfig;
use crate::core::types::SimTime;

pub struct SimContext {
    pub clock: SimClock,
    pub config: SimulationConfig,
    /// Random number generator (deterministic)
    pub rng: ChaCha8Rng,
}

impl SimContext {
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        Self {
            clock: SimClock::new(),
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seconds since the previous tick
    pub fn dt(&self) -> SimTime {
        self.clock.delta()
    }

    /// Seconds since simulation start
    pub fn now(&self) -> SimTime {
        self.clock.elapsed()
    }
}

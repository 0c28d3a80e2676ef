//! Periodic Bernoulli trials
//!
//! A trial is polled every tick but only rolls the dice once a full
//! randomize interval has passed since its previous roll. The roll succeeds
//! when a uniform draw is at most `base_probability * modifier`; modifiers
//! above 1 make success more likely and saturate at certainty.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::context::SimContext;
use crate::core::types::SimTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Randomizer {
    probability: f32,
    modifier: f32,
    last_attempt: SimTime,
}

impl Randomizer {
    /// Trial whose successes are on average `mean_time` seconds apart.
    ///
    /// A mean time of zero forces the probability to 1.
    pub fn from_interval(mean_time: f32, randomize_interval: f32) -> Self {
        let probability = if mean_time != 0.0 {
            randomize_interval / mean_time
        } else {
            1.0
        };
        Self::from_probability(probability)
    }

    /// Trial with an explicit per-roll probability
    pub fn from_probability(probability: f32) -> Self {
        Self {
            probability,
            modifier: 1.0,
            last_attempt: 0.0,
        }
    }

    pub fn probability(&self) -> f32 {
        self.probability
    }

    /// Modifier used by the most recent call to [`Randomizer::trial`]
    pub fn modifier(&self) -> f32 {
        self.modifier
    }

    /// Poll the trial with a new modifier
    pub fn trial(&mut self, modifier: f32, ctx: &mut SimContext) -> bool {
        self.modifier = modifier;
        let now = ctx.now();
        if now - self.last_attempt <= ctx.config.randomize_interval {
            return false;
        }
        self.last_attempt = now;
        ctx.rng.gen::<f32>() <= self.probability * self.modifier
    }

    /// Poll the trial reusing the last modifier
    pub fn trial_unmodified(&mut self, ctx: &mut SimContext) -> bool {
        self.trial(self.modifier, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;

    fn context() -> SimContext {
        SimContext::new(SimulationConfig::default(), 11)
    }

    #[test]
    fn test_zero_mean_time_always_succeeds() {
        let mut ctx = context();
        let mut trial = Randomizer::from_interval(0.0, ctx.config.randomize_interval);
        assert_eq!(trial.probability(), 1.0);

        for _ in 0..50 {
            ctx.clock.advance(1.5);
            assert!(trial.trial(1.0, &mut ctx));
        }
    }

    #[test]
    fn test_not_evaluated_before_interval_elapses() {
        let mut ctx = context();
        let mut trial = Randomizer::from_probability(1.0);

        // Time 0.5 has not passed the 1 second interval yet
        ctx.clock.advance(0.5);
        assert!(!trial.trial(1.0, &mut ctx));

        ctx.clock.advance(0.6);
        assert!(trial.trial(1.0, &mut ctx));

        // Counter reset at 1.1; next roll only after 2.1
        ctx.clock.advance(0.5);
        assert!(!trial.trial(1.0, &mut ctx));
        ctx.clock.advance(0.55);
        assert!(trial.trial(1.0, &mut ctx));
    }

    #[test]
    fn test_interval_probability() {
        let trial = Randomizer::from_interval(90.0, 1.0);
        assert!((trial.probability() - 1.0 / 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_probability_never_succeeds() {
        let mut ctx = context();
        let mut trial = Randomizer::from_probability(0.0);
        for _ in 0..50 {
            ctx.clock.advance(2.0);
            assert!(!trial.trial(3.0, &mut ctx));
        }
    }

    #[test]
    fn test_large_modifier_saturates() {
        let mut ctx = context();
        let mut trial = Randomizer::from_probability(0.01);
        for _ in 0..50 {
            ctx.clock.advance(2.0);
            assert!(trial.trial(f32::INFINITY, &mut ctx));
        }
    }

    #[test]
    fn test_unmodified_reuses_last_modifier() {
        let mut ctx = context();
        let mut trial = Randomizer::from_probability(0.5);
        ctx.clock.advance(2.0);
        trial.trial(4.0, &mut ctx);
        ctx.clock.advance(2.0);
        // 0.5 * 4.0 >= 1 so the roll cannot fail
        assert!(trial.trial_unmodified(&mut ctx));
        assert_eq!(trial.modifier(), 4.0);
    }
}

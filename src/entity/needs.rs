//! Needs, skills and health of a living agent
//!
//! Needs (saturation, happiness, safety) and skills (gather, sacrifice,
//! transportation) are all kept in [0, 1]. Health is derived from the needs
//! and capped by a maximum health that slowly wears down with age.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::context::SimContext;
use crate::core::trial::Randomizer;
use crate::core::types::{SimTime, Vec2};
use crate::entity::resources::ResourceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Gender::Female => Gender::Male,
            Gender::Male => Gender::Female,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeedType {
    Saturation,
    Happiness,
    Safety,
}

impl NeedType {
    /// Need satisfied by consuming one unit of `resource`
    pub fn satisfied_by(resource: ResourceType) -> Self {
        match resource {
            ResourceType::Food => NeedType::Saturation,
            _ => NeedType::Happiness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillType {
    Gather,
    Sacrifice,
    Transportation,
}

impl SkillType {
    pub const ALL: [SkillType; 3] = [
        SkillType::Gather,
        SkillType::Sacrifice,
        SkillType::Transportation,
    ];
}

/// Need/skill state of one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Characteristics {
    saturation: f32,
    happiness: f32,
    safety: f32,
    health: f32,
    maximum_health: f32,
    gather_skill: f32,
    sacrifice_skill: f32,
    transportation_skill: f32,
    gender: Gender,
    time_of_birth: SimTime,
    start_age: u32,
    hungry_trial: Randomizer,
    depressed_trial: Randomizer,
    unsafe_trial: Randomizer,
    stroll_trial: Randomizer,
}

impl Characteristics {
    /// Founding agent of the given gender and age
    pub fn new(gender: Gender, age: u32, ctx: &SimContext) -> Self {
        let config = &ctx.config;
        let mut characteristics = Self {
            saturation: config.default_need_value,
            happiness: config.default_need_value,
            // Recomputed from the position on the first tick
            safety: 1.0,
            health: 0.0,
            maximum_health: 1.0,
            gather_skill: config.default_skill_value,
            sacrifice_skill: config.default_skill_value,
            transportation_skill: config.default_skill_value,
            gender,
            time_of_birth: ctx.now(),
            start_age: age,
            hungry_trial: Randomizer::from_interval(config.need_interval, config.randomize_interval),
            depressed_trial: Randomizer::from_interval(
                config.need_interval,
                config.randomize_interval,
            ),
            unsafe_trial: Randomizer::from_probability(config.unsafe_probability),
            stroll_trial: Randomizer::from_interval(config.stroll_interval, config.randomize_interval),
        };
        characteristics.health = characteristics.target_health();
        characteristics
    }

    /// Newborn of two parents: random gender, age zero, averaged skills
    pub fn from_parents(first: &Characteristics, second: &Characteristics, ctx: &mut SimContext) -> Self {
        let gender = Gender::random(&mut ctx.rng);
        let mut child = Self::new(gender, 0, ctx);
        child.gather_skill = (first.gather_skill + second.gather_skill) / 2.0;
        child.sacrifice_skill = (first.sacrifice_skill + second.sacrifice_skill) / 2.0;
        child.transportation_skill = (first.transportation_skill + second.transportation_skill) / 2.0;
        child
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn happiness(&self) -> f32 {
        self.happiness
    }

    pub fn safety(&self) -> f32 {
        self.safety
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn maximum_health(&self) -> f32 {
        self.maximum_health
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn need(&self, need: NeedType) -> f32 {
        match need {
            NeedType::Saturation => self.saturation,
            NeedType::Happiness => self.happiness,
            NeedType::Safety => self.safety,
        }
    }

    pub fn skill(&self, skill: SkillType) -> f32 {
        match skill {
            SkillType::Gather => self.gather_skill,
            SkillType::Sacrifice => self.sacrifice_skill,
            SkillType::Transportation => self.transportation_skill,
        }
    }

    fn skill_mut(&mut self, skill: SkillType) -> &mut f32 {
        match skill {
            SkillType::Gather => &mut self.gather_skill,
            SkillType::Sacrifice => &mut self.sacrifice_skill,
            SkillType::Transportation => &mut self.transportation_skill,
        }
    }

    /// Override a need directly (clamped), for scenario setup
    pub fn set_need(&mut self, need: NeedType, value: f32) {
        let value = value.clamp(0.0, 1.0);
        match need {
            NeedType::Saturation => self.saturation = value,
            NeedType::Happiness => self.happiness = value,
            NeedType::Safety => self.safety = value,
        }
    }

    /// Override a skill directly (clamped), for scenario setup
    pub fn set_skill(&mut self, skill: SkillType, value: f32) {
        *self.skill_mut(skill) = value.clamp(0.0, 1.0);
    }

    /// Add one unit-to-need ratio to a need, capped at 1
    pub fn increase_need(&mut self, need: NeedType, config: &SimulationConfig) {
        let current = self.need(need);
        self.set_need(need, current + config.unit_need_ratio);
    }

    /// Saturation and happiness shrink by `(1 - decay_speed * dt)` every tick
    pub fn decay_needs(&mut self, dt: SimTime, config: &SimulationConfig) {
        let factor = (1.0 - config.need_decrease_speed * dt.max(0.0)).clamp(0.0, 1.0);
        self.saturation *= factor;
        self.happiness *= factor;
    }

    /// Safety is 1 inside the beacon's influence, `factor^distance` outside it.
    ///
    /// `beacon` is the beacon position and influence radius; without a
    /// beacon nothing can make an agent feel unsafe.
    pub fn recompute_safety(&mut self, position: Vec2, beacon: Option<(Vec2, f32)>, config: &SimulationConfig) {
        self.safety = match beacon {
            Some((center, radius)) => {
                let outside = position.distance(&center) - radius;
                if outside > 0.0 {
                    config.safety_decrease_factor.powf(outside).clamp(0.0, 1.0)
                } else {
                    1.0
                }
            }
            None => 1.0,
        };
    }

    fn target_health(&self) -> f32 {
        ((self.saturation + self.happiness + self.safety / 2.0) / 3.0).min(self.maximum_health)
    }

    /// Age maximum health (adults only) and derive health from the needs
    pub fn recompute_health(&mut self, ctx: &SimContext) {
        if !self.is_child(ctx) {
            let aging = (1.0 - ctx.config.aging_factor * ctx.dt()).clamp(0.0, 1.0);
            self.maximum_health *= aging;
        }
        self.health = self.target_health();
    }

    /// Practice a skill: it approaches 1 with diminishing returns while the
    /// other two skills decay. Children neither learn nor forget.
    pub fn increase_skill(&mut self, skill: SkillType, ctx: &SimContext) {
        if self.is_child(ctx) {
            return;
        }
        let dt = ctx.dt();
        let config = &ctx.config;

        let practiced = self.skill_mut(skill);
        *practiced = (*practiced + config.skill_increase_speed * dt * (1.0 - *practiced)).clamp(0.0, 1.0);

        for other in SkillType::ALL.into_iter().filter(|s| *s != skill) {
            let value = self.skill_mut(other);
            *value = (*value - config.skill_decrease_speed * dt * *value).clamp(0.0, 1.0);
        }
    }

    /// Work-rate multiplier around 1.0 from a skill and the current health
    pub fn efficiency(&self, skill: SkillType, config: &SimulationConfig) -> f32 {
        (self.skill(skill) + config.default_skill_value) * (self.health + config.default_skill_value)
    }

    /// Age in whole pseudo years
    pub fn age(&self, ctx: &SimContext) -> u32 {
        let years = (ctx.now() - self.time_of_birth) / ctx.config.year_seconds_ratio;
        years.max(0.0) as u32 + self.start_age
    }

    pub fn is_child(&self, ctx: &SimContext) -> bool {
        self.age(ctx) < ctx.config.adult_age
    }

    /// Hunger trial, more likely the lower saturation is
    pub fn is_hungry(&mut self, ctx: &mut SimContext) -> bool {
        let modifier = ctx.config.default_need_value / self.saturation;
        self.hungry_trial.trial(modifier, ctx)
    }

    /// Depression trial, more likely the lower happiness is
    pub fn is_depressed(&mut self, ctx: &mut SimContext) -> bool {
        let modifier = ctx.config.default_need_value / self.happiness;
        self.depressed_trial.trial(modifier, ctx)
    }

    /// Unsafety trial, more likely the lower safety is
    pub fn is_unsafe(&mut self, ctx: &mut SimContext) -> bool {
        let modifier = ctx.config.default_need_value / self.safety;
        self.unsafe_trial.trial(modifier, ctx)
    }

    pub fn is_strolly(&mut self, ctx: &mut SimContext) -> bool {
        self.stroll_trial.trial_unmodified(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> SimContext {
        SimContext::new(SimulationConfig::default(), 3)
    }

    #[test]
    fn test_founder_defaults() {
        let ctx = context();
        let c = Characteristics::new(Gender::Male, 18, &ctx);
        assert_eq!(c.saturation(), 0.5);
        assert_eq!(c.happiness(), 0.5);
        assert_eq!(c.skill(SkillType::Gather), 0.5);
        assert_eq!(c.maximum_health(), 1.0);
        // (0.5 + 0.5 + 0.5) / 3
        assert!((c.health() - 0.5).abs() < 1e-6);
        assert!(!c.is_child(&ctx));
    }

    #[test]
    fn test_increase_need_caps_at_one() {
        let ctx = context();
        let mut c = Characteristics::new(Gender::Female, 18, &ctx);
        for _ in 0..10 {
            c.increase_need(NeedType::Saturation, &ctx.config);
        }
        assert_eq!(c.saturation(), 1.0);
        assert_eq!(c.happiness(), 0.5);
    }

    #[test]
    fn test_decay_with_huge_dt_bottoms_out() {
        let ctx = context();
        let mut c = Characteristics::new(Gender::Female, 18, &ctx);
        c.decay_needs(10_000.0, &ctx.config);
        assert_eq!(c.saturation(), 0.0);
        assert_eq!(c.happiness(), 0.0);
    }

    #[test]
    fn test_safety_outside_radius() {
        let ctx = context();
        let mut c = Characteristics::new(Gender::Female, 18, &ctx);
        let beacon = Some((Vec2::new(0.0, 0.0), 5.0));

        c.recompute_safety(Vec2::new(3.0, 0.0), beacon, &ctx.config);
        assert_eq!(c.safety(), 1.0);

        c.recompute_safety(Vec2::new(7.0, 0.0), beacon, &ctx.config);
        assert!((c.safety() - 0.81).abs() < 1e-4);

        c.recompute_safety(Vec2::new(7.0, 0.0), None, &ctx.config);
        assert_eq!(c.safety(), 1.0);
    }

    #[test]
    fn test_health_capped_by_maximum() {
        let mut ctx = context();
        let mut c = Characteristics::new(Gender::Male, 40, &ctx);
        c.set_need(NeedType::Saturation, 1.0);
        c.set_need(NeedType::Happiness, 1.0);
        ctx.clock.advance(10.0);
        c.recompute_health(&ctx);
        // max health 1 * (1 - 0.005 * 10)
        assert!((c.maximum_health() - 0.95).abs() < 1e-5);
        assert!(c.health() <= c.maximum_health());
    }

    #[test]
    fn test_children_do_not_age_health_or_learn() {
        let mut ctx = context();
        let mut c = Characteristics::new(Gender::Male, 0, &ctx);
        assert!(c.is_child(&ctx));
        ctx.clock.advance(5.0);
        c.recompute_health(&ctx);
        assert_eq!(c.maximum_health(), 1.0);
        c.increase_skill(SkillType::Gather, &ctx);
        assert_eq!(c.skill(SkillType::Gather), 0.5);
    }

    #[test]
    fn test_practice_crowds_out_other_skills() {
        let mut ctx = context();
        let mut c = Characteristics::new(Gender::Male, 18, &ctx);
        ctx.clock.advance(1.0);
        c.increase_skill(SkillType::Transportation, &ctx);
        assert!(c.skill(SkillType::Transportation) > 0.5);
        assert!(c.skill(SkillType::Gather) < 0.5);
        assert!(c.skill(SkillType::Sacrifice) < 0.5);
    }

    #[test]
    fn test_child_becomes_adult() {
        let mut ctx = context();
        let c = Characteristics::new(Gender::Female, 0, &ctx);
        // 18 years at 10 seconds per year
        ctx.clock.advance(180.5);
        assert!(!c.is_child(&ctx));
        assert_eq!(c.age(&ctx), 18);
    }

    #[test]
    fn test_efficiency_is_one_at_defaults() {
        let ctx = context();
        let c = Characteristics::new(Gender::Female, 18, &ctx);
        assert!((c.efficiency(SkillType::Gather, &ctx.config) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_parents_averages_skills() {
        let mut ctx = context();
        let mut a = Characteristics::new(Gender::Female, 18, &ctx);
        let mut b = Characteristics::new(Gender::Male, 18, &ctx);
        a.set_skill(SkillType::Gather, 0.2);
        b.set_skill(SkillType::Gather, 0.8);
        let child = Characteristics::from_parents(&a, &b, &mut ctx);
        assert!((child.skill(SkillType::Gather) - 0.5).abs() < 1e-6);
        assert_eq!(child.age(&ctx), 0);
    }

    #[test]
    fn test_starving_agent_is_always_hungry_on_roll() {
        let mut ctx = context();
        let mut c = Characteristics::new(Gender::Female, 18, &ctx);
        c.set_need(NeedType::Saturation, 0.0);
        ctx.clock.advance(1.5);
        // default_need_value / 0 is infinite: the roll cannot fail
        assert!(c.is_hungry(&mut ctx));
    }
}

//! Simulation configuration with documented constants
//!
//! All tunables are collected here with explanations of their purpose
//! and how they interact with each other. Values are read-only during a tick.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, SimError};
use crate::core::types::Bounds;

/// Configuration for the simulation systems
///
/// These values have been tuned to produce a calm island where a handful of
/// turtles eat, wander, gather in groups and slowly raise a population.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === WORLD ===
    /// Width of the tile world
    pub world_width: f32,

    /// Height of the tile world
    pub world_height: f32,

    /// Distance at which an agent counts as standing on its target
    ///
    /// Roughly 1/12 of a tile. Must stay well below the distance an agent
    /// covers in a typical tick or arrival is detected by overshoot instead.
    pub on_position_offset: f32,

    // === MOVEMENT ===
    /// Base walking speed of every agent (tiles per second)
    pub individual_speed: f32,

    /// Radius an agent wobbles within while working at a node
    pub node_wobble_radius: f32,

    /// Radius an agent wobbles within while socializing
    pub socialize_wobble_radius: f32,

    /// Largest random turn per wobble step (radians)
    pub max_wobble_turning: f32,

    // === NEEDS ===
    /// Need gained from consuming one unit of a resource
    ///
    /// At 0.25, four units take an agent from empty to full.
    pub unit_need_ratio: f32,

    /// Fraction of saturation/happiness lost per second
    pub need_decrease_speed: f32,

    /// Need value considered "normal"; probability modifiers are relative to it
    pub default_need_value: f32,

    /// Below this value on any need the agent dies
    pub minimum_need: f32,

    /// Mean seconds between hunger/depression trials succeeding at normal need
    pub need_interval: f32,

    /// Base probability per trial that an agent feels unsafe
    pub unsafe_probability: f32,

    /// Per-tile multiplicative safety loss outside the beacon radius
    ///
    /// At 0.9, safety is 0.9^d at d tiles outside the influence radius.
    pub safety_decrease_factor: f32,

    // === SKILLS ===
    /// Skill value of a newly created founder, also the efficiency offset
    pub default_skill_value: f32,

    /// Rate at which a practiced skill approaches 1
    pub skill_increase_speed: f32,

    /// Rate at which unpracticed skills decay (half the increase speed)
    pub skill_decrease_speed: f32,

    // === LIFECYCLE ===
    /// Seconds of simulation time per year of age
    pub year_seconds_ratio: f32,

    /// Age at which a child becomes an adult
    pub adult_age: u32,

    /// Age of founders at the start of the simulation
    pub founder_age: u32,

    /// Fraction of maximum health lost per second once adult
    pub aging_factor: f32,

    /// Health level around which the death trial turns on
    ///
    /// The kill trial modifier is (offset - health) / health, which is
    /// negative (never kills) while health is above this offset.
    pub death_probability_offset: f32,

    /// Base kill probability for founders
    pub founder_kill_probability: f32,

    // === WORK ===
    /// Units gathered per second at efficiency 1
    pub gather_speed: f32,

    /// Units sacrificed per second at efficiency 1
    pub sacrifice_speed: f32,

    /// Units picked up per transport pick-up order
    pub max_units_carried: u32,

    /// Seconds an agent idles after every commanded work cycle
    pub pause_duration: f32,

    // === LIGHT PILLAR ===
    /// Influence radius of the light pillar before any sacrifice
    pub default_light_pillar_radius: f32,

    /// Radius added per sacrificed unit
    pub sacrificed_units_distance_ratio: f32,

    // === RANDOMIZATION ===
    /// Seconds between two evaluations of the same probability trial
    pub randomize_interval: f32,

    /// Mean seconds between stroll impulses
    pub stroll_interval: f32,

    /// Mean seconds between reproduction successes in a mixed group
    pub reproduce_interval: f32,

    /// Chance that a lonely agent joins the nearest group instead of founding one
    pub join_socialization_chance: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world_width: 32.0,
            world_height: 32.0,
            on_position_offset: 0.083333,

            individual_speed: 1.8,
            node_wobble_radius: 1.0,
            socialize_wobble_radius: 2.0,
            max_wobble_turning: 0.8,

            unit_need_ratio: 0.25,
            need_decrease_speed: 0.005,
            default_need_value: 0.5,
            minimum_need: 0.001,
            need_interval: 90.0,
            unsafe_probability: 0.5,
            safety_decrease_factor: 0.9,

            default_skill_value: 0.5,
            skill_increase_speed: 0.0025,
            skill_decrease_speed: 0.00125,

            year_seconds_ratio: 10.0,
            adult_age: 18,
            founder_age: 18,
            aging_factor: 0.005,
            death_probability_offset: 0.3,
            founder_kill_probability: 0.01,

            gather_speed: 0.25,
            sacrifice_speed: 0.25,
            max_units_carried: 2,
            pause_duration: 4.0,

            default_light_pillar_radius: 5.0,
            sacrificed_units_distance_ratio: 0.1,

            randomize_interval: 1.0,
            stroll_interval: 100.0,
            reproduce_interval: 100.0,
            join_socialization_chance: 0.8,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.world_width, self.world_height)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "world must have positive size, got {}x{}",
                self.world_width, self.world_height
            )));
        }

        if self.randomize_interval <= 0.0 {
            return Err(SimError::InvalidConfig(
                "randomize_interval must be positive".into(),
            ));
        }

        if self.year_seconds_ratio <= 0.0 {
            return Err(SimError::InvalidConfig(
                "year_seconds_ratio must be positive".into(),
            ));
        }

        let probabilities = [
            ("unsafe_probability", self.unsafe_probability),
            ("join_socialization_chance", self.join_socialization_chance),
            ("founder_kill_probability", self.founder_kill_probability),
            ("safety_decrease_factor", self.safety_decrease_factor),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidConfig(format!(
                    "{} ({}) must be within [0, 1]",
                    name, value
                )));
            }
        }

        if self.default_need_value <= 0.0 || self.default_need_value > 1.0 {
            return Err(SimError::InvalidConfig(format!(
                "default_need_value ({}) must be within (0, 1]",
                self.default_need_value
            )));
        }

        if self.individual_speed < 0.0 || self.gather_speed < 0.0 || self.sacrifice_speed < 0.0 {
            return Err(SimError::InvalidConfig("speeds must not be negative".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            world_width = 64.0
            pause_duration = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(config.world_width, 64.0);
        assert_eq!(config.pause_duration, 2.5);
        assert_eq!(config.world_height, 32.0);
        assert_eq!(config.max_units_carried, 2);
    }

    #[test]
    fn test_rejects_probability_out_of_range() {
        let result = SimulationConfig::from_toml_str("join_socialization_chance = 1.5");
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_randomize_interval() {
        let config = SimulationConfig {
            randomize_interval: 0.0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let result = SimulationConfig::from_toml_str("world_width = \"wide\"");
        assert!(matches!(result, Err(SimError::TomlError(_))));
    }
}

//! Turtle Island - need-driven agent simulation
//!
//! Agents ("turtles") live on a small island, gather food and happiness,
//! seek safety near the light pillar, form groups and raise children. A
//! player may override the autonomous behaviour with commanded tasks.

pub mod core;
pub mod ecs;
pub mod entity;
pub mod simulation;
pub mod tasks;
pub mod world;

//! Core type definitions used throughout the codebase

use derive_more::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Handle of an agent (individual) in the world arena
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[display(fmt = "agent#{}", _0)]
pub struct AgentId(pub u32);

/// Handle of a stationary node (flag, source or light pillar)
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[display(fmt = "node#{}", _0)]
pub struct NodeId(pub u32);

/// Handle of a socialize group
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[display(fmt = "group#{}", _0)]
pub struct GroupId(pub u32);

/// Simulation time in seconds
pub type SimTime = f32;

/// 2D position in tile units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Bearing from `self` to `other` in radians, normalized to [0, 2π)
    pub fn angle_to(&self, other: &Self) -> f32 {
        let angle = (other.y - self.y).atan2(other.x - self.x);
        if angle < 0.0 {
            angle + TAU
        } else {
            angle
        }
    }

    /// True when `other` lies strictly within `tolerance` of `self`
    pub fn on_position(&self, other: &Self, tolerance: f32) -> bool {
        self.distance(other) < tolerance
    }

    /// Point reached by travelling `distance` along `direction`
    pub fn step(&self, direction: f32, distance: f32) -> Self {
        Self {
            x: self.x + distance * direction.cos(),
            y: self.y + distance * direction.sin(),
        }
    }
}

/// Heading plus speed. Direction is kept in [0, 2π].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    direction: f32,
    pub magnitude: f32,
}

impl Velocity {
    pub fn new(direction: f32, magnitude: f32) -> Self {
        Self {
            direction: normalize_angle(direction),
            magnitude,
        }
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }
}

/// Wraps an angle into [0, 2π)
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Axis-aligned world rectangle, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(width, height),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Uniformly random point inside the bounds
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            self.min.x + rng.gen::<f32>() * (self.max.x - self.min.x),
            self.min.y + rng.gen::<f32>() * (self.max.y - self.min.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f32::consts::PI;

    #[test]
    fn test_angle_to_is_non_negative() {
        let origin = Vec2::new(5.0, 5.0);
        assert!((origin.angle_to(&Vec2::new(6.0, 5.0)) - 0.0).abs() < 1e-6);
        assert!((origin.angle_to(&Vec2::new(5.0, 6.0)) - PI / 2.0).abs() < 1e-6);
        // Straight down wraps to 3π/2 rather than -π/2
        assert!((origin.angle_to(&Vec2::new(5.0, 4.0)) - 3.0 * PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_step_travels_along_heading() {
        let moved = Vec2::new(1.0, 1.0).step(PI / 2.0, 2.0);
        assert!((moved.x - 1.0).abs() < 1e-5);
        assert!((moved.y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_velocity_direction_wraps() {
        let v = Velocity::new(-PI / 2.0, 1.0);
        assert!((v.direction() - 3.0 * PI / 2.0).abs() < 1e-5);
        let v = Velocity::new(TAU + 0.5, 1.0);
        assert!((v.direction() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_bounds_clamp_and_contains() {
        let bounds = Bounds::new(10.0, 20.0);
        assert!(bounds.contains(Vec2::new(10.0, 20.0)));
        assert!(!bounds.contains(Vec2::new(10.1, 5.0)));
        assert_eq!(bounds.clamp(Vec2::new(-3.0, 25.0)), Vec2::new(0.0, 20.0));
    }

    #[test]
    fn test_random_point_in_bounds() {
        let bounds = Bounds::new(8.0, 4.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(bounds.contains(bounds.random_point(&mut rng)));
        }
    }

    #[test]
    fn test_id_display() {
        assert_eq!(AgentId(3).to_string(), "agent#3");
        assert_eq!(NodeId(0).to_string(), "node#0");
        assert_eq!(GroupId(12).to_string(), "group#12");
    }
}

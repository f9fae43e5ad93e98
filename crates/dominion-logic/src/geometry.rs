//! 2D world coordinates.

use serde::{Deserialize, Serialize};

/// A point or offset in world units. Tiles are `TILE_SIZE` units wide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Step toward `target` by up to `speed` on each axis independently.
    ///
    /// Axis steps are not normalized, so diagonal travel covers `speed` on
    /// both axes in the same tick. Never overshoots the target on an axis.
    pub fn step_toward(&self, target: &Self, speed: f32) -> Self {
        Self {
            x: step_axis(self.x, target.x, speed),
            y: step_axis(self.y, target.y, speed),
        }
    }
}

fn step_axis(from: f32, to: f32, speed: f32) -> f32 {
    if from < to {
        (from + speed).min(to)
    } else if from > to {
        (from - speed).max(to)
    } else {
        from
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

use bevy::math::Vec2;

use crate::data::MovementConfig;

const STILL_EPSILON_SQ: f32 = 0.0001;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Dominant axis of `direction`; `None` when there is no meaningful input.
    pub fn from_input(direction: Vec2) -> Option<Self> {
        if direction.length_squared() <= STILL_EPSILON_SQ {
            return None;
        }
        Some(if direction.x.abs() > direction.y.abs() {
            if direction.x > 0.0 { Self::Right } else { Self::Left }
        } else if direction.y > 0.0 {
            Self::Up
        } else {
            Self::Down
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub grounded: bool,
    input: Vec2,
    movement: MovementConfig,
}

impl PlayerBody {
    pub fn new(position: Vec2, movement: MovementConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::default(),
            grounded: true,
            input: Vec2::ZERO,
            movement,
        }
    }

    pub fn input(&self) -> Vec2 {
        self.input
    }

    /// Applies the per-axis deadzone, clamps to unit length and updates facing.
    pub fn set_input(&mut self, raw: Vec2) {
        let deadzone = self.movement.input_deadzone.clamp(0.0, 1.0);
        let filter = |axis: f32| {
            if !axis.is_finite() || axis.abs() < deadzone {
                0.0
            } else {
                axis
            }
        };
        self.input = Vec2::new(filter(raw.x), filter(raw.y)).clamp_length_max(1.0);
        if let Some(facing) = Facing::from_input(self.input) {
            self.facing = facing;
        }
    }

    /// One fixed step: velocity approaches `input * max_speed` by at most `rate * dt`.
    pub fn integrate(&mut self, dt: f32) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        let target = self.input * self.movement.max_speed;
        let rate = if target.length_squared() > STILL_EPSILON_SQ {
            self.movement.acceleration
        } else {
            self.movement.deceleration
        };
        let step = (target - self.velocity).clamp_length_max(rate * dt);
        self.velocity += step;
        self.position += self.velocity * dt;
    }

    pub fn respawn_at(&mut self, spawn_point: Vec2) {
        self.position = spawn_point;
        self.velocity = Vec2::ZERO;
    }
}

use serde::{Deserialize, Serialize};

use crate::model::GridCell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub cell_size: f32,
    pub max_interaction_range: f32,
    pub hotbar_capacity: usize,
    pub overflow_capacity: usize,
    pub spawn_point: [f32; 2],
    pub ground_probe_range: f32,
    pub movement: MovementConfig,
    pub starting_items: Vec<StartingStack>,
    pub island: Option<IslandConfig>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            max_interaction_range: 2.0,
            hotbar_capacity: 8,
            overflow_capacity: 32,
            spawn_point: [0.5, 0.5],
            ground_probe_range: 0.35,
            movement: MovementConfig::default(),
            starting_items: Vec::new(),
            island: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub input_deadzone: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            acceleration: 20.0,
            deceleration: 30.0,
            input_deadzone: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartingStack {
    pub item: String,
    pub count: u32,
}

/// Rectangle of pre-placed blocks, inclusive on both corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslandConfig {
    pub min: GridCell,
    pub max: GridCell,
    pub item: String,
}

impl IslandConfig {
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let (x0, x1) = (self.min.x.min(self.max.x), self.min.x.max(self.max.x));
        let (y0, y1) = (self.min.y.min(self.max.y), self.min.y.max(self.max.y));
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| GridCell::new(x, y)))
    }
}

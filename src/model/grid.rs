use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Integer cell address on a tilemap layer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell; coordinates stop at the `i32` range instead of wrapping.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Floor division of a world position by the cell size, per axis.
pub fn world_to_cell(world: Vec2, cell_size: f32) -> GridCell {
    let size = sanitize_cell_size(cell_size);
    GridCell {
        x: (world.x / size).floor() as i32,
        y: (world.y / size).floor() as i32,
    }
}

pub fn cell_to_world_center(cell: GridCell, cell_size: f32) -> Vec2 {
    let size = sanitize_cell_size(cell_size);
    Vec2::new(
        cell.x as f32 * size + size * 0.5,
        cell.y as f32 * size + size * 0.5,
    )
}

fn sanitize_cell_size(cell_size: f32) -> f32 {
    if cell_size.is_finite() && cell_size > 0.0 {
        cell_size
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_stops_at_the_grid_edge() {
        let edge = GridCell::new(i32::MAX, i32::MIN);
        assert_eq!(edge.offset(1, -1), edge);
        assert_eq!(edge.offset(-1, 1), GridCell::new(i32::MAX - 1, i32::MIN + 1));
    }

    #[test]
    fn world_to_cell_floors_negative_positions() {
        assert_eq!(world_to_cell(Vec2::new(0.2, 0.9), 1.0), GridCell::new(0, 0));
        assert_eq!(world_to_cell(Vec2::new(-0.1, -1.0), 1.0), GridCell::new(-1, -1));
        assert_eq!(world_to_cell(Vec2::new(-1.01, 2.0), 1.0), GridCell::new(-2, 2));
    }

    #[test]
    fn cell_center_is_half_a_cell_in() {
        assert_eq!(
            cell_to_world_center(GridCell::new(3, -2), 2.0),
            Vec2::new(7.0, -3.0)
        );
    }

    #[test]
    fn center_maps_back_to_the_same_cell() {
        for size in [0.5_f32, 1.0, 16.0] {
            for x in -20..20 {
                for y in -20..20 {
                    let cell = GridCell::new(x, y);
                    assert_eq!(world_to_cell(cell_to_world_center(cell, size), size), cell);
                }
            }
        }
    }

    #[test]
    fn degenerate_cell_size_falls_back_to_unit_cells() {
        assert_eq!(world_to_cell(Vec2::new(2.5, 3.5), 0.0), GridCell::new(2, 3));
        assert_eq!(world_to_cell(Vec2::new(2.5, 3.5), f32::NAN), GridCell::new(2, 3));
    }
}

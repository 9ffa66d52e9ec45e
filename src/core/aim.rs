use bevy::math::Vec2;

use crate::model::GridCell;

/// Lower edge of every sector after North, in bearing order.
pub const SECTOR_BOUNDARIES_DEG: [f32; 8] =
    [22.5, 67.5, 112.5, 157.5, 202.5, 247.5, 292.5, 337.5];

/// One of the eight neighbouring cells. Angles are bearings: 0° is +Y, 90° is +X.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AimDirection {
    #[default]
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl AimDirection {
    pub const ALL: [AimDirection; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Sectors are `[lower, upper)`; North wraps across 0°. Non-finite angles map to North.
    pub fn from_angle(angle_deg: f32) -> Self {
        let angle = normalize_degrees(angle_deg);
        let sector = SECTOR_BOUNDARIES_DEG
            .iter()
            .take_while(|boundary| angle >= **boundary)
            .count();
        Self::ALL[sector % Self::ALL.len()]
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::NorthEast => (1, 1),
            Self::East => (1, 0),
            Self::SouthEast => (1, -1),
            Self::South => (0, -1),
            Self::SouthWest => (-1, -1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, 1),
        }
    }

    pub fn target_from(self, origin: GridCell) -> GridCell {
        let (dx, dy) = self.offset();
        origin.offset(dx, dy)
    }
}

/// Wraps into `[0, 360)`. Non-finite input yields `0.0`.
pub fn normalize_degrees(angle_deg: f32) -> f32 {
    if !angle_deg.is_finite() {
        return 0.0;
    }
    let wrapped = angle_deg.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Raw aim for one tick, already projected onto the world plane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AimInput {
    pub angle_deg: f32,
    pub distance: f32,
    pub has_aim: bool,
}

impl AimInput {
    pub fn new(angle_deg: f32, distance: f32) -> Self {
        Self {
            angle_deg,
            distance,
            has_aim: true,
        }
    }

    /// Aim from the player towards `to_aim` (aim point minus player position).
    pub fn from_vector(to_aim: Vec2) -> Self {
        match aim_angle_from_vector(to_aim) {
            Some(angle_deg) => Self::new(angle_deg, to_aim.length()),
            None => Self::default(),
        }
    }
}

/// Bearing of `to_aim` in degrees, or `None` for zero-length or non-finite vectors.
pub fn aim_angle_from_vector(to_aim: Vec2) -> Option<f32> {
    if !to_aim.is_finite() || to_aim.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(normalize_degrees(to_aim.x.atan2(to_aim.y).to_degrees()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AimState {
    pub angle_deg: f32,
    pub distance: f32,
    pub has_aim: bool,
    pub direction: AimDirection,
    pub target_cell: GridCell,
    pub in_range: bool,
}

impl AimState {
    /// The cell actions may touch this tick.
    pub fn actionable_cell(&self) -> Option<GridCell> {
        self.in_range.then_some(self.target_cell)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimResolver {
    pub max_interaction_range: f32,
}

impl Default for AimResolver {
    fn default() -> Self {
        Self {
            max_interaction_range: 2.0,
        }
    }
}

impl AimResolver {
    pub fn new(max_interaction_range: f32) -> Self {
        Self {
            max_interaction_range,
        }
    }

    pub fn resolve(&self, origin: GridCell, input: AimInput) -> AimState {
        let angle_deg = normalize_degrees(input.angle_deg);
        let direction = AimDirection::from_angle(angle_deg);
        AimState {
            angle_deg,
            distance: input.distance,
            has_aim: input.has_aim,
            direction,
            target_cell: direction.target_from(origin),
            in_range: input.has_aim && input.distance <= self.max_interaction_range,
        }
    }
}

//! Thruster flame selection
//!
//! Which flames light up depends only on where the ship faces (bucketed into
//! four 90° sectors) and which movement keys are held.

use super::state::Direction;

/// Set of thruster flames, one bit each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Thrusters(pub u8);

impl Thrusters {
    pub const NONE: Self = Self(0);
    pub const BOTTOM: Self = Self(0b0001);
    pub const TOP: Self = Self(0b0010);
    pub const RIGHT: Self = Self(0b0100);
    pub const LEFT: Self = Self(0b1000);

    #[inline]
    pub fn contains(self, other: Thrusters) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Thrusters {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Thrusters {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// 90°-wide bucket of the ship's facing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Up,
    Right,
    Down,
    Left,
}

impl Facing {
    /// Bucket a facing angle (degrees clockwise from up, any sign).
    ///
    /// Sector boundaries sit at 45° off each axis; an angle exactly on a
    /// boundary belongs to the earlier sector in up, right, down, left order.
    pub fn from_angle(angle: f32) -> Self {
        let mut angle = if angle < 0.0 { angle + 360.0 } else { angle };
        angle = angle.clamp(0.0, 360.0) + 45.0;
        if angle >= 360.0 {
            angle -= 360.0;
        }

        if angle <= 90.0 {
            Facing::Up
        } else if angle <= 180.0 {
            Facing::Right
        } else if angle <= 270.0 {
            Facing::Down
        } else {
            Facing::Left
        }
    }

    fn index(self) -> usize {
        match self {
            Facing::Up => 0,
            Facing::Right => 1,
            Facing::Down => 2,
            Facing::Left => 3,
        }
    }
}

/// Movement directions in table column order
const COLUMNS: [Direction; 4] = [Direction::UP, Direction::LEFT, Direction::DOWN, Direction::RIGHT];

/// Flame lit per (facing, held direction); rows follow [`Facing::index`],
/// columns follow [`COLUMNS`].
const THRUST_RULES: [[Thrusters; 4]; 4] = [
    // Facing up
    [Thrusters::BOTTOM, Thrusters::RIGHT, Thrusters::TOP, Thrusters::LEFT],
    // Facing right
    [Thrusters::RIGHT, Thrusters::TOP, Thrusters::LEFT, Thrusters::BOTTOM],
    // Facing down
    [Thrusters::TOP, Thrusters::LEFT, Thrusters::BOTTOM, Thrusters::RIGHT],
    // Facing left
    [Thrusters::LEFT, Thrusters::BOTTOM, Thrusters::RIGHT, Thrusters::TOP],
];

/// Flames to draw for the given facing angle and held movement
pub fn thrusters_for(looking_angle: f32, movement: Direction) -> Thrusters {
    let row = &THRUST_RULES[Facing::from_angle(looking_angle).index()];

    COLUMNS
        .iter()
        .zip(row)
        .filter(|(direction, _)| movement.contains(**direction))
        .fold(Thrusters::NONE, |acc, (_, thruster)| acc | *thruster)
}

use std::fmt;

/// Vertical/depth layer a tile cell belongs to (ground floor, greenhouse deck, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerIndex(pub u8);

impl LayerIndex {
    pub const GROUND: Self = Self(0);
}

impl fmt::Display for LayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Discrete grid cell expressed in layer-relative tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Centre of this cell in world space, for a grid of `cell_size` units.
    pub fn center(self, cell_size: f32) -> WorldPos {
        WorldPos::new(
            (self.x as f32 + 0.5) * cell_size,
            (self.y as f32 + 0.5) * cell_size,
        )
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Continuous-space position used for distance checks and facing.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: WorldPos) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Cell containing this position for a grid of `cell_size` units.
    pub fn to_cell(self, cell_size: f32) -> CellCoord {
        CellCoord::new(
            (self.x / cell_size).floor() as i32,
            (self.y / cell_size).floor() as i32,
        )
    }

    /// Moves toward `target` by at most `step`, never overshooting.
    pub fn step_toward(self, target: WorldPos, step: f32) -> WorldPos {
        let distance = self.distance(target);
        if distance <= step || distance == 0.0 {
            return target;
        }
        let t = step / distance;
        WorldPos::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }
}

impl std::ops::Add for WorldPos {
    type Output = WorldPos;
    fn add(self, rhs: WorldPos) -> WorldPos {
        WorldPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Generational handle into an entity table.
///
/// A handle whose generation no longer matches the table slot refers to an
/// entity that has been removed; the table reports it as missing in O(1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityHandle {
    pub index: u32,
    pub generation: u32,
}

impl EntityHandle {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Discrete simulation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_toward_stops_on_target() {
        let from = WorldPos::new(0.0, 0.0);
        let to = WorldPos::new(3.0, 4.0);

        let halfway = from.step_toward(to, 2.5);
        assert!((halfway.distance(to) - 2.5).abs() < 1e-5);

        assert_eq!(from.step_toward(to, 10.0), to);
    }

    #[test]
    fn cell_and_world_conversions_agree() {
        let cell = CellCoord::new(2, 3);
        let center = cell.center(1.0);
        assert_eq!(center, WorldPos::new(2.5, 3.5));
        assert_eq!(center.to_cell(1.0), cell);
        assert_eq!(WorldPos::new(-0.2, 0.1).to_cell(1.0), CellCoord::new(-1, 0));
    }
}

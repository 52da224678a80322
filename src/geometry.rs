//! Directions, tile coordinates and the bounds of a rectangular field.
//!
//! Directions are ordered East, North, West, South. Every constraint family
//! walks them in this order, so the order is part of the variable numbering
//! of an emitted formula.
//!
//! The y axis points down: North is `(0, -1)` and row 0 is the top row.

use strum::VariantArray;

use crate::error::{Error, Result};

/// Upper bound on the number of tiles in a field.
///
/// Each tile owns at most six variables (itself, four adjacency indicators
/// and one isolation or endpoint indicator), and literals are `i32`.
const MAX_TILES: usize = (i32::MAX / 8) as usize;

/// A unit step between orthogonally adjacent tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, VariantArray)]
pub enum Direction {
    East,
    North,
    West,
    South,
}

/// Quarter turn clockwise, indexed by `Direction as usize`.
const CLOCKWISE: [Direction; 4] = [
    Direction::South,
    Direction::East,
    Direction::North,
    Direction::West,
];

/// Quarter turn counterclockwise, indexed by `Direction as usize`.
const COUNTERCLOCKWISE: [Direction; 4] = [
    Direction::North,
    Direction::West,
    Direction::South,
    Direction::East,
];

impl Direction {
    /// The `(dx, dy)` unit vector of this direction.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::East => (1, 0),
            Self::North => (0, -1),
            Self::West => (-1, 0),
            Self::South => (0, 1),
        }
    }

    #[inline]
    pub const fn rotate_clockwise(self) -> Self {
        CLOCKWISE[self as usize]
    }

    #[inline]
    pub const fn rotate_counterclockwise(self) -> Self {
        COUNTERCLOCKWISE[self as usize]
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        self.rotate_clockwise().rotate_clockwise()
    }
}

/// A tile position. `(0, 0)` is the top left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoordinate {
    pub x: usize,
    pub y: usize,
}

impl TileCoordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Adds a direction to this coordinate.
    ///
    /// Returns `None` when the step would leave the first quadrant; the
    /// upper bounds are the field's business.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl From<(usize, usize)> for TileCoordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// The rectangular region tiles are placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    width: usize,
    height: usize,
}

impl Field {
    /// Creates a field, rejecting empty or oversized dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let fits = width
            .checked_mul(height)
            .is_some_and(|tiles| (1..=MAX_TILES).contains(&tiles));
        if !fits {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn tile_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub const fn contains(&self, tile: TileCoordinate) -> bool {
        tile.x < self.width && tile.y < self.height
    }

    /// The tile one step from `tile` in `direction`, if it lies on the field.
    #[inline]
    pub fn neighbor(&self, tile: TileCoordinate, direction: Direction) -> Option<TileCoordinate> {
        tile.step(direction).filter(|next| self.contains(*next))
    }

    #[inline]
    pub fn has_neighbor(&self, tile: TileCoordinate, direction: Direction) -> bool {
        self.neighbor(tile, direction).is_some()
    }

    /// Existing neighbors of `tile`, in direction order.
    pub fn neighbors(
        &self,
        tile: TileCoordinate,
    ) -> impl Iterator<Item = (Direction, TileCoordinate)> + '_ {
        Direction::VARIANTS
            .iter()
            .filter_map(move |&direction| Some((direction, self.neighbor(tile, direction)?)))
    }

    /// A tile is on the border when at least one of its four neighbors is missing.
    pub fn is_border(&self, tile: TileCoordinate) -> bool {
        tile.x == 0 || tile.y == 0 || tile.x + 1 == self.width || tile.y + 1 == self.height
    }

    /// Every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = TileCoordinate> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| TileCoordinate { x, y }))
    }

    /// Border tiles in row-major order.
    pub fn border_tiles(&self) -> impl Iterator<Item = TileCoordinate> + '_ {
        self.tiles().filter(|tile| self.is_border(*tile))
    }

    /// Row-major position of a tile, starting at 0.
    #[inline]
    pub const fn index(&self, tile: TileCoordinate) -> usize {
        tile.y * self.width + tile.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_rotations_are_identity() {
        for &direction in Direction::VARIANTS {
            let mut clockwise = direction;
            let mut counterclockwise = direction;
            for _ in 0..4 {
                clockwise = clockwise.rotate_clockwise();
                counterclockwise = counterclockwise.rotate_counterclockwise();
            }
            assert_eq!(clockwise, direction);
            assert_eq!(counterclockwise, direction);
        }
    }

    #[test]
    fn test_rotations_match_vector_formulas() {
        for &direction in Direction::VARIANTS {
            let (x, y) = direction.offset();
            assert_eq!(direction.rotate_clockwise().offset(), (-y, x));
            assert_eq!(direction.rotate_counterclockwise().offset(), (y, -x));
            assert_eq!(direction.rotate_clockwise().rotate_counterclockwise(), direction);
            assert_eq!(direction.opposite().offset(), (-x, -y));
        }
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        assert!(matches!(
            Field::new(0, 3),
            Err(Error::InvalidDimensions { width: 0, height: 3 })
        ));
        assert!(matches!(Field::new(4, 0), Err(Error::InvalidDimensions { .. })));
        assert!(matches!(
            Field::new(usize::MAX, 2),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(Field::new(1, 1).is_ok());
    }

    #[test]
    fn test_neighbors_respect_bounds() {
        let field = Field::new(3, 2).unwrap();
        let corner = TileCoordinate::new(0, 0);
        let found: Vec<_> = field.neighbors(corner).collect();
        assert_eq!(
            found,
            vec![
                (Direction::East, TileCoordinate::new(1, 0)),
                (Direction::South, TileCoordinate::new(0, 1)),
            ]
        );
        assert!(!field.has_neighbor(TileCoordinate::new(2, 1), Direction::East));
        assert!(!field.has_neighbor(TileCoordinate::new(2, 1), Direction::South));
        assert!(field.has_neighbor(TileCoordinate::new(2, 1), Direction::North));
    }

    #[test]
    fn test_border_tiles_of_a_four_by_four_field() {
        let field = Field::new(4, 4).unwrap();
        assert_eq!(field.border_tiles().count(), 12);
        assert!(!field.is_border(TileCoordinate::new(1, 2)));
        assert!(field.is_border(TileCoordinate::new(3, 2)));
    }

    #[test]
    fn test_tiles_are_row_major() {
        let field = Field::new(3, 2).unwrap();
        for (position, tile) in field.tiles().enumerate() {
            assert_eq!(field.index(tile), position);
        }
        assert_eq!(field.tiles().last(), Some(TileCoordinate::new(2, 1)));
    }
}

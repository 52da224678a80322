//! Variable numbering and literals.
//!
//! Tile variables are dense and row-major: tile `(x, y)` is variable
//! `width * y + x + 1`. Auxiliary variables are handed out afterwards by a
//! monotonic cursor. Decoders rely on this numbering, so it must not change.

use std::fmt;
use std::ops::Neg;

use crate::error::{Error, Result};
use crate::geometry::{Field, TileCoordinate};

/// A positive solver variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(u32);

impl Variable {
    #[inline]
    pub(crate) const fn from_index(index: u32) -> Self {
        debug_assert!(index > 0);
        Self(index)
    }

    /// The 1-based DIMACS index of this variable.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn positive(self) -> Literal {
        Literal(self.0 as i32)
    }

    #[inline]
    pub const fn negative(self) -> Literal {
        Literal(-(self.0 as i32))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed variable reference. Never 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(i32);

impl Literal {
    /// Builds a literal from its DIMACS form, rejecting 0.
    pub fn new(raw: i32) -> Result<Self> {
        if raw == 0 {
            return Err(Error::InvalidClause("literal 0 is not a variable".to_string()));
        }
        Ok(Self(raw))
    }

    #[inline]
    pub const fn variable(self) -> Variable {
        Variable(self.0.unsigned_abs())
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn to_dimacs(self) -> i32 {
        self.0
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allocator for tile and auxiliary variables of one field.
#[derive(Clone, Debug)]
pub struct VariableSpace {
    field: Field,
    next: u32,
}

impl VariableSpace {
    pub fn new(field: Field) -> Self {
        // `Field::new` keeps the tile count far below `i32::MAX`
        let next = field.tile_count() as u32 + 1;
        Self { field, next }
    }

    /// The variable that is true when `tile` is river.
    #[inline]
    pub fn tile(&self, tile: TileCoordinate) -> Variable {
        debug_assert!(self.field.contains(tile), "{tile:?} is off the field");
        Variable::from_index(self.field.index(tile) as u32 + 1)
    }

    #[inline]
    pub fn water(&self, tile: TileCoordinate) -> Literal {
        self.tile(tile).positive()
    }

    #[inline]
    pub fn thicket(&self, tile: TileCoordinate) -> Literal {
        self.tile(tile).negative()
    }

    pub fn last_tile_variable(&self) -> Variable {
        Variable(self.field.tile_count() as u32)
    }

    /// Whether `variable` belongs to a tile rather than an auxiliary.
    pub fn is_tile_variable(&self, variable: Variable) -> bool {
        variable <= self.last_tile_variable()
    }

    /// Hands out the next unused auxiliary variable.
    pub fn allocate(&mut self) -> Variable {
        let variable = Variable(self.next);
        self.next += 1;
        variable
    }

    /// Number of variables allocated so far, tiles included.
    pub fn count(&self) -> u32 {
        self.next - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_numbering_is_row_major() {
        let field = Field::new(4, 3).unwrap();
        let space = VariableSpace::new(field);
        for tile in field.tiles() {
            let expected = (tile.y * 4 + tile.x + 1) as u32;
            assert_eq!(space.tile(tile).index(), expected, "tile {tile:?}");
        }
        assert_eq!(space.last_tile_variable().index(), 12);
        assert_eq!(space.count(), 12);
    }

    #[test]
    fn test_auxiliaries_follow_tiles() {
        let field = Field::new(2, 2).unwrap();
        let mut space = VariableSpace::new(field);
        let first = space.allocate();
        let second = space.allocate();
        assert_eq!(first.index(), 5);
        assert_eq!(second.index(), 6);
        assert_eq!(space.count(), 6);
        assert!(!space.is_tile_variable(first));
        assert!(space.is_tile_variable(space.tile(TileCoordinate::new(1, 1))));
    }

    #[test]
    fn test_water_and_thicket_are_opposite_literals() {
        let field = Field::new(3, 3).unwrap();
        let space = VariableSpace::new(field);
        let tile = TileCoordinate::new(2, 1);
        assert_eq!(space.water(tile).to_dimacs(), 6);
        assert_eq!(space.thicket(tile).to_dimacs(), -6);
        assert_eq!(-space.water(tile), space.thicket(tile));
        assert_eq!(space.thicket(tile).variable(), space.tile(tile));
    }

    #[test]
    fn test_zero_literal_is_rejected() {
        assert!(matches!(Literal::new(0), Err(Error::InvalidClause(_))));
        let literal = Literal::new(-7).unwrap();
        assert!(!literal.is_positive());
        assert_eq!(literal.variable().index(), 7);
    }
}

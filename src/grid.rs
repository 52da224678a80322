//! Decoded tile layouts: rendering, scoring and rule checks.
//!
//! A `RiverGrid` is what a solver model means for the tiles of a field.
//! Tiles are stored row-major, matching the tile variable numbering.

use std::fmt;

use crate::constraints::{ISOLATED_THICKET_WEIGHT, RIVER_ADJACENCY_WEIGHT};
use crate::error::{Error, Result};
use crate::geometry::{Field, TileCoordinate};
use crate::solution::Assignment;
use crate::variables::VariableSpace;

/// Only layouts of this width can be shared through the layout viewer.
pub const SHARE_LINK_WIDTH: usize = 5;

const SHARE_LINK_PREFIX: &str = "https://loopherolayout.xyz/?c=";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Thicket,
    River,
}

impl Tile {
    /// Letter used in the ASCII rendering.
    pub const fn letter(self) -> char {
        match self {
            Self::Thicket => 'T',
            Self::River => 'W',
        }
    }

    /// Digit used in share links.
    const fn share_digit(self) -> char {
        match self {
            Self::Thicket => '2',
            Self::River => '1',
        }
    }
}

impl TryFrom<char> for Tile {
    type Error = Error;

    fn try_from(letter: char) -> Result<Self> {
        match letter {
            'T' => Ok(Self::Thicket),
            'W' => Ok(Self::River),
            other => Err(Error::InvalidTile(other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RiverGrid {
    field: Field,
    tiles: Vec<Tile>,
}

impl RiverGrid {
    /// Wraps a row-major tile list.
    ///
    /// # Panics
    /// If `tiles` does not hold exactly one entry per tile of `field`.
    pub fn from_tiles(field: Field, tiles: Vec<Tile>) -> Self {
        assert_eq!(tiles.len(), field.tile_count(), "one tile per field position");
        Self { field, tiles }
    }

    /// Reads every tile of `field` from a solver model.
    pub fn from_assignment(field: Field, assignment: &Assignment) -> Result<Self> {
        let variables = VariableSpace::new(field);
        let tiles = field
            .tiles()
            .map(|tile| match assignment.get(&variables.tile(tile).index()) {
                Some(true) => Ok(Tile::River),
                Some(false) => Ok(Tile::Thicket),
                None => Err(Error::MissingAssignment {
                    x: tile.x,
                    y: tile.y,
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { field, tiles })
    }

    /// Parses rows of `W` and `T` letters, one row per line.
    ///
    /// Whitespace inside a row and blank lines are ignored, so the output of
    /// `Display` parses back.
    pub fn parse(text: &str) -> Result<Self> {
        let rows = text
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|letter| !letter.is_whitespace())
                    .map(Tile::try_from)
                    .collect::<Result<Vec<_>>>()
            })
            .filter(|row| !matches!(row, Ok(tiles) if tiles.is_empty()))
            .collect::<Result<Vec<_>>>()?;

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(Error::InvalidDimensions { width, height });
        }
        let field = Field::new(width, height)?;
        Ok(Self {
            field,
            tiles: rows.into_iter().flatten().collect(),
        })
    }

    pub fn field(&self) -> Field {
        self.field
    }

    #[inline]
    pub fn tile(&self, tile: TileCoordinate) -> Tile {
        self.tiles[self.field.index(tile)]
    }

    #[inline]
    pub fn is_river(&self, tile: TileCoordinate) -> bool {
        self.tile(tile) == Tile::River
    }

    /// Number of river tiles among the neighbors of `tile`.
    pub fn water_degree(&self, tile: TileCoordinate) -> usize {
        self.field
            .neighbors(tile)
            .filter(|&(_, neighbor)| self.is_river(neighbor))
            .count()
    }

    /// A border river tile with at most one river neighbor.
    pub fn is_endpoint(&self, tile: TileCoordinate) -> bool {
        self.field.is_border(tile) && self.is_river(tile) && self.water_degree(tile) <= 1
    }

    /// River endpoints in row-major order.
    pub fn endpoints(&self) -> Vec<TileCoordinate> {
        self.field
            .tiles()
            .filter(|&tile| self.is_endpoint(tile))
            .collect()
    }

    /// Checks the local degree rules and the two-endpoint rule.
    ///
    /// A river tile never has more than two river neighbors. With all four
    /// neighbors present it needs exactly two; with three present it needs
    /// at least one. Exactly two border tiles must end the river.
    pub fn follows_river_rules(&self) -> bool {
        let degrees_ok = self.field.tiles().filter(|&tile| self.is_river(tile)).all(|tile| {
            let degree = self.water_degree(tile);
            match self.field.neighbors(tile).count() {
                4 => degree == 2,
                3 => (1..=2).contains(&degree),
                _ => degree <= 2,
            }
        });
        degrees_ok && self.endpoints().len() == 2
    }

    /// Game score: each thicket earns 4 per river neighbor, or 2 with none.
    pub fn score(&self) -> u64 {
        self.field
            .tiles()
            .filter(|&tile| !self.is_river(tile))
            .map(|tile| match self.water_degree(tile) as u64 {
                0 => ISOLATED_THICKET_WEIGHT,
                degree => RIVER_ADJACENCY_WEIGHT * degree,
            })
            .sum()
    }

    /// Number of orthogonally connected groups of river tiles.
    pub fn river_components(&self) -> usize {
        let mut seen = vec![false; self.tiles.len()];
        let mut components = 0;
        let mut stack = Vec::new();

        for start in self.field.tiles() {
            if !self.is_river(start) || seen[self.field.index(start)] {
                continue;
            }
            components += 1;
            seen[self.field.index(start)] = true;
            stack.push(start);

            while let Some(tile) = stack.pop() {
                for (_, neighbor) in self.field.neighbors(tile) {
                    let position = self.field.index(neighbor);
                    if self.is_river(neighbor) && !seen[position] {
                        seen[position] = true;
                        stack.push(neighbor);
                    }
                }
            }
        }

        components
    }

    /// Row-major share code: `1` for river, `2` for thicket.
    pub fn share_code(&self) -> String {
        self.tiles.iter().map(|tile| tile.share_digit()).collect()
    }

    /// Link to the layout viewer, which only understands five-wide fields.
    pub fn share_link(&self) -> Option<String> {
        (self.field.width() == SHARE_LINK_WIDTH)
            .then(|| format!("{SHARE_LINK_PREFIX}{}", self.share_code()))
    }
}

/// One row per line, each tile as a space and its letter, rows separated by a blank line.
impl fmt::Display for RiverGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.field.width()) {
            for tile in row {
                write!(f, " {}", tile.letter())?;
            }
            writeln!(f)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_river_from_assignment() {
        let field = Field::new(3, 3).unwrap();
        let assignment: Assignment = (1..=9)
            .map(|variable| (variable, (4..=6).contains(&variable)))
            .collect();
        let grid = RiverGrid::from_assignment(field, &assignment).unwrap();

        assert_eq!(grid.to_string(), " T T T\n\n W W W\n\n T T T\n\n");
        assert_eq!(grid.share_link(), None);
        assert_eq!(
            grid.endpoints(),
            vec![TileCoordinate::new(0, 1), TileCoordinate::new(2, 1)]
        );
        assert!(grid.follows_river_rules());
    }

    #[test]
    fn test_missing_tile_reports_coordinates() {
        let field = Field::new(2, 2).unwrap();
        let assignment: Assignment = [(1, true), (2, false), (3, true)].into_iter().collect();
        let error = RiverGrid::from_assignment(field, &assignment).unwrap_err();
        assert!(matches!(error, Error::MissingAssignment { x: 1, y: 1 }));
        assert_eq!(error.to_string(), "unknown assignment for tile (1,1)");
    }

    #[test]
    fn test_share_link_for_five_wide_fields() {
        let grid = RiverGrid::parse(
            "TTWTT\n\
             TTWTT",
        )
        .unwrap();
        let link = grid.share_link().unwrap();
        let code = link.strip_prefix(SHARE_LINK_PREFIX).unwrap();
        assert_eq!(code, "2212222122");
        assert_eq!(code.len(), grid.field().tile_count());
        assert!(code.chars().all(|digit| digit == '1' || digit == '2'));
    }

    #[test]
    fn test_display_parses_back() {
        let grid = RiverGrid::parse("WTT\nWWT\nTWT\nTWT").unwrap();
        assert_eq!(RiverGrid::parse(&grid.to_string()).unwrap(), grid);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(RiverGrid::parse("WTX"), Err(Error::InvalidTile('X'))));
        assert!(matches!(
            RiverGrid::parse("WTT\nWT"),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(RiverGrid::parse(""), Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_score_follows_adjacency_schedule() {
        // the center thicket touches four rivers, each corner touches two
        let grid = RiverGrid::parse("TWT\nWTW\nTWT").unwrap();
        assert_eq!(grid.score(), 16 + 4 * 8);

        let grid = RiverGrid::parse("TTT\nTTT").unwrap();
        assert_eq!(grid.score(), 6 * 2);
    }

    #[test]
    fn test_branching_river_breaks_rules() {
        let grid = RiverGrid::parse("TWT\nWWW\nTTT").unwrap();
        assert!(!grid.follows_river_rules());
        assert_eq!(grid.river_components(), 1);
    }

    #[test]
    fn test_river_components_counts_separate_rivers() {
        let grid = RiverGrid::parse("WTW\nWTW\nWTW").unwrap();
        assert_eq!(grid.river_components(), 2);
        assert!(!grid.follows_river_rules());
    }
}

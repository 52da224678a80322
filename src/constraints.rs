//! Constraint families of the river and thicket encoding.
//!
//! One row-major pass applies four local families to every tile:
//!
//! 1. no branching: a river tile has at most two river neighbors;
//! 2. no inner sources or drains: a river tile away from the border has at
//!    least two river neighbors;
//! 3. every (thicket, river neighbor) pair earns 4;
//! 4. a thicket with no river neighbor earns 2.
//!
//! A final global pass pins the river to exactly two endpoints, both on the
//! border. Nothing here encodes reachability, so a closed loop away from
//! the border can sit next to a valid border-to-border river.

use itertools::Itertools;
use strum::VariantArray;

use crate::error::Result;
use crate::formula::{Auxiliary, Formula};
use crate::geometry::{Direction, TileCoordinate};
use crate::variables::Variable;

/// Reward for each river tile next to a thicket.
pub const RIVER_ADJACENCY_WEIGHT: u64 = 4;

/// Reward for a thicket without any river neighbor.
pub const ISOLATED_THICKET_WEIGHT: u64 = 2;

/// Fills `formula` with every constraint family, in emission order.
pub(crate) fn generate(formula: &mut Formula) -> Result<()> {
    let field = formula.field();
    for tile in field.tiles() {
        add_no_branch(formula, tile)?;
        add_no_inner_source_or_drain(formula, tile)?;
        add_thicket_next_to_river_goals(formula, tile)?;
        add_isolated_thicket_goal(formula, tile)?;
    }
    add_single_river(formula)
}

/// Forbids three river neighbors among forward, left and right of each direction.
///
/// Across all four directions this rules out a river tile with three or
/// four river neighbors.
fn add_no_branch(formula: &mut Formula, tile: TileCoordinate) -> Result<()> {
    let field = formula.field();
    for &direction in Direction::VARIANTS {
        let Some(forward) = field.neighbor(tile, direction) else {
            continue;
        };
        let left = field.neighbor(tile, direction.rotate_counterclockwise());
        let right = field.neighbor(tile, direction.rotate_clockwise());
        let (Some(left), Some(right)) = (left, right) else {
            continue;
        };

        // water(tile) => not all of forward, left, right are water
        let clause = vec![
            formula.thicket(tile),
            formula.thicket(forward),
            formula.thicket(left),
            formula.thicket(right),
        ];
        formula.add_hard(clause)?;
    }
    Ok(())
}

/// Requires a river neighbor among left, behind and right of each direction.
///
/// Only fires when all three exist, so border tiles may end the river.
fn add_no_inner_source_or_drain(formula: &mut Formula, tile: TileCoordinate) -> Result<()> {
    let field = formula.field();
    for &direction in Direction::VARIANTS {
        let left = field.neighbor(tile, direction.rotate_counterclockwise());
        let behind = field.neighbor(tile, direction.opposite());
        let right = field.neighbor(tile, direction.rotate_clockwise());
        let (Some(left), Some(behind), Some(right)) = (left, behind, right) else {
            continue;
        };

        let clause = vec![
            formula.thicket(tile),
            formula.water(left),
            formula.water(behind),
            formula.water(right),
        ];
        formula.add_hard(clause)?;
    }
    Ok(())
}

fn add_thicket_next_to_river_goals(formula: &mut Formula, tile: TileCoordinate) -> Result<()> {
    let field = formula.field();
    for (direction, neighbor) in field.neighbors(tile) {
        let goal = formula.allocate(Auxiliary::ThicketNextToRiver { tile, direction });

        let clauses = [
            vec![goal.negative(), formula.thicket(tile)],
            vec![goal.negative(), formula.water(neighbor)],
        ];
        for clause in clauses {
            formula.add_hard(clause)?;
        }
        formula.add_soft(RIVER_ADJACENCY_WEIGHT, vec![goal.positive()])?;
    }
    Ok(())
}

fn add_isolated_thicket_goal(formula: &mut Formula, tile: TileCoordinate) -> Result<()> {
    let field = formula.field();
    let goal = formula.allocate(Auxiliary::IsolatedThicket { tile });

    let own = vec![goal.negative(), formula.thicket(tile)];
    formula.add_hard(own)?;
    for (_, neighbor) in field.neighbors(tile) {
        let clause = vec![goal.negative(), formula.thicket(neighbor)];
        formula.add_hard(clause)?;
    }
    formula.add_soft(ISOLATED_THICKET_WEIGHT, vec![goal.positive()])
}

/// Gives every border tile an endpoint indicator and requires exactly two of them.
fn add_single_river(formula: &mut Formula) -> Result<()> {
    let field = formula.field();
    let endpoints = field
        .border_tiles()
        .map(|tile| add_endpoint_indicator(formula, tile))
        .collect::<Result<Vec<_>>>()?;
    add_exactly_two(formula, &endpoints)
}

/// Allocates the indicator of "`tile` is river with at most one river neighbor".
fn add_endpoint_indicator(formula: &mut Formula, tile: TileCoordinate) -> Result<Variable> {
    let field = formula.field();
    let endpoint = formula.allocate(Auxiliary::Endpoint { tile });

    // endpoint => tile is water
    let water = vec![formula.water(tile), endpoint.negative()];
    formula.add_hard(water)?;

    // endpoint => no two neighbors are water
    let neighbors = field.neighbors(tile).collect_vec();
    for ((_, first), (_, second)) in neighbors.iter().tuple_combinations() {
        let clause = vec![
            formula.thicket(*first),
            formula.thicket(*second),
            endpoint.negative(),
        ];
        formula.add_hard(clause)?;
    }

    // water(tile) and no water besides the neighbor in `direction` => endpoint
    for &(direction, _) in &neighbors {
        let others = [
            direction.rotate_counterclockwise(),
            direction.opposite(),
            direction.rotate_clockwise(),
        ];
        let mut clause = others
            .iter()
            .filter_map(|&other| field.neighbor(tile, other))
            .map(|other| formula.water(other))
            .collect_vec();
        clause.push(formula.thicket(tile));
        clause.push(endpoint.positive());
        formula.add_hard(clause)?;
    }

    Ok(endpoint)
}

/// Exactly two of `indicators` are true.
fn add_exactly_two(formula: &mut Formula, indicators: &[Variable]) -> Result<()> {
    if indicators.len() < 2 {
        // "at least two" cannot hold; state the contradiction without an empty clause
        for indicator in indicators {
            formula.add_hard(vec![indicator.positive()])?;
            formula.add_hard(vec![indicator.negative()])?;
        }
        return Ok(());
    }

    // at most two: no three are true together
    for triple in indicators.iter().combinations(3) {
        formula.add_hard(triple.iter().map(|indicator| indicator.negative()).collect())?;
    }

    // at least two: dropping any single indicator leaves one that is true
    for excluded in 0..indicators.len() {
        let clause = indicators
            .iter()
            .enumerate()
            .filter(|&(position, _)| position != excluded)
            .map(|(_, indicator)| indicator.positive())
            .collect();
        formula.add_hard(clause)?;
    }
    Ok(())
}

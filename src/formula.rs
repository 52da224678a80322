//! The formula build context.
//!
//! A `Formula` exclusively owns the variable space and clause store of one
//! encoding pass. It is filled by [`Formula::encode`], written out once by
//! the `wcnf` module and then dropped.

use crate::clauses::{Clause, ClauseStore, Weight};
use crate::constraints;
use crate::error::{Error, Result};
use crate::geometry::{Direction, Field, TileCoordinate};
use crate::grid::RiverGrid;
use crate::solution::Assignment;
use crate::variables::{Literal, Variable, VariableSpace};

/// Added to the soft weight total to obtain the hard clause weight.
const TOP_MARGIN: u64 = 10;

/// What an auxiliary variable stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Auxiliary {
    /// `tile` is thicket and its neighbor in `direction` is river (worth 4).
    ThicketNextToRiver {
        tile: TileCoordinate,
        direction: Direction,
    },
    /// `tile` and all of its neighbors are thicket (worth 2).
    IsolatedThicket { tile: TileCoordinate },
    /// The border tile `tile` is one of the two ends of the river.
    Endpoint { tile: TileCoordinate },
}

/// Outcome of checking a full assignment against a formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// Number of hard clauses the assignment violates.
    pub violated_hard: usize,
    /// Total weight of violated soft clauses.
    pub cost: u64,
}

impl Evaluation {
    pub fn is_feasible(&self) -> bool {
        self.violated_hard == 0
    }
}

#[derive(Clone, Debug)]
pub struct Formula {
    field: Field,
    variables: VariableSpace,
    clauses: ClauseStore,
    /// Meaning of each auxiliary, in allocation order.
    auxiliaries: Vec<Auxiliary>,
}

impl Formula {
    /// An empty formula: tile variables reserved, no clauses.
    pub fn new(field: Field) -> Self {
        Self {
            field,
            variables: VariableSpace::new(field),
            clauses: ClauseStore::new(),
            auxiliaries: Vec::new(),
        }
    }

    /// Builds the complete MaxSAT encoding of `field`.
    pub fn encode(field: Field) -> Result<Self> {
        let mut formula = Self::new(field);
        constraints::generate(&mut formula)?;
        Ok(formula)
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn variables(&self) -> &VariableSpace {
        &self.variables
    }

    #[inline]
    pub fn water(&self, tile: TileCoordinate) -> Literal {
        self.variables.water(tile)
    }

    #[inline]
    pub fn thicket(&self, tile: TileCoordinate) -> Literal {
        self.variables.thicket(tile)
    }

    pub fn variable_count(&self) -> u32 {
        self.variables.count()
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    pub fn soft_weight(&self) -> u64 {
        self.clauses.soft_weight()
    }

    /// Weight written for hard clauses; exceeds any sum of soft violations.
    pub fn top(&self) -> u64 {
        self.soft_weight().saturating_add(TOP_MARGIN)
    }

    /// Allocates a fresh auxiliary variable standing for `meaning`.
    pub fn allocate(&mut self, meaning: Auxiliary) -> Variable {
        self.auxiliaries.push(meaning);
        self.variables.allocate()
    }

    /// The meaning of `variable`, or `None` for tile and unallocated variables.
    pub fn auxiliary(&self, variable: Variable) -> Option<Auxiliary> {
        let first = self.variables.last_tile_variable().index() + 1;
        let offset = variable.index().checked_sub(first)?;
        self.auxiliaries.get(offset as usize).copied()
    }

    /// Auxiliaries with their variables, in allocation order.
    pub fn auxiliaries(&self) -> impl Iterator<Item = (Variable, Auxiliary)> + '_ {
        let first = self.variables.last_tile_variable().index() + 1;
        self.auxiliaries
            .iter()
            .enumerate()
            .map(move |(offset, &meaning)| (Variable::from_index(first + offset as u32), meaning))
    }

    pub fn add_hard(&mut self, literals: Vec<Literal>) -> Result<()> {
        self.check_allocated(&literals)?;
        self.clauses.add_hard(literals)
    }

    pub fn add_soft(&mut self, weight: u64, literals: Vec<Literal>) -> Result<()> {
        self.check_allocated(&literals)?;
        self.clauses.add_soft(weight, literals)
    }

    fn check_allocated(&self, literals: &[Literal]) -> Result<()> {
        let count = self.variables.count();
        match literals.iter().find(|literal| literal.variable().index() > count) {
            Some(literal) => Err(Error::InvalidClause(format!(
                "literal {literal} refers to an unallocated variable (only {count} exist)"
            ))),
            None => Ok(()),
        }
    }

    /// Extends a tile layout to every variable of the formula.
    ///
    /// Each auxiliary takes the value its definition implies, which is the
    /// best choice for scoring indicators and the only feasible one for
    /// endpoint indicators.
    pub fn complete_assignment(&self, grid: &RiverGrid) -> Assignment {
        debug_assert_eq!(grid.field(), self.field);

        let mut assignment = Assignment::default();
        for tile in self.field.tiles() {
            assignment.insert(self.variables.tile(tile).index(), grid.is_river(tile));
        }
        for (variable, meaning) in self.auxiliaries() {
            let value = match meaning {
                Auxiliary::ThicketNextToRiver { tile, direction } => {
                    !grid.is_river(tile)
                        && self
                            .field
                            .neighbor(tile, direction)
                            .is_some_and(|neighbor| grid.is_river(neighbor))
                }
                Auxiliary::IsolatedThicket { tile } => {
                    !grid.is_river(tile) && grid.water_degree(tile) == 0
                }
                Auxiliary::Endpoint { tile } => grid.is_endpoint(tile),
            };
            assignment.insert(variable.index(), value);
        }
        assignment
    }

    /// Counts violated hard clauses and sums violated soft weights.
    pub fn evaluate(&self, assignment: &Assignment) -> Evaluation {
        let mut evaluation = Evaluation {
            violated_hard: 0,
            cost: 0,
        };
        for clause in self.clauses.iter() {
            if clause.is_satisfied_by(assignment) {
                continue;
            }
            match clause.weight() {
                Weight::Hard => evaluation.violated_hard += 1,
                Weight::Soft(weight) => evaluation.cost += weight.get(),
            }
        }
        evaluation
    }
}

//! Append-only store of hard and soft clauses.

use std::num::NonZeroU64;

use crate::error::{Error, Result};
use crate::solution::Assignment;
use crate::variables::Literal;

/// How much violating a clause costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weight {
    /// Must hold in every solution.
    Hard,
    /// May be violated at the given cost.
    Soft(NonZeroU64),
}

/// A disjunction of literals with a weight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    weight: Weight,
    literals: Vec<Literal>,
}

impl Clause {
    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn is_hard(&self) -> bool {
        self.weight == Weight::Hard
    }

    /// Whether some literal agrees with `assignment`. Unassigned variables read as false.
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.literals.iter().any(|literal| {
            let value = assignment
                .get(&literal.variable().index())
                .copied()
                .unwrap_or(false);
            value == literal.is_positive()
        })
    }
}

/// Clauses in generation order, plus the running total of soft weights.
#[derive(Clone, Debug, Default)]
pub struct ClauseStore {
    clauses: Vec<Clause>,
    soft_weight: u64,
}

impl ClauseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_hard(&mut self, literals: Vec<Literal>) -> Result<()> {
        check_literals(&literals)?;
        self.clauses.push(Clause {
            weight: Weight::Hard,
            literals,
        });
        Ok(())
    }

    pub fn add_soft(&mut self, weight: u64, literals: Vec<Literal>) -> Result<()> {
        check_literals(&literals)?;
        let weight = NonZeroU64::new(weight)
            .ok_or_else(|| Error::InvalidClause("soft clause with weight 0".to_string()))?;
        self.soft_weight = self
            .soft_weight
            .checked_add(weight.get())
            .ok_or_else(|| Error::InvalidClause("total soft weight overflows".to_string()))?;
        self.clauses.push(Clause {
            weight: Weight::Soft(weight),
            literals,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Sum of all soft clause weights.
    pub fn soft_weight(&self) -> u64 {
        self.soft_weight
    }
}

/// Literal 0 is already ruled out by `Literal::new`; only emptiness is left to check.
fn check_literals(literals: &[Literal]) -> Result<()> {
    if literals.is_empty() {
        return Err(Error::InvalidClause("clause without literals".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(raw: &[i32]) -> Vec<Literal> {
        raw.iter().map(|&value| Literal::new(value).unwrap()).collect()
    }

    #[test]
    fn test_clauses_keep_insertion_order() {
        let mut store = ClauseStore::new();
        store.add_hard(lits(&[1, -2])).unwrap();
        store.add_soft(4, lits(&[3])).unwrap();
        store.add_hard(lits(&[-1])).unwrap();

        let weights: Vec<_> = store.iter().map(Clause::weight).collect();
        assert_eq!(
            weights,
            vec![
                Weight::Hard,
                Weight::Soft(NonZeroU64::new(4).unwrap()),
                Weight::Hard
            ]
        );
        assert_eq!(store.len(), 3);
        assert_eq!(store.soft_weight(), 4);
    }

    #[test]
    fn test_invalid_clauses_are_rejected() {
        let mut store = ClauseStore::new();
        assert!(matches!(store.add_hard(vec![]), Err(Error::InvalidClause(_))));
        assert!(matches!(store.add_soft(2, vec![]), Err(Error::InvalidClause(_))));
        assert!(matches!(store.add_soft(0, lits(&[1])), Err(Error::InvalidClause(_))));
        assert!(store.is_empty());
        assert_eq!(store.soft_weight(), 0);
    }

    #[test]
    fn test_satisfaction_treats_missing_as_false() {
        let mut store = ClauseStore::new();
        store.add_hard(lits(&[1, -2])).unwrap();
        let clause = store.iter().next().unwrap();

        let mut assignment = Assignment::default();
        assert!(clause.is_satisfied_by(&assignment));
        assignment.insert(2, true);
        assert!(!clause.is_satisfied_by(&assignment));
        assignment.insert(1, true);
        assert!(clause.is_satisfied_by(&assignment));
    }
}

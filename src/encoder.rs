use std::iter;

use itertools::Itertools;
use log::debug;
use strum::VariantArray;
use varisat::{CnfFormula, ExtendFormula, Lit, Var};

use crate::config::EdgeColoring;
use crate::location::Location;
use crate::logic::{exactly, exactly_one};
use crate::puzzle::Puzzle;
use crate::shape::{SquareStep, Step};
use crate::variable::VariableIndex;

/// Translates a [`Puzzle`] into a CNF formula.
///
/// # Logical setup
/// Every cell has exactly one color.
/// A terminus has exactly one incident selected edge and is pre-colored with its own color; any other cell has exactly two incident selected edges.
/// A selected edge joins two cells of the same color.
///
/// Nothing here forbids the selected edges from closing a loop; a satisfying assignment may contain cycles which touch no terminus.
/// [`Search`](crate::solver::Search) filters those out.
pub struct Encoder<'a> {
    puzzle: &'a Puzzle,
    index: VariableIndex,
    edge_coloring: EdgeColoring,
}

impl<'a> Encoder<'a> {
    /// Prepare to encode `puzzle`, writing edge-color propagation as `edge_coloring` asks.
    pub fn new(puzzle: &'a Puzzle, edge_coloring: EdgeColoring) -> Self {
        Self {
            puzzle,
            index: VariableIndex::new(puzzle.dims(), puzzle.color_count()),
            edge_coloring,
        }
    }

    /// The variable numbering used by [`Self::encode`].
    pub fn index(&self) -> &VariableIndex {
        &self.index
    }

    /// Build the formula. Encoding is deterministic: the same puzzle always yields the same clauses in the same order.
    pub fn encode(&self) -> CnfFormula {
        let mut formula = CnfFormula::new();
        formula.set_var_count(self.index.var_count());

        for location in self.puzzle.locations() {
            for clause in self.cell_clauses(location) {
                formula.add_clause(&clause);
            }
        }

        // both termini of a color start out with that color
        for (color, location) in self.index.colors()
            .flat_map(|color| iter::repeat(color).take(2))
            .zip(self.puzzle.termini()) {
            formula.add_clause(&[self.index.color(*location, color).positive()]);
        }

        debug!(
            "encoded {}x{} board with {} colors: {} variables, {} clauses",
            self.puzzle.width(),
            self.puzzle.height(),
            self.puzzle.color_count(),
            formula.var_count(),
            formula.len(),
        );

        formula
    }

    fn cell_clauses(&self, location: Location) -> Vec<Vec<Lit>> {
        // every edge touching this cell, in the order right, down, left, up
        let lines = SquareStep::VARIANTS.iter()
            .filter_map(|direction| self.index.edge(location, *direction))
            .map(Var::positive)
            .collect_vec();

        // a terminus has one line going in or out; anything else has two
        let degree = if self.puzzle.is_terminus(location) { 1 } else { 2 };
        let mut clauses = exactly(&lines, degree);

        // exactly one color here
        clauses.extend(exactly_one(&self.index.colors()
            .map(|color| self.index.color(location, color).positive())
            .collect_vec()));

        // only forward edges, so each edge is handled once
        for direction in SquareStep::FORWARD_VARIANTS {
            if let (Some(edge), Some(neighbor)) = (
                self.index.edge(location, *direction),
                direction.step_within(location, self.puzzle.dims()),
            ) {
                clauses.extend(self.same_color(edge, location, neighbor));
            }
        }

        clauses
    }

    /// Clauses stating that `edge` being selected forces `a` and `b` to share a color.
    fn same_color(&self, edge: Var, a: Location, b: Location) -> Vec<Vec<Lit>> {
        match self.edge_coloring {
            EdgeColoring::CrossProduct => {
                // !E + (A1 B1) + (A2 B2) + ... distributed into CNF; one clause per way of picking A_i or B_i for every color i
                self.index.colors()
                    .map(|color| [self.index.color(a, color).positive(), self.index.color(b, color).positive()])
                    .multi_cartesian_product()
                    .map(|choice| iter::once(edge.negative()).chain(choice).collect_vec())
                    .collect_vec()
            }
            EdgeColoring::Implication => {
                // E => (A_i <=> B_i) for every color i
                self.index.colors()
                    .flat_map(|color| {
                        let (here, there) = (self.index.color(a, color), self.index.color(b, color));
                        [
                            vec![edge.negative(), here.negative(), there.positive()],
                            vec![edge.negative(), here.positive(), there.negative()],
                        ]
                    })
                    .collect_vec()
            }
        }
    }
}

use std::num::NonZero;

use varisat::Var;

use crate::cell::ColorId;
use crate::location::{Coord, Dimension, Location};
use crate::shape::SquareStep;

/// Every proposition a puzzle needs, keyed structurally.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GridVariable {
    /// The edge between `(x, y)` and `(x + 1, y)` is part of a path.
    HorizontalEdge { x: Coord, y: Coord },
    /// The edge between `(x, y)` and `(x, y + 1)` is part of a path.
    VerticalEdge { x: Coord, y: Coord },
    /// Cell `(x, y)` belongs to the path of `color`.
    CellColor { x: Coord, y: Coord, color: ColorId },
}

// horizontal and vertical edge, ahead of the colors
const EDGE_SLOTS: usize = 2;

/// Dense numbering of every [`GridVariable`] of a board.
///
/// Each cell owns a block of `2 + colors` consecutive indices: its rightward edge, its downward edge, then one per color.
/// Blocks are laid out row-major. Slots for edges that would leave the board are allocated but never constrained.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VariableIndex {
    dims: (Dimension, Dimension),
    colors: usize,
}

impl VariableIndex {
    /// Index the variables of a board of size `dims` with `colors` endpoint pairs.
    pub fn new(dims: (Dimension, Dimension), colors: usize) -> Self {
        Self { dims, colors }
    }

    #[inline]
    fn stride(&self) -> usize {
        EDGE_SLOTS + self.colors
    }

    #[inline]
    fn block(&self, x: Coord, y: Coord) -> usize {
        debug_assert!(Location(x, y).within(self.dims));
        (y * self.dims.0.get() + x) * self.stride()
    }

    /// The total number of variables, equal to `width * height * (2 + colors)`.
    pub fn var_count(&self) -> usize {
        self.dims.0.get() * self.dims.1.get() * self.stride()
    }

    /// All colors on this board, in ascending order.
    pub fn colors(&self) -> impl Iterator<Item = ColorId> + Clone {
        (1..=self.colors).filter_map(NonZero::new)
    }

    /// The solver variable standing for `variable`.
    pub fn var(&self, variable: GridVariable) -> Var {
        Var::from_index(match variable {
            GridVariable::HorizontalEdge { x, y } => self.block(x, y),
            GridVariable::VerticalEdge { x, y } => self.block(x, y) + 1,
            GridVariable::CellColor { x, y, color } => {
                debug_assert!(color.get() <= self.colors);
                self.block(x, y) + EDGE_SLOTS + color.get() - 1
            }
        })
    }

    /// The positive integer identifying `variable`, as used in DIMACS.
    pub fn id(&self, variable: GridVariable) -> isize {
        self.var(variable).to_dimacs()
    }

    /// Recover the [`GridVariable`] behind `var`, or [`None`] if `var` is not part of this index.
    pub fn variable_of(&self, var: Var) -> Option<GridVariable> {
        let index = var.index();
        if index >= self.var_count() {
            return None;
        }

        let cell = index / self.stride();
        let (x, y) = (cell % self.dims.0.get(), cell / self.dims.0.get());

        Some(match index % self.stride() {
            0 => GridVariable::HorizontalEdge { x, y },
            1 => GridVariable::VerticalEdge { x, y },
            slot => GridVariable::CellColor { x, y, color: NonZero::new(slot - EDGE_SLOTS + 1)? },
        })
    }

    /// "`location` has `color`".
    pub fn color(&self, location: Location, color: ColorId) -> Var {
        self.var(GridVariable::CellColor { x: location.0, y: location.1, color })
    }

    /// The variable of the edge leaving `location` in `direction`, or [`None`] if that edge would leave the board.
    pub fn edge(&self, location: Location, direction: SquareStep) -> Option<Var> {
        let Location(x, y) = location;
        let (width, height) = (self.dims.0.get(), self.dims.1.get());

        let variable = match direction {
            SquareStep::Right if x + 1 < width => GridVariable::HorizontalEdge { x, y },
            SquareStep::Left if x > 0 => GridVariable::HorizontalEdge { x: x - 1, y },
            SquareStep::Down if y + 1 < height => GridVariable::VerticalEdge { x, y },
            SquareStep::Up if y > 0 => GridVariable::VerticalEdge { x, y: y - 1 },
            _ => return None,
        };

        Some(self.var(variable))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use itertools::Itertools;
    use proptest::prelude::*;

    use super::*;

    fn all_variables(index: &VariableIndex, width: usize, height: usize) -> Vec<GridVariable> {
        (0..height).cartesian_product(0..width)
            .flat_map(|(y, x)| {
                [GridVariable::HorizontalEdge { x, y }, GridVariable::VerticalEdge { x, y }].into_iter()
                    .chain(index.colors().map(move |color| GridVariable::CellColor { x, y, color }))
            })
            .collect_vec()
    }

    #[test]
    fn boundary_edges_are_absent() {
        let index = VariableIndex::new((NonZero::new(2).unwrap(), NonZero::new(1).unwrap()), 1);

        assert_eq!(index.edge(Location(0, 0), SquareStep::Right), index.edge(Location(1, 0), SquareStep::Left));
        assert!(index.edge(Location(0, 0), SquareStep::Right).is_some());
        assert!(index.edge(Location(1, 0), SquareStep::Right).is_none());
        assert!(index.edge(Location(0, 0), SquareStep::Down).is_none());
        assert!(index.edge(Location(0, 0), SquareStep::Up).is_none());
    }

    proptest! {
        #[test]
        fn dense_bijection(width in 1usize..8, height in 1usize..8, colors in 0usize..6) {
            let index = VariableIndex::new((NonZero::new(width).unwrap(), NonZero::new(height).unwrap()), colors);
            let variables = all_variables(&index, width, height);

            prop_assert_eq!(index.var_count(), width * height * (2 + colors));
            prop_assert_eq!(variables.len(), index.var_count());

            let ids: HashSet<isize> = variables.iter().map(|v| index.id(*v)).collect();
            prop_assert_eq!(ids.len(), variables.len());
            prop_assert!(ids.iter().all(|id| (1..=index.var_count() as isize).contains(id)));

            for variable in variables {
                prop_assert_eq!(index.variable_of(index.var(variable)), Some(variable));
            }
        }
    }
}

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::cell::{ColorId, FrozenCell, FrozenCellType};
use crate::location::{Dimension, Location};
use crate::model::Model;
use crate::puzzle::Puzzle;
use crate::shape::{SquareStep, Step};
use crate::variable::VariableIndex;

/// A solved board, carrying everything a renderer needs: the color of every cell and which neighboring cells are linked.
///
/// Displays like a [`Puzzle`], except path cells show the lower-case label of their color.
#[derive(Clone, Debug)]
pub struct SolvedBoard {
    dims: (Dimension, Dimension),
    cells: Array2<FrozenCell>,
    labels: Vec<char>,
}

impl SolvedBoard {
    pub(crate) fn from_model(puzzle: &Puzzle, index: &VariableIndex, model: &Model) -> Self {
        let cells = Array2::from_shape_fn((puzzle.height(), puzzle.width()), |ind| {
            let location = Location::from(ind);
            let exits = SquareStep::VARIANTS.iter()
                .filter(|direction| index.edge(location, **direction).is_some_and(|var| model.value(var)))
                .copied()
                .collect();

            let cell_type = match puzzle.color_at(location) {
                Some(color) => FrozenCellType::Terminus { color },
                None => index.colors()
                    .find(|color| model.value(index.color(location, *color)))
                    .map_or(FrozenCellType::Empty, |color| FrozenCellType::Path { color }),
            };

            FrozenCell { exits, cell_type }
        });

        Self {
            dims: puzzle.dims(),
            cells,
            labels: puzzle.labels.clone(),
        }
    }

    /// Board dimensions in `(x, y)` order.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// The color assigned to `location`, or [`None`] if it has none or is off the board.
    pub fn color_at(&self, location: Location) -> Option<ColorId> {
        self.cells.get(location.as_index())?.cell_type.color()
    }

    /// Whether `location` is a terminus.
    pub fn is_terminus(&self, location: Location) -> bool {
        matches!(self.cells.get(location.as_index()).map(|cell| cell.cell_type), Some(FrozenCellType::Terminus { .. }))
    }

    /// The directions in which the path through `location` leaves it, in the order right, down, left, up.
    pub fn exits(&self, location: Location) -> Vec<SquareStep> {
        match self.cells.get(location.as_index()) {
            Some(cell) => SquareStep::VARIANTS.iter().filter(|direction| cell.exits.contains(*direction)).copied().collect_vec(),
            None => Vec::new(),
        }
    }

    /// Whether the edge from `location` to its right-hand neighbor is part of a path.
    pub fn links_right(&self, location: Location) -> bool {
        self.exits(location).contains(&SquareStep::Right)
    }

    /// Whether the edge from `location` to the neighbor below it is part of a path.
    pub fn links_down(&self, location: Location) -> bool {
        self.exits(location).contains(&SquareStep::Down)
    }

    /// Whether the two cells in `pair` are adjacent and joined by a path.
    pub fn is_linked(&self, pair: UnorderedPair<Location>) -> bool {
        let UnorderedPair(a, b) = pair;
        SquareStep::direction_to(a, b).is_some_and(|direction| self.exits(a).contains(&direction))
    }

    /// The path of `color`, from its first terminus to its second, or [`None`] if there is no such color.
    pub fn path_of(&self, color: ColorId) -> Option<Vec<Location>> {
        let start = self.cells.indexed_iter()
            .find(|(_, cell)| cell.cell_type == FrozenCellType::Terminus { color })
            .map(|(ind, _)| Location::from(ind))?;

        let mut path = vec![start];
        let mut previous = None;
        let mut current = start;
        while let Some(next) = self.exits(current).iter()
            .map(|direction| direction.attempt_from(current))
            .find(|next| Some(*next) != previous) {
            path.push(next);
            previous = Some(current);
            current = next;
            if self.is_terminus(current) {
                break;
            }
        }

        Some(path)
    }
}

impl Display for SolvedBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = |color: ColorId| self.labels.get(color.get() - 1).copied().unwrap_or('#');

        for row in self.cells.rows() {
            for cell in row {
                let c = match cell.cell_type {
                    FrozenCellType::Terminus { color } => label(color).to_ascii_uppercase(),
                    FrozenCellType::Path { color } => label(color).to_ascii_lowercase(),
                    FrozenCellType::Empty => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

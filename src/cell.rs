use std::collections::HashSet;
use std::num::NonZero;

use crate::shape::SquareStep;

/// A path color. Colors are numbered from 1 in the order their endpoint pairs were given.
pub type ColorId = NonZero<usize>;

/// A cell of an unsolved puzzle.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum Cell {
    Terminus { color: ColorId },
    #[default]
    Empty,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum FrozenCellType {
    Terminus { color: ColorId },
    Path { color: ColorId },
    #[default]
    Empty,
}

impl FrozenCellType {
    pub(crate) fn color(&self) -> Option<ColorId> {
        match self {
            Self::Terminus { color } | Self::Path { color } => Some(*color),
            Self::Empty => None,
        }
    }
}

/// Cells, frozen for output or printing.
#[derive(Clone, Debug, Default)]
pub(crate) struct FrozenCell {
    pub(crate) exits: HashSet<SquareStep>,
    pub(crate) cell_type: FrozenCellType,
}

use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

/// A single coordinate of a [`Location`].
pub type Coord = usize;
/// A board dimension, i.e. a width or a height. Boards are never empty.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on a board. The top left corner is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The `(row, column)` index of this location in an [`ndarray::Array2`] laid out row-major.
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether this location lies on a board of size `dims`, given in `(x, y)` order.
    pub fn within(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

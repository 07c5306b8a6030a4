use std::hash::Hash;

use strum::VariantArray;

use crate::location::{Dimension, Location};

/// Functionality of a step direction between neighboring cells.
///
/// [`SquareStep`] is the only built-in implementation; Numberlink boards are rectangular.
pub trait Step: Sized + Copy + VariantArray + PartialEq + Eq + Hash + Ord + PartialOrd {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// Steps off the top or left edge wrap around to a huge coordinate, which no board contains.
    fn attempt_from(&self, location: Location) -> Location;
    /// The static array of all "forward" directions.
    ///
    /// Forward directions are those which, upon stepping from one location to another, cause the destination location to be indexed higher than the origin location.
    /// For [`SquareStep`] and given the row-major ordering of the cell array, [`Down`](SquareStep::Down) and [`Right`](SquareStep::Right) are forward directions.
    const FORWARD_VARIANTS: &'static [Self];
    /// Invert the direction specified by `self`.
    fn invert(&self) -> Self;

    /// Step from `location`, returning [`None`] if the destination is not on a board of size `dims`.
    fn step_within(&self, location: Location, dims: (Dimension, Dimension)) -> Option<Location> {
        Some(self.attempt_from(location)).filter(|dest| dest.within(dims))
    }

    /// Determine the direction from `a` to `b`, if they are adjacent.
    fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }

    /// Convert this direction to a forward one, if it is not already such a direction.
    fn ensure_forward(&self) -> Self {
        match Self::FORWARD_VARIANTS.contains(self) {
            true => *self,
            false => self.invert(),
        }
    }
}

/// The four directions between cells of a rectangular board.
///
/// Variants are declared in the order incident edges of a cell are visited: right, down, left, up.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards increasing `x`.
    Right,
    /// Towards increasing `y`.
    Down,
    /// Towards decreasing `x`.
    Left,
    /// Towards decreasing `y`.
    Up,
}

impl Step for SquareStep {
    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }

    const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::*;

    #[test]
    fn steps_stay_on_board() {
        let dims = (NonZero::new(3).unwrap(), NonZero::new(2).unwrap());

        assert_eq!(SquareStep::Up.step_within(Location(0, 0), dims), None);
        assert_eq!(SquareStep::Left.step_within(Location(0, 1), dims), None);
        assert_eq!(SquareStep::Right.step_within(Location(2, 1), dims), None);
        assert_eq!(SquareStep::Down.step_within(Location(1, 0), dims), Some(Location(1, 1)));
    }

    #[test]
    fn forward_directions() {
        assert_eq!(SquareStep::Left.ensure_forward(), SquareStep::Right);
        assert_eq!(SquareStep::Up.ensure_forward(), SquareStep::Down);
        assert_eq!(SquareStep::direction_to(Location(1, 1), Location(1, 0)), Some(SquareStep::Up));
        assert_eq!(SquareStep::direction_to(Location(1, 1), Location(3, 1)), None);
    }
}

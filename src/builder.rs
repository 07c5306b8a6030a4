use std::num::NonZero;
use std::ops::IndexMut;

use ndarray::{Array2, AssignElem};

use crate::cell::Cell;
use crate::error::BuildError;
use crate::location::{Dimension, Location};
use crate::puzzle::Puzzle;

/// A builder for Numberlink puzzles on rectangular boards.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// The first problem encountered puts the builder into an invalid state, after which further additions do nothing and [`build`](Self::build) fails.
#[derive(Clone, Debug)]
pub struct PuzzleBuilder {
    dims: (Dimension, Dimension),
    cells: Array2<Cell>,
    termini: Vec<Location>,
    labels: Vec<char>,
    invalid_reasons: Vec<BuildError>,
}

impl Default for PuzzleBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
    }
}

impl PuzzleBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            cells: Array2::from_shape_simple_fn((dims.1.get(), dims.0.get()), Cell::default),
            termini: Default::default(),
            labels: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    /// Add termini, the two endpoints of one color, displayed as `display`.
    /// Colors are numbered from 1 in the order they are added; the order within `locations` does not matter.
    ///
    /// May cause the builder to enter an invalid state if either location is out of bounds or already holds a terminus.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_termini(&mut self, display: char, locations: (Location, Location)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for location in [locations.0, locations.1] {
            if !location.within(self.dims) {
                self.invalid_reasons.push(BuildError::OutOfBounds {
                    location,
                    width: self.dims.0.get(),
                    height: self.dims.1.get(),
                });
                return self;
            }
        }

        for (index, location) in [locations.0, locations.1].into_iter().enumerate() {
            let taken = self.cells[location.as_index()] != Cell::Empty;
            // both ends of one pair on the same cell count as a clash too
            if taken || (index == 1 && locations.0 == locations.1) {
                self.invalid_reasons.push(BuildError::DuplicateTerminus { location });
                return self;
            }
        }

        // color IDs start at 1
        let color = NonZero::<usize>::MIN.saturating_add(self.labels.len());
        self.labels.push(display);
        for location in [locations.0, locations.1] {
            self.cells.index_mut(location.as_index()).assign_elem(Cell::Terminus { color });
            self.termini.push(location);
        }

        self
    }

    /// Remove the most recently added pair of termini.
    ///
    /// If the builder is in an invalid state or no termini are present, this function does nothing.
    pub fn pop_termini(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if self.labels.pop().is_some() {
            for location in self.termini.split_off(self.termini.len() - 2) {
                self.cells.index_mut(location.as_index()).assign_elem(Cell::Empty);
            }
        }

        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuildError>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuildError>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Puzzle`], or report the first problem encountered while building.
    pub fn build(&self) -> Result<Puzzle, BuildError> {
        if let Some(reason) = self.invalid_reasons.first() {
            return Err(reason.clone());
        }

        Ok(Puzzle {
            dims: self.dims,
            cells: self.cells.clone(),
            termini: self.termini.clone(),
            labels: self.labels.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(x: usize, y: usize) -> (Dimension, Dimension) {
        (NonZero::new(x).unwrap(), NonZero::new(y).unwrap())
    }

    #[test]
    fn out_of_bounds() {
        let result = PuzzleBuilder::with_dims(dims(3, 3))
            .add_termini('A', (Location(0, 0), Location(3, 1)))
            .build();

        assert_eq!(result.unwrap_err(), BuildError::OutOfBounds { location: Location(3, 1), width: 3, height: 3 });
    }

    #[test]
    fn shared_cell_between_colors() {
        let mut builder = PuzzleBuilder::with_dims(dims(3, 3));
        builder
            .add_termini('A', (Location(0, 0), Location(2, 2)))
            .add_termini('B', (Location(1, 1), Location(2, 2)));

        assert_eq!(builder.is_valid().map(Vec::len), Some(1));
        assert_eq!(builder.build().unwrap_err(), BuildError::DuplicateTerminus { location: Location(2, 2) });
    }

    #[test]
    fn shared_cell_within_pair() {
        let result = PuzzleBuilder::with_dims(dims(2, 2))
            .add_termini('A', (Location(1, 1), Location(1, 1)))
            .build();

        assert_eq!(result.unwrap_err(), BuildError::DuplicateTerminus { location: Location(1, 1) });
    }

    #[test]
    fn invalid_builder_ignores_further_additions() {
        let mut builder = PuzzleBuilder::with_dims(dims(2, 2));
        builder
            .add_termini('A', (Location(5, 5), Location(0, 0)))
            .add_termini('B', (Location(0, 1), Location(1, 1)))
            .pop_termini();

        assert_eq!(builder.is_valid().map(Vec::len), Some(1));
    }

    #[test]
    fn pop_restores_cells() {
        let puzzle = PuzzleBuilder::with_dims(dims(2, 2))
            .add_termini('A', (Location(0, 0), Location(1, 0)))
            .add_termini('B', (Location(0, 1), Location(1, 1)))
            .pop_termini()
            .build()
            .unwrap();

        assert_eq!(puzzle.color_count(), 1);
        assert_eq!(puzzle.color_at(Location(0, 1)), None);
        assert_eq!(format!("{}", puzzle), "AA\n..\n");
    }
}

use std::fmt::{Display, Formatter};
use std::num::NonZero;
use std::str::FromStr;

use itertools::Itertools;
use ndarray::Array2;

use crate::builder::PuzzleBuilder;
use crate::cell::{Cell, ColorId};
use crate::error::BuildError;
use crate::location::{Dimension, Location};

const DEFAULT_LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The display label given to the `n`th color (zero-based) when none is specified.
pub(crate) fn default_label(n: usize) -> char {
    DEFAULT_LABELS.get(n).map_or('#', |byte| *byte as char)
}

/// An unsolved Numberlink puzzle: a rectangular board and pairs of termini, one pair per color.
///
/// Build one with a [`PuzzleBuilder`], from a flat coordinate list with [`Puzzle::new`], or by parsing text.
/// Text boards have one line per row, `.` for an empty cell and a letter or digit for each terminus:
///
/// ```
/// use linksat::Puzzle;
///
/// let puzzle: Puzzle = "A.B\n...\nA.B\n".parse().unwrap();
/// assert_eq!(puzzle.color_count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) cells: Array2<Cell>,
    pub(crate) termini: Vec<Location>,
    pub(crate) labels: Vec<char>,
}

impl Puzzle {
    /// Construct a puzzle of `width` by `height` cells from a flat list of termini.
    /// Entries `2k` and `2k + 1` are the two ends of color `k + 1`.
    pub fn new(width: usize, height: usize, termini: &[Location]) -> Result<Self, BuildError> {
        let (Some(width), Some(height)) = (NonZero::new(width), NonZero::new(height)) else {
            return Err(BuildError::EmptyBoard);
        };
        if termini.len() % 2 != 0 {
            return Err(BuildError::UnpairedCoordinate { count: termini.len() });
        }

        let mut builder = PuzzleBuilder::with_dims((width, height));
        for (n, (a, b)) in termini.iter().tuples().enumerate() {
            builder.add_termini(default_label(n), (*a, *b));
        }

        builder.build()
    }

    /// Board dimensions in `(x, y)` order.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Board width, the number of columns.
    pub fn width(&self) -> usize {
        self.dims.0.get()
    }

    /// Board height, the number of rows.
    pub fn height(&self) -> usize {
        self.dims.1.get()
    }

    /// The number of colors, i.e. the number of terminus pairs.
    pub fn color_count(&self) -> usize {
        self.labels.len()
    }

    /// Every terminus, two per color, in color order.
    pub fn termini(&self) -> &[Location] {
        &self.termini
    }

    /// The two termini of `color`, or [`None`] if there is no such color.
    pub fn termini_of(&self, color: ColorId) -> Option<(Location, Location)> {
        let first = (color.get() - 1) * 2;
        Some((*self.termini.get(first)?, *self.termini.get(first + 1)?))
    }

    /// The color of the terminus at `location`, if there is one.
    pub fn color_at(&self, location: Location) -> Option<ColorId> {
        match self.cells.get(location.as_index())? {
            Cell::Terminus { color } => Some(*color),
            Cell::Empty => None,
        }
    }

    /// Whether `location` holds a terminus.
    pub fn is_terminus(&self, location: Location) -> bool {
        self.color_at(location).is_some()
    }

    /// The character `color` is displayed as.
    pub fn label(&self, color: ColorId) -> Option<char> {
        self.labels.get(color.get() - 1).copied()
    }

    /// Every location on the board, row by row.
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        let width = self.width();
        (0..self.height()).flat_map(move |y| (0..width).map(move |x| Location(x, y)))
    }
}

impl FromStr for Puzzle {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s.lines()
            .map(str::trim_end)
            .skip_while(|line| line.is_empty())
            .collect_vec();
        let rows = match rows.iter().rposition(|line| !line.is_empty()) {
            Some(last) => &rows[..=last],
            None => return Err(BuildError::EmptyBoard),
        };

        let width = rows[0].chars().count();
        let mut found: Vec<(char, Vec<Location>)> = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(BuildError::RaggedRow { row: y, found: row_width, expected: width });
            }

            for (x, c) in row.chars().enumerate() {
                match c {
                    '.' => {}
                    c if c.is_ascii_alphanumeric() => {
                        let label = c.to_ascii_uppercase();
                        // labels are numbered in order of first appearance
                        match found.iter_mut().find(|(l, _)| *l == label) {
                            Some((_, locations)) => locations.push(Location(x, y)),
                            None => found.push((label, vec![Location(x, y)])),
                        }
                    }
                    other => return Err(BuildError::InvalidCharacter { found: other, location: Location(x, y) }),
                }
            }
        }

        let dims = match (NonZero::new(width), NonZero::new(rows.len())) {
            (Some(width), Some(height)) => (width, height),
            _ => return Err(BuildError::EmptyBoard),
        };

        let mut builder = PuzzleBuilder::with_dims(dims);
        for (label, locations) in found {
            match locations[..] {
                [a, b] => builder.add_termini(label, (a, b)),
                _ => return Err(BuildError::UnpairedLabel { label, count: locations.len() }),
            };
        }

        builder.build()
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                let c = match cell {
                    Cell::Terminus { color } => self.label(*color).unwrap_or('#').to_ascii_uppercase(),
                    Cell::Empty => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_coordinates() {
        let puzzle = Puzzle::new(3, 2, &[Location(0, 0), Location(2, 0), Location(0, 1), Location(2, 1)]).unwrap();

        assert_eq!(puzzle.color_count(), 2);
        assert_eq!(puzzle.termini_of(NonZero::new(2).unwrap()), Some((Location(0, 1), Location(2, 1))));
        assert_eq!(puzzle.color_at(Location(2, 0)), NonZero::new(1));
        assert!(!puzzle.is_terminus(Location(1, 1)));
        assert_eq!(format!("{}", puzzle), "A.A\nB.B\n");
    }

    #[test]
    fn flat_coordinates_rejects_odd_length() {
        assert_eq!(
            Puzzle::new(3, 3, &[Location(0, 0), Location(1, 1), Location(2, 2)]).unwrap_err(),
            BuildError::UnpairedCoordinate { count: 3 },
        );
        assert_eq!(Puzzle::new(0, 3, &[]).unwrap_err(), BuildError::EmptyBoard);
    }

    #[test]
    fn flat_coordinates_rejects_shared_cell() {
        assert_eq!(
            Puzzle::new(1, 1, &[Location(0, 0), Location(0, 0)]).unwrap_err(),
            BuildError::DuplicateTerminus { location: Location(0, 0) },
        );
    }

    #[test]
    fn parse_round_trips() {
        let text = "A.B.D\n..C.E\n.....\n.B.D.\n.ACE.\n";
        let puzzle: Puzzle = text.parse().unwrap();

        assert_eq!(puzzle.dims(), (NonZero::new(5).unwrap(), NonZero::new(5).unwrap()));
        assert_eq!(puzzle.color_count(), 5);
        assert_eq!(puzzle.termini_of(NonZero::new(1).unwrap()), Some((Location(0, 0), Location(1, 4))));
        assert_eq!(format!("{}", puzzle), text);
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        let puzzle: Puzzle = "\na.A  \n".parse().unwrap();
        assert_eq!(format!("{}", puzzle), "A.A\n");
    }

    #[test]
    fn parse_errors() {
        assert_eq!("A.A\nB.\n".parse::<Puzzle>().unwrap_err(), BuildError::RaggedRow { row: 1, found: 2, expected: 3 });
        assert_eq!("A.A\nB..\n".parse::<Puzzle>().unwrap_err(), BuildError::UnpairedLabel { label: 'B', count: 1 });
        assert_eq!("A*A\n".parse::<Puzzle>().unwrap_err(), BuildError::InvalidCharacter { found: '*', location: Location(1, 0) });
        assert_eq!("\n\n".parse::<Puzzle>().unwrap_err(), BuildError::EmptyBoard);
    }
}

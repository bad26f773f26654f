//! Plain digit grid used for puzzle input and solved output.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{Digit, Position};

/// Errors raised while constructing a [`DigitGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    /// The input did not contain exactly 81 cells.
    #[display("expected 81 cells, found {found}")]
    WrongCellCount {
        /// Number of cells found in the input.
        found: usize,
    },
    /// The input contained a character that is not a digit or a blank marker.
    #[display("invalid character {found:?} in grid")]
    InvalidCharacter {
        /// The offending character.
        found: char,
    },
    /// A cell value outside the range 0-9 was supplied.
    #[display("invalid cell value {found}")]
    InvalidValue {
        /// The offending value.
        found: u8,
    },
}

/// A 9×9 grid of known digits, with empty cells represented as `None`.
///
/// This is the exchange format at the engine boundary: givens come in as a
/// `DigitGrid`, solved puzzles go out as one. The candidate bookkeeping lives
/// in [`CandidateGrid`](crate::CandidateGrid) instead.
///
/// # Grid strings
///
/// [`FromStr`] accepts 81 cells in row-major order: `1`-`9` for givens and
/// `.`, `_`, or `0` for empty cells. Whitespace is ignored, so grids may be
/// laid out over nine lines or with box gaps.
///
/// # Examples
///
/// ```
/// use boxwise_core::{Digit, DigitGrid, Position};
///
/// let grid: DigitGrid = "
///     53_ _7_ ___
///     6__ 195 ___
///     _98 ___ _6_
///     8__ _6_ __3
///     4__ 8_3 __1
///     7__ _2_ __6
///     _6_ ___ 28_
///     ___ 419 __5
///     ___ _8_ _79
/// "
/// .parse()?;
///
/// assert_eq!(grid.get(Position::new(0, 0)), Some(Digit::D5));
/// assert_eq!(grid.get(Position::new(2, 0)), None);
/// # Ok::<(), boxwise_core::GridParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitGrid {
    cells: [Option<Digit>; 81],
}

impl Default for DigitGrid {
    fn default() -> Self {
        Self {
            cells: [None; 81],
        }
    }
}

impl DigitGrid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the digit at a position, or `None` if the cell is empty.
    #[must_use]
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Digit> {
        self.cells[pos.index()]
    }

    /// Sets or clears the digit at a position.
    #[inline]
    pub fn set(&mut self, pos: Position, digit: Option<Digit>) {
        self.cells[pos.index()] = digit;
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Option<Digit>)> + '_ {
        Position::ALL.into_iter().map(|pos| (pos, self.get(pos)))
    }

    /// Returns an iterator over the known cells in row-major order.
    pub fn givens(&self) -> impl Iterator<Item = (Position, Digit)> + '_ {
        self.cells()
            .filter_map(|(pos, digit)| digit.map(|digit| (pos, digit)))
    }

    /// Returns the number of known cells.
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Returns `true` if every cell is known.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns the grid as a 9×9 array of values, 0 for empty cells.
    ///
    /// The outer index is the row, matching the integer-array interface of
    /// the surrounding tooling.
    #[must_use]
    pub fn to_values(&self) -> [[u8; 9]; 9] {
        let mut values = [[0; 9]; 9];
        for (pos, digit) in self.givens() {
            values[usize::from(pos.y())][usize::from(pos.x())] = digit.value();
        }
        values
    }
}

impl TryFrom<[[u8; 9]; 9]> for DigitGrid {
    type Error = GridParseError;

    fn try_from(values: [[u8; 9]; 9]) -> Result<Self, Self::Error> {
        let mut grid = Self::new();
        for pos in Position::ALL {
            let value = values[usize::from(pos.y())][usize::from(pos.x())];
            let digit = match value {
                0 => None,
                1..=9 => Some(Digit::from_value(value)),
                _ => return Err(GridParseError::InvalidValue { found: value }),
            };
            grid.set(pos, digit);
        }
        Ok(grid)
    }
}

impl FromStr for DigitGrid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Self::new();
        let mut count = 0;
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let digit = match c {
                '.' | '_' | '0' => None,
                '1'..='9' => Some(Digit::from_value(c as u8 - b'0')),
                _ => return Err(GridParseError::InvalidCharacter { found: c }),
            };
            if count < 81 {
                grid.set(Position::ALL[count], digit);
            }
            count += 1;
        }
        if count != 81 {
            return Err(GridParseError::WrongCellCount { found: count });
        }
        Ok(grid)
    }
}

impl Display for DigitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..9 {
            for x in 0..9 {
                match self.get(Position::new(x, y)) {
                    Some(digit) => write!(f, "{digit}")?,
                    None => write!(f, ".")?,
                }
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
    fn test_parse_with_blanks_and_whitespace() {
        let grid: DigitGrid = "
            53_ _7_ ___
            6__ 195 ___
            _98 ___ _6_
            8__ _6_ __3
            4__ 8_3 __1
            7__ _2_ __6
            _6_ ___ 28_
            ___ 419 __5
            ___ _8_ _79
        "
        .parse()
        .unwrap();

        assert_eq!(grid.get(Position::new(0, 0)), Some(Digit::D5));
        assert_eq!(grid.get(Position::new(4, 1)), Some(Digit::D9));
        assert_eq!(grid.get(Position::new(8, 8)), Some(Digit::D9));
        assert_eq!(grid.get(Position::new(2, 0)), None);
        assert_eq!(grid.known_count(), 30);
        assert!(!grid.is_complete());
    }

    #[test]
    fn test_parse_accepts_dots_and_zeros() {
        let dots: DigitGrid = ".".repeat(81).parse().unwrap();
        let zeros: DigitGrid = "0".repeat(81).parse().unwrap();
        assert_eq!(dots, zeros);
        assert_eq!(dots.known_count(), 0);
    }

    #[test]
    fn test_parse_rejects_short_input() {
        let result = ".".repeat(80).parse::<DigitGrid>();
        assert_eq!(result, Err(GridParseError::WrongCellCount { found: 80 }));
    }

    #[test]
    fn test_parse_rejects_long_input() {
        let result = ".".repeat(82).parse::<DigitGrid>();
        assert_eq!(result, Err(GridParseError::WrongCellCount { found: 82 }));
    }

    #[test]
    fn test_parse_rejects_invalid_character() {
        let result = format!("x{}", ".".repeat(80)).parse::<DigitGrid>();
        assert_eq!(result, Err(GridParseError::InvalidCharacter { found: 'x' }));
    }

    #[test]
    fn test_display_round_trips() {
        let grid: DigitGrid = "
            53_ _7_ ___
            6__ 195 ___
            _98 ___ _6_
            8__ _6_ __3
            4__ 8_3 __1
            7__ _2_ __6
            _6_ ___ 28_
            ___ 419 __5
            ___ _8_ _79
        "
        .parse()
        .unwrap();
        let reparsed: DigitGrid = grid.to_string().parse().unwrap();
        assert_eq!(reparsed, grid);
    }

    #[test]
    fn test_values_round_trip() {
        let mut values = [[0u8; 9]; 9];
        values[0][0] = 5;
        values[8][8] = 9;
        let grid = DigitGrid::try_from(values).unwrap();
        assert_eq!(grid.get(Position::new(0, 0)), Some(Digit::D5));
        assert_eq!(grid.to_values(), values);
    }

    #[test]
    fn test_values_reject_out_of_range() {
        let mut values = [[0u8; 9]; 9];
        values[3][3] = 12;
        assert_eq!(
            DigitGrid::try_from(values),
            Err(GridParseError::InvalidValue { found: 12 })
        );
    }
}

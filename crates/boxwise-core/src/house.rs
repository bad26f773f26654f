//! Sudoku houses (rows, columns, and boxes).

use std::fmt::{self, Display};

use crate::Position;

/// A Sudoku house: a row, a column, or a 3×3 box.
///
/// Houses are the regions over which the uniqueness constraint holds; solver
/// strategies scan them and error messages name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum House {
    /// A row identified by its y coordinate (0-8).
    Row {
        /// Row index (0-8).
        y: u8,
    },
    /// A column identified by its x coordinate (0-8).
    Column {
        /// Column index (0-8).
        x: u8,
    },
    /// A 3×3 box identified by its index (0-8, left to right, top to bottom).
    Box {
        /// Box index (0-8).
        index: u8,
    },
}

impl House {
    /// All 27 houses in row, column, box order.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row { y: 0 }; 27];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Row { y: i as u8 };
            all[i + 9] = Self::Column { x: i as u8 };
            all[i + 18] = Self::Box { index: i as u8 };
            i += 1;
        }
        all
    };

    /// Returns the nine positions contained in this house.
    #[must_use]
    pub fn positions(self) -> [Position; 9] {
        match self {
            House::Row { y } => Position::ROWS[usize::from(y)],
            House::Column { x } => Position::COLUMNS[usize::from(x)],
            House::Box { index } => Position::BOXES[usize::from(index)],
        }
    }

    /// Returns `true` if the house contains the position.
    #[must_use]
    pub fn contains(self, pos: Position) -> bool {
        match self {
            House::Row { y } => pos.y() == y,
            House::Column { x } => pos.x() == x,
            House::Box { index } => pos.box_index() == index,
        }
    }
}

impl Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            House::Row { y } => write!(f, "row {y}"),
            House::Column { x } => write!(f, "column {x}"),
            House::Box { index } => write!(f, "box {index}"),
        }
    }
}

//! Board positions.

/// A square on the board. The discriminant is the row-major index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Row 0, column 0.
    TopLeft = 0,
    /// Row 0, column 1.
    TopCenter = 1,
    /// Row 0, column 2.
    TopRight = 2,
    /// Row 1, column 0.
    MiddleLeft = 3,
    /// Row 1, column 1.
    Center = 4,
    /// Row 1, column 2.
    MiddleRight = 5,
    /// Row 2, column 0.
    BottomLeft = 6,
    /// Row 2, column 1.
    BottomCenter = 7,
    /// Row 2, column 2.
    BottomRight = 8,
}

const ROW_NAMES: [&str; 3] = ["Top", "Middle", "Bottom"];
const COL_NAMES: [&str; 3] = ["left", "center", "right"];

impl Position {
    /// Every square, indexed by its row-major position.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Human-readable name, e.g. `"Bottom-right"`.
    pub fn label(&self) -> String {
        if *self == Position::Center {
            return "Center".to_string();
        }
        format!("{}-{}", ROW_NAMES[self.row()], COL_NAMES[self.col()])
    }

    /// Row-major index, 0-8.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Row, 0 at the top.
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Column, 0 on the left.
    pub fn col(self) -> usize {
        self.to_index() % 3
    }

    /// The square at `index`, if it is on the board.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_for_all() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.to_index(), i);
            assert_eq!(Position::from_index(i), Some(*pos));
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_rows_and_columns() {
        assert_eq!((Position::TopRight.row(), Position::TopRight.col()), (0, 2));
        assert_eq!((Position::BottomLeft.row(), Position::BottomLeft.col()), (2, 0));
        assert_eq!(Position::MiddleRight.label(), "Middle-right");
    }
}

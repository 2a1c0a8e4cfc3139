//! Keyboard navigation on the 3x3 grid.

use crossterm::event::KeyCode;
use noughts_rules::Position;

/// Moves the cursor one square in the arrow's direction. Edges don't wrap.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);

    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => return cursor,
    };

    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

/// Maps the digit keys 1-9 to board indices 0-8.
pub fn digit_cell(key: KeyCode) -> Option<usize> {
    match key {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_within_grid() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Down), Position::BottomCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Left), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::Center, KeyCode::Right), Position::MiddleRight);
    }

    #[test]
    fn test_edges_do_not_wrap() {
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Down), Position::BottomRight);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Right), Position::BottomRight);
        assert_eq!(move_cursor(Position::TopRight, KeyCode::Right), Position::TopRight);
    }

    #[test]
    fn test_other_keys_leave_cursor() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Enter), Position::Center);
    }

    #[test]
    fn test_digit_cells() {
        assert_eq!(digit_cell(KeyCode::Char('1')), Some(0));
        assert_eq!(digit_cell(KeyCode::Char('9')), Some(8));
        assert_eq!(digit_cell(KeyCode::Char('0')), None);
        assert_eq!(digit_cell(KeyCode::Char('x')), None);
    }
}

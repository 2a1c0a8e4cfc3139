//! Stateless rendering of the board, status and sync indicator.

use noughts_rules::{GameState, Mark, Position, Square, winning_line};
use noughts_sync::Connectivity;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::App;

const HELP: &str = "Arrows move | Enter/Space or 1-9 play | r new game | q quit";

/// Renders one frame from the app state.
pub fn draw(frame: &mut Frame, app: &App) {
    let game = app.controller().current();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Noughts")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], &game, app.cursor());
    draw_status(frame, chunks[2], &game, app.connectivity());

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_board(frame: &mut Frame, area: Rect, game: &GameState, cursor: Position) {
    let board_area = center_rect(area, 38, 11);
    let line = winning_line(game.board());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, positions) in Position::ALL.chunks(3).enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12),
                Constraint::Length(1),
                Constraint::Length(12),
                Constraint::Length(1),
                Constraint::Length(12),
            ])
            .split(rows[row * 2]);

        for (col, &pos) in positions.iter().enumerate() {
            let highlighted = line.is_some_and(|l| l.contains(&pos));
            draw_cell(frame, cols[col * 2], game, pos, pos == cursor, highlighted);
            if col < 2 {
                draw_rule(frame, cols[col * 2 + 1], "│");
            }
        }
        if row < 2 {
            draw_rule(frame, rows[row * 2 + 1], &"─".repeat(38));
        }
    }
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    game: &GameState,
    pos: Position,
    under_cursor: bool,
    highlighted: bool,
) {
    let (symbol, mut style) = match game.board().get(pos) {
        Square::Empty => (
            format!("{}", pos.to_index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Mark::X) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Mark::O) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    if highlighted {
        style = style.bg(Color::Green).fg(Color::Black);
    }
    if under_cursor && !game.is_over() {
        style = style.bg(Color::White).fg(Color::Black);
    }

    let cell = Paragraph::new(Line::from(Span::styled(format!(" {symbol} "), style)))
        .alignment(Alignment::Center);
    let inner = Rect {
        y: area.y + area.height / 2,
        height: 1.min(area.height),
        ..area
    };
    frame.render_widget(cell, inner);
}

fn draw_status(frame: &mut Frame, area: Rect, game: &GameState, connectivity: Connectivity) {
    let status_style = match (game.winner(), game.is_draw()) {
        (Some(_), _) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        (None, true) => Style::default().fg(Color::Magenta),
        (None, false) => Style::default().fg(Color::Yellow),
    };
    let link_style = match connectivity {
        Connectivity::Online => Style::default().fg(Color::Green),
        Connectivity::Offline => Style::default().fg(Color::Red),
        Connectivity::Connecting | Connectivity::Disabled => Style::default().fg(Color::DarkGray),
    };

    let text = Line::from(vec![
        Span::styled(game.status().to_string(), status_style),
        Span::raw("   "),
        Span::styled(format!("[{connectivity}]"), link_style),
    ]);

    let status = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn draw_rule(frame: &mut Frame, area: Rect, glyph: &str) {
    let rule = Paragraph::new(glyph.to_string()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(rule, area);
}

/// Centers a `width` x `height` box inside `area`.
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameController;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::watch;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_status_and_connectivity() {
        let (_tx, rx) = watch::channel(Connectivity::Offline);
        let app = App::new(GameController::new(), rx);
        let screen = render(&app);
        assert!(screen.contains("Next player: X"));
        assert!(screen.contains("[Offline]"));
    }

    #[test]
    fn test_renders_winner() {
        let (_tx, rx) = watch::channel(Connectivity::Disabled);
        let controller = GameController::new();
        for cell in [0, 4, 1, 3, 2] {
            controller.play_cell(cell);
        }
        let app = App::new(controller, rx);
        let screen = render(&app);
        assert!(screen.contains("Winner: X"));
        assert!(screen.contains("[Sync disabled]"));
    }
}

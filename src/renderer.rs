use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::cell::Cell;
use crate::game::Snapshot;
use crate::snake::Collision;

pub const GLYPH_WALL: &str = "▒";
pub const GLYPH_SNAKE: &str = "█";
pub const GLYPH_FOOD: &str = "●";

const WALL_COLOR: Color = Color::Gray;
const SNAKE_HEAD_COLOR: Color = Color::LightBlue;
const SNAKE_BODY_COLOR: Color = Color::Blue;
const FOOD_COLOR: Color = Color::Green;

/// Renders the full game frame from one snapshot, drawing each grid cell
/// `cell_columns` terminal columns wide.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, cell_columns: u16) {
    let columns = cell_columns.max(1);
    let [score_area, board_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(format!("Score: {}", snapshot.score)))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        score_area,
    );

    render_board(frame.buffer_mut(), board_area, snapshot, columns);

    if snapshot.terminal {
        let board = board_rect(board_area, snapshot, columns);
        render_game_over(frame, board, snapshot);
    }
}

fn render_board(buffer: &mut Buffer, area: Rect, snapshot: &Snapshot, columns: u16) {
    let wall_glyph = GLYPH_WALL.repeat(usize::from(columns));
    let snake_glyph = GLYPH_SNAKE.repeat(usize::from(columns));
    let food_glyph = padded_glyph(GLYPH_FOOD, columns);
    let grid = snapshot.grid;
    let wall = Style::new().fg(WALL_COLOR);

    for row in 0..i32::from(grid.height) {
        for col in 0..i32::from(grid.width) {
            let cell = Cell::new(col, row);
            if grid.is_boundary(cell) {
                draw_cell(buffer, area, columns, cell, &wall_glyph, wall);
            }
        }
    }

    draw_cell(
        buffer,
        area,
        columns,
        snapshot.food,
        &food_glyph,
        Style::new().fg(FOOD_COLOR).add_modifier(Modifier::BOLD),
    );

    // Tail first so the head always ends up on top.
    for (index, segment) in snapshot.body.iter().enumerate().rev() {
        let style = if index == 0 {
            Style::new()
                .fg(SNAKE_HEAD_COLOR)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(SNAKE_BODY_COLOR)
        };
        draw_cell(buffer, area, columns, *segment, &snake_glyph, style);
    }
}

fn render_game_over(frame: &mut Frame<'_>, board: Rect, snapshot: &Snapshot) {
    let popup = centered_popup(board, 50, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER"),
        Line::from(""),
        Line::from(format!("Score: {}", snapshot.score)),
        Line::from(match snapshot.death_reason {
            Some(Collision::Wall) => "Cause: hit wall",
            Some(Collision::Body) => "Cause: hit yourself",
            None => "",
        }),
        Line::from(""),
        Line::from("Press any key"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Pads `glyph` with spaces to fill `columns`, glyph first.
fn padded_glyph(glyph: &str, columns: u16) -> String {
    let mut padded = String::from(glyph);
    padded.push_str(&" ".repeat(usize::from(columns.saturating_sub(1))));
    padded
}

fn draw_cell(
    buffer: &mut Buffer,
    area: Rect,
    columns: u16,
    cell: Cell,
    glyph: &str,
    style: Style,
) {
    let Some((x, y)) = cell_to_terminal(area, columns, cell) else {
        return;
    };
    buffer.set_string(x, y, glyph, style);
}

/// Portion of `area` covered by the grid.
fn board_rect(area: Rect, snapshot: &Snapshot, columns: u16) -> Rect {
    let width = snapshot.grid.width.saturating_mul(columns);
    Rect {
        width: width.min(area.width),
        height: snapshot.grid.height.min(area.height),
        ..area
    }
}

fn cell_to_terminal(area: Rect, columns: u16, cell: Cell) -> Option<(u16, u16)> {
    let col = u16::try_from(cell.col).ok()?;
    let row = u16::try_from(cell.row).ok()?;

    let x = area.x.checked_add(col.checked_mul(columns)?)?;
    let y = area.y.checked_add(row)?;
    if x.saturating_add(columns) > area.right() || y >= area.bottom() {
        return None;
    }

    Some((x, y))
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    use super::render;
    use crate::config::GameConfig;
    use crate::game::{GameState, Snapshot};

    fn draw(snapshot: &Snapshot, width: u16, cell_columns: u16) -> Buffer {
        let mut terminal =
            Terminal::new(TestBackend::new(width, 31)).expect("test terminal should build");
        terminal
            .draw(|frame| render(frame, snapshot, cell_columns))
            .expect("draw should succeed");
        terminal.backend().buffer().clone()
    }

    fn text_at(buffer: &Buffer, x: u16, y: u16, len: u16) -> String {
        (x..x + len).map(|x| buffer[(x, y)].symbol()).collect()
    }

    fn snapshot() -> Snapshot {
        GameState::new_with_seed(&GameConfig::default(), 1)
            .expect("default config is valid")
            .snapshot()
    }

    #[test]
    fn draws_score_wall_snake_and_food() {
        let buffer = draw(&snapshot(), 80, 2);

        assert_eq!(text_at(&buffer, 0, 0, 8), "Score: 0");

        // Board starts on row 1; grid cell (c, r) sits at (2c, r + 1).
        assert_eq!(text_at(&buffer, 0, 1, 2), "▒▒");
        assert_eq!(text_at(&buffer, 78, 30, 2), "▒▒");
        assert_eq!(text_at(&buffer, 14, 6, 2), "██");
        assert_eq!(text_at(&buffer, 10, 6, 2), "██");
        assert_eq!(text_at(&buffer, 40, 21, 2), "● ");
        assert_eq!(text_at(&buffer, 20, 10, 2), "  ");
    }

    #[test]
    fn single_column_cells_pack_the_board() {
        let buffer = draw(&snapshot(), 40, 1);

        assert_eq!(text_at(&buffer, 39, 1, 1), "▒");
        assert_eq!(text_at(&buffer, 5, 6, 3), "███");
        assert_eq!(text_at(&buffer, 20, 21, 1), "●");
    }

    #[test]
    fn terminal_snapshot_shows_game_over() {
        let mut snapshot = snapshot();
        snapshot.terminal = true;
        let buffer = draw(&snapshot, 80, 2);

        let text: String = (0..31).map(|y| text_at(&buffer, 0, y, 80)).collect();
        assert!(text.contains("GAME OVER"));
    }

    #[test]
    fn cells_outside_the_area_are_skipped() {
        let mut terminal =
            Terminal::new(TestBackend::new(10, 4)).expect("test terminal should build");

        terminal
            .draw(|frame| render(frame, &snapshot(), 2))
            .expect("small terminal should still draw");
    }
}

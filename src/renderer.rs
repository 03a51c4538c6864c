use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::GridBounds;
use crate::game::{DeathReason, GameSession};
use crate::input::Direction;
use crate::snake::Position;

const GLYPH_FOOD: &str = "●";
const GLYPH_SNAKE_BODY: &str = "█";
const GLYPH_SNAKE_HEAD_UP: &str = "▲";
const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";

/// Renders the full game frame from immutable session state.
pub fn render(frame: &mut Frame<'_>, session: &GameSession) {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let board_area = board_rect(play_area, session.bounds());
    let block = Block::bordered().border_style(Style::new().fg(Color::White));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, session);
    render_snake(frame, inner, session);
    render_hud(frame, hud_area, session);

    if session.is_over() {
        render_game_over(frame, board_area, session.score(), session.death_reason());
    }
}

/// Bordered board rectangle anchored at the top-left of `area`.
fn board_rect(area: Rect, bounds: GridBounds) -> Rect {
    let width = u16::try_from(bounds.columns() + 2).unwrap_or(u16::MAX);
    let height = u16::try_from(bounds.rows() + 2).unwrap_or(u16::MAX);

    Rect {
        x: area.x,
        y: area.y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, session: &GameSession) {
    let Some(food) = session.food() else {
        return;
    };
    let Some((x, y)) = cell_to_terminal(inner, session.bounds(), food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(Color::Red));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, session: &GameSession) {
    let bounds = session.bounds();
    let head_glyph = head_glyph(session.snake().direction());
    let buffer = frame.buffer_mut();

    // Tail first so the head wins when a collision stacks two segments.
    let segments: Vec<Position> = session.segments().collect();
    for (index, segment) in segments.iter().enumerate().rev() {
        let Some((x, y)) = cell_to_terminal(inner, bounds, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                head_glyph,
                Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(Color::Green));
        }
    }
}

fn render_hud(frame: &mut Frame<'_>, area: Rect, session: &GameSession) {
    let text = format!(
        " Score: {}   Length: {}   [Arrows/WASD] move  [Q] quit",
        session.score(),
        session.snake().len()
    );

    frame.render_widget(
        Paragraph::new(Line::from(text)).style(Style::default().fg(Color::Gray)),
        area,
    );
}

fn render_game_over(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<DeathReason>,
) {
    let popup = centered_popup(area, 70, 60);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER"),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(match death_reason {
            Some(DeathReason::WallCollision) => "Cause: hit wall",
            Some(DeathReason::SelfCollision) => "Cause: hit yourself",
            Some(DeathReason::BoardFull) => "Cause: no room left for food",
            None => "",
        }),
        Line::from(""),
        Line::from("[Enter]/[Space] Play again"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Maps a board cell to a terminal cell inside `inner`, or `None` when it is off-screen.
fn cell_to_terminal(inner: Rect, bounds: GridBounds, position: Position) -> Option<(u16, u16)> {
    if !bounds.contains(position) {
        return None;
    }

    let x_offset = u16::try_from(i64::from(position.x) - i64::from(bounds.min_x)).ok()?;
    let y_offset = u16::try_from(i64::from(position.y) - i64::from(bounds.min_y)).ok()?;

    let x = inner.x.checked_add(x_offset)?;
    let y = inner.y.checked_add(y_offset)?;
    if x >= inner.right() || y >= inner.bottom() {
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

//! Stateless rendering of the play screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Line as CanvasLine, Rectangle},
    },
};

use crate::board::geometry::{self, CELL, FILES, RANKS};
use crate::board::{Piece, Side};
use crate::game::LogOrigin;

use super::app::App;

const LATTICE: Color = Color::Rgb(0x6b, 0x4f, 0x1d);

/// Renders one frame from the view model.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(20),   // Board + panel
            Constraint::Length(3), // Status
        ])
        .split(frame.area());

    let title = Paragraph::new("中国象棋 — Xiangqi")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    draw_board(frame, main[0], app);
    draw_panel(frame, main[1], app);
    draw_status(frame, chunks[2], app);
}

/// Draws the board lattice from the geometry segments, then pieces and
/// selection markers at the square centers.
fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let width = geometry::board_width();
    let height = geometry::board_height();

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("棋盘"))
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for segment in geometry::grid_lines() {
                ctx.draw(&CanvasLine {
                    x1: segment.x1,
                    y1: height - segment.y1,
                    x2: segment.x2,
                    y2: height - segment.y2,
                    color: LATTICE,
                });
            }

            let river = height - geometry::river_y();
            ctx.print(
                geometry::center(2),
                river,
                Line::styled("楚河", Style::default().fg(LATTICE)),
            );
            ctx.print(
                geometry::center(6),
                river,
                Line::styled("汉界", Style::default().fg(LATTICE)),
            );

            // Marker under the cursor.
            let (cursor_row, cursor_col) = app.cursor();
            ctx.draw(&Rectangle {
                x: geometry::center(cursor_col) - CELL / 2.0,
                y: height - geometry::center(cursor_row) - CELL / 2.0,
                width: CELL,
                height: CELL,
                color: Color::Yellow,
            });

            let Some(snapshot) = app.snapshot() else {
                return;
            };

            if let Some(selection) = app.selection() {
                if let Some((row, col)) = screen_position(selection.origin, app.flipped()) {
                    ctx.draw(&Rectangle {
                        x: geometry::center(col) - CELL / 2.0,
                        y: height - geometry::center(row) - CELL / 2.0,
                        width: CELL,
                        height: CELL,
                        color: Color::Cyan,
                    });
                }
                for &dest in &selection.destinations {
                    if let Some((row, col)) = screen_position(dest, app.flipped()) {
                        ctx.print(
                            geometry::center(col),
                            height - geometry::center(row),
                            Line::styled("·", Style::default().fg(Color::Green)),
                        );
                    }
                }
            }

            for dr in 0..RANKS {
                for df in 0..FILES {
                    let idx = geometry::display_index(dr, df, app.flipped());
                    if let Some(piece) = snapshot.piece_at(idx) {
                        ctx.print(
                            geometry::center(df),
                            height - geometry::center(dr),
                            Line::styled(piece.name(), piece_style(piece)),
                        );
                    }
                }
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_panel(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(4)])
        .split(area);

    let mut info: Vec<Line> = Vec::new();
    match app.snapshot() {
        Some(snapshot) => {
            info.push(Line::from(format!("对局ID: {}", snapshot.game_id)));
            let side = match Side::from_sign(snapshot.side_to_move) {
                Some(Side::Red) => "红",
                Some(Side::Black) => "黑",
                None => "-",
            };
            info.push(Line::from(format!("行棋方: {side}")));
            info.push(Line::from(format!(
                "将军: {}",
                if snapshot.in_check { "是" } else { "否" }
            )));
            info.push(Line::from(format!(
                "三次重复: {}",
                if snapshot.threefold { "是" } else { "否" }
            )));
        }
        None => info.push(Line::from("对局ID: -")),
    }
    if let Some(result) = app.result() {
        info.push(Line::styled(
            format!("对局结束: {}", result.label()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    let info = Paragraph::new(info).block(Block::default().borders(Borders::ALL).title("对局"));
    frame.render_widget(info, chunks[0]);

    let entries: Vec<Line> = app
        .log()
        .iter()
        .map(|entry| {
            let color = match entry.origin {
                LogOrigin::System => Color::Gray,
                LogOrigin::Human => Color::Green,
                LogOrigin::Ai => Color::Magenta,
            };
            Line::from(Span::styled(
                format!("• {}", entry.message),
                Style::default().fg(color),
            ))
        })
        .collect();
    let log = Paragraph::new(entries).block(Block::default().borders(Borders::ALL).title("记录"));
    frame.render_widget(log, chunks[1]);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let (text, color) = if let Some(error) = app.error() {
        (format!("错误: {error}"), Color::Red)
    } else if app.thinking() {
        ("⏳ AI 思考中...".to_string(), Color::Red)
    } else {
        (
            "方向键移动  Enter 选择/落子  n 新局  u 悔棋  f 翻转  q 退出".to_string(),
            Color::Yellow,
        )
    };
    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

/// Screen (row, col) a board index lands on under the given orientation,
/// the inverse of [`geometry::display_index`].
fn screen_position(idx: usize, flipped: bool) -> Option<(usize, usize)> {
    if idx >= geometry::NUM_SQUARES {
        return None;
    }
    let rank = geometry::rank_of(idx);
    let row = if flipped { rank } else { RANKS - 1 - rank };
    Some((row, geometry::file_of(idx)))
}

fn piece_style(piece: Piece) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match piece.side {
        Side::Red => style.fg(Color::Red),
        Side::Black => style.fg(Color::White),
    }
}

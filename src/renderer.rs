use crate::config::Arena;
use crate::entities::{Bounds, Enemy, Entity, GameState, Player, Projectile};
use crate::font::Labels;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine, Rectangle},
    },
};

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub score: u32,
    pub arena: Arena,
    pub labels: &'a Labels,
    pub fps: u32,
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    marker: Marker,
}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {
            marker: Marker::Braille,
        }
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Running => self.render_game(frame, view),
            GameState::GameOver | GameState::Terminated => self.render_game_over(frame, view),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let [playfield, controls_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(view.labels.caption)
            .title_alignment(Alignment::Center);
        let inner = block.inner(playfield);

        // Braille cells are 2x4 dots; fill shapes one dot row/column apart
        let step_x = f64::from(view.arena.width) / f64::from(inner.width.max(1) * 2);
        let step_y = f64::from(view.arena.height) / f64::from(inner.height.max(1) * 4);
        let height = f64::from(view.arena.height);

        let canvas = Canvas::default()
            .block(block)
            .marker(self.marker)
            .background_color(Color::Black)
            .x_bounds([0.0, f64::from(view.arena.width)])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for enemy in view.enemies {
                    fill_rect(ctx, enemy.bounds(), height, step_y, Color::Red);
                }
                for projectile in view.projectiles {
                    fill_rect(ctx, projectile.bounds(), height, step_y, Color::Green);
                }
                draw_ship(ctx, view.player.bounds(), height, step_x, Color::Blue);
            });
        frame.render_widget(canvas, playfield);

        // Stats overlay at the top of the playfield
        let stats = Line::from(vec![
            Span::styled(view.labels.score, Style::default().fg(Color::White)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}", view.fps), Style::default().fg(Color::DarkGray)),
        ]);
        let stats_area = Rect {
            x: inner.x + 1,
            y: inner.y,
            width: inner.width.saturating_sub(2),
            height: inner.height.min(1),
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        let controls = Line::from(Span::styled(
            view.labels.controls,
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let area = frame.area();
        let padding = usize::from(area.height.saturating_sub(7) / 2);

        let mut text: Vec<Line> = vec![Line::from(""); padding];
        text.extend([
            Line::from(view.labels.game_over).centered().red().bold(),
            Line::from(""),
            Line::from(format!("{}{}", view.labels.final_score, view.score))
                .centered()
                .white()
                .bold(),
            Line::from(""),
            Line::from(view.labels.restart_hint).centered().white(),
        ]);

        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(view.labels.caption)
                        .title_alignment(Alignment::Center),
                )
                .style(Style::default().bg(Color::Black))
                .alignment(Alignment::Center),
            area,
        );
    }
}

/// Flips a playfield y (growing down) into canvas space (growing up)
fn flip_y(height: f64, y: i32) -> f64 {
    height - f64::from(y)
}

/// Solid box drawn as stacked horizontal lines
fn fill_rect(ctx: &mut Context, bounds: Bounds, height: f64, step: f64, color: Color) {
    let left = f64::from(bounds.left());
    let right = f64::from(bounds.right());
    let bottom = flip_y(height, bounds.bottom());
    let top = flip_y(height, bounds.top());

    ctx.draw(&Rectangle {
        x: left,
        y: bottom,
        width: right - left,
        height: top - bottom,
        color,
    });

    let mut y = bottom;
    while y < top {
        ctx.draw(&CanvasLine::new(left, y, right, y, color));
        y += step.max(1.0);
    }
}

/// Upward-pointing triangle filling `bounds`, fanned out from the nose
fn draw_ship(ctx: &mut Context, bounds: Bounds, height: f64, step: f64, color: Color) {
    let nose_x = f64::from(bounds.center_x());
    let nose_y = flip_y(height, bounds.top());
    let base_y = flip_y(height, bounds.bottom());
    let left = f64::from(bounds.left());
    let right = f64::from(bounds.right());

    let mut x = left;
    while x < right {
        ctx.draw(&CanvasLine::new(nose_x, nose_y, x, base_y, color));
        x += step.max(1.0);
    }
    ctx.draw(&CanvasLine::new(nose_x, nose_y, right, base_y, color));
    ctx.draw(&CanvasLine::new(left, base_y, right, base_y, color));
}

use std::cell::Cell;
use std::rc::Rc;

use eframe::egui;
use eframe::egui::{pos2, vec2, Align2, Color32, FontId, Painter, Rect, Rounding, Shape, Stroke, Vec2};

use crate::config::Config;
use crate::game::{FrameInput, GameState, Outcome};
use crate::hex::{Board, BoardKind, RED};

pub const TITLE: &str = "Eva CAPTCHA";

const BACKGROUND: Color32 = Color32::from_gray(10);

/// Width of the red rim around each play cell, in pixels.
const RIM: f32 = 2.0;

const ALERT_TILE: Vec2 = vec2(180.0, 64.0);
const ALERT_FILL: Color32 = Color32::from_rgb(60, 0, 0);
const ALERT_INK: Color32 = Color32::from_rgb(237, 128, 15);

pub struct CaptchaViewer {
    game: GameState,
    /// Shared with `main`, which reports the result once the window closes.
    outcome: Rc<Cell<Option<Outcome>>>,
}

impl CaptchaViewer {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: &Config,
        outcome: Rc<Cell<Option<Outcome>>>,
    ) -> Self {
        Self {
            game: GameState::new(config),
            outcome,
        }
    }

    fn paint_game(&self, ui: &mut egui::Ui) {
        let painter = ui.painter();

        if let Some(boards) = self.game.boards() {
            paint_board(painter, &boards.play);
            paint_board(painter, &boards.key);
        }
        if self.game.alerts().visible() {
            paint_alerts(painter, ui.max_rect());
        }
    }
}

fn hexagon(points: [egui::Pos2; 6], fill: Color32) -> Shape {
    Shape::convex_polygon(points.to_vec(), fill, Stroke::NONE)
}

fn paint_board(painter: &Painter, board: &Board) {
    for cell in board.cells() {
        let fill = cell.fill_color(board.kind());
        if board.kind() == BoardKind::Key {
            painter.add(hexagon(cell.corners(cell.radius), fill));
        } else {
            painter.add(hexagon(cell.corners(cell.radius), RED));
            painter.add(hexagon(cell.corners(cell.radius - RIM), fill));
        }
    }
}

/// Stacks alert tiles down the right edge of `screen`.
fn paint_alerts(painter: &Painter, screen: Rect) {
    let mut y = screen.top();
    while y < screen.bottom() {
        let tile = Rect::from_min_size(pos2(screen.right() - ALERT_TILE.x, y), ALERT_TILE);
        painter.rect(
            tile.shrink(RIM),
            Rounding::ZERO,
            ALERT_FILL,
            Stroke::new(RIM, ALERT_INK),
        );
        painter.text(
            tile.center(),
            Align2::CENTER_CENTER,
            "EMERGENCY",
            FontId::monospace(22.0),
            ALERT_INK,
        );
        y += ALERT_TILE.y;
    }
}

impl eframe::App for CaptchaViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.game.layout(ctx.screen_rect());

        let input = ctx.input(|i| FrameInput {
            pointer: i.pointer.latest_pos(),
            primary_pressed: i.pointer.primary_pressed(),
            escape_pressed: i.key_pressed(egui::Key::Escape),
        });
        if self.outcome.get().is_none() {
            if let Some(outcome) = self.game.update(&input) {
                log::info!("round over: {outcome:?}");
                self.outcome.set(Some(outcome));
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }

        ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| self.paint_game(ui));

        // keep the frame loop (and the alert blink) running without input
        ctx.request_repaint();
    }
}

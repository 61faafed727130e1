use std::fmt;

use eframe::egui::{pos2, Pos2, Rect, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::alerts::Alerts;
use crate::config::Config;
use crate::hex::{Board, BoardKind};

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    RanAway,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => write!(
                f,
                "You passed the captcha! {}\n Thank you all :)",
                ["Congratulations!"; 10].join(" ")
            ),
            Outcome::RanAway => write!(f, "YOU RAN AWAY, IDOIT SHINJI!"),
        }
    }
}

/// The input sampled for one frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameInput {
    pub pointer: Option<Pos2>,
    pub primary_pressed: bool,
    pub escape_pressed: bool,
}

#[derive(Debug)]
pub struct Boards {
    pub play: Board,
    pub key: Board,
}

pub struct GameState {
    boards: Option<Boards>,
    screen_size: Vec2,
    alerts: Alerts,
    rng: StdRng,
    picks: usize,
}

/// Where each board goes for a screen of the given size: `(origin, height)`.
/// Works in whole pixels, so odd sizes round down.
fn placements(size: Vec2) -> [(Pos2, f32); 2] {
    let (w, h) = (size.x as i32, size.y as i32);
    let at = |x: i32, y: i32| pos2(x as f32, y as f32);
    [
        (at(w / 2, h / 2 + 100), h as f32),
        (at(w / 5, h / 4), (h / 2) as f32),
    ]
}

impl GameState {
    pub fn new(config: &Config) -> Self {
        Self {
            boards: None,
            screen_size: Vec2::ZERO,
            alerts: Alerts::default(),
            rng: StdRng::seed_from_u64(config.seed),
            picks: config.picks,
        }
    }

    /// Lays the boards out for `screen`, creating them and drawing the key
    /// pattern on the first call. Later calls only move cells when the
    /// screen size changed.
    pub fn layout(&mut self, screen: Rect) {
        let size = screen.size();
        let [(play_origin, play_height), (key_origin, key_height)] = placements(size);
        if let Some(boards) = &mut self.boards {
            if size != self.screen_size {
                log::debug!("screen resized to {}x{}", size.x, size.y);
                boards.play.relayout(play_origin, play_height);
                boards.key.relayout(key_origin, key_height);
            }
        } else {
            let play = Board::new(BoardKind::Play, play_origin, play_height);
            let mut key = Board::new(BoardKind::Key, key_origin, key_height);
            key.select_random(&mut self.rng, self.picks);
            log::debug!(
                "laid out boards for {}x{}, key pattern {:?}",
                size.x,
                size.y,
                key.selected_coords()
            );
            self.boards = Some(Boards { play, key });
        }
        self.screen_size = size;
    }

    pub fn boards(&self) -> Option<&Boards> {
        self.boards.as_ref()
    }

    pub fn alerts(&self) -> &Alerts {
        &self.alerts
    }

    pub fn passed(&self) -> bool {
        self.boards
            .as_ref()
            .is_some_and(|boards| boards.play.matches(&boards.key))
    }

    /// Advances one frame. A match produced by this frame's click is
    /// reported on the next call.
    pub fn update(&mut self, input: &FrameInput) -> Option<Outcome> {
        if input.escape_pressed {
            return Some(Outcome::RanAway);
        }
        if self.passed() {
            return Some(Outcome::Passed);
        }

        if let Some(boards) = &mut self.boards {
            let toggled = boards
                .play
                .update_pointer(input.pointer, input.primary_pressed);
            if toggled > 0 {
                log::debug!(
                    "toggled {toggled} cell(s), selection now {:?}",
                    boards.play.selected_indices()
                );
            }
        }
        self.alerts.tick();
        None
    }
}

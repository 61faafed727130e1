//! The blinking alert strip along the right edge of the screen.

/// Frames after which the counter wraps back to zero.
const PERIOD: u32 = 40;

/// Frames at the start of each period during which the strip is hidden.
const HIDDEN_FRAMES: u32 = 20;

#[derive(Debug, Default, Clone)]
pub struct Alerts {
    frame: u32,
}

impl Alerts {
    pub fn tick(&mut self) {
        self.frame += 1;
        if self.frame > PERIOD {
            self.frame = 0;
        }
    }

    pub fn visible(&self) -> bool {
        self.frame > HIDDEN_FRAMES
    }
}

//! Transforms between coordinate systems (unit-radius board space <=> screen pixels).

use eframe::egui::Pos2;

/// A 2D transform consisting of per-axis scale and translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    scale_x: f32,
    scale_y: f32,
    offset_x: f32,
    offset_y: f32,
}

impl Transform {
    /// Creates a new `Transform` that scales both axes uniformly by `scale`, then moves the origin to `offset`.
    pub fn scale_then_translate(scale: f32, offset: Pos2) -> Self {
        Self {
            scale_x: scale,
            scale_y: scale,
            offset_x: offset.x,
            offset_y: offset.y,
        }
    }

    /// Applies the transformation to a point.
    pub fn map_point(&self, p: Pos2) -> Pos2 {
        Pos2::new(
            p.x * self.scale_x + self.offset_x,
            p.y * self.scale_y + self.offset_y,
        )
    }

    /// Applies a scalar transformation
    pub fn map_dist(&self, x: f32) -> f32 {
        (x * self.scale_x).abs() * x.signum()
    }
}

//! Hex cell geometry, hit-testing and per-board selection state.

use std::f32::consts::TAU;

use eframe::egui::{pos2, Color32, Pos2};
use hex2d::{Coordinate, Spacing};
use rand::Rng;

use crate::util::transforms::Transform;

pub const SQRT_3: f32 = 1.7320508;

/// Column offsets for each row of a board, top to bottom. Odd rows skip the
/// middle column and are pulled half a cell towards it.
const ROWS: [&[i32]; 5] = [
    &[-1, 0, 1],
    &[-2, -1, 1, 2],
    &[-2, -1, 0, 1, 2],
    &[-2, -1, 1, 2],
    &[-1, 0, 1],
];

pub const CELL_COUNT: usize = 19;

const OFF_RED: Color32 = Color32::from_rgb(255, 51, 0);
const ORANGE: Color32 = Color32::from_rgb(237, 128, 15);
const GREEN: Color32 = Color32::from_rgb(53, 255, 177);
pub const RED: Color32 = Color32::RED;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    /// The large board the player clicks on.
    Play,
    /// The small reference board holding the target pattern.
    Key,
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub center: Pos2,
    pub radius: f32,
    /// Axial position relative to the middle cell of the board.
    pub coord: Coordinate<i32>,
    pub selected: bool,
    pub hovered: bool,
}

impl Cell {
    /// Whether `p` lies inside the cell's hit area (boundary included).
    pub fn contains(&self, p: Pos2) -> bool {
        let dx = (p.x - self.center.x).abs();
        let dy = (p.y - self.center.y).abs();
        let vert = self.radius * SQRT_3 / 4.0;
        let hori = self.radius;
        if dx > hori || dy > vert * 2.0 {
            return false;
        }
        2.0 * vert * hori - vert * dx - hori * dy >= 0.0
    }

    /// The corners of a hexagon of the given radius around this cell's center.
    pub fn corners(&self, radius: f32) -> [Pos2; 6] {
        std::array::from_fn(|i| {
            let angle = TAU * (i as f32 + 0.5) / 6.0;
            pos2(
                self.center.x + radius * angle.cos(),
                self.center.y + radius * angle.sin(),
            )
        })
    }

    pub fn fill_color(&self, kind: BoardKind) -> Color32 {
        match (self.selected, self.hovered, kind) {
            (true, true, _) => OFF_RED,
            (false, true, _) => ORANGE,
            (true, false, _) => RED,
            (false, false, BoardKind::Key) => GREEN,
            (false, false, BoardKind::Play) => Color32::BLACK,
        }
    }
}

/// Cell centers for a board with unit radius whose origin is at (0, 0), in row-major order.
fn unit_centers() -> impl Iterator<Item = Pos2> {
    ROWS.iter().enumerate().flat_map(|(row, columns)| {
        columns.iter().map(move |&column| {
            let mut x = SQRT_3 * column as f32;
            if row % 2 == 1 {
                x -= SQRT_3 / 2.0 * column.signum() as f32;
            }
            let row = row as f32;
            pos2(x, (row - 2.0) * 2.0 - row * 0.5)
        })
    })
}

/// The unit-space center of the middle cell (row 2, column 0).
const MIDDLE: Pos2 = pos2(0.0, -1.0);

fn cell_radius(board_height: f32) -> f32 {
    board_height / 10.0 * 0.8
}

#[derive(Debug, Clone)]
pub struct Board {
    kind: BoardKind,
    cells: Vec<Cell>,
}

impl Board {
    /// Lays out a fresh board around `origin`, sized for a region `board_height` pixels tall.
    pub fn new(kind: BoardKind, origin: Pos2, board_height: f32) -> Self {
        let to_screen = Transform::scale_then_translate(cell_radius(board_height), origin);
        let radius = to_screen.map_dist(1.0);
        let cells = unit_centers()
            .map(|unit| {
                let rel = unit - MIDDLE;
                Cell {
                    center: to_screen.map_point(unit),
                    radius,
                    coord: Coordinate::from_pixel(rel.x, rel.y, Spacing::PointyTop(1.0)),
                    selected: false,
                    hovered: false,
                }
            })
            .collect::<Vec<_>>();
        debug_assert_eq!(cells.len(), CELL_COUNT);
        Self { kind, cells }
    }

    /// Moves and resizes every cell, keeping their flags.
    pub fn relayout(&mut self, origin: Pos2, board_height: f32) {
        let to_screen = Transform::scale_then_translate(cell_radius(board_height), origin);
        let radius = to_screen.map_dist(1.0);
        for (cell, unit) in self.cells.iter_mut().zip(unit_centers()) {
            cell.center = to_screen.map_point(unit);
            cell.radius = radius;
        }
    }

    pub fn kind(&self) -> BoardKind {
        self.kind
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Marks `picks` uniformly drawn cells as selected. Draws may repeat, so
    /// between 1 and `picks` cells end up selected.
    pub fn select_random<R: Rng + ?Sized>(&mut self, rng: &mut R, picks: usize) {
        if self.cells.is_empty() {
            return;
        }
        for _ in 0..picks {
            let i = rng.gen_range(0..self.cells.len());
            self.cells[i].selected = true;
        }
    }

    /// Refreshes hover flags for the cursor and, on a primary press, flips
    /// every hovered cell. Returns the number of cells flipped.
    pub fn update_pointer(&mut self, pointer: Option<Pos2>, primary_pressed: bool) -> usize {
        let mut toggled = 0;
        for cell in &mut self.cells {
            let hovered = pointer.is_some_and(|p| cell.contains(p));
            cell.hovered = hovered;
            if hovered && primary_pressed {
                cell.selected = !cell.selected;
                toggled += 1;
            }
        }
        toggled
    }

    /// Whether both boards have the same selection, cell for cell.
    pub fn matches(&self, other: &Board) -> bool {
        self.cells.len() == other.cells.len()
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.selected == b.selected)
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.selected)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn selected_coords(&self) -> Vec<Coordinate<i32>> {
        self.cells
            .iter()
            .filter(|cell| cell.selected)
            .map(|cell| cell.coord)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-3;

    /// Tiles from the middle cell to the edge of a board.
    const BOARD_RADIUS: i32 = 2;

    fn assert_close(actual: Pos2, expected: Pos2) {
        assert!(
            (actual.x - expected.x).abs() < EPS && (actual.y - expected.y).abs() < EPS,
            "{actual:?} != {expected:?}"
        );
    }

    fn board() -> Board {
        // radius 8
        Board::new(BoardKind::Play, pos2(100.0, 200.0), 100.0)
    }

    #[test]
    fn lays_out_nineteen_cells_in_row_major_order() {
        let board = board();
        assert_eq!(board.cells().len(), CELL_COUNT);
        assert!(board.cells().iter().all(|c| (c.radius - 8.0).abs() < EPS));

        // row 0, column -1
        assert_close(board.cells()[0].center, pos2(100.0 - 8.0 * SQRT_3, 168.0));
        // row 1, column -2, pulled half a cell right
        assert_close(board.cells()[3].center, pos2(100.0 - 12.0 * SQRT_3, 180.0));
        // row 1, column 1, pulled half a cell left
        assert_close(board.cells()[5].center, pos2(100.0 + 4.0 * SQRT_3, 180.0));
        // middle cell sits one radius above the origin
        assert_close(board.cells()[9].center, pos2(100.0, 192.0));
        // row 4, column 1
        assert_close(board.cells()[18].center, pos2(100.0 + 8.0 * SQRT_3, 216.0));
    }

    #[test]
    fn coordinates_form_a_radius_two_hexagon() {
        let board = board();
        let origin = Coordinate::new(0, 0);
        assert_eq!(board.cells()[9].coord, origin);

        let mut per_ring = [0; 3];
        for cell in board.cells() {
            let r = cell.coord.distance(origin);
            assert!(r <= BOARD_RADIUS, "{:?} outside the board", cell.coord);
            per_ring[r as usize] += 1;
        }
        assert_eq!(per_ring, [1, 6, 12]);

        for (i, a) in board.cells().iter().enumerate() {
            for b in &board.cells()[i + 1..] {
                assert_ne!(a.coord, b.coord);
            }
        }
    }

    #[test]
    fn containment_follows_the_hit_area() {
        let board = board();
        let cell = &board.cells()[9];
        let c = cell.center;
        let half_height = 8.0 * SQRT_3 / 2.0;

        assert!(cell.contains(c));
        assert!(cell.contains(c + egui::vec2(0.99 * 8.0, 0.0)));
        assert!(!cell.contains(c + egui::vec2(1.01 * 8.0, 0.0)));
        assert!(cell.contains(c + egui::vec2(0.0, -0.99 * half_height)));
        assert!(!cell.contains(c + egui::vec2(0.0, 1.01 * half_height)));
        // past the slanted edge
        assert!(!cell.contains(c + egui::vec2(6.0, 0.75 * half_height)));
        assert!(cell.contains(c + egui::vec2(-3.0, 0.4 * half_height)));
    }

    #[test]
    fn containment_includes_the_boundary() {
        // radius 4 keeps vert == SQRT_3 and every product below exact in f32
        let cell = Cell {
            center: Pos2::ZERO,
            radius: 4.0,
            coord: Coordinate::new(0, 0),
            selected: false,
            hovered: false,
        };

        // side vertex, dx == radius
        assert!(cell.contains(pos2(4.0, 0.0)));
        assert!(cell.contains(pos2(-4.0, 0.0)));
        // top and bottom, dy == 2 * vert
        assert!(cell.contains(pos2(0.0, 2.0 * SQRT_3)));
        assert!(cell.contains(pos2(0.0, -2.0 * SQRT_3)));
        // where the slanted edge meets the side: 2*vert*r - vert*dx - r*dy == 0
        assert!(cell.contains(pos2(4.0, SQRT_3)));
        assert!(cell.contains(pos2(-4.0, -SQRT_3)));

        assert!(!cell.contains(pos2(4.0, 1.8)));
        assert!(!cell.contains(pos2(4.01, 0.0)));
        assert!(!cell.contains(pos2(0.0, 3.5)));
    }

    #[test]
    fn click_toggles_only_the_cell_under_the_cursor() {
        let mut board = board();
        let target = board.cells()[4].center;

        assert_eq!(board.update_pointer(Some(target), true), 1);
        assert_eq!(board.selected_indices(), vec![4]);
        assert!(board.cells()[4].hovered);
        assert_eq!(board.cells().iter().filter(|c| c.hovered).count(), 1);

        // hovering alone changes nothing
        assert_eq!(board.update_pointer(Some(target), false), 0);
        assert_eq!(board.selected_indices(), vec![4]);

        assert_eq!(board.update_pointer(Some(target), true), 1);
        assert!(board.selected_indices().is_empty());
    }

    #[test]
    fn missing_cursor_clears_hover() {
        let mut board = board();
        board.update_pointer(Some(board.cells()[0].center), false);
        assert!(board.cells()[0].hovered);

        assert_eq!(board.update_pointer(None, true), 0);
        assert!(board.cells().iter().all(|c| !c.hovered && !c.selected));
    }

    #[test]
    fn click_outside_every_cell_does_nothing() {
        let mut board = board();
        assert_eq!(board.update_pointer(Some(pos2(0.0, 0.0)), true), 0);
        assert!(board.selected_indices().is_empty());
    }

    #[test]
    fn row_neighbours_share_an_overlap_strip() {
        let mut board = board();
        let p = board.cells()[9].center + egui::vec2(0.9 * 8.0, 0.0);
        assert_eq!(board.update_pointer(Some(p), true), 2);
        assert_eq!(board.selected_indices(), vec![9, 10]);
    }

    #[test]
    fn random_selection_is_seeded_and_bounded() {
        let pattern = |seed| {
            let mut key = Board::new(BoardKind::Key, pos2(50.0, 50.0), 40.0);
            key.select_random(&mut StdRng::seed_from_u64(seed), 6);
            key.selected_indices()
        };

        let first = pattern(7);
        assert_eq!(first, pattern(7));
        assert!((1..=6).contains(&first.len()));
        assert!(first.iter().all(|&i| i < CELL_COUNT));
    }

    #[test]
    fn boards_match_on_equal_selection() {
        let mut key = Board::new(BoardKind::Key, pos2(50.0, 50.0), 40.0);
        let mut play = board();
        assert!(play.matches(&key));

        key.select_random(&mut StdRng::seed_from_u64(3), 6);
        assert!(!play.matches(&key));

        for i in key.selected_indices() {
            let center = play.cells()[i].center;
            play.update_pointer(Some(center), true);
        }
        assert!(play.matches(&key));
        assert!(key.matches(&play));
        assert_eq!(play.selected_coords(), key.selected_coords());
    }

    #[test]
    fn relayout_keeps_flags() {
        let mut board = board();
        board.update_pointer(Some(board.cells()[12].center), true);

        board.relayout(pos2(0.0, 0.0), 50.0);
        assert_eq!(board.selected_indices(), vec![12]);
        assert!(board.cells().iter().all(|c| (c.radius - 4.0).abs() < EPS));
        assert_close(board.cells()[9].center, pos2(0.0, -4.0));
    }

    #[test]
    fn fill_colors() {
        let mut cell = board().cells()[0].clone();
        assert_eq!(cell.fill_color(BoardKind::Play), Color32::BLACK);
        assert_eq!(cell.fill_color(BoardKind::Key), GREEN);
        cell.hovered = true;
        assert_eq!(cell.fill_color(BoardKind::Key), ORANGE);
        cell.selected = true;
        assert_eq!(cell.fill_color(BoardKind::Play), OFF_RED);
        cell.hovered = false;
        assert_eq!(cell.fill_color(BoardKind::Play), RED);
    }

    #[test]
    fn corners_surround_the_center() {
        let board = board();
        let cell = &board.cells()[9];
        let corners = cell.corners(8.0);
        for corner in corners {
            assert!(((corner - cell.center).length() - 8.0).abs() < EPS);
        }
        // pointy bottom vertex at 90 degrees
        assert_close(corners[1], cell.center + egui::vec2(0.0, 8.0));
    }
}

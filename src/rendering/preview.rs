//! # Preview Renderer
//!
//! Draws a grid as coloured squares in a macroquad window. Each carved cell
//! gets its classification colour, and every closed side gets a darker band
//! so walls read at a glance.

use crate::world::{Cell, Direction, Grid, TileKind};
use log::info;
use macroquad::prelude::*;

/// Width in pixels of the band drawn along a closed side.
pub const WALL_THICKNESS: f32 = 2.0;

/// Factor applied to the base colour for closed sides.
pub const WALL_SHADE: f32 = 0.7;

/// One filled rectangle of the preview, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: Color,
}

/// Window clear colour.
pub fn background() -> Color {
    Color::new(0.4, 0.4, 0.4, 1.0)
}

/// Converts a `0xRRGGBB` value to an opaque colour.
pub fn rgb(hex: u32) -> Color {
    Color::new(
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        1.0,
    )
}

fn darker(color: Color) -> Color {
    Color::new(
        color.r * WALL_SHADE,
        color.g * WALL_SHADE,
        color.b * WALL_SHADE,
        color.a,
    )
}

/// Computes everything the preview draws, back to front.
///
/// Empty and void cells are skipped, leaving the background visible.
pub fn paint_plan(grid: &Grid<Cell>, zoom: u32) -> Vec<PaintRect> {
    let size = zoom.max(1) as f32;
    let band = WALL_THICKNESS.min(size);
    let mut plan = Vec::new();

    for pos in grid.positions() {
        let Some(cell) = grid.get(pos.x, pos.y) else {
            continue;
        };
        if cell.kind == TileKind::OutOfBounds {
            continue;
        }

        let left = pos.x as f32 * size;
        let top = pos.y as f32 * size;
        let base = rgb(cell.kind.color());
        plan.push(PaintRect {
            x: left,
            y: top,
            w: size,
            h: size,
            color: base,
        });

        let wall = darker(base);
        for direction in Direction::all() {
            if cell.has_exit(direction) {
                continue;
            }
            let (x, y, w, h) = match direction {
                Direction::North => (left, top, size, band),
                Direction::East => (left + size - band, top, band, size),
                Direction::South => (left, top + size - band, size, band),
                Direction::West => (left, top, band, size),
            };
            plan.push(PaintRect {
                x,
                y,
                w,
                h,
                color: wall,
            });
        }
    }

    plan
}

/// Window configuration sized to fit `grid` at `zoom` pixels per cell.
pub fn window_conf(grid: &Grid<Cell>, zoom: u32, title: &str) -> Conf {
    Conf {
        window_title: title.to_string(),
        window_width: (grid.width() * zoom.max(1)) as i32,
        window_height: (grid.height() * zoom.max(1)) as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Shows `grid` until the window is closed or Escape is pressed.
///
/// Must run inside a macroquad window context.
pub async fn run_preview(grid: Grid<Cell>, zoom: u32) {
    let plan = paint_plan(&grid, zoom);
    info!("Preview ready: {} rectangles", plan.len());

    loop {
        clear_background(background());
        for rect in &plan {
            draw_rectangle(rect.x, rect.y, rect.w, rect.h, rect.color);
        }

        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        next_frame().await;
    }
}

//! Time-domain scope view.
//!
//! No transform involved: each column plots the mean of a run of reduced
//! samples around the vertical center, so the registry leaves `needs_dft`
//! unset and the tick loop skips the spectral engine entirely.

use super::DrawCtx;
use crate::terminal::Grid;

/// Draw one frame of the waveform into the grid.
pub fn draw(grid: &mut Grid, ctx: &mut DrawCtx) {
    let DrawCtx {
        width,
        height,
        frames,
        reduced,
        glyphs,
        ..
    } = *ctx;

    if width == 0 || height == 0 {
        return;
    }

    // Spread the frames delivered this tick across the width; a thin tick
    // still keeps at least one sample per column.
    let samples_per_col = (frames / width).max(1);

    for col in 0..width {
        let start = col * samples_per_col;
        let end = (start + samples_per_col).min(reduced.len());
        let sum: f64 = reduced.get(start..end).unwrap_or(&[]).iter().sum();
        let avg = sum / samples_per_col as f64;

        // Full-scale i16 swings cover the grid height.
        let offset = avg * height as f64 / 65536.0;
        let row = (height as f64 / 2.0 + offset) as i32;
        grid.set(col as i32, row, glyphs.point, None, true);
    }
}

//! Spectrum bars with decaying peak markers.

use super::DrawCtx;
use crate::colors::ColorBands;
use crate::config::Toggles;
use crate::terminal::Grid;
use crossterm::style::Color;
use rand::prelude::*;

/// Half-width katakana, the classic digital-rain look for random peaks.
fn random_peak_glyph(rng: &mut StdRng) -> char {
    char::from_u32(rng.gen_range(0xFF66..=0xFF9D)).unwrap_or('.')
}

fn band_color(toggles: &Toggles, bands: &ColorBands, row: usize) -> Option<Color> {
    if toggles.colors {
        bands.color_for(row)
    } else {
        None
    }
}

/// Draw one frame of bars into the grid, advancing the peak markers.
pub fn draw(grid: &mut Grid, ctx: &mut DrawCtx) {
    let DrawCtx {
        width,
        height,
        spectrum,
        transform_len,
        toggles,
        glyphs,
        bands,
        ..
    } = *ctx;

    if toggles.peaks {
        ctx.peaks.resize(width);
    }

    let bars = ctx
        .mapper
        .compute_bars(spectrum, transform_len, width, height);

    for col in 0..width {
        let bar = bars[col].min(height as f64) as usize;
        let top = height - bar;

        let peak = if toggles.peaks {
            ctx.peaks.update(col, top, height)
        } else {
            None
        };

        for row in top..height {
            grid.set(
                col as i32,
                row as i32,
                glyphs.bar,
                band_color(toggles, bands, row),
                true,
            );
        }

        if let Some(row) = peak {
            // Mono peaks all take the top band's color instead of their own
            // row's.
            let fg = if toggles.mono_peaks {
                band_color(toggles, bands, 1)
            } else {
                band_color(toggles, bands, row)
            };
            let ch = if toggles.random_peaks {
                random_peak_glyph(ctx.rng)
            } else {
                glyphs.peak
            };
            grid.set(col as i32, row as i32, ch, fg, true);
        }
    }
}

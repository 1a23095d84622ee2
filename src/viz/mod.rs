//! Visualization registry.
//!
//! Each visualization is a draw routine plus capability flags; the tick
//! loop consults the flags to skip work the active view does not need.

pub mod spectrum;
pub mod wave;

use crate::bands::BandMapper;
use crate::colors::ColorBands;
use crate::config::{Glyphs, Toggles};
use crate::peaks::PeakTracker;
use crate::terminal::Grid;
use rand::rngs::StdRng;
use realfft::num_complex::Complex;

/// One registered visualization.
pub struct Visual {
    pub name: &'static str,
    /// The draw routine consumes spectral data, so the transform must run
    /// this tick.
    pub needs_dft: bool,
    /// Honors the color toggle.
    pub supports_color: bool,
    pub draw: fn(&mut Grid, &mut DrawCtx),
}

/// Registered visualizations, selectable by 1-based id.
pub const VISUALS: &[Visual] = &[
    Visual {
        name: "spectrum",
        needs_dft: true,
        supports_color: true,
        draw: spectrum::draw,
    },
    Visual {
        name: "wave",
        needs_dft: false,
        supports_color: false,
        draw: wave::draw,
    },
];

pub fn next_idx(cur: usize) -> usize {
    if cur == VISUALS.len() - 1 {
        0
    } else {
        cur + 1
    }
}

pub fn prev_idx(cur: usize) -> usize {
    if cur == 0 {
        VISUALS.len() - 1
    } else {
        cur - 1
    }
}

/// Per-tick inputs and state handed to a draw routine.
pub struct DrawCtx<'a> {
    pub width: usize,
    pub height: usize,
    /// Mono frames actually delivered this tick.
    pub frames: usize,
    /// Reduced mono block (stale if the transform ran this tick).
    pub reduced: &'a [f64],
    /// Transform output (stale unless the transform ran this tick).
    pub spectrum: &'a [Complex<f64>],
    pub transform_len: usize,
    pub mapper: &'a mut BandMapper,
    pub peaks: &'a mut PeakTracker,
    pub bands: &'a ColorBands,
    pub toggles: &'a Toggles,
    pub glyphs: &'a Glyphs,
    pub rng: &'a mut StdRng,
}

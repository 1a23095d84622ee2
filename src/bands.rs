use realfft::num_complex::Complex;

/// Fraction of the spectrum spread across the terminal width.
///
/// Deliberately narrow: compressing the mapping to the low end of the
/// spectrum keeps the musically relevant range on screen instead of tens of
/// kilohertz of near-empty bins.
pub const BAND_CUT: f64 = 0.03;

/// Vertical scale factor turning a normalized magnitude into row units.
pub const BAR_SCALE: f64 = 0.05;

/// Converts transform output into one bar height per terminal column.
///
/// Owns its scratch storage so the steady state allocates nothing; the bar
/// vector only reallocates when the width actually changes.
pub struct BandMapper {
    magnitudes: Vec<f64>,
    bars: Vec<f64>,
}

impl BandMapper {
    pub fn new(spectrum_len: usize) -> Self {
        Self {
            magnitudes: vec![0.0; spectrum_len],
            bars: Vec::new(),
        }
    }

    /// Spectral bins averaged into one column.
    ///
    /// Clamped to at least one bin: very wide terminals or very small
    /// transforms would otherwise round to zero bins per column.
    pub fn freqs_per_col(transform_len: usize, width: usize) -> usize {
        if width == 0 {
            return 1;
        }
        ((((transform_len / width) as f64) * BAND_CUT) as usize).max(1)
    }

    /// Recompute per-column bar heights, in row units.
    ///
    /// Heights may exceed `height`; the renderer clamps. The column mapping
    /// is re-derived from `width` on every call, so a resize needs no
    /// invalidation here.
    pub fn compute_bars(
        &mut self,
        spectrum: &[Complex<f64>],
        transform_len: usize,
        width: usize,
        height: usize,
    ) -> &[f64] {
        let scale = height as f64 * BAR_SCALE;
        for (mag, c) in self.magnitudes.iter_mut().zip(spectrum) {
            *mag = c.norm() / transform_len as f64 * scale;
        }

        let fpc = Self::freqs_per_col(transform_len, width);

        self.bars.resize(width, 0.0);
        for (i, bar) in self.bars.iter_mut().enumerate() {
            let start = i * fpc;
            let end = ((i + 1) * fpc).min(self.magnitudes.len());
            *bar = if start < end {
                self.magnitudes[start..end].iter().sum::<f64>() / fpc as f64
            } else {
                // Columns past the usable spectrum read as silent.
                0.0
            };
        }
        &self.bars
    }
}

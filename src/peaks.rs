/// Per-column decaying peak markers.
///
/// A peak remembers the highest row a column's bar reached and falls one
/// row per tick once the bar drops below it. `None` is the hidden state,
/// an explicit variant instead of a sentinel row index, so the boundary
/// comparisons cannot confuse "no peak" with a real row.
pub struct PeakTracker {
    peaks: Vec<Option<usize>>,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self { peaks: Vec::new() }
    }

    #[allow(dead_code)]
    pub fn width(&self) -> usize {
        self.peaks.len()
    }

    /// Size the tracker for the current width.
    ///
    /// A width change reallocates and hides every marker; a matching width
    /// keeps all state. Call once per tick before `update`.
    pub fn resize(&mut self, width: usize) {
        if self.peaks.len() != width {
            self.peaks = vec![None; width];
        }
    }

    /// Drop all markers regardless of width (used when the active
    /// visualization changes).
    pub fn invalidate(&mut self) {
        self.peaks.clear();
    }

    #[allow(dead_code)]
    pub fn get(&self, col: usize) -> Option<usize> {
        self.peaks[col]
    }

    /// Advance one column by one tick, given this tick's bar top row
    /// (`top == height` means the bar is fully collapsed).
    ///
    /// Returns the row to draw the marker at, if any. Rising bars snap the
    /// marker up instantly; falling bars let it sink one row per tick until
    /// both bar and marker rest on the baseline, which hides it.
    pub fn update(&mut self, col: usize, top: usize, height: usize) -> Option<usize> {
        let next = match self.peaks[col] {
            Some(p) if p >= top => Some(top),
            Some(p) => {
                let fallen = p + 1;
                if top == height && fallen == height {
                    None
                } else {
                    Some(fallen)
                }
            }
            None if top < height => Some(top),
            None => None,
        };
        self.peaks[col] = next;
        next
    }
}

impl Default for PeakTracker {
    fn default() -> Self {
        Self::new()
    }
}

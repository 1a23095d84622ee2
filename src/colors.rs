use crossterm::style::Color;

/// Vertical color bands as percentages of the grid height, top first.
///
/// The bounds partition [0, 100): each entry's max is the next entry's min,
/// so after scaling every row belongs to exactly one band.
const BANDS: &[(u16, u16, Color)] = &[
    (0, 5, Color::Red),
    (5, 20, Color::Yellow),
    (20, 40, Color::Green),
    (40, 72, Color::White),
    (72, 85, Color::Cyan),
    (85, 98, Color::Blue),
    (98, 100, Color::Green),
];

struct ColorRange {
    min: u16,
    max: u16,
    fg: Color,
    // Derived from the percentages for the current height.
    scaled_min: usize,
    scaled_max: usize,
}

/// Maps grid rows to colors through a percentage partition of the vertical
/// extent.
///
/// The percentage bounds are fixed at construction; only the scaled row
/// bounds change, whenever the observed height does.
pub struct ColorBands {
    ranges: Vec<ColorRange>,
    scaled_for: usize,
}

impl ColorBands {
    pub fn new() -> Self {
        let ranges = BANDS
            .iter()
            .map(|&(min, max, fg)| ColorRange {
                min,
                max,
                fg,
                scaled_min: 0,
                scaled_max: 0,
            })
            .collect();

        Self {
            ranges,
            scaled_for: 0,
        }
    }

    /// Height the current scaled bounds were derived for.
    pub fn scaled_for(&self) -> usize {
        self.scaled_for
    }

    /// Re-derive the row bounds for a new grid height.
    pub fn rescale(&mut self, height: usize) {
        for r in &mut self.ranges {
            r.scaled_min = r.min as usize * height / 100;
            r.scaled_max = r.max as usize * height / 100;
        }
        self.scaled_for = height;
    }

    /// Color of the first band whose scaled range contains `row`.
    pub fn color_for(&self, row: usize) -> Option<Color> {
        self.ranges
            .iter()
            .find(|r| row >= r.scaled_min && row < r.scaled_max)
            .map(|r| r.fg)
    }
}

impl Default for ColorBands {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ColorBands;
    use crossterm::style::Color;

    #[test]
    fn every_row_maps_to_exactly_one_band() {
        let mut bands = ColorBands::new();
        for height in [1usize, 2, 3, 10, 20, 24, 48, 137, 400] {
            bands.rescale(height);
            for row in 0..height {
                let hits = bands
                    .ranges
                    .iter()
                    .filter(|r| row >= r.scaled_min && row < r.scaled_max)
                    .count();
                assert_eq!(hits, 1, "row {} at height {}", row, height);
            }
        }
    }

    #[test]
    fn top_rows_are_red_at_usable_heights() {
        let mut bands = ColorBands::new();
        bands.rescale(40);
        assert_eq!(bands.color_for(0), Some(Color::Red));
        assert_eq!(bands.color_for(1), Some(Color::Red));
        // 5% of 40 rows is where yellow starts.
        assert_eq!(bands.color_for(2), Some(Color::Yellow));
    }

    #[test]
    fn bottom_row_is_the_baseline_band() {
        let mut bands = ColorBands::new();
        for height in [10usize, 20, 50, 100] {
            bands.rescale(height);
            assert_eq!(bands.color_for(height - 1), Some(Color::Green));
        }
    }

    #[test]
    fn rescale_tracks_the_new_height() {
        let mut bands = ColorBands::new();
        bands.rescale(100);
        assert_eq!(bands.scaled_for(), 100);
        assert_eq!(bands.color_for(50), Some(Color::White));

        bands.rescale(10);
        assert_eq!(bands.scaled_for(), 10);
        // Row 50 no longer exists; rows only map within the new extent.
        assert_eq!(bands.color_for(50), None);
        assert_eq!(bands.color_for(5), Some(Color::White));
    }

    #[test]
    fn zero_height_maps_nothing() {
        let mut bands = ColorBands::new();
        bands.rescale(0);
        assert_eq!(bands.color_for(0), None);
    }
}

//! Session state and the tick loop.
//!
//! One logical actor runs everything: key wait (whose timeout is the frame
//! clock), dimension check, sample read, downmix, optional transform, draw,
//! present. All mutable state lives in [`Frame`] for the process lifetime.

use crate::bands::BandMapper;
use crate::colors::ColorBands;
use crate::config::{Glyphs, RunConfig, Toggles, CHANNELS};
use crate::debug::{dbg_log, DebugLogger};
use crate::dsp::{downmix, SpectralEngine};
use crate::peaks::PeakTracker;
use crate::source::FifoSource;
use crate::terminal::Terminal;
use crate::viz::{next_idx, prev_idx, DrawCtx, VISUALS};
use crossterm::event::{KeyCode, KeyModifiers};
use rand::prelude::*;
use std::io;

/// The per-session context: stream handle, transform plan, derived per-tick
/// state. Created once at startup, dropped once at shutdown.
pub struct Frame {
    source: FifoSource,
    engine: SpectralEngine,
    mapper: BandMapper,
    peaks: PeakTracker,
    bands: ColorBands,
    toggles: Toggles,
    glyphs: Glyphs,
    vidx: usize,
    rng: StdRng,
}

impl Frame {
    pub fn new(source: FifoSource, cfg: &RunConfig) -> Self {
        let sample_count = cfg.sample_rate as usize * CHANNELS;
        let engine = SpectralEngine::new(sample_count / CHANNELS);
        let mapper = BandMapper::new(engine.spectrum().len());

        Self {
            source,
            engine,
            mapper,
            peaks: PeakTracker::new(),
            bands: ColorBands::new(),
            toggles: cfg.toggles,
            glyphs: cfg.glyphs,
            vidx: cfg.visual,
            rng: StdRng::from_entropy(),
        }
    }

    fn select(&mut self, idx: usize) {
        if idx != self.vidx {
            self.vidx = idx;
            // A fresh visual starts with hidden markers, like a resize.
            self.peaks.invalidate();
        }
    }

    /// Apply one keypress. Returns true when the session should end.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('c') => {
                if Terminal::supports_color() {
                    self.toggles.colors = !self.toggles.colors;
                }
            }
            KeyCode::Char('p') => self.toggles.peaks = !self.toggles.peaks,
            KeyCode::Char('m') => self.toggles.mono_peaks = !self.toggles.mono_peaks,
            KeyCode::Char('r') => self.toggles.random_peaks = !self.toggles.random_peaks,
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                let n = ch.to_digit(10).unwrap() as usize;
                if (1..=VISUALS.len()).contains(&n) {
                    self.select(n - 1);
                }
            }
            KeyCode::Char('n') | KeyCode::Right => self.select(next_idx(self.vidx)),
            KeyCode::Char('N') | KeyCode::Left => self.select(prev_idx(self.vidx)),
            _ => {}
        }
        false
    }

    /// One iteration of the pipeline: read, reduce, transform, draw.
    pub fn tick(&mut self, term: &mut Terminal) -> io::Result<()> {
        // Dimensions are re-read every tick; that is the only resize signal.
        let (w, h) = crossterm::terminal::size().unwrap_or(term.size());
        if (w, h) != term.size() {
            term.resize(w, h);
            term.clear_screen()?;
        }
        let width = w as usize;
        let height = h as usize;

        if self.bands.scaled_for() != height {
            self.bands.rescale(height);
        }

        let got = self.source.read_block();
        downmix(self.source.samples(), got, CHANNELS, self.engine.input_mut());

        let visual = &VISUALS[self.vidx];
        if visual.needs_dft {
            self.engine.execute();
        }

        // Only some visualizations honor the color toggle.
        let mut toggles = self.toggles;
        if !visual.supports_color {
            toggles.colors = false;
        }

        let grid = term.grid_mut();
        grid.clear();
        let mut ctx = DrawCtx {
            width,
            height,
            frames: got / CHANNELS,
            reduced: self.engine.input(),
            spectrum: self.engine.spectrum(),
            transform_len: self.engine.len(),
            mapper: &mut self.mapper,
            peaks: &mut self.peaks,
            bands: &self.bands,
            toggles: &toggles,
            glyphs: &self.glyphs,
            rng: &mut self.rng,
        };
        (visual.draw)(grid, &mut ctx);

        term.present()
    }
}

/// Acquire resources in order, run the loop, tear down through `Drop`.
pub fn run(cfg: &RunConfig, log: &mut DebugLogger) -> io::Result<()> {
    let sample_count = cfg.sample_rate as usize * CHANNELS;

    dbg_log!(log, "opening fifo {}", cfg.fifo.display());
    let source = FifoSource::open(&cfg.fifo, sample_count)?;

    dbg_log!(
        log,
        "visualization {}, transform length {}, tick {:?}",
        VISUALS[cfg.visual].name,
        sample_count / CHANNELS,
        cfg.tick
    );
    let mut frame = Frame::new(source, cfg);

    let mut term = Terminal::new()?;
    if cfg.toggles.colors && !Terminal::supports_color() {
        return Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "terminal does not support colors",
        ));
    }

    loop {
        // The poll timeout paces the frames; a quiet keyboard still yields
        // one tick per interval.
        if let Some((code, modifiers)) = term.wait_key(cfg.tick)? {
            if frame.handle_key(code, modifiers) {
                dbg_log!(log, "quit requested");
                break;
            }
        }
        frame.tick(&mut term)?;
    }

    Ok(())
}

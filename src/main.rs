mod app;
mod bands;
mod colors;
mod config;
mod debug;
mod dsp;
mod peaks;
mod settings;
mod source;
mod terminal;
mod viz;

use clap::{CommandFactory, Parser};
use config::{Glyphs, RunConfig, Toggles, DEFAULT_FIFO, DEFAULT_FPS, DEFAULT_SAMPLE_RATE};
use debug::{dbg_log, DebugLogger};
use settings::Settings;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "termspec")]
#[command(version)]
#[command(about = "Terminal audio spectrum visualizer fed by a PCM fifo", long_about = None)]
#[command(after_help = "\
Keys: c color  p peaks  m mono peaks  r random peak glyphs
      1/2 select visualization  n/N or arrows cycle  q quit

The fifo carries interleaved little-endian signed 16-bit stereo PCM.")]
struct Cli {
    /// Enable colored output
    #[arg(short = 'c', long)]
    color: bool,

    /// Draw decaying peak markers above the bars
    #[arg(short = 'p', long)]
    peaks: bool,

    /// Give every peak the top band's color instead of its row's
    #[arg(short = 'm', long)]
    mono_peaks: bool,

    /// Draw peaks with random katakana glyphs
    #[arg(short = 'r', long)]
    random_peaks: bool,

    /// Visualization to start with (1 = spectrum, 2 = wave)
    #[arg(short = 'd', long, default_value_t = 1)]
    display: usize,

    /// Write diagnostics to /tmp/termspec.log
    #[arg(short = 'D', long)]
    debug: bool,

    /// Fifo path (default /tmp/audio.fifo)
    fifo: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if !(1..=viz::VISUALS.len()).contains(&cli.display) {
        Cli::command()
            .error(
                clap::error::ErrorKind::InvalidValue,
                format!("display must be between 1 and {}", viz::VISUALS.len()),
            )
            .exit();
    }

    let settings = Settings::load();
    let mut log = DebugLogger::new(cli.debug);
    dbg_log!(log, "settings file: {}", Settings::config_path().display());

    let glyph_defaults = Glyphs::default();
    let cfg = RunConfig {
        fifo: cli
            .fifo
            .or(settings.fifo)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FIFO)),
        tick: Duration::from_millis(1000 / settings.fps.unwrap_or(DEFAULT_FPS).max(1)),
        sample_rate: settings
            .sample_rate
            .filter(|&rate| rate > 0)
            .unwrap_or(DEFAULT_SAMPLE_RATE),
        visual: cli.display - 1,
        toggles: Toggles {
            colors: cli.color,
            peaks: cli.peaks,
            mono_peaks: cli.mono_peaks,
            random_peaks: cli.random_peaks,
        },
        glyphs: Glyphs {
            bar: settings.glyphs.bar.unwrap_or(glyph_defaults.bar),
            peak: settings.glyphs.peak.unwrap_or(glyph_defaults.peak),
            point: settings.glyphs.point.unwrap_or(glyph_defaults.point),
        },
    };

    app::run(&cfg, &mut log)
}

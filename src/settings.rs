use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Optional user settings, read once at startup.
///
/// A missing or malformed file silently yields the defaults; the command
/// line takes precedence over anything set here.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Fifo path override.
    pub fifo: Option<PathBuf>,
    /// Frames per second of the tick loop.
    pub fps: Option<u64>,
    /// Sample rate of the fifo producer (Hz).
    pub sample_rate: Option<u32>,
    #[serde(default)]
    pub glyphs: GlyphSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct GlyphSettings {
    pub bar: Option<char>,
    pub peak: Option<char>,
    pub point: Option<char>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termspec")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;

    #[test]
    fn full_settings_parse() {
        let settings: Settings = toml::from_str(
            r##"
            fifo = "/run/user/1000/mpd.fifo"
            fps = 30
            sample_rate = 44100

            [glyphs]
            bar = "#"
            peak = "^"
            "##,
        )
        .unwrap();

        assert_eq!(
            settings.fifo.as_deref(),
            Some(std::path::Path::new("/run/user/1000/mpd.fifo"))
        );
        assert_eq!(settings.fps, Some(30));
        assert_eq!(settings.sample_rate, Some(44100));
        assert_eq!(settings.glyphs.bar, Some('#'));
        assert_eq!(settings.glyphs.peak, Some('^'));
        assert_eq!(settings.glyphs.point, None);
    }

    #[test]
    fn empty_settings_are_all_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert!(settings.fifo.is_none());
        assert!(settings.fps.is_none());
        assert!(settings.sample_rate.is_none());
        assert!(settings.glyphs.bar.is_none());
    }
}

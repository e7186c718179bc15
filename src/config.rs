//! Support for library configuration options

use std::path::Path;
use std::time::Duration;

use csscolorparser::Color;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Dot color for days covered by a pending task
pub static PENDING_DOT_COLOR: Lazy<Color> = Lazy::new(|| Color::from_rgb_u8(0x4a, 0x90, 0xe2));
/// Dot color for days covered by a completed task
pub static COMPLETED_DOT_COLOR: Lazy<Color> = Lazy::new(|| Color::from_rgb_u8(0x4c, 0xaf, 0x50));

pub static LIGHT_PALETTE: Lazy<Palette> = Lazy::new(|| Palette {
    pending_dot: (*PENDING_DOT_COLOR).clone(),
    completed_dot: (*COMPLETED_DOT_COLOR).clone(),
    selected: Color::from_rgb_u8(0x1e, 0x88, 0xe5),
});

pub static DARK_PALETTE: Lazy<Palette> = Lazy::new(|| Palette {
    pending_dot: (*PENDING_DOT_COLOR).clone(),
    completed_dot: (*COMPLETED_DOT_COLOR).clone(),
    selected: Color::from_rgb_u8(0x5e, 0x81, 0xac),
});

/// Minimum length of a new password
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Scroll offset (in pixels) above which the navigation bar is hidden
pub const NAV_BAR_SCROLL_THRESHOLD: f64 = 1.0;


/// The colors used to build calendar markers
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub pending_dot: Color,
    pub completed_dot: Color,
    pub selected: Color,
}

impl Palette {
    /// The dot color of a task, depending on its completion
    pub fn dot_color(&self, completed: bool) -> &Color {
        if completed { &self.completed_dot } else { &self.pending_dot }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl Theme {
    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT_PALETTE,
            Theme::Dark => &DARK_PALETTE,
        }
    }
}


/// Tunable settings of a task list.
///
/// Every field has a default value, so that a settings file only has to contain the fields it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: Theme,
    /// Duration of the checkbox fill animation
    pub completion_transition_ms: u64,
    /// Duration of the "no task found" fade-in
    pub empty_state_fade_ms: u64,
    /// Duration of the navigation bar show/hide animation
    pub nav_bar_transition_ms: u64,
    /// How far the navigation bar slides down when it is hidden
    pub nav_bar_slide_px: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            completion_transition_ms: 250,
            empty_state_fade_ms: 100,
            nav_bar_transition_ms: 250,
            nav_bar_slide_px: 20.0,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let to_error = |reason: String| Error::Settings { path: path.to_path_buf(), reason };

        let file = std::fs::File::open(path).map_err(|err| to_error(err.to_string()))?;
        let settings = serde_json::from_reader(file).map_err(|err| to_error(err.to_string()))?;
        log::debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn palette(&self) -> &'static Palette {
        self.theme.palette()
    }

    pub fn completion_transition(&self) -> Duration {
        Duration::from_millis(self.completion_transition_ms)
    }

    pub fn empty_state_fade(&self) -> Duration {
        Duration::from_millis(self.empty_state_fade_ms)
    }

    pub fn nav_bar_transition(&self) -> Duration {
        Duration::from_millis(self.nav_bar_transition_ms)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_settings_file() {
        let path = std::env::temp_dir().join(format!("task-calendar-settings-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"{ "theme": "dark", "navBarSlidePx": 200 }"#).unwrap();
        drop(file);

        let settings = Settings::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.nav_bar_slide_px, 200.0);
        assert_eq!(settings.completion_transition(), Duration::from_millis(250));
        assert_eq!(settings.palette().selected, Color::from_rgb_u8(0x5e, 0x81, 0xac));
    }

    #[test]
    fn missing_settings_file() {
        let err = Settings::from_file(Path::new("/this/path/does/not/exist.json")).unwrap_err();
        assert!(matches!(err, Error::Settings{ .. }));
    }

    #[test]
    fn dot_colors() {
        let palette = Theme::Light.palette();
        assert_eq!(palette.dot_color(true).to_hex_string(), "#4caf50");
        assert_eq!(palette.dot_color(false).to_hex_string(), "#4a90e2");
    }
}

//! brisk configuration
//!
//! Settings are read from `brisk.toml`; every field has a default so a
//! missing file or a partial file is fine. A few environment variables
//! override file values for quick experiments.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "brisk.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BriskConfig {
    pub style: StyleConfig,
    pub limits: LimitsConfig,
    pub input: InputConfig,
    pub demo: DemoConfig,
}

/// Default style pushed at the bottom of the style stack.
///
/// Colors are `[r, g, b, a]`, vectors are `[x, y]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub font_size: f32,
    /// Pixel size of the icon font, when one is loaded.
    pub icon_size: f32,
    pub text_color: [u8; 4],
    pub border_color: [u8; 4],
    pub opaque_bg_color: [u8; 4],
    pub transparent_bg_color: [u8; 4],
    pub text_padding: [f32; 2],
    pub child_padding: [f32; 2],
    pub border_width: f32,
    pub rounding: f32,
}

/// Fixed capacities of the per-frame buffers and the glyph atlas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_vertices: usize,
    pub max_indices: usize,
    pub atlas_size: u32,
    pub glyph_padding: u32,
}

/// Interaction tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Seconds between presses for a double click.
    pub double_click_time: f32,
    /// Mouse travel in pixels beyond which a press no longer counts toward a double click.
    pub double_click_distance: f32,
    /// Per-frame lerp factor of the hover/hold animations.
    pub hover_smoothing: f32,
    pub scroll_wheel_step: f32,
    pub scrollbar_thickness: f32,
    pub splitter_half_width: f32,
    /// Travel multiplier while Alt is held during a drag.
    pub drag_slow_factor: f32,
    /// Travel multiplier while Shift is held during a drag.
    pub drag_fast_factor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// TrueType/OpenType font for the demo; the block rasterizer is used when unset.
    pub font: Option<PathBuf>,
    /// Number of frames the headless demo simulates.
    pub frames: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            icon_size: 18.0,
            text_color: [255, 255, 255, 255],
            border_color: [0, 0, 0, 128],
            opaque_bg_color: [50, 50, 50, 255],
            transparent_bg_color: [255, 255, 255, 50],
            text_padding: [10.0, 5.0],
            child_padding: [12.0, 12.0],
            border_width: 2.0,
            rounding: 4.0,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_vertices: 131_072,
            max_indices: 262_144,
            atlas_size: 1024,
            glyph_padding: 1,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            double_click_time: 0.2,
            double_click_distance: 2.0,
            hover_smoothing: 0.2,
            scroll_wheel_step: 30.0,
            scrollbar_thickness: 18.0,
            splitter_half_width: 2.0,
            drag_slow_factor: 1.0 / 50.0,
            drag_fast_factor: 50.0,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { font: None, frames: 3 }
    }
}

impl BriskConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `brisk.toml` from the working directory, falling back to defaults.
    pub fn load_or_default() -> Self {
        match Self::load_from_file(CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                tracing::warn!(error = %err, "using default configuration");
                Self::default()
            }
        }
    }

    /// Apply environment overrides. Environment values win over the file.
    pub fn merge_with_env(&mut self) {
        if let Ok(font) = std::env::var("BRISK_FONT") {
            self.demo.font = Some(PathBuf::from(font));
        }
        if let Some(size) = env_parse::<f32>("BRISK_FONT_SIZE") {
            self.style.font_size = size;
        }
        if let Some(size) = env_parse::<u32>("BRISK_ATLAS_SIZE") {
            self.limits.atlas_size = size;
        }
        if let Some(frames) = env_parse::<u32>("BRISK_DEMO_FRAMES") {
            self.demo.frames = frames;
        }
    }

    /// File (or defaults) plus environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var = name, value = %value, "ignoring unparsable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BriskConfig::default();
        assert_eq!(config.style.font_size, 18.0);
        assert_eq!(config.limits.max_vertices, 131_072);
        assert_eq!(config.input.double_click_time, 0.2);
        assert!(config.demo.font.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = BriskConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = BriskConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed = BriskConfig::from_toml_str(
            r#"
            [style]
            font_size = 24.0
            text_color = [10, 20, 30, 255]

            [limits]
            atlas_size = 512
            "#,
        )
        .unwrap();
        assert_eq!(parsed.style.font_size, 24.0);
        assert_eq!(parsed.style.text_color, [10, 20, 30, 255]);
        assert_eq!(parsed.style.rounding, 4.0);
        assert_eq!(parsed.limits.atlas_size, 512);
        assert_eq!(parsed.limits.max_indices, 262_144);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = BriskConfig::load_from_file("definitely/not/here/brisk.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("brisk-config-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("brisk.toml");
        std::fs::write(&path, "[style\nfont_size = ").unwrap();
        let err = BriskConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("BRISK_FONT_SIZE", "22");
            std::env::set_var("BRISK_DEMO_FRAMES", "not-a-number");
        }

        let mut config = BriskConfig::default();
        config.merge_with_env();

        assert_eq!(config.style.font_size, 22.0);
        assert_eq!(config.demo.frames, 3);

        unsafe {
            std::env::remove_var("BRISK_FONT_SIZE");
            std::env::remove_var("BRISK_DEMO_FRAMES");
        }
    }
}

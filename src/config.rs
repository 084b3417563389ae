use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

const APP_DIR_NAME: &str = "torus-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 45;

/// Food placed when a session starts.
pub const DEFAULT_INITIAL_FOOD: usize = 10;

/// Food count below which eating triggers a small refill.
pub const DEFAULT_LOW_WATER_MARK: usize = 5;

/// Upper bound (inclusive) of the refill batch after eating below the low-water mark.
pub const DEFAULT_LOW_WATER_REFILL_MAX: usize = 2;

/// Upper bound (inclusive) of the refill batch once the board has no food left.
pub const DEFAULT_EMPTY_REFILL_MAX: usize = 5;

/// Points granted per food item.
pub const DEFAULT_SCORE_PER_FOOD: u32 = 10;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Length of the snake when a session starts.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Interval at which the terminal front end redraws and polls input.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Glyphs used by the terminal renderer.
pub const GLYPH_FOOD: &str = "●";
pub const GLYPH_SNAKE_BODY: &str = "■";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
pub const GLYPH_COLLISION: &str = "×";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Tunable parameters of one game session.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub initial_food: usize,
    pub low_water_mark: usize,
    pub low_water_refill_max: usize,
    pub empty_refill_max: usize,
    pub score_per_food: u32,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            initial_food: DEFAULT_INITIAL_FOOD,
            low_water_mark: DEFAULT_LOW_WATER_MARK,
            low_water_refill_max: DEFAULT_LOW_WATER_REFILL_MAX,
            empty_refill_max: DEFAULT_EMPTY_REFILL_MAX,
            score_per_food: DEFAULT_SCORE_PER_FOOD,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Returns a default configuration with the given grid dimensions.
    #[must_use]
    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Returns the tick cadence as a duration.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Checks that a session can be started with this configuration.
    ///
    /// The starting snake runs vertically, so the grid must be at least as
    /// tall as it is long, and the grid must have room left over once the
    /// snake and the initial food are placed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }

        if usize::from(self.height) < INITIAL_SNAKE_LENGTH {
            return Err(ConfigError::TooShort {
                height: self.height,
                snake_len: INITIAL_SNAKE_LENGTH,
            });
        }

        let cells = self.bounds().total_cells();
        let occupied = INITIAL_SNAKE_LENGTH.checked_add(self.initial_food);
        if occupied.is_none_or(|occupied| occupied >= cells) {
            return Err(ConfigError::OverCapacity {
                cells,
                snake_len: INITIAL_SNAKE_LENGTH,
                food: self.initial_food,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(())
    }

    /// Returns the platform-correct config file path, if one can be determined.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Reads a configuration from a JSON file.
    ///
    /// Returns the defaults when the file does not exist and `allow_missing`
    /// is set. The loaded values are not validated here; the game does that
    /// when it is constructed.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound && allow_missing => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "loaded config file");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::error::ConfigError;

    use super::{GameConfig, GridSize};

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(
            config.bounds(),
            GridSize {
                width: 30,
                height: 45
            }
        );
        assert_eq!(config.bounds().total_cells(), 1350);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let config = GameConfig::with_size(0, 10);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn grid_shorter_than_snake_is_rejected() {
        let config = GameConfig::with_size(10, 2);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooShort { height: 2, .. })
        ));
    }

    #[test]
    fn grid_without_spare_cell_is_rejected() {
        let config = GameConfig {
            initial_food: 6,
            ..GameConfig::with_size(3, 3)
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::OverCapacity { cells: 9, .. })
        ));

        let config = GameConfig {
            initial_food: 5,
            ..GameConfig::with_size(3, 3)
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn huge_initial_food_is_rejected() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "initial-food": 18446744073709551615 }"#)
                .expect("fits in usize");

        assert!(matches!(
            config.validate(),
            Err(ConfigError::OverCapacity {
                food: usize::MAX,
                ..
            })
        ));
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..GameConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroTickInterval)
        ));
    }

    #[test]
    fn partial_config_file_falls_back_to_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "width": 12, "score-per-food": 3 }"#);

        let config = GameConfig::load(&path, false).expect("config should load");

        assert_eq!(config.width, 12);
        assert_eq!(config.score_per_food, 3);
        assert_eq!(config.height, super::DEFAULT_GRID_HEIGHT);
        assert_eq!(config.initial_food, super::DEFAULT_INITIAL_FOOD);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_config_file_returns_defaults_when_allowed() {
        let path = unique_test_path("missing");

        let config = GameConfig::load(&path, true).expect("missing file should be allowed");
        assert_eq!(config, GameConfig::default());

        assert!(matches!(
            GameConfig::load(&path, false),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn malformed_config_file_returns_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        assert!(matches!(
            GameConfig::load(&path, true),
            Err(ConfigError::Parse { .. })
        ));

        cleanup_test_path(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join(format!("torus-snake-config-{label}-{nanos}"))
            .join("config.json")
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}

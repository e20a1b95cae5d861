use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::geometry::Rect;
use crate::state::Side;
use crate::vision::HsvRange;

/// A goal rectangle and the side it credits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalArea {
    pub side: Side,
    pub rect: Rect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Expected frame width in pixels, requested from the camera
    pub frame_width: u32,

    /// Expected frame height in pixels
    pub frame_height: u32,

    /// Camera device index handed to the capture backend
    pub camera_index: i32,

    /// Goal rectangles; each one credits the side it is tagged with
    pub goal_areas: Vec<GoalArea>,

    /// Handball band [top, bottom] in frame rows; y strictly inside triggers
    pub handball_band: [u32; 2],

    /// HSV bounds for ball segmentation (8-bit scale, hue 0-180)
    pub ball_color: HsvRange,

    /// Minimum blob area in pixels; a blob must exceed this to qualify
    pub min_blob_area: f32,

    /// Replay overlay duration in seconds
    pub freeze_secs: f64,

    /// Weight of the frozen frame in the replay blend (0-1]
    pub blend_alpha: f32,

    /// Number of frames to run in benchmark mode
    pub bench_frames: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_width: 640,
            frame_height: 480,
            camera_index: 0,
            goal_areas: vec![GoalArea {
                side: Side::Team1,
                rect: Rect::new(200, 100, 240, 200),
            }],
            handball_band: [50, 200],
            ball_color: HsvRange::white_ball(),
            min_blob_area: 200.0,
            freeze_secs: 2.0,
            blend_alpha: 0.7,
            bench_frames: 500,
        }
    }
}

impl Config {
    /// Load configuration from the app's config directory.
    /// Creates a default config file if none exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::LoadFailed {
                path: config_path.display().to_string(),
                source: Box::new(e),
            })?;
            let config: Config =
                serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: config_path.display().to_string(),
                    source: Box::new(e),
                })?;
            tracing::info!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            tracing::info!(path = %config_path.display(), "created default config");
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: config_path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(&config_path, json).map_err(|e| ConfigError::SaveFailed {
            path: config_path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    /// Get the config file path (in app's base directory)
    fn config_path() -> Result<PathBuf, ConfigError> {
        let exe_path = env::current_exe().map_err(|e| ConfigError::LoadFailed {
            path: "<current_exe>".to_string(),
            source: Box::new(e),
        })?;
        let exe_dir = exe_path
            .parent()
            .ok_or_else(|| ConfigError::Invalid("could not determine executable directory".into()))?;

        Ok(exe_dir.join("config").join("config.json"))
    }

    /// Fail-fast validation of all zone geometry and pipeline parameters.
    ///
    /// A goal rectangle outside the frame would silently never match, so it
    /// is rejected here rather than at classification time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "frame size must be nonzero, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }

        if self.goal_areas.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one goal area is required".into(),
            ));
        }
        for area in &self.goal_areas {
            let rect = &area.rect;
            if rect.width == 0 || rect.height == 0 {
                return Err(ConfigError::Invalid(format!(
                    "goal area has zero size: {:?}",
                    rect
                )));
            }
            let fits = rect.x as u64 + rect.width as u64 <= self.frame_width as u64
                && rect.y as u64 + rect.height as u64 <= self.frame_height as u64;
            if !fits {
                return Err(ConfigError::Invalid(format!(
                    "goal area {:?} exceeds the {}x{} frame",
                    rect, self.frame_width, self.frame_height
                )));
            }
        }

        let [top, bottom] = self.handball_band;
        if top >= bottom || bottom > self.frame_height {
            return Err(ConfigError::Invalid(format!(
                "handball band [{}, {}] must be ordered and inside the {} row frame",
                top, bottom, self.frame_height
            )));
        }

        if !self.ball_color.is_ordered() {
            return Err(ConfigError::Invalid(
                "ball_color lower bound exceeds upper bound".into(),
            ));
        }

        if !self.min_blob_area.is_finite() || self.min_blob_area < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_blob_area must be non-negative, got {}",
                self.min_blob_area
            )));
        }

        if !self.freeze_secs.is_finite() || self.freeze_secs <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "freeze_secs must be positive, got {}",
                self.freeze_secs
            )));
        }

        if !self.blend_alpha.is_finite() || self.blend_alpha <= 0.0 || self.blend_alpha > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "blend_alpha must be in (0, 1], got {}",
                self.blend_alpha
            )));
        }

        if self.bench_frames == 0 {
            return Err(ConfigError::Invalid("bench_frames must be at least 1".into()));
        }

        Ok(())
    }
}

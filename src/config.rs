use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

use crate::types::chapter::{Chapter, ChapterError, ChapterList, default_chapters};

pub const PROGNAME: &str = "chapterplay";
pub const CONFIG_NAME: &str = "config.toml";
pub const DEFAULT_VIDEO_URI: &str = "https://media.w3.org/2010/05/sintel/trailer.mp4";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing config file as TOML")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Chapters(#[from] ChapterError),
    #[error("tick_interval_ms must be greater than zero")]
    ZeroTick,
}

/// How a click on a chapter is turned into a seek target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineSeekMode {
    /// `chapter_seconds / 100 * duration`, as the widget always behaved.
    #[default]
    Legacy,
    /// Seek straight to the chapter's start second.
    Absolute,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSettings {
    video_uri: String,
    tick_interval_ms: u64,
    timeline_seek: TimelineSeekMode,
    window: WindowSettings,
    chapters: Vec<Chapter>,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            video_uri: DEFAULT_VIDEO_URI.to_string(),
            tick_interval_ms: 1000,
            timeline_seek: TimelineSeekMode::default(),
            window: WindowSettings::default(),
            chapters: default_chapters(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub video_uri: String,
    pub tick_interval: Duration,
    pub timeline_seek: TimelineSeekMode,
    pub window: WindowSettings,
    pub chapters: ChapterList,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            video_uri: DEFAULT_VIDEO_URI.to_string(),
            tick_interval: Duration::from_secs(1),
            timeline_seek: TimelineSeekMode::default(),
            window: WindowSettings::default(),
            chapters: ChapterList::default(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(conts: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings = toml::from_str(conts)?;
        if raw.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(Self {
            video_uri: raw.video_uri,
            tick_interval: Duration::from_millis(raw.tick_interval_ms),
            timeline_seek: raw.timeline_seek,
            window: raw.window,
            chapters: ChapterList::new(raw.chapters)?,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let conts = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&conts)
    }

    /// Loads `path` if given. Otherwise the file in the user's config dir, falling
    /// back to built-in defaults when that file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match conf_dir().map(|dir| dir.join(CONFIG_NAME)) {
            Some(default_path) if default_path.is_file() => Self::load(&default_path),
            _ => {
                log::debug!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }
}

pub fn conf_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(PROGNAME))
}

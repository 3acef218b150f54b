use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ops::time_funcs::{TimeParseError, parse_timestamp};

/// A named marker on the video timeline, starting at a fixed "HH:MM:SS" timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub label: String,
    pub timestamp: String,
}

impl Chapter {
    pub fn new(label: &str, timestamp: &str) -> Self {
        Self {
            label: label.to_string(),
            timestamp: timestamp.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChapterError {
    #[error("chapter '{label}' has an invalid timestamp")]
    Timestamp {
        label: String,
        #[source]
        source: TimeParseError,
    },
    #[error("chapter label '{0}' is used more than once")]
    DuplicateLabel(String),
}

/// Ordered, validated list of chapters. Fixed once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterList {
    chapters: Vec<Chapter>,
    seconds: Vec<u64>,
}

impl ChapterList {
    pub fn new(chapters: Vec<Chapter>) -> Result<Self, ChapterError> {
        let mut seconds = Vec::with_capacity(chapters.len());
        for (i, chapter) in chapters.iter().enumerate() {
            if chapters[..i].iter().any(|c| c.label == chapter.label) {
                return Err(ChapterError::DuplicateLabel(chapter.label.clone()));
            }
            let secs =
                parse_timestamp(&chapter.timestamp).map_err(|source| ChapterError::Timestamp {
                    label: chapter.label.clone(),
                    source,
                })?;
            seconds.push(secs);
        }
        Ok(Self { chapters, seconds })
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters.iter()
    }

    /// Start of the chapter at `index`, in seconds.
    pub fn seconds_of(&self, index: usize) -> Option<u64> {
        self.seconds.get(index).copied()
    }

    /// Index of the chapter whose timestamp equals `timestamp` exactly.
    pub fn position_of_timestamp(&self, timestamp: &str) -> Option<usize> {
        self.chapters.iter().position(|c| c.timestamp == timestamp)
    }
}

impl Default for ChapterList {
    fn default() -> Self {
        match Self::new(default_chapters()) {
            Ok(list) => list,
            Err(e) => {
                log::error!("Built-in chapters are invalid, showing none: {}", e);
                Self {
                    chapters: Vec::new(),
                    seconds: Vec::new(),
                }
            }
        }
    }
}

pub fn default_chapters() -> Vec<Chapter> {
    vec![
        Chapter::new("Introduction", "00:00:00"),
        Chapter::new("Gameplay Mechanics", "00:00:10"),
        Chapter::new("Character Introductions", "00:00:20"),
        Chapter::new("Boss Battles", "00:00:30"),
        Chapter::new("World Exploration", "00:00:40"),
        Chapter::new("Conclusion", "00:00:50"),
    ]
}

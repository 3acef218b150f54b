/// Runtime-only state of the player widget. Discarded when the window closes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub progress_percent: f64, // 0..=100
    pub total_duration: f64,   // seconds
    pub is_playing: bool,
    pub is_muted: bool,
    pub is_fullscreen: bool,
    /// Set once playback reaches the end. Never cleared.
    pub is_complete: bool,
    pub active_chapter: usize,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            progress_percent: 0.0,
            total_duration: 0.0,
            is_playing: false,
            is_muted: false,
            is_fullscreen: false,
            is_complete: false,
            active_chapter: 0,
        }
    }

    /// Playback position implied by the progress percentage.
    pub fn elapsed_seconds(&self) -> f64 {
        self.progress_percent / 100.0 * self.total_duration
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

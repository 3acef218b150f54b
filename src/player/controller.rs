use crate::config::TimelineSeekMode;
use crate::ops::time_funcs::{format_time, parse_timestamp};
use crate::player::media_element::{FullscreenSurface, MediaElement, SeekUnit};
use crate::types::chapter::ChapterList;
use crate::types::playback_state::PlaybackState;

/// Owns the playback state and turns UI intents into media element calls.
///
/// Every operation that needs the element is a no-op while no element is attached.
pub struct PlaybackController<E> {
    element: Option<E>,
    chapters: ChapterList,
    state: PlaybackState,
    timeline_seek: TimelineSeekMode,
}

impl<E: MediaElement> PlaybackController<E> {
    pub fn new(element: Option<E>, chapters: ChapterList, timeline_seek: TimelineSeekMode) -> Self {
        Self {
            element,
            chapters,
            state: PlaybackState::new(),
            timeline_seek,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn chapters(&self) -> &ChapterList {
        &self.chapters
    }

    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    pub fn element_mut(&mut self) -> Option<&mut E> {
        self.element.as_mut()
    }

    /// Media metadata became available.
    pub fn on_ready(&mut self) {
        let Some(element) = self.element.as_ref() else {
            return;
        };
        self.state.total_duration = element.duration();
        log::info!(
            "Media ready, duration {}",
            format_time(self.state.total_duration)
        );
    }

    pub fn on_toggle_play(&mut self) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        self.state.is_playing = !self.state.is_playing;
        if let Err(e) = element.set_playing(self.state.is_playing) {
            log::warn!("Failed to switch playback: {}", e);
        }
    }

    pub fn on_toggle_mute(&mut self) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        self.state.is_muted = !self.state.is_muted;
        element.set_muted(self.state.is_muted);
    }

    pub fn on_toggle_fullscreen(&mut self, surface: &mut impl FullscreenSurface) {
        if surface.is_fullscreen() {
            surface.exit_fullscreen();
        } else {
            surface.request_fullscreen();
        }
        self.state.is_fullscreen = !self.state.is_fullscreen;
    }

    /// The surface changed fullscreen state on its own (e.g. Escape).
    pub fn on_fullscreen_change(&mut self, is_fullscreen: bool) {
        if !is_fullscreen {
            self.state.is_fullscreen = false;
        }
    }

    /// The user dragged the seek slider to `percent`.
    pub fn on_slider_drag(&mut self, percent: f64) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        let percent = percent.clamp(0.0, 100.0);
        let target = percent / 100.0 * element.duration();
        if let Err(e) = element.seek_to(target, SeekUnit::Seconds) {
            log::warn!("Seek to {} failed: {}", target, e);
        }
        self.state.progress_percent = percent;
        self.state.active_chapter = self
            .chapters
            .position_of_timestamp(&format_time(target))
            .unwrap_or(0);
        log::debug!(
            "Slider moved to {:.1}%, active chapter {}",
            percent,
            self.state.active_chapter
        );
    }

    /// Seeks to a chapter's "HH:MM:SS" timestamp using the configured formula.
    pub fn on_timeline_seek(&mut self, timestamp: &str) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        let secs = match parse_timestamp(timestamp) {
            Ok(secs) => secs as f64,
            Err(e) => {
                log::warn!("Ignoring timeline seek: {}", e);
                return;
            }
        };
        let duration = element.duration();
        let target = match self.timeline_seek {
            TimelineSeekMode::Legacy => secs / 100.0 * duration,
            TimelineSeekMode::Absolute => secs,
        };

        if target > duration {
            log::warn!("Seek time exceeds video duration.");
            return;
        }
        if let Err(e) = element.seek_to(target, SeekUnit::Seconds) {
            log::warn!("Seek to {} failed: {}", target, e);
        }
        self.state.progress_percent = if duration > 0.0 {
            target / duration * 100.0
        } else {
            0.0
        };
        log::debug!("Timeline seek to {} ({} s)", timestamp, target);
    }

    /// A step in the chapter list was clicked.
    pub fn on_chapter_selected(&mut self, index: usize) {
        let Some(chapter) = self.chapters.get(index) else {
            return;
        };
        let timestamp = chapter.timestamp.clone();
        self.state.active_chapter = index;
        self.on_timeline_seek(&timestamp);
    }

    /// Periodic poll of the playback position.
    pub fn on_tick(&mut self) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        let duration = element.duration();
        if !(duration > 0.0) || self.state.is_complete {
            return;
        }

        let played = element.current_time();
        if played >= duration {
            self.state.is_playing = false;
            if let Err(e) = element.set_playing(false) {
                log::warn!("Failed to stop playback: {}", e);
            }
            self.state.progress_percent = 0.0;
            self.state.is_complete = true;
            log::info!("Playback complete");
        } else if self.state.is_playing {
            self.state.progress_percent = played / duration * 100.0;
        }
    }

    /// The element failed for good. Drops it so every control goes inert.
    pub fn on_element_error(&mut self, message: &str) {
        if self.element.is_none() {
            return;
        }
        log::error!("Media element failed, disabling playback: {}", message);
        self.teardown();
    }

    /// Stops playback and releases the element.
    pub fn teardown(&mut self) {
        if let Some(mut element) = self.element.take() {
            if let Err(e) = element.set_playing(false) {
                log::warn!("Failed to stop playback on teardown: {}", e);
            }
            log::debug!("Playback controller torn down");
        }
        self.state.is_playing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerError;
    use crate::types::chapter::Chapter;

    #[derive(Debug, Default)]
    struct FakeElement {
        time: f64,
        duration: f64,
        playing: bool,
        muted: bool,
        seeks: Vec<(f64, SeekUnit)>,
        play_calls: usize,
    }

    impl FakeElement {
        fn with_duration(duration: f64) -> Self {
            Self {
                duration,
                ..Default::default()
            }
        }
    }

    impl MediaElement for FakeElement {
        fn current_time(&self) -> f64 {
            self.time
        }

        fn duration(&self) -> f64 {
            self.duration
        }

        fn seek_to(&mut self, value: f64, unit: SeekUnit) -> Result<(), PlayerError> {
            self.seeks.push((value, unit));
            self.time = value;
            Ok(())
        }

        fn set_playing(&mut self, playing: bool) -> Result<(), PlayerError> {
            self.playing = playing;
            self.play_calls += 1;
            Ok(())
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
    }

    #[derive(Default)]
    struct FakeSurface {
        fullscreen: bool,
    }

    impl FullscreenSurface for FakeSurface {
        fn is_fullscreen(&self) -> bool {
            self.fullscreen
        }

        fn request_fullscreen(&mut self) {
            self.fullscreen = true;
        }

        fn exit_fullscreen(&mut self) {
            self.fullscreen = false;
        }
    }

    fn controller(duration: f64) -> PlaybackController<FakeElement> {
        let mut c = PlaybackController::new(
            Some(FakeElement::with_duration(duration)),
            ChapterList::default(),
            TimelineSeekMode::Legacy,
        );
        c.on_ready();
        c
    }

    fn element(c: &PlaybackController<FakeElement>) -> &FakeElement {
        c.element().unwrap()
    }

    #[test]
    fn test_on_ready_reads_duration() {
        let c = controller(52.2);
        assert_eq!(c.state().total_duration, 52.2);
    }

    #[test]
    fn test_slider_drag_example() {
        let mut c = PlaybackController::new(
            Some(FakeElement::with_duration(60.0)),
            ChapterList::new(vec![
                Chapter::new("Introduction", "00:00:00"),
                Chapter::new("Gameplay Mechanics", "00:00:10"),
            ])
            .unwrap(),
            TimelineSeekMode::Legacy,
        );
        c.on_ready();
        c.on_slider_drag(50.0);

        assert_eq!(element(&c).seeks, vec![(30.0, SeekUnit::Seconds)]);
        assert_eq!(c.state().progress_percent, 50.0);
    }

    #[test]
    fn test_slider_drag_seeks_proportionally() {
        let mut c = controller(80.0);
        for p in [0.0, 12.5, 25.0, 99.0, 100.0] {
            c.on_slider_drag(p);
            assert_eq!(element(&c).seeks.last(), Some(&(p / 100.0 * 80.0, SeekUnit::Seconds)));
            assert_eq!(c.state().progress_percent, p);
        }
    }

    #[test]
    fn test_slider_drag_clamps_percent() {
        let mut c = controller(60.0);
        c.on_slider_drag(140.0);
        assert_eq!(c.state().progress_percent, 100.0);
        assert_eq!(element(&c).seeks.last(), Some(&(60.0, SeekUnit::Seconds)));
        c.on_slider_drag(-3.0);
        assert_eq!(c.state().progress_percent, 0.0);
    }

    #[test]
    fn test_slider_drag_resolves_chapter() {
        let mut c = controller(60.0);
        // 50% of 60 s is 00:00:30, the fourth chapter
        c.on_slider_drag(50.0);
        assert_eq!(c.state().active_chapter, 3);
        // 00:00:12 matches no chapter start
        c.on_slider_drag(20.0);
        assert_eq!(c.state().active_chapter, 0);
    }

    #[test]
    fn test_chapter_click_legacy_formula() {
        let mut c = controller(60.0);
        c.on_chapter_selected(1);

        assert_eq!(c.state().active_chapter, 1);
        // 10 / 100 * 60
        assert_eq!(element(&c).seeks, vec![(6.0, SeekUnit::Seconds)]);
        assert!((c.state().progress_percent - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_chapter_click_absolute_formula() {
        let mut c = PlaybackController::new(
            Some(FakeElement::with_duration(60.0)),
            ChapterList::default(),
            TimelineSeekMode::Absolute,
        );
        c.on_ready();
        c.on_chapter_selected(4);

        assert_eq!(c.state().active_chapter, 4);
        assert_eq!(element(&c).seeks, vec![(40.0, SeekUnit::Seconds)]);
    }

    #[test]
    fn test_timeline_seek_beyond_duration_is_discarded() {
        let mut c = PlaybackController::new(
            Some(FakeElement::with_duration(30.0)),
            ChapterList::default(),
            TimelineSeekMode::Absolute,
        );
        c.on_ready();
        c.on_slider_drag(10.0);
        let seeks_before = element(&c).seeks.len();

        c.on_timeline_seek("00:00:50");
        assert_eq!(element(&c).seeks.len(), seeks_before);
        assert_eq!(c.state().progress_percent, 10.0);
    }

    #[test]
    fn test_timeline_seek_ignores_malformed_timestamp() {
        let mut c = controller(60.0);
        c.on_timeline_seek("ten seconds");
        assert!(element(&c).seeks.is_empty());
    }

    #[test]
    fn test_chapter_click_out_of_range_is_ignored() {
        let mut c = controller(60.0);
        c.on_chapter_selected(6);
        assert_eq!(c.state().active_chapter, 0);
        assert!(element(&c).seeks.is_empty());
    }

    #[test]
    fn test_tick_updates_progress_while_playing() {
        let mut c = controller(40.0);
        c.element_mut().unwrap().time = 10.0;
        c.on_tick();
        assert_eq!(c.state().progress_percent, 0.0);

        c.on_toggle_play();
        c.on_tick();
        assert_eq!(c.state().progress_percent, 25.0);
    }

    #[test]
    fn test_tick_marks_completion_once() {
        let mut c = controller(40.0);
        c.on_toggle_play();
        c.element_mut().unwrap().time = 40.0;
        c.on_tick();

        let state = c.state().clone();
        assert!(state.is_complete);
        assert!(!state.is_playing);
        assert_eq!(state.progress_percent, 0.0);
        assert!(!element(&c).playing);
        let calls = element(&c).play_calls;

        // Later ticks change nothing, even when playback resumes
        c.on_toggle_play();
        c.element_mut().unwrap().time = 12.0;
        c.on_tick();
        c.element_mut().unwrap().time = 45.0;
        c.on_tick();
        assert!(c.state().is_complete);
        assert_eq!(c.state().progress_percent, 0.0);
        assert_eq!(element(&c).play_calls, calls + 1);
    }

    #[test]
    fn test_tick_waits_for_duration() {
        let mut c = controller(0.0);
        c.on_toggle_play();
        c.on_tick();
        assert!(!c.state().is_complete);
    }

    #[test]
    fn test_toggles_are_involutions() {
        let mut c = controller(60.0);
        let mut surface = FakeSurface::default();
        let initial = c.state().clone();

        c.on_toggle_mute();
        assert!(c.state().is_muted);
        assert!(element(&c).muted);
        c.on_toggle_mute();

        c.on_toggle_play();
        assert!(element(&c).playing);
        c.on_toggle_play();

        c.on_toggle_fullscreen(&mut surface);
        assert!(surface.fullscreen);
        assert!(c.state().is_fullscreen);
        c.on_toggle_fullscreen(&mut surface);
        assert!(!surface.fullscreen);

        assert_eq!(c.state(), &initial);
        assert!(!element(&c).muted);
        assert!(!element(&c).playing);
    }

    #[test]
    fn test_external_fullscreen_exit_resyncs() {
        let mut c = controller(60.0);
        let mut surface = FakeSurface::default();
        c.on_toggle_fullscreen(&mut surface);
        c.on_fullscreen_change(true);
        assert!(c.state().is_fullscreen);
        c.on_fullscreen_change(false);
        assert!(!c.state().is_fullscreen);
    }

    #[test]
    fn test_absent_element_is_a_no_op() {
        let mut c: PlaybackController<FakeElement> =
            PlaybackController::new(None, ChapterList::default(), TimelineSeekMode::Legacy);
        c.on_ready();
        c.on_toggle_play();
        c.on_toggle_mute();
        c.on_slider_drag(50.0);
        c.on_timeline_seek("00:00:10");
        c.on_tick();
        assert_eq!(c.state(), &PlaybackState::new());
    }

    #[test]
    fn test_element_error_disables_controls() {
        let mut c = controller(60.0);
        c.on_toggle_play();
        c.on_element_error("decoder vanished");

        assert!(c.element().is_none());
        assert!(!c.state().is_playing);
        c.on_toggle_mute();
        c.on_chapter_selected(2);
        assert!(!c.state().is_muted);
        assert_eq!(c.state().progress_percent, 0.0);
    }

    #[test]
    fn test_teardown_releases_element() {
        let mut c = controller(60.0);
        c.on_toggle_play();
        c.teardown();
        assert!(c.element().is_none());
        assert!(!c.state().is_playing);

        c.on_slider_drag(50.0);
        assert_eq!(c.state().progress_percent, 0.0);
    }
}

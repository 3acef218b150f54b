use eframe::egui;

use crate::player::media_element::FullscreenSurface;

/// The native window viewport acting as the fullscreen container.
pub struct ViewportFullscreen<'a> {
    ctx: &'a egui::Context,
}

impl<'a> ViewportFullscreen<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl FullscreenSurface for ViewportFullscreen<'_> {
    fn is_fullscreen(&self) -> bool {
        self.ctx
            .input(|i| i.viewport().fullscreen)
            .unwrap_or(false)
    }

    fn request_fullscreen(&mut self) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
    }

    fn exit_fullscreen(&mut self) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
    }
}

/// Reports fullscreen transitions observed between frames.
#[derive(Debug, Default)]
pub struct FullscreenWatcher {
    last: bool,
    detached: bool,
}

impl FullscreenWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the new state when it differs from the one seen last frame.
    pub fn observe(&mut self, is_fullscreen: bool) -> Option<bool> {
        if self.detached || is_fullscreen == self.last {
            return None;
        }
        self.last = is_fullscreen;
        Some(is_fullscreen)
    }

    pub fn detach(&mut self) {
        self.detached = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watcher_reports_transitions_only() {
        let mut watcher = FullscreenWatcher::new();
        assert_eq!(watcher.observe(false), None);
        assert_eq!(watcher.observe(true), Some(true));
        assert_eq!(watcher.observe(true), None);
        assert_eq!(watcher.observe(false), Some(false));
    }

    #[test]
    fn test_detached_watcher_is_silent() {
        let mut watcher = FullscreenWatcher::new();
        watcher.detach();
        assert_eq!(watcher.observe(true), None);
    }
}

use std::time::{Duration, Instant};

use eframe::egui;

use crate::ops::tick::Ticker;
use crate::player::controller::PlaybackController;
use crate::player::gst_player::{GstPlayer, PlayerEvent};
use crate::player::media_element::FullscreenSurface;
use crate::ui::chapter_list::{ChapterListEvent, ChapterListState, ChapterListWidget};
use crate::ui::fullscreen::{FullscreenWatcher, ViewportFullscreen};
use crate::ui::video_player::{VideoPlayer, VideoPlayerEvent};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct ChapterPlayerApp {
    controller: PlaybackController<GstPlayer>,
    video_player: VideoPlayer,
    chapter_list: ChapterListState,
    ticker: Ticker,
    fullscreen: FullscreenWatcher,
}

impl ChapterPlayerApp {
    pub fn new(controller: PlaybackController<GstPlayer>, tick_interval: Duration) -> Self {
        Self {
            controller,
            video_player: VideoPlayer::new(),
            chapter_list: ChapterListState::new(),
            ticker: Ticker::new(tick_interval),
            fullscreen: FullscreenWatcher::new(),
        }
    }

    /// Pump pipeline messages and the newest decoded frame.
    fn poll_player(&mut self, ctx: &egui::Context) {
        let Some(player) = self.controller.element_mut() else {
            return;
        };
        let events = player.poll_events();
        let frame = player.take_frame();

        if let Some(frame) = frame {
            self.video_player.update_texture(&frame, ctx);
        }
        for event in events {
            match event {
                PlayerEvent::Ready => self.controller.on_ready(),
                PlayerEvent::Error(message) => self.controller.on_element_error(&message),
            }
        }
    }

    fn sync_fullscreen(&mut self, ctx: &egui::Context) {
        let mut surface = ViewportFullscreen::new(ctx);
        if let Some(is_fullscreen) = self.fullscreen.observe(surface.is_fullscreen()) {
            self.controller.on_fullscreen_change(is_fullscreen);
        }
        if self.controller.state().is_fullscreen
            && ctx.input(|i| i.key_pressed(egui::Key::Escape))
        {
            surface.exit_fullscreen();
        }
    }

    fn handle_player_event(&mut self, event: VideoPlayerEvent, ctx: &egui::Context) {
        match event {
            VideoPlayerEvent::TogglePlay => self.controller.on_toggle_play(),
            VideoPlayerEvent::ToggleMute => self.controller.on_toggle_mute(),
            VideoPlayerEvent::ToggleFullscreen => {
                self.controller
                    .on_toggle_fullscreen(&mut ViewportFullscreen::new(ctx));
            }
            VideoPlayerEvent::Seek(percent) => self.controller.on_slider_drag(percent),
        }
    }
}

impl eframe::App for ChapterPlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_player(ctx);

        let now = Instant::now();
        if self.ticker.poll(now) {
            self.controller.on_tick();
        }
        if !self.ticker.is_stopped() {
            let next = if self.controller.state().is_playing {
                FRAME_INTERVAL
            } else {
                self.ticker.until_next(now)
            };
            ctx.request_repaint_after(next);
        }

        self.sync_fullscreen(ctx);

        // The video container takes the whole window in fullscreen
        if !self.controller.state().is_fullscreen {
            let mut chapter_events = Vec::new();
            egui::SidePanel::left("chapter_panel")
                .resizable(true)
                .default_width(260.0)
                .show(ctx, |ui| {
                    ui.heading("Chapters");
                    ui.separator();
                    self.chapter_list
                        .sync(self.controller.state().active_chapter);
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        chapter_events = ChapterListWidget::new(
                            self.controller.chapters(),
                            &mut self.chapter_list,
                        )
                        .show(ui);
                    });
                });

            for event in chapter_events {
                match event {
                    ChapterListEvent::StepClicked(index) => {
                        self.controller.on_chapter_selected(index)
                    }
                }
            }
        }

        let mut player_events = Vec::new();
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                player_events = self.video_player.show(
                    ui,
                    self.controller.state(),
                    self.controller.chapters(),
                );
            });

        for event in player_events {
            self.handle_player_event(event, ctx);
        }
    }
}

impl Drop for ChapterPlayerApp {
    fn drop(&mut self) {
        self.ticker.stop();
        self.fullscreen.detach();
        self.controller.teardown();
    }
}

use eframe::egui;

use crate::ops::time_funcs::format_time;
use crate::player::gst_player::VideoFrame;
use crate::types::chapter::ChapterList;
use crate::types::playback_state::PlaybackState;
use crate::ui::seek_bar::SeekBar;

const CONTROL_COLOR: egui::Color32 = egui::Color32::from_rgb(0xbd, 0xbd, 0xbd);

#[derive(Debug, Clone, PartialEq)]
pub enum VideoPlayerEvent {
    TogglePlay,
    ToggleMute,
    ToggleFullscreen,
    /// Seek slider moved, new value in percent.
    Seek(f64),
}

/// Video pane: the current frame over a control footer.
#[derive(Default)]
pub struct VideoPlayer {
    texture: Option<egui::TextureHandle>,
}

impl VideoPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload a freshly decoded frame.
    pub fn update_texture(&mut self, frame: &VideoFrame, ctx: &egui::Context) {
        let color_img = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match &mut self.texture {
            Some(texture) => texture.set(color_img, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture(
                    "video_frame",
                    color_img,
                    egui::TextureOptions::LINEAR,
                ));
            }
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &PlaybackState,
        chapters: &ChapterList,
    ) -> Vec<VideoPlayerEvent> {
        let mut events = Vec::new();

        egui::Frame::default()
            .fill(egui::Color32::BLACK)
            .show(ui, |ui| {
                let footer_height = 140.0;
                let video_size = egui::vec2(
                    ui.available_width(),
                    (ui.available_height() - footer_height).max(120.0),
                );
                ui.allocate_ui(video_size, |ui| {
                    ui.centered_and_justified(|ui| match &self.texture {
                        Some(texture) => {
                            ui.add(egui::Image::new(texture).shrink_to_fit());
                        }
                        None => {
                            ui.label(egui::RichText::new("Loading video…").color(CONTROL_COLOR));
                        }
                    });
                });

                if let Some(percent) =
                    SeekBar::new(state.progress_percent, state.total_duration, chapters).show(ui)
                {
                    events.push(VideoPlayerEvent::Seek(percent));
                }

                ui.horizontal(|ui| {
                    let play_icon = if state.is_playing { "⏸" } else { "▶" };
                    if control_button(ui, play_icon, 22.0).clicked() {
                        events.push(VideoPlayerEvent::TogglePlay);
                    }
                    ui.label(
                        egui::RichText::new(format!(
                            "{} / {}",
                            format_time(state.elapsed_seconds()),
                            format_time(state.total_duration)
                        ))
                        .size(12.0)
                        .color(egui::Color32::WHITE),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let fullscreen_icon = if state.is_fullscreen { "🗗" } else { "⛶" };
                        if control_button(ui, fullscreen_icon, 18.0).clicked() {
                            events.push(VideoPlayerEvent::ToggleFullscreen);
                        }
                        let mute_icon = if state.is_muted { "🔇" } else { "🔊" };
                        if control_button(ui, mute_icon, 18.0).clicked() {
                            events.push(VideoPlayerEvent::ToggleMute);
                        }
                    });
                });
            });

        events
    }
}

fn control_button(ui: &mut egui::Ui, icon: &str, size: f32) -> egui::Response {
    ui.add(egui::Button::new(egui::RichText::new(icon).size(size).color(CONTROL_COLOR)).frame(false))
}

use eframe::egui;

use crate::types::chapter::ChapterList;

const BAR_HEIGHT: f32 = 96.0;
const RAIL_THICKNESS: f32 = 5.0;
const SIDE_PADDING: f32 = 24.0;
const MARK_LABEL_GAP: f32 = 8.0;
const RAIL_COLOR: egui::Color32 = egui::Color32::from_rgb(0xbd, 0xbd, 0xbd);

/// Horizontal 0-100 slider annotated with chapter marks.
pub struct SeekBar<'a> {
    progress_percent: f64,
    duration: f64,
    chapters: &'a ChapterList,
}

impl<'a> SeekBar<'a> {
    pub fn new(progress_percent: f64, duration: f64, chapters: &'a ChapterList) -> Self {
        Self {
            progress_percent,
            duration,
            chapters,
        }
    }

    /// Draws the bar. Returns the new percentage when the user clicked or dragged it.
    pub fn show(self, ui: &mut egui::Ui) -> Option<f64> {
        let desired = egui::vec2(ui.available_width(), BAR_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let rail_y = rect.center().y;
        let rail = egui::Rect::from_min_max(
            egui::pos2(rect.left() + SIDE_PADDING, rail_y - RAIL_THICKNESS / 2.0),
            egui::pos2(rect.right() - SIDE_PADDING, rail_y + RAIL_THICKNESS / 2.0),
        );
        painter.rect_filled(rail, 2.5, RAIL_COLOR.gamma_multiply(0.58));

        let fraction = (self.progress_percent / 100.0).clamp(0.0, 1.0) as f32;
        let thumb_x = rail.left() + rail.width() * fraction;
        let track = egui::Rect::from_min_max(rail.left_top(), egui::pos2(thumb_x, rail.bottom()));
        painter.rect_filled(track, 2.5, RAIL_COLOR);

        for (i, chapter) in self.chapters.iter().enumerate() {
            let Some(secs) = self.chapters.seconds_of(i) else {
                continue;
            };
            let Some(mark) = mark_fraction(secs, self.duration) else {
                continue;
            };
            let x = rail.left() + rail.width() * mark;
            painter.circle_filled(egui::pos2(x, rail_y), 3.0, egui::Color32::WHITE);

            // Alternate above and below so neighbouring labels do not collide
            let (anchor, pos) = if i % 2 == 0 {
                (
                    egui::Align2::CENTER_BOTTOM,
                    egui::pos2(x, rail.top() - MARK_LABEL_GAP),
                )
            } else {
                (
                    egui::Align2::CENTER_TOP,
                    egui::pos2(x, rail.bottom() + MARK_LABEL_GAP),
                )
            };
            let label_rect = painter.text(
                pos,
                anchor,
                stacked_label(&chapter.label),
                egui::FontId::proportional(9.0),
                egui::Color32::WHITE,
            );
            ui.interact(
                label_rect,
                ui.id().with(("chapter_mark", i)),
                egui::Sense::hover(),
            )
            .on_hover_text(format!("{} - {}", chapter.label, chapter.timestamp));
        }

        painter.circle_filled(egui::pos2(thumb_x, rail_y), 7.0, RAIL_COLOR);

        if response.clicked() || response.dragged() {
            if let Some(pointer_pos) = response.interact_pointer_pos() {
                return Some(percent_at(pointer_pos.x, rail.left(), rail.width()));
            }
        }
        None
    }
}

/// Slider value under screen position `x`.
pub fn percent_at(x: f32, rail_left: f32, rail_width: f32) -> f64 {
    if rail_width <= 0.0 {
        return 0.0;
    }
    (((x - rail_left) / rail_width).clamp(0.0, 1.0) * 100.0) as f64
}

/// Position of a chapter mark along the rail, if it lies inside the media.
pub fn mark_fraction(chapter_secs: u64, duration: f64) -> Option<f32> {
    if !(duration > 0.0) {
        return None;
    }
    let fraction = chapter_secs as f64 / duration;
    (fraction <= 1.0).then_some(fraction as f32)
}

/// One word per line.
pub fn stacked_label(label: &str) -> String {
    label.split(' ').collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_at() {
        assert_eq!(percent_at(100.0, 100.0, 200.0), 0.0);
        assert_eq!(percent_at(200.0, 100.0, 200.0), 50.0);
        assert_eq!(percent_at(300.0, 100.0, 200.0), 100.0);
        assert_eq!(percent_at(20.0, 100.0, 200.0), 0.0);
        assert_eq!(percent_at(900.0, 100.0, 200.0), 100.0);
        assert_eq!(percent_at(150.0, 100.0, 0.0), 0.0);
    }

    #[test]
    fn test_mark_fraction() {
        assert_eq!(mark_fraction(30, 60.0), Some(0.5));
        assert_eq!(mark_fraction(0, 60.0), Some(0.0));
        assert_eq!(mark_fraction(60, 60.0), Some(1.0));
        assert_eq!(mark_fraction(90, 60.0), None);
        assert_eq!(mark_fraction(10, 0.0), None);
    }

    #[test]
    fn test_stacked_label() {
        assert_eq!(stacked_label("Introduction"), "Introduction");
        assert_eq!(stacked_label("Boss Battles"), "Boss\nBattles");
    }
}

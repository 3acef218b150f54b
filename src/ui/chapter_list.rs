use eframe::egui;

use crate::types::chapter::ChapterList;

const STEP_RADIUS: f32 = 11.0;
const CONNECTOR_HEIGHT: f32 = 18.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterListEvent {
    StepClicked(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

pub fn step_status(index: usize, active: usize) -> StepStatus {
    match index.cmp(&active) {
        std::cmp::Ordering::Less => StepStatus::Completed,
        std::cmp::Ordering::Equal => StepStatus::Active,
        std::cmp::Ordering::Greater => StepStatus::Pending,
    }
}

/// Highlighted step of the list. Persists between frames.
#[derive(Debug, Default)]
pub struct ChapterListState {
    pub active_step: usize,
    synced_index: usize,
}

impl ChapterListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follows the controller's active chapter whenever it changes.
    pub fn sync(&mut self, index: usize) {
        if index != self.synced_index {
            self.synced_index = index;
            self.active_step = index;
        }
    }

    pub fn click(&mut self, index: usize) -> ChapterListEvent {
        self.active_step = index;
        ChapterListEvent::StepClicked(index)
    }

    /// Only reachable if the active step is moved past the last chapter.
    pub fn all_completed(&self, chapter_count: usize) -> bool {
        self.active_step == chapter_count
    }
}

/// Vertical stepper listing every chapter with its start time.
pub struct ChapterListWidget<'a> {
    chapters: &'a ChapterList,
    state: &'a mut ChapterListState,
}

impl<'a> ChapterListWidget<'a> {
    pub fn new(chapters: &'a ChapterList, state: &'a mut ChapterListState) -> Self {
        Self { chapters, state }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> Vec<ChapterListEvent> {
        let mut events = Vec::new();

        ui.vertical(|ui| {
            for (index, chapter) in self.chapters.iter().enumerate() {
                let status = step_status(index, self.state.active_step);
                let response = ui
                    .horizontal(|ui| {
                        let (icon_rect, _) = ui.allocate_exact_size(
                            egui::vec2(STEP_RADIUS * 2.0, STEP_RADIUS * 2.0),
                            egui::Sense::hover(),
                        );
                        paint_step_icon(ui, icon_rect, index, status);

                        ui.vertical(|ui| {
                            let mut label = egui::RichText::new(&chapter.label);
                            if status == StepStatus::Active {
                                label = label.strong();
                            } else if status == StepStatus::Pending {
                                label = label.weak();
                            }
                            ui.label(label);
                            ui.label(egui::RichText::new(&chapter.timestamp).small().weak());
                        });
                    })
                    .response
                    .interact(egui::Sense::click())
                    .on_hover_cursor(egui::CursorIcon::PointingHand);

                if response.clicked() {
                    events.push(self.state.click(index));
                }

                if index + 1 < self.chapters.len() {
                    let (connector, _) = ui.allocate_exact_size(
                        egui::vec2(STEP_RADIUS * 2.0, CONNECTOR_HEIGHT),
                        egui::Sense::hover(),
                    );
                    ui.painter().line_segment(
                        [connector.center_top(), connector.center_bottom()],
                        egui::Stroke::new(1.0, egui::Color32::GRAY),
                    );
                }
            }

            if self.state.all_completed(self.chapters.len()) {
                ui.add_space(12.0);
                ui.label("All steps completed - you're finished");
            }
        });

        events
    }
}

fn paint_step_icon(ui: &egui::Ui, rect: egui::Rect, index: usize, status: StepStatus) {
    let painter = ui.painter();
    let accent = ui.visuals().selection.bg_fill;
    let (fill, text) = match status {
        StepStatus::Completed => (accent, "✔".to_string()),
        StepStatus::Active => (accent, (index + 1).to_string()),
        StepStatus::Pending => (egui::Color32::GRAY, (index + 1).to_string()),
    };
    painter.circle_filled(rect.center(), STEP_RADIUS, fill);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(12.0),
        egui::Color32::WHITE,
    );
}

//! Header bar with toggles and status

use eframe::egui;

use super::BoardApp;
use crate::api_state::ApiState;
use crate::theme::{Palette, ERROR_RED, OK_GREEN, WARN_AMBER};

impl BoardApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        let mode = self.theme.get();
        let palette = Palette::for_mode(mode);
        let api_state = self.api_state();

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("UTACT")
                    .strong()
                    .size(18.0)
                    .color(palette.text_primary),
            );
            ui.label(egui::RichText::new("guestbook").color(palette.text_muted));

            ui.add_space(10.0);

            let theme_label = if mode.is_dark() { "Light" } else { "Dark" };
            if ui.button(theme_label).clicked() {
                self.theme.toggle();
            }

            let mut visible = self.show_constellation;
            if ui.checkbox(&mut visible, "Backdrop").changed() {
                self.set_constellation_visible(visible);
            }

            // RIGHT: status and stats (right-to-left order)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                        .color(palette.text_secondary),
                );
                ui.label(egui::RichText::new("/").color(palette.text_muted));
                ui.label(
                    egui::RichText::new(format!("{} messages", self.log.len()))
                        .color(palette.text_muted),
                );

                ui.add_space(10.0);

                let (status_color, status_text) = match &api_state {
                    ApiState::Ready => (OK_GREEN, "Online"),
                    ApiState::Loading => (WARN_AMBER, "Loading..."),
                    ApiState::Offline => (palette.text_muted, "Offline"),
                    ApiState::Error(_) => (ERROR_RED, "Error"),
                };
                let status = ui.colored_label(status_color, egui::RichText::new(status_text));
                if let ApiState::Error(reason) = &api_state {
                    status.on_hover_text(reason);
                }
            });
        });
    }
}

/// FPS counter over the last 60 frame timestamps
pub struct FpsCounter {
    frames: Vec<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(60),
        }
    }

    /// Record a frame at `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        self.frames.push(now_ms);
        if self.frames.len() > 60 {
            self.frames.remove(0);
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / (elapsed / 1000.0)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_over_window() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.fps(), 0.0);
        for i in 0..100 {
            fps.tick(i as f64 * 20.0);
        }
        assert!((fps.fps() - 50.0).abs() < 1e-9);
    }
}

//! Message carousel, submission form and the rating toast

use chrono::{DateTime, Utc};
use eframe::egui;
use egui::text::LayoutJob;
use egui::{Align2, FontId, Rect, RichText, Sense, Stroke, StrokeKind, Vec2};

use super::BoardApp;
use crate::board::{CarouselState, LOW_RATING_NOTICE};
use crate::core::message::{MAX_AUTHOR_CHARS, MAX_CONTENT_CHARS, MAX_RATING};
use crate::core::{format_relative, Message, DEFAULT_AUTHOR};
use crate::theme::{Palette, STAR_GOLD};
use crate::time::wall_clock;

/// Height of one carousel slot
const CARD_HEIGHT: f32 = 112.0;
const BOARD_MAX_WIDTH: f32 = 560.0;
const AVATAR_RADIUS: f32 = 16.0;
const DOT_RADIUS: f32 = 3.5;
const DOT_SPACING: f32 = 14.0;

impl BoardApp {
    pub(crate) fn render_board(&mut self, ui: &mut egui::Ui, now: f64) {
        let palette = Palette::for_mode(self.theme.get());

        ui.vertical_centered(|ui| {
            ui.set_max_width(BOARD_MAX_WIDTH);
            ui.add_space(24.0);
            ui.label(
                RichText::new("Guestbook")
                    .size(22.0)
                    .strong()
                    .color(palette.text_primary),
            );
            ui.label(RichText::new("Thanks for stopping by").color(palette.text_secondary));
            ui.add_space(12.0);

            self.render_carousel(ui, now, &palette);
            self.render_dots(ui, &palette);

            ui.add_space(16.0);
            self.render_form(ui, now, &palette);
        });
    }

    fn render_carousel(&self, ui: &mut egui::Ui, now: f64, palette: &Palette) {
        let size = Vec2::new(ui.available_width(), CARD_HEIGHT);
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);

        match self.carousel.state() {
            CarouselState::Empty => {
                paint_card_frame(&painter, rect, palette);
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    "No messages yet. Be the first!",
                    FontId::proportional(14.0),
                    palette.text_muted,
                );
            }
            CarouselState::Showing(_) => {
                let wall = wall_clock();
                for (i, message) in self.log.messages().iter().enumerate() {
                    let offset = self.carousel.slot_offset(i, now);
                    // fully outside the clip
                    if offset.abs() >= 1.0 {
                        continue;
                    }
                    let card = rect.translate(Vec2::new(0.0, offset * CARD_HEIGHT));
                    paint_card(&painter, card, message, wall, palette);
                }
            }
        }
    }

    fn render_dots(&self, ui: &mut egui::Ui, palette: &Palette) {
        if !self.carousel.shows_dots() {
            return;
        }
        let count = self.carousel.count();
        let size = Vec2::new(count as f32 * DOT_SPACING, DOT_SPACING);
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);

        for i in 0..count {
            let center = rect.left_center() + Vec2::new(DOT_SPACING * (i as f32 + 0.5), 0.0);
            let color = if i == self.carousel.active_index() {
                palette.accent
            } else {
                palette.border
            };
            painter.circle_filled(center, DOT_RADIUS, color);
        }
    }

    fn render_form(&mut self, ui: &mut egui::Ui, now: f64, palette: &Palette) {
        let mut submit = false;

        egui::Frame::new()
            .fill(palette.bg_elevated)
            .stroke(Stroke::new(1.0, palette.border))
            .corner_radius(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Leave a message").color(palette.text_primary));
                ui.add(
                    egui::TextEdit::multiline(self.form.content_mut())
                        .char_limit(MAX_CONTENT_CHARS)
                        .hint_text("Say something nice...")
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );

                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(self.form.author_mut())
                            .char_limit(MAX_AUTHOR_CHARS)
                            .hint_text(DEFAULT_AUTHOR)
                            .desired_width(160.0),
                    );
                    self.render_stars(ui, now, palette);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let send = ui.add_enabled(self.form.can_submit(), egui::Button::new("Send"));
                        submit = send.clicked();
                        ui.label(
                            RichText::new(format!("{}/{}", self.form.char_count(), MAX_CONTENT_CHARS))
                                .color(palette.text_muted),
                        );
                    });
                });
            });

        self.form.enforce_limits();
        if submit {
            self.submit_message();
        }
    }

    fn render_stars(&mut self, ui: &mut egui::Ui, now: f64, palette: &Palette) {
        let rating = self.form.rating().rating();
        let pulse = if self.form.rating().is_resetting() {
            0.6 + 0.4 * ((now / 150.0).sin().abs() as f32)
        } else {
            1.0
        };

        for star in 1..=MAX_RATING {
            let color = if star <= rating {
                STAR_GOLD.gamma_multiply(pulse)
            } else {
                palette.text_muted
            };
            let button = egui::Button::new(RichText::new("★").size(20.0).color(color)).frame(false);
            if ui.add(button).clicked() {
                self.form.rating_mut().click(star, now);
            }
        }
    }

    pub(crate) fn render_toast(&self, ctx: &egui::Context) {
        if !self.form.rating().toast_visible() {
            return;
        }
        let palette = Palette::for_mode(self.theme.get());

        egui::Area::new(egui::Id::new("rating_toast"))
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(palette.bg_elevated)
                    .stroke(Stroke::new(1.0, palette.border))
                    .corner_radius(6.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(LOW_RATING_NOTICE).color(palette.text_primary));
                    });
            });
    }
}

fn paint_card_frame(painter: &egui::Painter, rect: Rect, palette: &Palette) {
    let rect = rect.shrink(1.0);
    painter.rect_filled(rect, 8.0, palette.bg_elevated);
    painter.rect_stroke(rect, 8.0, Stroke::new(1.0, palette.border), StrokeKind::Inside);
}

/// Avatar initial, author, stars, relative time and a two-line excerpt
fn paint_card(
    painter: &egui::Painter,
    rect: Rect,
    message: &Message,
    now: DateTime<Utc>,
    palette: &Palette,
) {
    paint_card_frame(painter, rect, palette);

    let avatar = rect.left_top() + Vec2::new(12.0 + AVATAR_RADIUS, 12.0 + AVATAR_RADIUS);
    painter.circle_filled(avatar, AVATAR_RADIUS, palette.accent);
    painter.text(
        avatar,
        Align2::CENTER_CENTER,
        message.initial().to_uppercase().to_string(),
        FontId::proportional(16.0),
        egui::Color32::WHITE,
    );

    let text_left = avatar.x + AVATAR_RADIUS + 12.0;
    painter.text(
        egui::pos2(text_left, rect.top() + 12.0),
        Align2::LEFT_TOP,
        &message.author,
        FontId::proportional(14.0),
        palette.text_primary,
    );
    painter.text(
        rect.right_top() + Vec2::new(-12.0, 12.0),
        Align2::RIGHT_TOP,
        format_relative(message.sent_at, now),
        FontId::proportional(12.0),
        palette.text_muted,
    );

    for star in 1..=MAX_RATING {
        let color = if star <= message.rating {
            STAR_GOLD
        } else {
            palette.text_muted
        };
        painter.text(
            egui::pos2(text_left + (star - 1) as f32 * 14.0, rect.top() + 32.0),
            Align2::LEFT_TOP,
            "★",
            FontId::proportional(12.0),
            color,
        );
    }

    let wrap_width = rect.right() - 12.0 - text_left;
    let mut job = LayoutJob::simple(
        message.content.clone(),
        FontId::proportional(14.0),
        palette.text_secondary,
        wrap_width,
    );
    job.wrap.max_rows = 2;
    let galley = painter.layout_job(job);
    painter.galley(
        egui::pos2(text_left, rect.top() + 54.0),
        galley,
        palette.text_secondary,
    );
}

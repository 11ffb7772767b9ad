//! Constellation backdrop painted with the egui painter

use std::f32::consts::TAU;

use eframe::egui;
use egui::epaint::Mesh;
use egui::{Align2, FontId, Pos2, Rect, Shape, Stroke, Vec2};

use super::BoardApp;
use crate::constellation::{FieldState, Rgba, Surface};
use crate::theme::{to_color32, Palette};

/// Triangles in the radial gradient fan
const RADIAL_SEGMENTS: u32 = 48;

/// `Surface` over an egui painter, field coordinates relative to `rect.min`
pub(crate) struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    rect: Rect,
}

impl<'a> EguiSurface<'a> {
    pub(crate) fn new(painter: &'a egui::Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn at(&self, p: [f32; 2]) -> Pos2 {
        self.rect.min + Vec2::new(p[0], p[1])
    }
}

impl Surface for EguiSurface<'_> {
    fn fill(&mut self, color: Rgba) {
        self.painter.rect_filled(self.rect, 0.0, to_color32(color));
    }

    fn fill_radial(&mut self, center: [f32; 2], radius: f32, inner: Rgba, outer: Rgba) {
        let outer = to_color32(outer);
        self.painter.rect_filled(self.rect, 0.0, outer);

        let center = self.at(center);
        let mut mesh = Mesh::default();
        mesh.colored_vertex(center, to_color32(inner));
        for i in 0..=RADIAL_SEGMENTS {
            let angle = i as f32 / RADIAL_SEGMENTS as f32 * TAU;
            mesh.colored_vertex(center + radius * Vec2::angled(angle), outer);
        }
        for i in 0..RADIAL_SEGMENTS {
            mesh.add_triangle(0, i + 1, i + 2);
        }
        self.painter.add(Shape::mesh(mesh));
    }

    fn line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: Rgba) {
        self.painter.line_segment(
            [self.at(from), self.at(to)],
            Stroke::new(width, to_color32(color)),
        );
    }

    fn circle(&mut self, center: [f32; 2], radius: f32, color: Rgba) {
        self.painter
            .circle_filled(self.at(center), radius, to_color32(color));
    }
}

impl BoardApp {
    /// Size, step and draw the backdrop into `rect`.
    pub(crate) fn render_constellation(&mut self, ui: &mut egui::Ui, rect: Rect) {
        let (width, height) = (rect.width(), rect.height());
        if self.field.state() == FieldState::Uninitialized {
            self.field.mount(width, height, self.theme.get());
        } else {
            self.field.resize(width, height);
        }
        self.field.step();

        let painter = ui.painter_at(rect);
        self.field.draw(&mut EguiSurface::new(&painter, rect));

        let mode = self.field.mode();
        let palette = Palette::for_mode(mode);
        let label = if mode.is_dark() { "constellation" } else { "network" };
        painter.text(
            rect.left_bottom() + Vec2::new(12.0, -10.0),
            Align2::LEFT_BOTTOM,
            format!("{} / {} nodes", label, self.field.particles().len()),
            FontId::monospace(11.0),
            palette.text_muted,
        );
    }
}

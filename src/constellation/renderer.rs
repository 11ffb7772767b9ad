//! Drawing for the constellation background
//!
//! The field draws through the `Surface` trait: background first, then
//! connection lines, then particles on top. The egui painter implements it
//! in the app; tests record the calls.

use super::data::ParticleField;
use crate::core::ThemeMode;

/// Links at or beyond this distance are not drawn
pub const MAX_CONNECTION_DISTANCE: f32 = 120.0;
/// Opacity of a zero-length link
pub const CONNECTION_ALPHA: f32 = 0.4;
pub const CONNECTION_WIDTH: f32 = 1.0;
/// Stars larger than this get a cross-hair accent
pub const CROSS_MIN_RADIUS: f32 = 2.5;
pub const CROSS_WIDTH: f32 = 0.5;

/// Straight RGB with a separate [0..1] alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Day/night palette
pub mod palette {
    use super::Rgba;

    pub const NIGHT_SKY_INNER: Rgba = Rgba::rgb(30, 41, 59); // #1e293b
    pub const NIGHT_SKY_OUTER: Rgba = Rgba::rgb(15, 23, 42); // #0f172a
    pub const DAY_SKY: Rgba = Rgba::rgb(248, 250, 252); // #f8fafc

    pub const STARLIGHT: Rgba = Rgba::rgb(147, 197, 253); // links + glow at night
    pub const STAR_CORE: Rgba = Rgba::rgb(255, 255, 255);
    pub const DAY_NODE: Rgba = Rgba::rgb(59, 130, 246); // links + nodes by day
}

/// Drawing target for the field. Coordinates are surface-local.
pub trait Surface {
    fn fill(&mut self, color: Rgba);
    fn fill_radial(&mut self, center: [f32; 2], radius: f32, inner: Rgba, outer: Rgba);
    fn line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: Rgba);
    fn circle(&mut self, center: [f32; 2], radius: f32, color: Rgba);
}

/// Link opacity at `distance`, or `None` when the pair is too far apart.
pub fn connection_opacity(distance: f32) -> Option<f32> {
    if distance < MAX_CONNECTION_DISTANCE {
        Some((MAX_CONNECTION_DISTANCE - distance) / MAX_CONNECTION_DISTANCE * CONNECTION_ALPHA)
    } else {
        None
    }
}

impl<R> ParticleField<R> {
    /// Draw one frame. Nothing is drawn until the field is populated.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.particles().is_empty() {
            return;
        }
        let mode = self.mode();
        let (width, height) = self.size();

        match mode {
            ThemeMode::Dark => surface.fill_radial(
                [width * 0.5, height * 0.5],
                width.max(height) * 0.5,
                palette::NIGHT_SKY_INNER,
                palette::NIGHT_SKY_OUTER,
            ),
            ThemeMode::Light => surface.fill(palette::DAY_SKY),
        }

        self.draw_connections(surface, mode);
        self.draw_particles(surface, mode);
    }

    fn draw_connections<S: Surface + ?Sized>(&self, surface: &mut S, mode: ThemeMode) {
        let link_color = match mode {
            ThemeMode::Dark => palette::STARLIGHT,
            ThemeMode::Light => palette::DAY_NODE,
        };
        let particles = self.particles();

        for particle in particles {
            for &target in &particle.connections {
                let Some(other) = particles.get(target) else {
                    continue;
                };
                let distance = (particle.x - other.x).hypot(particle.y - other.y);
                if let Some(opacity) = connection_opacity(distance) {
                    surface.line(
                        [particle.x, particle.y],
                        [other.x, other.y],
                        CONNECTION_WIDTH,
                        link_color.with_alpha(opacity),
                    );
                }
            }
        }
    }

    fn draw_particles<S: Surface + ?Sized>(&self, surface: &mut S, mode: ThemeMode) {
        for p in self.particles() {
            let center = [p.x, p.y];
            match mode {
                ThemeMode::Dark => {
                    let b = p.brightness;
                    surface.circle(center, p.radius * 2.0, palette::STARLIGHT.with_alpha(b * 0.3));
                    surface.circle(center, p.radius, palette::STAR_CORE.with_alpha(b));

                    if p.radius > CROSS_MIN_RADIUS {
                        let arm = p.radius * 1.5;
                        let color = palette::STAR_CORE.with_alpha(b * 0.6);
                        surface.line([p.x - arm, p.y], [p.x + arm, p.y], CROSS_WIDTH, color);
                        surface.line([p.x, p.y - arm], [p.x, p.y + arm], CROSS_WIDTH, color);
                    }
                }
                ThemeMode::Light => {
                    surface.circle(center, p.radius * 2.0, palette::DAY_NODE.with_alpha(0.2));
                    surface.circle(center, p.radius, palette::DAY_NODE.with_alpha(0.8));
                }
            }
        }
    }
}

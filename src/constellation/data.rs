//! Particle simulation for the constellation background
//!
//! - Particle: position, velocity, size, twinkle state, outgoing connections
//! - ParticleField: owns the particle set and its lifecycle
//!   (`Uninitialized → Sized → Populated → Running`)

use rand::seq::index;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::core::ThemeMode;

/// Particle count in dark mode
pub const NODE_COUNT_DARK: usize = 25;
/// Particle count in light mode
pub const NODE_COUNT_LIGHT: usize = 20;
/// Keep-out band at the edges when placing new particles
pub const SPAWN_MARGIN: f32 = 10.0;
/// Particles bounce when they come this close to an edge
pub const BOUNCE_MARGIN: f32 = 5.0;
/// Per-axis velocity bound, in units per frame
pub const MAX_SPEED: f32 = 0.15;
pub const MIN_RADIUS: f32 = 2.0;
pub const MAX_RADIUS: f32 = 5.0;
pub const MIN_BRIGHTNESS: f32 = 0.3;
pub const MAX_BRIGHTNESS: f32 = 1.0;
/// Lower bound for freshly spawned brightness
pub const SPAWN_MIN_BRIGHTNESS: f32 = 0.5;
pub const MIN_TWINKLE: f32 = 0.01;
pub const MAX_TWINKLE: f32 = 0.03;
pub const MIN_CONNECTIONS: usize = 2;
pub const MAX_CONNECTIONS: usize = 4;

/// Size changes smaller than this are treated as layout jitter
const RESIZE_EPSILON: f32 = 0.5;

/// Lifecycle of the particle field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Uninitialized,
    /// Surface size known, no particles (zero-sized surfaces stay here)
    Sized,
    Populated,
    Running,
}

/// One animated point of the constellation.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    /// Directed edges: indices of particles this one links to
    pub connections: Vec<usize>,
    /// Opacity driver in dark mode [0.3..1.0]
    pub brightness: f32,
    /// Signed brightness increment per frame
    pub twinkle: f32,
}

impl Particle {
    /// Advance one frame inside a `width` x `height` surface.
    pub fn step(&mut self, width: f32, height: f32, twinkle: bool) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x <= BOUNCE_MARGIN || self.x >= width - BOUNCE_MARGIN {
            self.vx = -self.vx;
        }
        if self.y <= BOUNCE_MARGIN || self.y >= height - BOUNCE_MARGIN {
            self.vy = -self.vy;
        }

        self.x = self.x.min(width - BOUNCE_MARGIN).max(BOUNCE_MARGIN);
        self.y = self.y.min(height - BOUNCE_MARGIN).max(BOUNCE_MARGIN);

        if twinkle {
            self.brightness += self.twinkle;
            if self.brightness > MAX_BRIGHTNESS {
                self.brightness = MAX_BRIGHTNESS;
                self.twinkle = -self.twinkle.abs();
            } else if self.brightness < MIN_BRIGHTNESS {
                self.brightness = MIN_BRIGHTNESS;
                self.twinkle = self.twinkle.abs();
            }
        }
    }

    fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        Self {
            x: spawn_coord(rng, width),
            y: spawn_coord(rng, height),
            vx: rng.gen_range(-MAX_SPEED..=MAX_SPEED),
            vy: rng.gen_range(-MAX_SPEED..=MAX_SPEED),
            radius: rng.gen_range(MIN_RADIUS..=MAX_RADIUS),
            connections: Vec::new(),
            brightness: rng.gen_range(SPAWN_MIN_BRIGHTNESS..=MAX_BRIGHTNESS),
            twinkle: rng.gen_range(MIN_TWINKLE..=MAX_TWINKLE),
        }
    }
}

/// Uniform coordinate inside `extent` minus the spawn margin.
/// Surfaces narrower than twice the margin collapse onto the centre line.
fn spawn_coord<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    let margin = SPAWN_MARGIN.min(extent * 0.5);
    margin + rng.gen::<f32>() * (extent - 2.0 * margin)
}

/// Pick [2..4] distinct targets for particle `from` out of `count`, self excluded.
fn pick_connections<R: Rng + ?Sized>(rng: &mut R, count: usize, from: usize) -> Vec<usize> {
    if count < 2 {
        return Vec::new();
    }
    let wanted = rng
        .gen_range(MIN_CONNECTIONS..=MAX_CONNECTIONS)
        .min(count - 1);
    // Sample among the other count-1 slots, then shift past `from`
    index::sample(rng, count - 1, wanted)
        .into_iter()
        .map(|j| if j >= from { j + 1 } else { j })
        .collect()
}

/// Particle count for a theme
pub fn node_count(mode: ThemeMode) -> usize {
    if mode.is_dark() {
        NODE_COUNT_DARK
    } else {
        NODE_COUNT_LIGHT
    }
}

/// The animated particle set plus the surface it lives on.
#[derive(Debug)]
pub struct ParticleField<R> {
    state: FieldState,
    /// Host wants frames (set by mount, cleared by unmount)
    mounted: bool,
    width: f32,
    height: f32,
    mode: ThemeMode,
    particles: Vec<Particle>,
    /// Frames stepped since the last population
    frames: u64,
    rng: R,
}

impl<R> ParticleField<R> {
    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == FieldState::Running
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Swap in a hand-built particle set
    #[cfg(test)]
    pub(crate) fn replace_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }
}

impl<R: Rng> ParticleField<R> {
    pub fn new(rng: R) -> Self {
        Self {
            state: FieldState::Uninitialized,
            mounted: false,
            width: 0.0,
            height: 0.0,
            mode: ThemeMode::default(),
            particles: Vec::new(),
            frames: 0,
            rng,
        }
    }

    /// Size the surface, populate, and start running.
    pub fn mount(&mut self, width: f32, height: f32, mode: ThemeMode) {
        info!(width, height, ?mode, "Constellation mounted");
        self.mounted = true;
        self.mode = mode;
        self.apply_size(width, height);
        self.repopulate();
    }

    /// React to a measured container size. Unchanged sizes are a no-op.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.state != FieldState::Uninitialized
            && (self.width - width).abs() < RESIZE_EPSILON
            && (self.height - height).abs() < RESIZE_EPSILON
        {
            return;
        }
        debug!(width, height, "Constellation resized");
        self.apply_size(width, height);
        self.repopulate();
    }

    /// React to a theme flip. Regenerates the whole set.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        if self.mode == mode {
            return;
        }
        debug!(?mode, "Constellation theme changed");
        self.mode = mode;
        if self.state != FieldState::Uninitialized {
            self.state = FieldState::Sized;
            self.repopulate();
        }
    }

    /// Stop animating and drop the particle set.
    pub fn unmount(&mut self) {
        info!(frames = self.frames, "Constellation unmounted");
        self.mounted = false;
        self.particles.clear();
        self.state = FieldState::Uninitialized;
    }

    /// Advance every particle by one animation frame.
    pub fn step(&mut self) {
        if self.state != FieldState::Running {
            return;
        }
        let twinkle = self.mode.is_dark();
        for particle in &mut self.particles {
            particle.step(self.width, self.height, twinkle);
        }
        self.frames += 1;
        trace!(frames = self.frames, "Constellation stepped");
    }

    fn apply_size(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.state = FieldState::Sized;
    }

    /// `Sized → Populated`, and on to `Running` while mounted.
    fn repopulate(&mut self) {
        self.particles.clear();
        self.frames = 0;

        if self.width <= 0.0 || self.height <= 0.0 {
            debug!("Zero-sized surface, population skipped");
            return;
        }

        let count = node_count(self.mode);
        let mut particles: Vec<Particle> = (0..count)
            .map(|_| Particle::spawn(&mut self.rng, self.width, self.height))
            .collect();
        for (i, particle) in particles.iter_mut().enumerate() {
            particle.connections = pick_connections(&mut self.rng, count, i);
        }
        self.particles = particles;
        self.state = FieldState::Populated;

        debug!(count, mode = ?self.mode, "Constellation populated");

        if self.mounted {
            self.state = FieldState::Running;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn field(seed: u64) -> ParticleField<ChaCha8Rng> {
        ParticleField::new(ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_count_follows_theme() {
        let mut f = field(1);
        f.mount(400.0, 320.0, ThemeMode::Dark);
        assert_eq!(f.state(), FieldState::Running);
        assert_eq!(f.particles().len(), NODE_COUNT_DARK);

        f.set_mode(ThemeMode::Light);
        assert_eq!(f.particles().len(), NODE_COUNT_LIGHT);
        assert!(f.is_running());

        f.resize(800.0, 320.0);
        assert_eq!(f.particles().len(), NODE_COUNT_LIGHT);

        f.set_mode(ThemeMode::Dark);
        assert_eq!(f.particles().len(), NODE_COUNT_DARK);
    }

    #[test]
    fn test_spawn_ranges() {
        let mut f = field(2);
        f.mount(300.0, 200.0, ThemeMode::Dark);
        for p in f.particles() {
            assert!((SPAWN_MARGIN..=300.0 - SPAWN_MARGIN).contains(&p.x));
            assert!((SPAWN_MARGIN..=200.0 - SPAWN_MARGIN).contains(&p.y));
            assert!(p.vx.abs() <= MAX_SPEED && p.vy.abs() <= MAX_SPEED);
            assert!((MIN_RADIUS..=MAX_RADIUS).contains(&p.radius));
            assert!((SPAWN_MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&p.brightness));
            assert!((MIN_TWINKLE..=MAX_TWINKLE).contains(&p.twinkle));
        }
    }

    #[test]
    fn test_connections_distinct_and_in_range() {
        for seed in 0..20 {
            let mut f = field(seed);
            f.mount(500.0, 400.0, ThemeMode::Dark);
            let count = f.particles().len();
            for (i, p) in f.particles().iter().enumerate() {
                assert!((MIN_CONNECTIONS..=MAX_CONNECTIONS).contains(&p.connections.len()));
                assert!(!p.connections.contains(&i), "self edge");
                assert!(p.connections.iter().all(|&t| t < count));
                let mut sorted = p.connections.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(sorted.len(), p.connections.len(), "duplicate edge");
            }
        }
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let (w, h) = (240.0, 160.0);
        let mut f = field(3);
        f.mount(w, h, ThemeMode::Light);
        for _ in 0..20_000 {
            f.step();
            for p in f.particles() {
                assert!(p.x >= BOUNCE_MARGIN && p.x <= w - BOUNCE_MARGIN);
                assert!(p.y >= BOUNCE_MARGIN && p.y <= h - BOUNCE_MARGIN);
            }
        }
        assert_eq!(f.frames(), 20_000);
    }

    #[test]
    fn test_brightness_stays_in_bounds() {
        let mut f = field(4);
        f.mount(400.0, 300.0, ThemeMode::Dark);
        for _ in 0..5_000 {
            f.step();
            for p in f.particles() {
                assert!((MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&p.brightness));
            }
        }
    }

    #[test]
    fn test_twinkle_flips_exactly_at_bounds() {
        let mut p = Particle {
            x: 50.0,
            y: 50.0,
            vx: 0.0,
            vy: 0.0,
            radius: 3.0,
            connections: Vec::new(),
            brightness: 0.95,
            twinkle: 0.02,
        };

        let mut flips = 0;
        let mut prev_sign = p.twinkle.is_sign_positive();
        for _ in 0..500 {
            p.step(100.0, 100.0, true);
            let sign = p.twinkle.is_sign_positive();
            if sign != prev_sign {
                flips += 1;
                if sign {
                    assert_eq!(p.brightness, MIN_BRIGHTNESS);
                } else {
                    assert_eq!(p.brightness, MAX_BRIGHTNESS);
                }
            }
            prev_sign = sign;
        }
        assert!(flips > 2);
    }

    #[test]
    fn test_light_mode_ignores_brightness() {
        let mut f = field(5);
        f.mount(400.0, 300.0, ThemeMode::Light);
        let before: Vec<f32> = f.particles().iter().map(|p| p.brightness).collect();
        for _ in 0..100 {
            f.step();
        }
        let after: Vec<f32> = f.particles().iter().map(|p| p.brightness).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_bounce_reflects_velocity() {
        let mut p = Particle {
            x: 5.1,
            y: 50.0,
            vx: -0.15,
            vy: 0.0,
            radius: 2.0,
            connections: Vec::new(),
            brightness: 1.0,
            twinkle: 0.01,
        };
        p.step(100.0, 100.0, false);
        assert_eq!(p.x, BOUNCE_MARGIN);
        assert!(p.vx > 0.0);
    }

    #[test]
    fn test_zero_size_skips_population() {
        let mut f = field(6);
        f.mount(0.0, 320.0, ThemeMode::Dark);
        assert_eq!(f.state(), FieldState::Sized);
        assert!(f.particles().is_empty());
        f.step();
        assert_eq!(f.frames(), 0);

        // Next real size populates and resumes
        f.resize(300.0, 320.0);
        assert_eq!(f.state(), FieldState::Running);
        assert_eq!(f.particles().len(), NODE_COUNT_DARK);
    }

    #[test]
    fn test_unchanged_size_keeps_particles() {
        let mut f = field(7);
        f.mount(300.0, 300.0, ThemeMode::Light);
        f.step();
        let snapshot = f.particles().to_vec();
        f.resize(300.2, 299.9);
        assert_eq!(f.particles(), snapshot.as_slice());
        f.set_mode(ThemeMode::Light);
        assert_eq!(f.particles(), snapshot.as_slice());
    }

    #[test]
    fn test_unmount_and_unmounted_resize() {
        let mut f = field(8);
        f.mount(300.0, 300.0, ThemeMode::Dark);
        f.unmount();
        assert_eq!(f.state(), FieldState::Uninitialized);
        assert!(f.particles().is_empty());

        // Populated but not running until mounted again
        f.resize(300.0, 300.0);
        assert_eq!(f.state(), FieldState::Populated);
        f.mount(300.0, 300.0, ThemeMode::Dark);
        assert!(f.is_running());
    }
}

use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use rand::Rng;

use crate::config;
use crate::error::{ArenaError, ArenaResult};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector of length `len` pointing along `angle` (radians).
    pub fn from_angle(angle: f32, len: f32) -> Self {
        Self::new(angle.cos() * len, angle.sin() * len)
    }

    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Heading in radians; the zero vector reports 0.
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self * rhs.x, self * rhs.y)
    }
}

/// Arena dimensions in arena units. The origin is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaSize {
    pub width: f32,
    pub height: f32,
}

impl ArenaSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Rejects sizes that cannot contain one icon on either axis.
    pub fn validate(self) -> ArenaResult<Self> {
        let fits = |dim: f32| dim.is_finite() && dim >= config::ICON_DIAMETER;
        if fits(self.width) && fits(self.height) {
            Ok(self)
        } else {
            Err(ArenaError::InvalidSize {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Lowest admissible center coordinate on both axes.
    pub fn min_center(self) -> Vec2 {
        Vec2::new(config::ICON_RADIUS, config::ICON_RADIUS)
    }

    /// Highest admissible center coordinate on both axes.
    pub fn max_center(self) -> Vec2 {
        Vec2::new(
            self.width - config::ICON_RADIUS,
            self.height - config::ICON_RADIUS,
        )
    }

    pub fn contains_center(self, pos: Vec2) -> bool {
        let (lo, hi) = (self.min_center(), self.max_center());
        pos.x >= lo.x && pos.x <= hi.x && pos.y >= lo.y && pos.y <= hi.y
    }
}

pub type BodyId = u64;

/// One simulated person icon.
#[derive(Clone, Debug)]
pub struct Body {
    pub id: BodyId,
    pub primary: bool,
    pub visible: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cruising speed in arena units per tick.
    pub speed: f32,
    pub last_speed_change: f64,
    pub next_speed_change_interval: f64,
    pub target_speed: Option<f32>,
    pub speed_change_start: Option<f64>,
    pub speed_change_duration: f64,
}

impl Body {
    /// Places a fresh body uniformly inside `size` with a random heading and
    /// cruising speed. `size` must already be validated.
    pub fn spawn<R: Rng + ?Sized>(
        id: BodyId,
        primary: bool,
        size: ArenaSize,
        now: f64,
        rng: &mut R,
    ) -> Self {
        let (lo, hi) = (size.min_center(), size.max_center());
        let pos = Vec2::new(rng.gen_range(lo.x..=hi.x), rng.gen_range(lo.y..=hi.y));
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(config::MIN_SPEED..=config::MAX_SPEED);
        Self {
            id,
            primary,
            visible: true,
            pos,
            vel: Vec2::from_angle(angle, speed),
            speed,
            last_speed_change: now,
            next_speed_change_interval: rng
                .gen_range(config::RETARGET_INTERVAL_MIN..=config::RETARGET_INTERVAL_MAX),
            target_speed: None,
            speed_change_start: None,
            speed_change_duration: config::RETARGET_DURATION,
        }
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            id: self.id,
            pos: self.pos,
            primary: self.primary,
            visible: self.visible,
        }
    }
}

/// The renderer-facing view of a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub pos: Vec2,
    pub primary: bool,
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ArenaStats {
    pub ticks: u64,
    pub sim_time: f64,
    pub bodies: usize,
    pub target_population: usize,
    pub overlapping_pairs: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorId {
    Primary,
    Other,
    Background,
}

use crate::types::ArenaSize;

pub const SIM_HZ: f32 = 60.0;
pub const RENDER_HZ: f32 = 30.0;
pub const DT: f64 = 1.0 / SIM_HZ as f64;

pub const ARENA_WIDTH: f32 = 390.0;
pub const ARENA_HEIGHT: f32 = 300.0;

pub const ICON_DIAMETER: f32 = 50.0;
pub const ICON_RADIUS: f32 = ICON_DIAMETER / 2.0;

pub const MAX_POPULATION: usize = 10;
pub const INIT_POPULATION: usize = 5;

pub const MIN_SPEED: f32 = 0.1;
pub const MAX_SPEED: f32 = 0.3;

pub const RESTITUTION: f32 = 1.2;

pub const RETARGET_INTERVAL_MIN: f64 = 3.0;
pub const RETARGET_INTERVAL_MAX: f64 = 6.0;
pub const RETARGET_DURATION: f64 = 2.0;

pub const RAPID_DELETE_WINDOW: f64 = 1.0;
pub const RAPID_DELETE_PRESSES: u32 = 3;

/// Runtime configuration for an [`Arena`](crate::core::Arena).
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    /// RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub size: ArenaSize,
    /// Non-primary bodies spawned at construction.
    pub population: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            size: ArenaSize::new(ARENA_WIDTH, ARENA_HEIGHT),
            population: INIT_POPULATION,
        }
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_size(mut self, size: ArenaSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_population(mut self, population: usize) -> Self {
        self.population = population;
        self
    }

    /// Reads `DOKUSAI_SEED`; unparsable values are ignored.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var("DOKUSAI_SEED").ok().and_then(|s| s.trim().parse().ok()) {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

use std::sync::PoisonError;

pub type ArenaResult<T> = Result<T, ArenaError>;

#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("arena {width}x{height} cannot hold a single icon")]
    InvalidSize { width: f32, height: f32 },

    #[error("tick observed an empty body set")]
    EmptyArena,

    #[error("shared arena lock was poisoned")]
    LockPoisoned,

    #[error("failed to spawn simulation clock thread: {0}")]
    ClockSpawn(#[source] std::io::Error),
}

impl<T> From<PoisonError<T>> for ArenaError {
    fn from(_: PoisonError<T>) -> Self {
        ArenaError::LockPoisoned
    }
}

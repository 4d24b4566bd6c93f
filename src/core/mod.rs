pub mod collision;
pub mod motion;
pub mod population;

use std::sync::{Arc, Mutex};

use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    config::{self, SimConfig},
    error::{ArenaError, ArenaResult},
    types::{ArenaSize, ArenaStats, Body, BodyId, BodySnapshot},
};

pub use population::{DeleteGesture, Reconciled};

pub type SharedArena = Arc<Mutex<Arena>>;

/// Owns every body plus the state that drives them. All mutation goes through
/// `&mut self`, so wrapping it in a [`SharedArena`] serialises ticks against
/// population changes.
pub struct Arena {
    bodies: Vec<Body>,
    size: ArenaSize,
    rng: StdRng,
    next_id: BodyId,
    now: f64,
    ticks: u64,
    target_population: usize,
    delete_gesture: DeleteGesture,
    last_overlaps: usize,
}

impl Arena {
    /// Builds an arena holding the primary body plus `config.population`
    /// others.
    pub fn new(config: SimConfig) -> ArenaResult<Self> {
        let size = config.size.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut arena = Self {
            bodies: Vec::with_capacity(config::MAX_POPULATION + 1),
            size,
            rng,
            next_id: 1,
            now: 0.0,
            ticks: 0,
            target_population: 0,
            delete_gesture: DeleteGesture::new(),
            last_overlaps: 0,
        };
        let id = arena.next_id();
        let primary = Body::spawn(id, true, size, arena.now, &mut arena.rng);
        arena.bodies.push(primary);
        arena.set_population(config.population);
        Ok(arena)
    }

    pub fn into_shared(self) -> SharedArena {
        Arc::new(Mutex::new(self))
    }

    /// One fixed step: collisions first, then integration.
    pub fn tick(&mut self) -> ArenaResult<()> {
        if self.bodies.is_empty() {
            return Err(ArenaError::EmptyArena);
        }
        self.ticks += 1;
        self.now = self.ticks as f64 * config::DT;
        self.last_overlaps = collision::resolve_collisions(
            &mut self.bodies,
            config::ICON_DIAMETER,
            config::RESTITUTION,
        );
        motion::advance(&mut self.bodies, self.size, self.now, &mut self.rng);
        Ok(())
    }

    /// Sets the number of non-primary bodies, clamped to
    /// [`config::MAX_POPULATION`].
    pub fn set_population(&mut self, target: usize) -> Reconciled {
        self.target_population = target.min(config::MAX_POPULATION);
        population::reconcile(
            &mut self.bodies,
            self.target_population,
            self.size,
            self.now,
            &mut self.rng,
            &mut self.next_id,
        )
    }

    /// Feeds one delete press (timestamp in seconds) and applies the
    /// resulting population target.
    pub fn press_delete(&mut self, at: f64) -> usize {
        let target = self.delete_gesture.press(at, self.target_population);
        self.set_population(target);
        self.target_population
    }

    /// Updates the arena bounds. Bodies outside the new bounds are pulled back
    /// in by the next tick's wall pass.
    pub fn set_size(&mut self, size: ArenaSize) -> ArenaResult<()> {
        self.size = size.validate()?;
        debug!(width = size.width, height = size.height, "arena resized");
        Ok(())
    }

    pub fn snapshot(&self, out: &mut Vec<BodySnapshot>) {
        out.clear();
        out.extend(self.bodies.iter().map(Body::snapshot));
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            ticks: self.ticks,
            sim_time: self.now,
            bodies: self.bodies.len(),
            target_population: self.target_population,
            overlapping_pairs: self.last_overlaps,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn size(&self) -> ArenaSize {
        self.size
    }

    pub fn target_population(&self) -> usize {
        self.target_population
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    fn next_id(&mut self) -> BodyId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vec2;

    fn arena(seed: u64, population: usize) -> Arena {
        Arena::new(SimConfig::default().with_seed(seed).with_population(population))
            .expect("default size is valid")
    }

    mod new {
        use super::*;

        #[test]
        fn spawns_primary_first() {
            let arena = arena(1, 4);
            assert_eq!(arena.bodies().len(), 5);
            assert!(arena.bodies()[0].primary);
            assert_eq!(arena.bodies()[0].id, 1);
            assert_eq!(arena.bodies().iter().filter(|b| b.primary).count(), 1);
            assert_eq!(arena.target_population(), 4);
        }

        #[test]
        fn rejects_invalid_size() {
            let config = SimConfig::default().with_size(ArenaSize::new(10.0, 300.0));
            assert!(matches!(
                Arena::new(config),
                Err(ArenaError::InvalidSize { .. })
            ));
        }
    }

    mod tick {
        use super::*;

        #[test]
        fn advances_simulated_time_by_fixed_step() {
            let mut arena = arena(2, 3);
            for _ in 0..60 {
                arena.tick().expect("tick");
            }
            let stats = arena.stats();
            assert_eq!(stats.ticks, 60);
            assert!((stats.sim_time - 1.0).abs() < 1e-9);
            assert_eq!(stats.bodies, 4);
        }

        #[test]
        fn empty_body_set_is_reported() {
            let mut arena = arena(2, 0);
            arena.bodies.clear();
            assert!(matches!(arena.tick(), Err(ArenaError::EmptyArena)));
        }

        #[test]
        fn resolves_collisions_before_moving() {
            let mut arena = arena(3, 1);
            arena.bodies[0].pos = Vec2::new(100.0, 100.0);
            arena.bodies[1].pos = Vec2::new(120.0, 100.0);
            arena.tick().expect("tick");
            assert_eq!(arena.stats().overlapping_pairs, 1);
            let gap = (arena.bodies[1].pos - arena.bodies[0].pos).length();
            assert!(gap >= config::ICON_DIAMETER - 1.0);
        }
    }

    mod population_control {
        use super::*;

        #[test]
        fn press_delete_applies_gesture() {
            let mut arena = arena(4, 6);
            assert_eq!(arena.press_delete(0.0), 5);
            assert_eq!(arena.bodies().len(), 6);
            assert_eq!(arena.press_delete(0.2), 4);
            assert_eq!(arena.press_delete(0.4), 0);
            assert_eq!(arena.bodies().len(), 1);
            assert!(arena.bodies()[0].primary);
        }

        #[test]
        fn set_population_clamps() {
            let mut arena = arena(4, 0);
            arena.set_population(99);
            assert_eq!(arena.target_population(), config::MAX_POPULATION);
            assert_eq!(arena.bodies().len(), config::MAX_POPULATION + 1);
        }
    }

    mod set_size {
        use super::*;

        #[test]
        fn shrinking_pulls_bodies_back_inside() {
            let mut arena = arena(5, 10);
            let small = ArenaSize::new(120.0, 80.0);
            arena.set_size(small).expect("valid size");
            arena.tick().expect("tick");
            assert!(arena.bodies().iter().all(|b| small.contains_center(b.pos)));
        }

        #[test]
        fn invalid_size_keeps_previous_bounds() {
            let mut arena = arena(5, 1);
            let before = arena.size();
            assert!(arena.set_size(ArenaSize::new(0.0, 0.0)).is_err());
            assert_eq!(arena.size(), before);
        }
    }

    mod snapshot {
        use super::*;

        #[test]
        fn mirrors_bodies_in_order() {
            let arena = arena(6, 3);
            let mut out = vec![BodySnapshot {
                id: 99,
                pos: Vec2::ZERO,
                primary: false,
                visible: false,
            }];
            arena.snapshot(&mut out);
            assert_eq!(out.len(), 4);
            for (snap, body) in out.iter().zip(arena.bodies()) {
                assert_eq!(snap.id, body.id);
                assert_eq!(snap.pos, body.pos);
                assert_eq!(snap.primary, body.primary);
                assert!(snap.visible);
            }
        }
    }
}

use rand::Rng;
use tracing::debug;

use crate::{
    config,
    types::{ArenaSize, Body, BodyId},
};

/// Outcome of a [`reconcile`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub added: usize,
    pub removed: usize,
}

/// Grows or shrinks `bodies` to `target + 1` entries, where `target` counts
/// non-primary bodies and is clamped to [`config::MAX_POPULATION`].
///
/// New bodies are appended; removal truncates from the tail and never drops
/// the primary at index 0. Surviving bodies keep their state. `next_id` is
/// bumped for every body created.
pub fn reconcile<R: Rng + ?Sized>(
    bodies: &mut Vec<Body>,
    target: usize,
    size: ArenaSize,
    now: f64,
    rng: &mut R,
    next_id: &mut BodyId,
) -> Reconciled {
    let desired = target.min(config::MAX_POPULATION) + 1;
    let mut outcome = Reconciled::default();

    if desired > bodies.len() {
        outcome.added = desired - bodies.len();
        for _ in 0..outcome.added {
            let id = *next_id;
            *next_id += 1;
            bodies.push(Body::spawn(id, false, size, now, rng));
        }
    } else if desired < bodies.len() {
        let keep = desired.max(1);
        outcome.removed = bodies.len() - keep;
        bodies.truncate(keep);
    }

    for body in bodies.iter_mut() {
        body.visible = true;
    }

    if outcome != Reconciled::default() {
        debug!(
            added = outcome.added,
            removed = outcome.removed,
            total = bodies.len(),
            "reconciled population"
        );
    }
    outcome
}

/// Tracks presses of the delete action. Three presses with gaps of at most
/// [`config::RAPID_DELETE_WINDOW`] seconds between them clear the population.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeleteGesture {
    presses: u32,
    last_press: Option<f64>,
}

impl DeleteGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a press at `at` seconds and returns the new target.
    pub fn press(&mut self, at: f64, current_target: usize) -> usize {
        let stale = match self.last_press {
            Some(last) => at - last > config::RAPID_DELETE_WINDOW,
            None => true,
        };
        if stale {
            self.presses = 0;
        }
        self.presses += 1;
        self.last_press = Some(at);

        if self.presses >= config::RAPID_DELETE_PRESSES {
            self.presses = 0;
            debug!(from = current_target, "rapid delete cleared population");
            0
        } else {
            current_target.saturating_sub(1)
        }
    }

    pub fn presses(&self) -> u32 {
        self.presses
    }
}

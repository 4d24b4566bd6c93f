use crate::types::Body;

/// Sequential pairwise resolution over every `(i, j)` with `i < j`.
///
/// Pairs are visited in index order and each correction is applied before the
/// next pair is examined, so later pairs observe earlier pushes. Returns the
/// number of overlapping pairs that were corrected.
pub fn resolve_collisions(bodies: &mut [Body], min_distance: f32, restitution: f32) -> usize {
    let mut overlapping = 0;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (left, right) = bodies.split_at_mut(j);
            if resolve_pair(&mut left[i], &mut right[0], min_distance, restitution) {
                overlapping += 1;
            }
        }
    }
    overlapping
}

fn resolve_pair(a: &mut Body, b: &mut Body, min_distance: f32, restitution: f32) -> bool {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    // Coincident centers have no normal; they stay stuck together.
    if dist <= 0.0 || dist >= min_distance {
        return false;
    }

    let normal = delta * (1.0 / dist);
    let rel_along = (b.vel - a.vel).dot(normal);
    if rel_along < 0.0 {
        // Equal unit masses.
        let impulse = normal * (-(1.0 + restitution) * rel_along / 2.0);
        a.vel -= impulse;
        b.vel += impulse;
    }

    let push = normal * (0.5 * (min_distance - dist));
    a.pos -= push;
    b.pos += push;
    true
}

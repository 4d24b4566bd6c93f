use rand::Rng;

use crate::{
    config,
    types::{ArenaSize, Body, Vec2},
};

/// Moves every body one tick, bounces it off the walls and steps its speed
/// retarget state machine. `now` is the simulated time in seconds.
pub fn advance<R: Rng + ?Sized>(bodies: &mut [Body], size: ArenaSize, now: f64, rng: &mut R) {
    let (lo, hi) = (size.min_center(), size.max_center());
    for body in bodies.iter_mut() {
        body.pos += body.vel;
        reflect_walls(body, lo, hi);
        schedule_retarget(body, now, rng);
        step_speed(body, now);
    }
}

fn reflect_walls(body: &mut Body, lo: Vec2, hi: Vec2) {
    if body.pos.x <= lo.x || body.pos.x >= hi.x {
        body.vel.x = -body.vel.x;
        body.pos.x = body.pos.x.clamp(lo.x, hi.x);
    }
    if body.pos.y <= lo.y || body.pos.y >= hi.y {
        body.vel.y = -body.vel.y;
        body.pos.y = body.pos.y.clamp(lo.y, hi.y);
    }
}

fn schedule_retarget<R: Rng + ?Sized>(body: &mut Body, now: f64, rng: &mut R) {
    if now - body.last_speed_change <= body.next_speed_change_interval {
        return;
    }
    body.last_speed_change = now;
    body.next_speed_change_interval =
        rng.gen_range(config::RETARGET_INTERVAL_MIN..=config::RETARGET_INTERVAL_MAX);
    body.target_speed = Some(rng.gen_range(config::MIN_SPEED..=config::MAX_SPEED));
    body.speed_change_start = Some(now);
}

fn step_speed(body: &mut Body, now: f64) {
    let (Some(target), Some(start)) = (body.target_speed, body.speed_change_start) else {
        return;
    };
    let elapsed = now - start;
    if elapsed < body.speed_change_duration {
        let t = (elapsed / body.speed_change_duration).clamp(0.0, 1.0) as f32;
        body.speed = (body.speed * (1.0 - t) + target * t)
            .clamp(config::MIN_SPEED, config::MAX_SPEED);
        body.vel = Vec2::from_angle(body.vel.angle(), body.speed);
    } else {
        body.speed = target;
        body.vel = Vec2::from_angle(body.vel.angle(), body.speed);
        body.target_speed = None;
        body.speed_change_start = None;
    }
}

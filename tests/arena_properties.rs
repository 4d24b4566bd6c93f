use dokusai::{
    Arena, ArenaSize, Body, DeleteGesture, SimConfig, Vec2, config,
    core::{collision, motion},
};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

fn arena(seed: u64, population: usize) -> Arena {
    Arena::new(SimConfig::default().with_seed(seed).with_population(population))
        .expect("default arena size is valid")
}

fn state(arena: &Arena) -> Vec<(u64, Vec2, Vec2, f32)> {
    arena
        .bodies()
        .iter()
        .map(|b| (b.id, b.pos, b.vel, b.speed))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn population_is_target_plus_primary(seed in any::<u64>(), start in 0usize..=10, target in 0usize..=10) {
        let mut arena = arena(seed, start);
        let primary = arena.bodies()[0].id;
        arena.set_population(target);
        prop_assert_eq!(arena.bodies().len(), target + 1);
        prop_assert_eq!(arena.bodies()[0].id, primary);
        prop_assert!(arena.bodies()[0].primary);
        prop_assert_eq!(arena.bodies().iter().filter(|b| b.primary).count(), 1);
        prop_assert!(arena.bodies().iter().all(|b| b.visible));
    }

    #[test]
    fn bodies_stay_inside_and_speeds_stay_in_range(
        seed in any::<u64>(),
        population in 0usize..=10,
        ticks in 1usize..900,
    ) {
        let mut arena = arena(seed, population);
        let size = arena.size();
        for _ in 0..ticks {
            arena.tick().expect("tick");
            for body in arena.bodies() {
                prop_assert!(size.contains_center(body.pos), "{:?} escaped", body.pos);
                prop_assert!(body.speed >= config::MIN_SPEED && body.speed <= config::MAX_SPEED);
            }
        }
    }

    #[test]
    fn same_seed_replays_identically(seed in any::<u64>(), population in 0usize..=10) {
        let mut a = arena(seed, population);
        let mut b = arena(seed, population);
        for _ in 0..300 {
            a.tick().expect("tick");
            b.tick().expect("tick");
            prop_assert_eq!(state(&a), state(&b));
        }
    }

    #[test]
    fn overlapping_pair_ends_exactly_one_diameter_apart(
        ax in 25.0f32..365.0, ay in 25.0f32..275.0,
        dx in -49.0f32..49.0, dy in -49.0f32..49.0,
    ) {
        prop_assume!(dx * dx + dy * dy > 1.0 && dx * dx + dy * dy < 49.0 * 49.0);
        let mut rng = StdRng::seed_from_u64(0);
        let size = ArenaSize::new(390.0, 300.0);
        let mut bodies = vec![
            Body::spawn(1, true, size, 0.0, &mut rng),
            Body::spawn(2, false, size, 0.0, &mut rng),
        ];
        bodies[0].pos = Vec2::new(ax, ay);
        bodies[1].pos = Vec2::new(ax + dx, ay + dy);
        collision::resolve_collisions(&mut bodies, config::ICON_DIAMETER, config::RESTITUTION);
        let gap = (bodies[1].pos - bodies[0].pos).length();
        prop_assert!((gap - config::ICON_DIAMETER).abs() < 1e-3, "gap = {}", gap);
    }
}

#[test]
fn wall_reflection_flips_and_clamps_in_one_tick() {
    let size = ArenaSize::new(390.0, 300.0);
    let mut rng = StdRng::seed_from_u64(1);
    let mut body = Body::spawn(1, true, size, 0.0, &mut rng);
    let right = size.max_center().x;
    body.pos = Vec2::new(right - 0.1, 150.0);
    body.vel = Vec2::new(0.2, 0.0);
    body.speed = 0.2;
    let mut bodies = vec![body];
    motion::advance(&mut bodies, size, 0.0, &mut rng);
    assert_eq!(bodies[0].vel.x, -0.2);
    assert_eq!(bodies[0].pos.x, right);
}

#[test]
fn retarget_reaches_target_after_duration_and_clears() {
    let size = ArenaSize::new(390.0, 300.0);
    let mut rng = StdRng::seed_from_u64(2);
    let mut body = Body::spawn(1, true, size, 0.0, &mut rng);
    body.pos = Vec2::new(200.0, 150.0);
    body.vel = Vec2::new(0.0, 0.1);
    body.speed = 0.1;
    body.next_speed_change_interval = 1.0e9;
    body.target_speed = Some(0.3);
    body.speed_change_start = Some(0.0);
    let mut bodies = vec![body];

    let mut tick = 0u32;
    loop {
        tick += 1;
        let now = tick as f64 * config::DT;
        motion::advance(&mut bodies, size, now, &mut rng);
        let body = &bodies[0];
        if now < config::RETARGET_DURATION {
            assert_eq!(body.target_speed, Some(0.3), "cleared early at {now}");
            assert!(body.speed < 0.3 + f32::EPSILON);
        } else {
            assert_eq!(body.speed, 0.3);
            assert!(body.target_speed.is_none());
            assert!(body.speed_change_start.is_none());
            break;
        }
    }
    assert!((bodies[0].vel.length() - 0.3).abs() < 1e-6);
}

#[test]
fn three_quick_deletes_clear_the_arena() {
    let mut arena = arena(5, 7);
    arena.press_delete(100.0);
    arena.press_delete(100.5);
    assert_eq!(arena.target_population(), 5);
    arena.press_delete(101.2);
    assert_eq!(arena.target_population(), 0);
    assert_eq!(arena.bodies().len(), 1);
    assert!(arena.bodies()[0].primary);
}

#[test]
fn slow_deletes_step_down_one_at_a_time() {
    let mut gesture = DeleteGesture::new();
    let mut target = 3;
    for (i, expected) in [2, 1, 0, 0].into_iter().enumerate() {
        target = gesture.press(i as f64 * 1.01, target);
        assert_eq!(target, expected);
    }
}

#[test]
fn coincident_bodies_are_left_alone() {
    let size = ArenaSize::new(390.0, 300.0);
    let mut rng = StdRng::seed_from_u64(3);
    let mut bodies = vec![
        Body::spawn(1, true, size, 0.0, &mut rng),
        Body::spawn(2, false, size, 0.0, &mut rng),
    ];
    bodies[1].pos = bodies[0].pos;
    let hits = collision::resolve_collisions(&mut bodies, config::ICON_DIAMETER, config::RESTITUTION);
    assert_eq!(hits, 0);
    assert_eq!(bodies[0].pos, bodies[1].pos);
}

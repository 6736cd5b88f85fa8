//! Behavior-level tests spanning the collision layers. Unit tests for
//! individual solvers live in each solver's own module.

use exhaust::Exhaust as _;
use pretty_assertions::assert_eq;
use rand::Rng as _;
use rand::SeedableRng as _;
use rand_xoshiro::Xoshiro256Plus;

use crate::collision::sweep::{self, Obstacle, Response};
use crate::collision::{Tangency, intersect, overlap, raycast};
use crate::geometry::{Circle, Polygon, Rect, Shape};
use crate::math::{Point, nearly_eq, point2, vec2};

fn rng() -> Xoshiro256Plus {
    Xoshiro256Plus::seed_from_u64(0x5eed)
}

fn random_point(rng: &mut Xoshiro256Plus, range: f32) -> Point {
    point2(
        rng.random_range(-range..range),
        rng.random_range(-range..range),
    )
}

/// A random convex quadrilateral: a rotated rectangle's corners.
fn random_convex(rng: &mut Xoshiro256Plus) -> Polygon {
    let center = random_point(rng, 8.0);
    let half = vec2(
        rng.random_range(0.5..4.0f32),
        rng.random_range(0.5..4.0f32),
    );
    let rect = Rect::from_center_size(center, half * 2.0)
        .rotated(crate::math::Angle::radians(
            rng.random_range(0.0..core::f32::consts::TAU),
        ));
    Polygon::new(rect.corners().to_vec()).unwrap()
}

#[test]
fn circle_circle_collision_iff_distance_under_radius_sum() {
    let mut rng = rng();
    for _ in 0..1000 {
        let a = Circle::new(random_point(&mut rng, 10.0), rng.random_range(0.1..5.0));
        let b = Circle::new(random_point(&mut rng, 10.0), rng.random_range(0.1..5.0));
        let distance = (b.center - a.center).length();
        let hit = intersect::circle_circle(a, b);
        assert_eq!(
            hit.occurred(),
            distance < a.radius + b.radius,
            "distance {distance} vs radii {} + {}",
            a.radius,
            b.radius
        );
        if hit.occurred() {
            assert!(
                nearly_eq(hit.depth, a.radius + b.radius - distance),
                "depth {} != {}",
                hit.depth,
                a.radius + b.radius - distance
            );
            assert!(nearly_eq(hit.normal.length(), 1.0));
        }
    }
}

#[test]
fn intersection_is_symmetric_for_every_supported_pair() {
    let mut rng = rng();
    for _ in 0..300 {
        let shapes: [Shape; 3] = [
            Shape::from(Circle::new(
                random_point(&mut rng, 6.0),
                rng.random_range(0.5..4.0),
            )),
            Shape::from(Rect::from_center_size(
                random_point(&mut rng, 6.0),
                vec2(rng.random_range(1.0..6.0), rng.random_range(1.0..6.0)),
            )),
            Shape::from(random_convex(&mut rng)),
        ];
        for (i, a) in shapes.iter().enumerate() {
            for (j, b) in shapes.iter().enumerate() {
                if i == j {
                    // A shape against itself separates in a degenerate
                    // (convention-chosen) direction, which is not opposite
                    // of itself.
                    continue;
                }
                let (Ok(ab), Ok(ba)) = (intersect::shapes(a, b), intersect::shapes(b, a)) else {
                    continue;
                };
                assert_eq!(ab.occurred(), ba.occurred(), "{a:?} vs {b:?}");
                if ab.occurred() {
                    assert!(
                        (ab.normal + ba.normal).length() < 1e-4,
                        "normals not opposite: {ab:?} vs {ba:?} for {a:?} / {b:?}"
                    );
                    assert!(
                        (ab.depth - ba.depth).abs() < 1e-3,
                        "depths differ: {ab:?} vs {ba:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn queries_are_pure_and_idempotent() {
    let circle = Circle::new(point2(1.0, 2.0), 1.5);
    let rect = Rect::new(point2(0.0, 0.0), point2(4.0, 4.0));
    let first_overlap = overlap::circle_rect(circle, &rect, Tangency::Exclude);
    let first_intersect = intersect::circle_rect(circle, &rect);
    let first_raycast = raycast::circle_rect(circle, vec2(3.0, 0.5), &rect);
    for _ in 0..100 {
        assert_eq!(
            overlap::circle_rect(circle, &rect, Tangency::Exclude),
            first_overlap
        );
        assert_eq!(intersect::circle_rect(circle, &rect), first_intersect);
        assert_eq!(raycast::circle_rect(circle, vec2(3.0, 0.5), &rect), first_raycast);
    }
}

#[test]
fn disjoint_calls_are_safe_and_deterministic_in_parallel() {
    // The kernel holds no global mutable state, so sweeps for disjoint
    // entities may run concurrently; every thread must see the same answer.
    let mover = Shape::from(Circle::new(point2(0.0, 0.0), 0.5));
    let obstacles = vec![
        Obstacle::fixed(Rect::new(point2(4.5, -10.0), point2(6.0, 10.0))),
        Obstacle::fixed(Circle::new(point2(3.0, 3.0), 1.0)),
    ];
    let reference =
        sweep::sweep(&mover, vec2(8.0, 1.0), &obstacles, Response::Slide).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    sweep::sweep(&mover, vec2(8.0, 1.0), &obstacles, Response::Slide).unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), reference);
        }
    });
}

#[test]
fn swept_tangency_is_deterministic_across_repeats() {
    // Exact end-of-step tangency must answer "no impact" every time for
    // identical inputs, not flicker with evaluation order.
    let a = Circle::new(point2(0.0, 0.0), 1.0);
    let b = Circle::new(point2(6.0, 0.0), 1.0);
    let results: Vec<_> = (0..50)
        .map(|_| raycast::circle_circle(a, vec2(4.0, 0.0), b))
        .collect();
    for result in &results {
        assert!(!result.occurred());
        assert_eq!(*result, results[0]);
    }
}

#[test]
fn overlap_and_intersect_agree_on_occurrence() {
    // Wherever both layers support a pair, a reported minimum translation
    // implies boolean overlap (the converse may differ only at tangency).
    let mut rng = rng();
    for _ in 0..500 {
        let circle = Circle::new(random_point(&mut rng, 6.0), rng.random_range(0.5..3.0));
        let rect = Rect::from_center_size(
            random_point(&mut rng, 6.0),
            vec2(rng.random_range(1.0..5.0), rng.random_range(1.0..5.0)),
        );
        if intersect::circle_rect(circle, &rect).occurred() {
            assert!(
                overlap::circle_rect(circle, &rect, Tangency::Include),
                "{circle:?} vs {rect:?}"
            );
        }
    }
}

#[test]
fn resolved_velocity_is_always_finite() {
    // Whatever the configuration, the orchestrator's output must be usable
    // as a displacement: finite and NaN-free, even when truncated.
    let mut rng = rng();
    for _ in 0..200 {
        let mover = Shape::from(Circle::new(
            random_point(&mut rng, 5.0),
            rng.random_range(0.0..1.0),
        ));
        let obstacles: Vec<Obstacle> = (0..4)
            .map(|_| {
                Obstacle::fixed(Rect::from_center_size(
                    random_point(&mut rng, 8.0),
                    vec2(rng.random_range(0.5..4.0), rng.random_range(0.5..4.0)),
                ))
            })
            .collect();
        let velocity = vec2(
            rng.random_range(-20.0..20.0f32),
            rng.random_range(-20.0..20.0f32),
        );
        for response in Response::exhaust() {
            let resolved = sweep::sweep(&mover, velocity, &obstacles, response).unwrap();
            assert!(
                resolved.velocity.x.is_finite() && resolved.velocity.y.is_finite(),
                "non-finite velocity {resolved:?} for {mover:?} v {velocity:?}"
            );
            assert!(resolved.iterations <= obstacles.len());
        }
    }
}

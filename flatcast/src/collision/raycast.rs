//! Continuous (swept) collision: earliest time of impact over one step.
//!
//! The moving shape travels by the given relative displacement across the
//! normalized time range `[0, 1]`; its target is static (for a moving
//! target, subtract the target's displacement first — the
//! [`sweep`](crate::collision::sweep) orchestrator does this per obstacle).
//! `t = 1.0` is the sentinel for "no impact within this step": callers test
//! `t < 1.0`, never a boolean, so exact end-of-step tangency is deliberately
//! left for the next step.
//!
//! Degenerate inputs (near-zero displacement, zero-length segments) short
//! circuit to "no impact" before any division, and a would-be-NaN result is
//! replaced by "no impact" before it is returned; already-overlapping pairs
//! at `t = 0` are the static solver's job.

use crate::collision::overlap::{self, Tangency};
use crate::collision::UnsupportedQuery;
use crate::geometry::{Capsule, Circle, Rect, Segment, Shape};
use crate::math::{Vector, nearly_eq, nearly_zero, perp, quadratic_roots, vec2};

/// Result of a continuous collision query.
///
/// Invariants: `t ∈ [0, 1]` with `1.0` meaning "no impact"; `normal` is
/// either exactly zero (no impact) or unit length (± epsilon), oriented
/// against the relative motion.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct Raycast {
    /// Normalized time of impact within the step.
    pub t: f32,
    /// Unit contact normal at impact; zero if no impact.
    pub normal: Vector,
}

impl Raycast {
    pub(crate) fn none() -> Self {
        Raycast {
            t: 1.0,
            normal: Vector::zero(),
        }
    }

    fn new(t: f32, normal: Vector) -> Self {
        Raycast { t, normal }
    }

    /// Whether an impact occurs strictly within this step.
    #[must_use]
    pub fn occurred(&self) -> bool {
        debug_assert!(self.t >= 0.0);
        self.t < 1.0 && self.normal != Vector::zero()
    }
}

/// Earliest crossing of the moving point `a` (its path) with the static
/// segment `b`.
pub fn segment_segment(a: Segment, b: Segment) -> Raycast {
    if !overlap::segment_segment(a, b) {
        return Raycast::none();
    }

    let r = a.direction();
    let s = b.direction();

    let sr = s.cross(r);
    if nearly_zero(sr) {
        // Parallel or degenerate; no crossing instant.
        return Raycast::none();
    }

    let ab = a.a - b.a;
    let u = ab.cross(r) / sr;
    if !(0.0..=1.0).contains(&u) {
        return Raycast::none();
    }

    let rs = r.cross(s);
    if nearly_zero(rs) {
        return Raycast::none();
    }

    let normal_dir = -perp(s);
    let mag2 = normal_dir.square_length();
    if nearly_zero(mag2) {
        return Raycast::none();
    }

    let t = (-ab).cross(s) / rs;
    if t < 0.0 || t >= 1.0 {
        return Raycast::none();
    }

    let mut normal = normal_dir / mag2.sqrt();
    // A bare segment has two sides; orient against the motion.
    if normal.dot(r) > 0.0 {
        normal = -normal;
    }
    Raycast::new(t, normal)
}

/// Earliest contact of the moving point `segment` (its path) with the
/// static `circle`.
pub fn segment_circle(segment: Segment, circle: Circle) -> Raycast {
    if !overlap::segment_circle(segment, circle, Tangency::Exclude) {
        return Raycast::none();
    }

    let d = segment.a - segment.b;
    let f = circle.center - segment.a;

    let Some((t1, t2)) = quadratic_roots(
        d.dot(d),
        2.0 * f.dot(d),
        f.dot(f) - circle.radius_squared(),
    ) else {
        return Raycast::none();
    };

    // Pick the earliest root within the step.
    let w1 = (0.0..1.0).contains(&t1);
    let w2 = (0.0..1.0).contains(&t2);
    let t = match (w1, w2) {
        (true, true) => t1.min(t2),
        (true, false) => t1,
        (false, true) => t2,
        (false, false) => return Raycast::none(),
    };

    // Vector from the impact position to the circle center.
    let impact = (circle.center + d * t) - segment.a;
    let mag2 = impact.dot(impact);
    if nearly_zero(mag2) {
        // Passing through the exact center leaves the normal undefined.
        return Raycast::none();
    }

    Raycast::new(t, -impact / mag2.sqrt())
}

/// Earliest entry of the moving point `segment` (its path) into the static
/// axis-aligned `rect` — the per-axis slab test.
///
/// The time of impact is the *later* of the axis entry times, valid only if
/// it is earlier than the *earlier* of the exit times; otherwise the point
/// passes by without touching.
pub fn segment_rect(segment: Segment, rect: &Rect) -> Raycast {
    debug_assert!(rect.is_axis_aligned());

    // Starting inside is deep containment, which the static solver owns.
    if overlap::point_rect(segment.a, rect) {
        return Raycast::none();
    }

    let d = segment.direction();
    if d.dot(d) == 0.0 {
        return Raycast::none();
    }
    let inv = vec2(1.0 / d.x, 1.0 / d.y);

    let mut near = rect.min() - segment.a;
    let mut far = rect.max() - segment.a;
    // Snap offsets that are only fuzzily zero, so an edge-aligned path does
    // not produce an arbitrary sign.
    for v in [&mut near.x, &mut near.y, &mut far.x, &mut far.y] {
        if nearly_zero(*v) {
            *v = 0.0;
        }
    }

    let t_near = near.component_mul(inv);
    let t_far = far.component_mul(inv);
    // 0 · ∞ — the path runs exactly along a slab boundary.
    if t_near.x.is_nan() || t_near.y.is_nan() || t_far.x.is_nan() || t_far.y.is_nan() {
        return Raycast::none();
    }

    let (near_x, far_x) = minmax(t_near.x, t_far.x);
    let (near_y, far_y) = minmax(t_near.y, t_far.y);

    // An axis exits before the other enters: the path misses the box.
    if near_x >= far_y || near_y >= far_x {
        return Raycast::none();
    }

    // Departing contact only.
    if far_x.min(far_y) < 0.0 {
        return Raycast::none();
    }

    let t = near_x.max(near_y);
    if t < 0.0 || t >= 1.0 {
        return Raycast::none();
    }

    let equal_times = nearly_eq(near_x, near_y);
    let diagonal = nearly_eq(inv.x.abs(), inv.y.abs());
    let normal = if equal_times && diagonal {
        // A perfect corner hit; oppose the motion diagonally.
        vec2(-d.x.signum(), -d.y.signum()) / core::f32::consts::SQRT_2
    } else if near_x > near_y {
        vec2(if inv.x < 0.0 { 1.0 } else { -1.0 }, 0.0)
    } else if near_x < near_y {
        vec2(0.0, if inv.y < 0.0 { 1.0 } else { -1.0 })
    } else {
        // Equal entry times at unequal speeds: no well-defined face.
        return Raycast::none();
    };

    Raycast::new(t, normal)
}

/// Earliest contact of the moving point `segment` (its path) with the
/// static `capsule`: two side segments and two cap circles, earliest wins.
pub fn segment_capsule(segment: Segment, capsule: Capsule) -> Raycast {
    let core = capsule.segment;
    let core_dir = core.direction();
    let core_mag2 = core_dir.square_length();
    if nearly_zero(core_mag2) {
        // The capsule degenerates into a circle.
        return segment_circle(segment, Circle::new(core.a, capsule.radius));
    }
    let side_offset = perp(core_dir / core_mag2.sqrt()) * capsule.radius;

    let mut earliest = Raycast::none();
    for candidate in [
        segment_segment(segment, core.translate(side_offset)),
        segment_segment(segment, core.translate(-side_offset)),
        segment_circle(segment, Circle::new(core.a, capsule.radius)),
        segment_circle(segment, Circle::new(core.b, capsule.radius)),
    ] {
        if candidate.occurred() && candidate.t < earliest.t {
            earliest = candidate;
        }
    }

    if nearly_eq(earliest.t, 1.0) {
        return Raycast::none();
    }
    earliest
}

/// Earliest contact of a moving `circle` (displaced by `ray`) with a static
/// circle, by sweeping the center against the radius-sum circle.
pub fn circle_circle(a: Circle, ray: Vector, b: Circle) -> Raycast {
    if nearly_zero(ray.square_length()) {
        return Raycast::none();
    }
    segment_circle(
        Segment::new(a.center, a.center + ray),
        b.inflate(a.radius),
    )
}

/// Earliest contact of a moving `circle` (displaced by `ray`) with a static
/// `segment`.
pub fn circle_segment(circle: Circle, ray: Vector, segment: Segment) -> Raycast {
    if nearly_zero(ray.square_length()) {
        return Raycast::none();
    }
    segment_capsule(
        Segment::new(circle.center, circle.center + ray),
        Capsule::new(segment, circle.radius),
    )
}

/// Earliest contact of a moving `circle` (displaced by `ray`) with a static
/// `capsule`, by radius-sum reduction.
pub fn circle_capsule(circle: Circle, ray: Vector, capsule: Capsule) -> Raycast {
    if nearly_zero(ray.square_length()) {
        return Raycast::none();
    }
    segment_capsule(
        Segment::new(circle.center, circle.center + ray),
        capsule.inflate(circle.radius),
    )
}

/// Earliest contact of a moving `circle` (displaced by `ray`) with a static
/// axis-aligned `rect`.
///
/// Each rect edge inflated by the circle's radius is a capsule; together
/// they are the exact (rounded-corner) Minkowski boundary, so corners are
/// honored rather than squared off.
pub fn circle_rect(circle: Circle, ray: Vector, rect: &Rect) -> Raycast {
    debug_assert!(rect.is_axis_aligned());
    if nearly_zero(ray.square_length()) {
        return Raycast::none();
    }

    let path = Segment::new(circle.center, circle.center + ray);
    let corners = rect.corners();

    let mut earliest = Raycast::none();
    for i in 0..4 {
        let edge = Segment::new(corners[i], corners[(i + 1) % 4]);
        let candidate = segment_capsule(path, Capsule::new(edge, circle.radius));
        if candidate.occurred() && candidate.t < earliest.t {
            earliest = candidate;
        }
    }

    if earliest.t < 0.0 || earliest.t >= 1.0 {
        return Raycast::none();
    }
    earliest
}

/// Earliest contact of a moving `rect` (displaced by `ray`) with a static
/// axis-aligned rect: the static rect inflated by the mover's half-extents,
/// swept against the mover's center.
pub fn rect_rect(a: &Rect, ray: Vector, b: &Rect) -> Raycast {
    debug_assert!(a.is_axis_aligned() && b.is_axis_aligned());
    if nearly_zero(ray.square_length()) {
        return Raycast::none();
    }
    let half = a.half_size();
    let inflated = Rect::new(
        b.min() - half,
        b.max() + half,
    );
    let center = a.center();
    segment_rect(Segment::new(center, center + ray), &inflated)
}

/// Earliest contact of a moving `rect` (displaced by `ray`) with a static
/// `circle`, by reversing the frame of motion.
pub fn rect_circle(rect: &Rect, ray: Vector, circle: Circle) -> Raycast {
    let mut hit = circle_rect(circle, -ray, rect);
    hit.normal = -hit.normal;
    hit
}

/// Earliest contact of a moving `capsule` (displaced by `ray`) with a
/// static `circle`, by reversing the frame of motion.
pub fn capsule_circle(capsule: Capsule, ray: Vector, circle: Circle) -> Raycast {
    let mut hit = circle_capsule(circle, -ray, capsule);
    hit.normal = -hit.normal;
    hit
}

/// Continuous collision between a moving [`Shape`] and a static one.
///
/// Movers are circles and rects (and capsules against circles); rotated
/// rects and polygons have no continuous solver here and report
/// [`UnsupportedQuery`].
pub fn shapes(mover: &Shape, ray: Vector, target: &Shape) -> Result<Raycast, UnsupportedQuery> {
    use Shape as S;
    let unsupported = || UnsupportedQuery {
        a: mover.kind(),
        b: target.kind(),
    };
    Ok(match (mover, target) {
        (S::Circle(a), S::Circle(b)) => circle_circle(*a, ray, *b),
        (S::Circle(a), S::Rect(b)) if b.is_axis_aligned() => circle_rect(*a, ray, b),
        (S::Circle(a), S::Segment(b)) => circle_segment(*a, ray, *b),
        (S::Circle(a), S::Capsule(b)) => circle_capsule(*a, ray, *b),
        (S::Rect(a), S::Rect(b)) if a.is_axis_aligned() && b.is_axis_aligned() => {
            rect_rect(a, ray, b)
        }
        (S::Rect(a), S::Circle(b)) if a.is_axis_aligned() => rect_circle(a, ray, *b),
        (S::Capsule(a), S::Circle(b)) => capsule_circle(*a, ray, *b),
        _ => return Err(unsupported()),
    })
}

fn minmax(a: f32, b: f32) -> (f32, f32) {
    if a > b { (b, a) } else { (a, b) }
}

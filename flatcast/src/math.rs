//! Scalar and vector plumbing shared by every solver.
//!
//! All shape math is single-precision (`f32`). The near-zero / near-equal
//! comparisons used throughout the kernel funnel through [`nearly_eq`] and a
//! single shared [`EPSILON`], so that tangency decisions agree across every
//! query.

pub use euclid::{point2, vec2};
pub use ordered_float::{FloatIsNan, NotNan};

/// Unit-of-measure type for points and vectors in the collision plane.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum World {}

/// A position in the collision plane.
pub type Point = euclid::Point2D<f32, World>;

/// A displacement or direction in the collision plane.
///
/// Velocities are expressed as displacement over one step, so the swept
/// solvers work on the normalized time range `[0, 1]`.
pub type Vector = euclid::Vector2D<f32, World>;

/// A rotation angle, in radians.
pub type Angle = euclid::Angle<f32>;

/// Absolute and relative tolerance used by [`nearly_eq`].
pub const EPSILON: f32 = 10.0 * f32::EPSILON;

/// Approximate equality with both absolute and relative tolerance.
///
/// Infinities are equal only to themselves; NaN is equal to nothing.
#[inline]
#[must_use]
pub fn nearly_eq(a: f32, b: f32) -> bool {
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    a == b || (a - b).abs() <= f32::max(EPSILON, EPSILON * f32::max(a.abs(), b.abs()))
}

/// [`nearly_eq`] against zero.
#[inline]
#[must_use]
pub fn nearly_zero(value: f32) -> bool {
    nearly_eq(value, 0.0)
}

/// The perpendicular of `v`, rotated a quarter turn counterclockwise.
#[inline]
#[must_use]
pub fn perp(v: Vector) -> Vector {
    vec2(-v.y, v.x)
}

/// Twice the signed area of the triangle `a b c`.
///
/// The sign tells which side of the directed line `c → b` the point `a`
/// falls on, which is all the segment tests need.
#[inline]
#[must_use]
pub fn parallelogram_area(a: Point, b: Point, c: Point) -> f32 {
    (a - c).cross(b - c)
}

/// Real roots of `a·x² + b·x + c = 0`, smaller-magnitude numerics first.
///
/// Returns [`None`] for imaginary roots and for a degenerate (near-zero) `a`,
/// so callers never divide by a vanishing leading coefficient. A repeated
/// root is returned twice.
#[must_use]
pub fn quadratic_roots(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    if nearly_zero(a) {
        return None;
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    if nearly_zero(disc) {
        let root = -0.5 * b / a;
        return Some((root, root));
    }
    // Evaluated this way, neither root suffers cancellation.
    let q = if b > 0.0 {
        -0.5 * (b + disc.sqrt())
    } else {
        -0.5 * (b - disc.sqrt())
    };
    Some((q / a, c / q))
}

/// Squared distance from `c` to the closest point on the segment `a b`.
///
/// A degenerate segment (`a == b`) degrades gracefully to point distance.
#[must_use]
pub fn square_distance_point_segment(c: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let ac = c - a;
    let bc = c - b;
    let e = ac.dot(ab);
    // c projects outside the segment, before a.
    if e <= 0.0 {
        return ac.dot(ac);
    }
    let f = ab.dot(ab);
    // c projects outside the segment, past b.
    if e >= f {
        return bc.dot(bc);
    }
    ac.dot(ac) - e * e / f
}

/// Squared distance from `p` to the closest point of the axis-aligned box
/// `min..max`. Zero when `p` is inside the box.
#[must_use]
pub fn square_distance_point_box(p: Point, min: Point, max: Point) -> f32 {
    let mut dist2 = 0.0;
    for (v, lo, hi) in [(p.x, min.x, max.x), (p.y, min.y, max.y)] {
        if v < lo {
            dist2 += (lo - v) * (lo - v);
        }
        if v > hi {
            dist2 += (v - hi) * (v - hi);
        }
    }
    dist2
}

/// Squared distance between the closest points of segments `a1 a2` and
/// `b1 b2`.
///
/// Degenerate segments (zero length) are handled as points; no divisor here
/// can vanish.
#[must_use]
pub fn square_distance_segment_segment(a1: Point, a2: Point, b1: Point, b2: Point) -> f32 {
    let d1 = a2 - a1;
    let d2 = b2 - b1;
    let r = a1 - b1;
    let a = d1.dot(d1);
    let e = d2.dot(d2);
    let f = d2.dot(r);

    let s;
    let t;
    if a <= EPSILON && e <= EPSILON {
        // Both segments degenerate into points.
        return r.dot(r);
    }
    if a <= EPSILON {
        // First segment degenerates into a point.
        s = 0.0;
        t = (f / e).clamp(0.0, 1.0);
    } else {
        let c = d1.dot(r);
        if e <= EPSILON {
            // Second segment degenerates into a point.
            t = 0.0;
            s = (-c / a).clamp(0.0, 1.0);
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            // If the segments are not parallel, pick the closest point on the
            // first infinite line; else any s will do.
            let s0 = if denom != 0.0 {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let tnom = b * s0 + f;
            if tnom < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if tnom > e {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            } else {
                t = tnom / e;
                s = s0;
            }
        }
    }
    let c1 = a1 + d1 * s;
    let c2 = b1 + d2 * t;
    (c1 - c2).dot(c1 - c2)
}

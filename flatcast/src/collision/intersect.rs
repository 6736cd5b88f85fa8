//! Static intersection: minimum separating normal and penetration depth.
//!
//! For a pair of shapes that overlap *right now*, these solvers report the
//! unit direction the first shape should move in to separate, and how far.
//! "No collision" is a first-class result (zero normal), never an error.

use crate::collision::{UnsupportedQuery, stats};
use crate::geometry::{self, Circle, Polygon, Rect, Shape};
use crate::math::{EPSILON, Point, Vector, nearly_zero, vec2};

/// Result of a static intersection query.
///
/// Invariants: `normal` is either exactly zero (no collision) or unit length
/// (± epsilon); `depth` is finite and `≥ 0`, measured along `normal`; the
/// normal points *from the second shape toward the first*, i.e. moving the
/// first shape by `normal * depth` separates the pair.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct Intersection {
    /// Minimum-translation direction for the first shape; zero if no
    /// collision.
    pub normal: Vector,
    /// Penetration depth along `normal`.
    pub depth: f32,
}

impl Intersection {
    pub(crate) fn none() -> Self {
        Intersection {
            normal: Vector::zero(),
            depth: 0.0,
        }
    }

    fn new(normal: Vector, depth: f32) -> Self {
        Intersection { normal, depth }
    }

    /// Whether a collision occurred.
    #[must_use]
    pub fn occurred(&self) -> bool {
        debug_assert!(
            self.depth >= 0.0 && self.depth.is_finite(),
            "intersection depth invariant violated: {self:?}"
        );
        self.normal != Vector::zero()
    }

    /// The same contact seen from the other shape.
    #[inline]
    #[must_use]
    pub fn flipped(self) -> Self {
        Intersection {
            normal: -self.normal,
            depth: self.depth,
        }
    }
}

/// When a separation direction is undefined (coincident centers), push
/// upward by convention.
const DEGENERATE_NORMAL: Vector = Vector::new(0.0, -1.0);

/// Minimum translation between two overlapping circles.
pub fn circle_circle(a: Circle, b: Circle) -> Intersection {
    let d = b.center - a.center;
    let dist2 = d.dot(d);
    let r = a.radius + b.radius;

    if dist2 >= r * r {
        return Intersection::none();
    }

    if dist2 > EPSILON * EPSILON {
        let dist = dist2.sqrt();
        Intersection::new(-d / dist, (r - dist).max(0.0))
    } else {
        // Coincident centers: the direction is undefined.
        Intersection::new(DEGENERATE_NORMAL, r)
    }
}

/// Minimum translation pushing `circle` out of the axis-aligned `rect`.
///
/// Two regimes, split on whether the circle's center is inside the rect; no
/// single formula covers both.
pub fn circle_rect(circle: Circle, rect: &Rect) -> Intersection {
    debug_assert!(rect.is_axis_aligned());

    let half = rect.half_size();
    let (min, max) = (rect.min(), rect.max());
    let clamped = crate::math::point2(
        circle.center.x.clamp(min.x, max.x),
        circle.center.y.clamp(min.y, max.y),
    );
    let ab = circle.center - clamped;
    let dist2 = ab.dot(ab);

    if dist2 >= circle.radius_squared() {
        return Intersection::none();
    }

    if !nearly_zero(dist2) {
        // Shallow: the center is outside the rect.
        let dist = dist2.sqrt();
        return Intersection::new(ab / dist, (circle.radius - dist).max(0.0));
    }

    // Deep: the center is inside the rect, so the clamped distance is zero
    // and the shallow formula is undefined. Push out through the nearest
    // edge instead.
    let d = rect.center() - circle.center;
    let overlap = half - vec2(d.x.abs(), d.y.abs());
    let intersection = if overlap.x < overlap.y {
        Intersection::new(
            vec2(if d.x < 0.0 { 1.0 } else { -1.0 }, 0.0),
            circle.radius + overlap.x,
        )
    } else {
        Intersection::new(
            vec2(0.0, if d.y < 0.0 { 1.0 } else { -1.0 }),
            circle.radius + overlap.y,
        )
    };
    debug_assert!(intersection.depth >= 0.0);
    intersection
}

/// Minimum translation between two overlapping rects.
///
/// Axis-aligned pairs use the fast per-axis penetration comparison; if
/// either rect is rotated, both become 4-vertex polygons and the separating
/// axis solver decides.
pub fn rect_rect(a: &Rect, b: &Rect) -> Intersection {
    if !a.is_axis_aligned() || !b.is_axis_aligned() {
        return convex_convex(&a.corners(), &b.corners());
    }

    let a_half = a.half_size();
    let b_half = b.half_size();
    let d = b.center() - a.center();
    let pen = a_half + b_half - vec2(d.x.abs(), d.y.abs());

    if pen.x <= 0.0 || pen.y <= 0.0 || nearly_zero(pen.x) || nearly_zero(pen.y) {
        return Intersection::none();
    }

    if nearly_zero(d.x) && nearly_zero(d.y) {
        // Coincident centers.
        return Intersection::new(DEGENERATE_NORMAL, a_half.y + b_half.y);
    }
    // Separate along the axis of least penetration, preferring Y on ties.
    if pen.y <= pen.x {
        Intersection::new(vec2(0.0, -d.y.signum()), pen.y)
    } else {
        Intersection::new(vec2(-d.x.signum(), 0.0), pen.x)
    }
}

/// Minimum translation between two overlapping convex polygons, by the
/// separating axis theorem.
pub fn polygon_polygon(a: &Polygon, b: &Polygon) -> Intersection {
    convex_convex(a.vertices(), b.vertices())
}

/// SAT minimum translation over raw vertex loops.
pub(crate) fn convex_convex(av: &[Point], bv: &[Point]) -> Intersection {
    debug_assert!(
        geometry::is_convex(av) && geometry::is_convex(bv),
        "polygon intersection requires both polygons convex"
    );

    let mut depth = f32::INFINITY;
    let mut best_axis = Vector::zero();

    if !min_overlap_on_axes_of(av, bv, &mut depth, &mut best_axis)
        || !min_overlap_on_axes_of(bv, av, &mut depth, &mut best_axis)
    {
        return Intersection::none();
    }

    debug_assert!(depth.is_finite() && depth >= 0.0);

    // Orient the winning axis from b's centroid toward a's centroid,
    // independent of which polygon contributed it.
    let dir = geometry::centroid(av) - geometry::centroid(bv);
    if dir.dot(best_axis) < 0.0 {
        best_axis = -best_axis;
    }

    Intersection::new(best_axis, depth)
}

/// Projects both loops onto each candidate axis of `av`, tracking the
/// smallest overlap. Returns `false` as soon as any axis separates the
/// pair — the early exit that makes SAT cheap for distant shapes.
fn min_overlap_on_axes_of(
    av: &[Point],
    bv: &[Point],
    depth: &mut f32,
    best_axis: &mut Vector,
) -> bool {
    // Containment decides how overlap is measured, but it is only worth
    // computing once a non-separating axis is seen.
    let mut contained = None;
    for axis in geometry::separating_axes(av) {
        stats::record_sat_axis();
        let (min1, max1) = geometry::project_onto(av, axis);
        let (min2, max2) = geometry::project_onto(bv, axis);
        if !geometry::intervals_overlap(min1, max1, min2, max2) {
            return false;
        }
        let contained = *contained.get_or_insert_with(|| {
            geometry::contains_all(av, bv) || geometry::contains_all(bv, av)
        });
        let (amount, flip) = geometry::interval_overlap_amount(min1, max1, min2, max2, contained);
        if amount < *depth {
            *depth = amount;
            *best_axis = if flip { -axis } else { axis };
        }
    }
    true
}

/// Static intersection between two [`Shape`]s, order-symmetric: swapping the
/// arguments negates the normal.
///
/// Supported pairs are those drawn from circle, rect, and convex polygon,
/// except circle vs. rotated rect and circle vs. polygon, which have no
/// closed-form minimum translation here.
pub fn shapes(a: &Shape, b: &Shape) -> Result<Intersection, UnsupportedQuery> {
    use Shape as S;
    match (a, b) {
        (S::Circle(ca), S::Circle(cb)) => Ok(circle_circle(*ca, *cb)),
        (S::Circle(c), S::Rect(r)) if r.is_axis_aligned() => Ok(circle_rect(*c, r)),
        (S::Rect(r), S::Circle(c)) if r.is_axis_aligned() => Ok(circle_rect(*c, r).flipped()),
        (S::Rect(ra), S::Rect(rb)) => Ok(rect_rect(ra, rb)),
        (S::Rect(r), S::Polygon(p)) => Ok(convex_convex(&r.corners(), p.vertices())),
        (S::Polygon(p), S::Rect(r)) => Ok(convex_convex(p.vertices(), &r.corners())),
        (S::Polygon(pa), S::Polygon(pb)) => Ok(polygon_polygon(pa, pb)),
        _ => Err(UnsupportedQuery {
            a: a.kind(),
            b: b.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{nearly_eq, point2};

    #[test]
    fn circle_circle_depth_matches_distance() {
        let a = Circle::new(point2(0.0, 0.0), 2.0);
        let b = Circle::new(point2(3.0, 0.0), 2.0);
        let hit = circle_circle(a, b);
        assert!(hit.occurred());
        // Distance 3, radii sum 4.
        assert_eq!(hit.normal, vec2(-1.0, 0.0));
        assert!(nearly_eq(hit.depth, 1.0));

        // Separated or tangent pairs report no collision.
        assert!(!circle_circle(a, Circle::new(point2(4.0, 0.0), 2.0)).occurred());
        assert!(!circle_circle(a, Circle::new(point2(5.0, 0.0), 2.0)).occurred());
    }

    #[test]
    fn circle_circle_coincident_centers() {
        let hit = circle_circle(
            Circle::new(point2(1.0, 1.0), 2.0),
            Circle::new(point2(1.0, 1.0), 3.0),
        );
        assert!(hit.occurred());
        assert_eq!(hit.normal, vec2(0.0, -1.0));
        assert_eq!(hit.depth, 5.0);
    }

    #[test]
    fn circle_rect_shallow() {
        let rect = Rect::new(point2(0.0, 0.0), point2(10.0, 10.0));
        // Center 1 above the top edge, radius 3.
        let hit = circle_rect(Circle::new(point2(5.0, 11.0), 3.0), &rect);
        assert!(hit.occurred());
        assert_eq!(hit.normal, vec2(0.0, 1.0));
        assert!(nearly_eq(hit.depth, 2.0));
    }

    #[test]
    fn circle_rect_deep_containment() {
        let rect = Rect::new(point2(0.0, 0.0), point2(100.0, 50.0));
        // A radius-1 circle fully inside a large rect: depth must be
        // radius + distance-to-nearest-edge, never ≈ 0.
        let hit = circle_rect(Circle::new(point2(30.0, 10.0), 1.0), &rect);
        assert!(hit.occurred());
        assert_eq!(hit.normal, vec2(0.0, -1.0));
        assert_eq!(hit.depth, 11.0);

        // Nearest to the left edge instead.
        let hit = circle_rect(Circle::new(point2(3.0, 25.0), 1.0), &rect);
        assert_eq!(hit.normal, vec2(-1.0, 0.0));
        assert_eq!(hit.depth, 4.0);
    }

    #[test]
    fn rect_rect_overlap_and_tie_break() {
        // The canonical tie: both axes penetrate by 5; Y wins.
        let a = Rect::new(point2(0.0, 0.0), point2(10.0, 10.0));
        let b = Rect::new(point2(5.0, 5.0), point2(15.0, 15.0));
        let hit = rect_rect(&a, &b);
        assert!(hit.occurred());
        assert_eq!(hit.normal, vec2(0.0, -1.0));
        assert_eq!(hit.depth, 5.0);

        // Unequal penetrations pick the smaller axis.
        let b = Rect::new(point2(8.0, 5.0), point2(18.0, 15.0));
        let hit = rect_rect(&a, &b);
        assert_eq!(hit.normal, vec2(-1.0, 0.0));
        assert_eq!(hit.depth, 2.0);
    }

    #[test]
    fn rect_rect_coincident_centers() {
        let a = Rect::new(point2(0.0, 0.0), point2(10.0, 10.0));
        let b = Rect::new(point2(2.0, 2.0), point2(8.0, 8.0));
        let hit = rect_rect(&a, &b);
        assert_eq!(hit.normal, vec2(0.0, -1.0));
        assert_eq!(hit.depth, 8.0);
    }

    #[test]
    fn rotated_rects_use_sat() {
        let a = Rect::new(point2(0.0, 0.0), point2(2.0, 2.0));
        let b = Rect::new(point2(1.5, 0.0), point2(3.5, 2.0))
            .rotated(crate::math::Angle::frac_pi_4());
        let hit = rect_rect(&a, &b);
        assert!(hit.occurred());
        assert!(nearly_eq(hit.normal.length(), 1.0));
        assert!(hit.depth > 0.0 && hit.depth.is_finite());
    }

    #[test]
    fn sat_separated_early_exit() {
        // Two squares separated along the first candidate axis: exactly one
        // axis evaluation may happen.
        let a = Polygon::new(vec![
            point2(0.0, 0.0),
            point2(2.0, 0.0),
            point2(2.0, 2.0),
            point2(0.0, 2.0),
        ])
        .unwrap();
        let b = a.translated(vec2(0.0, 10.0));
        stats::take_sat_axes_evaluated();
        let hit = polygon_polygon(&a, &b);
        assert!(!hit.occurred());
        assert_eq!(stats::take_sat_axes_evaluated(), 1);
    }

    #[test]
    fn sat_containment_depth_not_degenerate() {
        let big = Polygon::new(vec![
            point2(0.0, 0.0),
            point2(10.0, 0.0),
            point2(10.0, 10.0),
            point2(0.0, 10.0),
        ])
        .unwrap();
        // A unit square near the big square's min corner.
        let small = Polygon::new(vec![
            point2(2.0, 2.0),
            point2(3.0, 2.0),
            point2(3.0, 3.0),
            point2(2.0, 3.0),
        ])
        .unwrap();
        let hit = polygon_polygon(&small, &big);
        assert!(hit.occurred());
        // Contained span 1 plus nearer-endpoint distance 2, not the naive ≈1.
        assert_eq!(hit.depth, 3.0);
    }

    #[test]
    fn shape_dispatch_symmetry() {
        let circle = Shape::from(Circle::new(point2(5.0, 9.5), 1.0));
        let rect = Shape::from(Rect::new(point2(0.0, 0.0), point2(10.0, 10.0)));
        let ab = shapes(&circle, &rect).unwrap();
        let ba = shapes(&rect, &circle).unwrap();
        assert!(ab.occurred());
        assert_eq!(ab.normal, -ba.normal);
        assert_eq!(ab.depth, ba.depth);
    }

    #[test]
    fn unsupported_pairs_error() {
        let circle = Shape::from(Circle::new(point2(0.0, 0.0), 1.0));
        let segment = Shape::from(crate::geometry::Segment::new(
            point2(0.0, 0.0),
            point2(1.0, 0.0),
        ));
        assert!(shapes(&circle, &segment).is_err());
    }
}

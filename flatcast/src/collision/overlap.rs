//! Boolean-only overlap queries.
//!
//! These answer "do these shapes overlap right now" as cheaply as possible:
//! squared-distance comparisons wherever a square root can be avoided, and
//! an early-exit separating-axis test for the convex-polygon pairs. Use them
//! to cull candidate pairs before invoking the heavier
//! [`intersect`](crate::collision::intersect) and
//! [`raycast`](crate::collision::raycast) solvers.
//!
//! Every near-zero / near-equal comparison funnels through the shared
//! [`crate::math::EPSILON`], so tangency is treated consistently across all
//! queries. Where exact tangency is geometrically meaningful, the query
//! takes a [`Tangency`] argument; the conventional defaults are
//! [`Tangency::Exclude`] for perimeter contact (a circle touching a wall is
//! not yet colliding) while segment/segment endpoint contact always counts.

use crate::collision::{UnsupportedQuery, stats};
use crate::geometry::{
    self, Capsule, Circle, Polygon, Rect, Segment, Shape,
};
use crate::math::{
    EPSILON, Point, nearly_eq, nearly_zero, parallelogram_area, square_distance_point_box,
    square_distance_point_segment, square_distance_segment_segment, vec2,
};

/// Whether exact tangency — contact with zero penetration — counts as
/// overlap.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
pub enum Tangency {
    /// Touching boundaries do not count as overlap.
    Exclude,
    /// Touching boundaries count as overlap.
    Include,
}

/// The one shared perimeter predicate: is `dist2` within a radius-`radius`
/// perimeter?
pub(crate) fn within_perimeter(radius: f32, dist2: f32, tangency: Tangency) -> bool {
    let rad2 = radius * radius;
    match tangency {
        Tangency::Exclude => dist2 < rad2 && !nearly_eq(dist2, rad2),
        Tangency::Include => dist2 < rad2 || nearly_eq(dist2, rad2),
    }
}

/// Whether two points (nearly) coincide.
#[inline]
pub fn point_point(a: Point, b: Point) -> bool {
    nearly_eq(a.x, b.x) && nearly_eq(a.y, b.y)
}

/// Whether `point` lies on `segment`.
pub fn point_segment(point: Point, segment: Segment) -> bool {
    let ab = segment.direction();
    let ac = point - segment.a;
    let bc = point - segment.b;
    let e = ac.dot(ab);
    // Handle the cases where the point projects outside the segment.
    if e < 0.0 || nearly_zero(e) {
        return nearly_zero(ac.x) && nearly_zero(ac.y);
    }
    let f = ab.dot(ab);
    if e > f || nearly_eq(e, f) {
        return nearly_zero(bc.x) && nearly_zero(bc.y);
    }
    nearly_eq(ac.dot(ac) * f, e * e)
}

/// Whether `point` is within `circle`.
#[inline]
pub fn point_circle(point: Point, circle: Circle, tangency: Tangency) -> bool {
    let d = point - circle.center;
    within_perimeter(circle.radius, d.dot(d), tangency)
}

/// Whether `point` is within `rect` (boundary inclusive).
pub fn point_rect(point: Point, rect: &Rect) -> bool {
    if !rect.is_axis_aligned() {
        return geometry::point_in_polygon(&rect.corners(), point);
    }
    let (min, max) = (rect.min(), rect.max());
    min.x <= point.x && point.x <= max.x && min.y <= point.y && point.y <= max.y
}

/// Whether `point` is within `polygon`.
#[inline]
pub fn point_polygon(point: Point, polygon: &Polygon) -> bool {
    polygon.contains_point(point)
}

/// Whether `point` is within `capsule`.
#[inline]
pub fn point_capsule(point: Point, capsule: Capsule, tangency: Tangency) -> bool {
    within_perimeter(
        capsule.radius,
        square_distance_point_segment(point, capsule.segment.a, capsule.segment.b),
        tangency,
    )
}

/// Whether two segments cross or touch.
///
/// Orientation (cross-product sign) tests with an explicit collinear branch;
/// touching endpoints count as overlap.
pub fn segment_segment(a: Segment, b: Segment) -> bool {
    // Signs of the areas say which side of `a` each endpoint of `b` is on.
    let a1 = parallelogram_area(a.a, a.b, b.b);
    let a2 = parallelogram_area(a.a, a.b, b.a);
    let collinear = nearly_zero(a1) || nearly_zero(a2);
    if !collinear && a1 * a2 < 0.0 {
        // Endpoints of `b` on opposite sides of `a`; now test the converse.
        let a3 = parallelogram_area(b.a, b.b, a.a);
        // The area is affine: a1 - a2 = a3 - a4.
        let a4 = a3 + a2 - a1;
        let product = a3 * a4;
        // A zero product is an endpoint meeting the other segment's interior.
        return product < 0.0 || nearly_zero(product);
    }
    if collinear {
        return point_segment(b.a, a)
            || point_segment(b.b, a)
            || point_segment(a.a, b)
            || point_segment(a.b, b);
    }
    false
}

/// Whether `segment` crosses or touches the perimeter region of `circle`.
pub fn segment_circle(segment: Segment, circle: Circle, tangency: Tangency) -> bool {
    // A segment entirely inside the circle overlaps trivially.
    if point_circle(segment.a, circle, tangency) && point_circle(segment.b, circle, tangency) {
        return true;
    }
    let op = segment.a - circle.center;
    let oq = segment.b - circle.center;
    let pq = segment.direction();
    let op2 = op.dot(op);
    let oq2 = oq.dot(oq);
    let max2 = op2.max(oq2);
    let min2 = if op.dot(-pq) > 0.0 && oq.dot(pq) > 0.0 {
        // The center projects onto the segment's interior; perpendicular
        // distance via the triangle area.
        let triangle_area = parallelogram_area(circle.center, segment.a, segment.b).abs() / 2.0;
        4.0 * triangle_area * triangle_area / pq.dot(pq)
    } else {
        op2.min(oq2)
    };
    within_perimeter(circle.radius, min2, tangency)
        && !within_perimeter(circle.radius, max2, tangency)
}

/// Whether `segment` overlaps `rect`.
pub fn segment_rect(segment: Segment, rect: &Rect) -> bool {
    if !rect.is_axis_aligned() {
        return segment_convex(segment, &rect.corners());
    }
    let e = rect.half_size();
    let d = segment.b - segment.midpoint();
    let m = segment.midpoint() - rect.center();

    // Try the world coordinate axes as separating axes.
    let adx = d.x.abs();
    if m.x.abs() >= e.x + adx {
        return false;
    }
    let ady = d.y.abs();
    if m.y.abs() >= e.y + ady {
        return false;
    }
    // Counteract arithmetic error when the segment is (near) parallel to a
    // coordinate axis.
    let adx = adx + EPSILON;
    let ady = ady + EPSILON;

    // Try the cross product of the segment direction with the axes.
    m.cross(d).abs() <= e.dot(vec2(ady, adx))
}

/// Whether `segment` overlaps the convex `polygon`.
pub fn segment_polygon(segment: Segment, polygon: &Polygon) -> bool {
    segment_convex(segment, polygon.vertices())
}

fn segment_convex(segment: Segment, vertices: &[Point]) -> bool {
    if geometry::point_in_polygon(vertices, segment.a) {
        return true;
    }
    edges(vertices).any(|edge| segment_segment(segment, edge))
}

/// Whether `segment` comes within `capsule.radius` of its core segment.
#[inline]
pub fn segment_capsule(segment: Segment, capsule: Capsule, tangency: Tangency) -> bool {
    within_perimeter(
        capsule.radius,
        square_distance_segment_segment(
            segment.a,
            segment.b,
            capsule.segment.a,
            capsule.segment.b,
        ),
        tangency,
    )
}

/// Whether two circles overlap.
#[inline]
pub fn circle_circle(a: Circle, b: Circle, tangency: Tangency) -> bool {
    let d = a.center - b.center;
    within_perimeter(a.radius + b.radius, d.dot(d), tangency)
}

/// Whether `circle` overlaps `rect`.
///
/// Clamping the circle center into the rect and comparing squared distance
/// against `radius²` classifies "center inside rect" as overlapping.
pub fn circle_rect(circle: Circle, rect: &Rect, tangency: Tangency) -> bool {
    if !rect.is_axis_aligned() {
        return circle_convex(circle, &rect.corners(), tangency);
    }
    within_perimeter(
        circle.radius,
        square_distance_point_box(circle.center, rect.min(), rect.max()),
        tangency,
    )
}

/// Whether `circle` overlaps the convex `polygon`.
pub fn circle_polygon(circle: Circle, polygon: &Polygon, tangency: Tangency) -> bool {
    circle_convex(circle, polygon.vertices(), tangency)
}

fn circle_convex(circle: Circle, vertices: &[Point], tangency: Tangency) -> bool {
    if geometry::point_in_polygon(vertices, circle.center) {
        return true;
    }
    edges(vertices).any(|edge| segment_circle(edge, circle, tangency))
}

/// Whether `circle` overlaps `capsule`.
#[inline]
pub fn circle_capsule(circle: Circle, capsule: Capsule, tangency: Tangency) -> bool {
    within_perimeter(
        circle.radius + capsule.radius,
        square_distance_point_segment(circle.center, capsule.segment.a, capsule.segment.b),
        tangency,
    )
}

/// Whether two rects overlap: an interval-overlap test on both axes when
/// both are axis-aligned, and the polygon separating-axis test otherwise.
pub fn rect_rect(a: &Rect, b: &Rect, tangency: Tangency) -> bool {
    if !a.is_axis_aligned() || !b.is_axis_aligned() {
        return convex_convex(&a.corners(), &b.corners());
    }
    if a.max().x < b.min().x || a.min().x > b.max().x {
        return false;
    }
    if a.max().y < b.min().y || a.min().y > b.max().y {
        return false;
    }
    if tangency == Tangency::Exclude {
        // Exact seam contact does not count.
        if nearly_eq(a.min().x, b.max().x) || nearly_eq(a.max().x, b.min().x) {
            return false;
        }
        if nearly_eq(a.max().y, b.min().y) || nearly_eq(a.min().y, b.max().y) {
            return false;
        }
    }
    true
}

/// Whether `rect` overlaps the convex `polygon`.
pub fn rect_polygon(rect: &Rect, polygon: &Polygon) -> bool {
    convex_convex(&rect.corners(), polygon.vertices())
}

/// Whether `rect` overlaps `capsule`.
pub fn rect_capsule(rect: &Rect, capsule: Capsule, tangency: Tangency) -> bool {
    if point_rect(capsule.segment.a, rect) || point_rect(capsule.segment.b, rect) {
        return true;
    }
    edges(&rect.corners()).any(|edge| segment_capsule(edge, capsule, tangency))
}

/// Whether two capsules overlap.
#[inline]
pub fn capsule_capsule(a: Capsule, b: Capsule, tangency: Tangency) -> bool {
    within_perimeter(
        a.radius + b.radius,
        square_distance_segment_segment(a.segment.a, a.segment.b, b.segment.a, b.segment.b),
        tangency,
    )
}

/// Whether two convex polygons overlap, by the separating axis theorem.
#[inline]
pub fn polygon_polygon(a: &Polygon, b: &Polygon) -> bool {
    convex_convex(a.vertices(), b.vertices())
}

/// SAT overlap over raw vertex loops: any axis without interval overlap
/// proves separation, and the test returns at the first one found.
pub(crate) fn convex_convex(av: &[Point], bv: &[Point]) -> bool {
    has_overlap_on_axes_of(av, bv) && has_overlap_on_axes_of(bv, av)
}

fn has_overlap_on_axes_of(av: &[Point], bv: &[Point]) -> bool {
    for axis in geometry::separating_axes(av) {
        stats::record_sat_axis();
        let (min1, max1) = geometry::project_onto(av, axis);
        let (min2, max2) = geometry::project_onto(bv, axis);
        if !geometry::intervals_overlap(min1, max1, min2, max2) {
            return false;
        }
    }
    true
}

/// The edge segments of a vertex loop.
fn edges(vertices: &[Point]) -> impl Iterator<Item = Segment> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| Segment::new(vertices[i], vertices[(i + 1) % n]))
}

/// Boolean overlap between any two [`Shape`]s.
///
/// The only pair without a solver is capsule vs. polygon.
pub fn shapes(a: &Shape, b: &Shape, tangency: Tangency) -> Result<bool, UnsupportedQuery> {
    use Shape as S;
    Ok(match (a, b) {
        (S::Circle(a), S::Circle(b)) => circle_circle(*a, *b, tangency),
        (S::Circle(c), S::Rect(r)) | (S::Rect(r), S::Circle(c)) => circle_rect(*c, r, tangency),
        (S::Circle(c), S::Polygon(p)) | (S::Polygon(p), S::Circle(c)) => {
            circle_polygon(*c, p, tangency)
        }
        (S::Circle(c), S::Segment(s)) | (S::Segment(s), S::Circle(c)) => {
            segment_circle(*s, *c, tangency)
        }
        (S::Circle(c), S::Capsule(cap)) | (S::Capsule(cap), S::Circle(c)) => {
            circle_capsule(*c, *cap, tangency)
        }
        (S::Rect(a), S::Rect(b)) => rect_rect(a, b, tangency),
        (S::Rect(r), S::Polygon(p)) | (S::Polygon(p), S::Rect(r)) => rect_polygon(r, p),
        (S::Rect(r), S::Segment(s)) | (S::Segment(s), S::Rect(r)) => segment_rect(*s, r),
        (S::Rect(r), S::Capsule(cap)) | (S::Capsule(cap), S::Rect(r)) => {
            rect_capsule(r, *cap, tangency)
        }
        (S::Polygon(a), S::Polygon(b)) => polygon_polygon(a, b),
        (S::Polygon(p), S::Segment(s)) | (S::Segment(s), S::Polygon(p)) => segment_polygon(*s, p),
        (S::Polygon(_), S::Capsule(_)) | (S::Capsule(_), S::Polygon(_)) => {
            return Err(UnsupportedQuery {
                a: a.kind(),
                b: b.kind(),
            });
        }
        (S::Segment(a), S::Segment(b)) => segment_segment(*a, *b),
        (S::Segment(s), S::Capsule(cap)) | (S::Capsule(cap), S::Segment(s)) => {
            segment_capsule(*s, *cap, tangency)
        }
        (S::Capsule(a), S::Capsule(b)) => capsule_capsule(*a, *b, tangency),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point2;

    #[test]
    fn point_rect_boundary_is_inclusive() {
        let rect = Rect::new(point2(0.0, 0.0), point2(10.0, 10.0));
        assert!(point_rect(point2(0.0, 5.0), &rect));
        assert!(point_rect(point2(10.0, 10.0), &rect));
        assert!(!point_rect(point2(10.1, 5.0), &rect));
    }

    #[test]
    fn circle_tangency_policy() {
        // Centers 5 apart, radii summing to exactly 5.
        let a = Circle::new(point2(0.0, 0.0), 2.0);
        let b = Circle::new(point2(5.0, 0.0), 3.0);
        assert!(!circle_circle(a, b, Tangency::Exclude));
        assert!(circle_circle(a, b, Tangency::Include));
        // Any actual penetration overlaps under both policies.
        let b = Circle::new(point2(4.9, 0.0), 3.0);
        assert!(circle_circle(a, b, Tangency::Exclude));
    }

    #[test]
    fn circle_center_inside_rect_overlaps() {
        let rect = Rect::new(point2(0.0, 0.0), point2(10.0, 10.0));
        // The center is deep inside, far from every edge relative to the
        // radius; the clamped-point distance is zero.
        assert!(circle_rect(
            Circle::new(point2(5.0, 5.0), 0.5),
            &rect,
            Tangency::Exclude
        ));
    }

    #[test]
    fn segment_endpoint_touch_counts() {
        let spine = Segment::new(point2(0.0, 0.0), point2(10.0, 0.0));
        // T-junction: an endpoint lands on the other segment's interior.
        assert!(segment_segment(
            spine,
            Segment::new(point2(5.0, 0.0), point2(5.0, 4.0))
        ));
        // Shared endpoint.
        assert!(segment_segment(
            spine,
            Segment::new(point2(10.0, 0.0), point2(12.0, 5.0))
        ));
        // Proper crossing.
        assert!(segment_segment(
            spine,
            Segment::new(point2(5.0, -1.0), point2(5.0, 1.0))
        ));
        // Near miss.
        assert!(!segment_segment(
            spine,
            Segment::new(point2(5.0, 0.1), point2(5.0, 4.0))
        ));
    }

    #[test]
    fn collinear_segments() {
        let a = Segment::new(point2(0.0, 0.0), point2(4.0, 0.0));
        assert!(segment_segment(
            a,
            Segment::new(point2(2.0, 0.0), point2(8.0, 0.0))
        ));
        assert!(!segment_segment(
            a,
            Segment::new(point2(5.0, 0.0), point2(8.0, 0.0))
        ));
    }

    #[test]
    fn rect_seam_policy() {
        let a = Rect::new(point2(0.0, 0.0), point2(1.0, 1.0));
        let b = Rect::new(point2(1.0, 0.0), point2(2.0, 1.0));
        assert!(!rect_rect(&a, &b, Tangency::Exclude));
        assert!(rect_rect(&a, &b, Tangency::Include));
    }

    #[test]
    fn rotated_rect_routes_through_sat() {
        // A diamond (square rotated 45°) diagonally off a unit square's
        // corner: their axis-aligned boxes overlap, but the shapes do not.
        let square = Rect::new(point2(0.0, 0.0), point2(1.0, 1.0));
        let diamond = Rect::new(point2(1.0, 1.0), point2(3.0, 3.0))
            .rotated(crate::math::Angle::frac_pi_4());
        assert!(rect_rect(
            &square.bounding_box(),
            &diamond.bounding_box(),
            Tangency::Exclude
        ));
        assert!(!rect_rect(&square, &diamond, Tangency::Exclude));
    }

    #[test]
    fn segment_rect_crossing_and_miss() {
        let rect = Rect::new(point2(2.0, 2.0), point2(4.0, 4.0));
        assert!(segment_rect(
            Segment::new(point2(0.0, 3.0), point2(6.0, 3.0)),
            &rect
        ));
        assert!(!segment_rect(
            Segment::new(point2(0.0, 5.0), point2(6.0, 5.0)),
            &rect
        ));
        // Fully inside counts.
        assert!(segment_rect(
            Segment::new(point2(2.5, 2.5), point2(3.5, 3.5)),
            &rect
        ));
    }

    #[test]
    fn capsule_queries() {
        let capsule = Capsule::new(Segment::new(point2(0.0, 0.0), point2(10.0, 0.0)), 1.0);
        assert!(circle_capsule(
            Circle::new(point2(5.0, 1.5), 1.0),
            capsule,
            Tangency::Exclude
        ));
        assert!(!circle_capsule(
            Circle::new(point2(5.0, 2.5), 1.0),
            capsule,
            Tangency::Exclude
        ));
        assert!(capsule_capsule(
            capsule,
            Capsule::new(Segment::new(point2(5.0, 1.5), point2(5.0, 8.0)), 0.6),
            Tangency::Exclude
        ));
    }
}

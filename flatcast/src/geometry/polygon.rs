use core::fmt;

use crate::geometry::Rect;
use crate::math::{Point, Vector, nearly_zero, perp};

/// A convex polygon.
///
/// The vertex list is validated at construction: at least three finite
/// vertices, strictly convex, nonzero area. Vertices are stored in
/// counterclockwise order regardless of the order supplied.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    vertices: Vec<Point>,
}

/// Error from [`Polygon::new`]: the vertex list does not describe a convex
/// polygon.
#[derive(Clone, Copy, Debug, Eq, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum InvalidPolygon {
    /// polygon needs at least 3 vertices, got {0}
    TooFewVertices(usize),
    /// polygon vertices must all be finite
    NotFinite,
    /// polygon has (near) zero area
    Degenerate,
    /// polygon is not convex
    NotConvex,
}

impl core::error::Error for InvalidPolygon {}

impl Polygon {
    /// Constructs a polygon, validating convexity.
    ///
    /// Vertices may be given in either winding; they are stored
    /// counterclockwise.
    pub fn new(mut vertices: Vec<Point>) -> Result<Self, InvalidPolygon> {
        if vertices.len() < 3 {
            return Err(InvalidPolygon::TooFewVertices(vertices.len()));
        }
        if !vertices
            .iter()
            .all(|v| v.x.is_finite() && v.y.is_finite())
        {
            return Err(InvalidPolygon::NotFinite);
        }
        let area = signed_area(&vertices);
        if nearly_zero(area) {
            return Err(InvalidPolygon::Degenerate);
        }
        if !is_convex(&vertices) {
            return Err(InvalidPolygon::NotConvex);
        }
        if area < 0.0 {
            vertices.reverse();
        }
        Ok(Self { vertices })
    }

    /// The vertices, in counterclockwise order.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// The signed-area centroid of the polygon.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point {
        centroid(&self.vertices)
    }

    /// Whether `point` is inside the polygon (boundary excluded on some
    /// edges; this test is intended for area queries, not exact edge
    /// classification).
    #[inline]
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point_in_polygon(&self.vertices, point)
    }

    /// Whether every vertex of `other` is inside this polygon.
    #[inline]
    #[must_use]
    pub fn contains_polygon(&self, other: &Polygon) -> bool {
        contains_all(&self.vertices, &other.vertices)
    }

    /// Translates every vertex by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector) -> Polygon {
        Polygon {
            vertices: self.vertices.iter().map(|&v| v + offset).collect(),
        }
    }

    /// The axis-aligned box covering the polygon.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        for &v in &self.vertices[1..] {
            min = min.min(v);
            max = max.max(v);
        }
        Rect::new(min, max)
    }
}

impl fmt::Debug for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Polygon").field(&self.vertices).finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Vertex-slice geometry shared with the rect paths (a rotated rect's corners
// are a convex polygon without the allocation).

/// Twice the enclosed signed area; positive for counterclockwise winding.
pub(crate) fn signed_area(vertices: &[Point]) -> f32 {
    let mut area = 0.0;
    let mut prev = vertices[vertices.len() - 1];
    for &v in vertices {
        area += prev.to_vector().cross(v.to_vector());
        prev = v;
    }
    area
}

/// Whether the vertex loop turns the same way at every corner.
pub(crate) fn is_convex(vertices: &[Point]) -> bool {
    let n = vertices.len();
    debug_assert!(n >= 3);
    let cross_sign = |a: Point, b: Point, c: Point| -> i8 {
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross > 0.0 {
            1
        } else if cross < 0.0 {
            -1
        } else {
            0
        }
    };
    let sign = cross_sign(vertices[0], vertices[1], vertices[2]);
    for i in 1..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        if cross_sign(a, b, c) != sign {
            return false;
        }
    }
    true
}

/// Signed-area centroid of a vertex loop.
pub(crate) fn centroid(vertices: &[Point]) -> Point {
    let mut centroid = Vector::zero();
    let mut signed_area = 0.0;
    let mut prev = vertices[vertices.len() - 1];
    for &v in vertices {
        let a = prev.to_vector().cross(v.to_vector());
        signed_area += a;
        centroid += (prev.to_vector() + v.to_vector()) * a;
        prev = v;
    }
    if nearly_zero(signed_area) {
        // Zero-area input (rejected by `Polygon::new`, but reachable through
        // the slice-level SAT paths): average the vertices instead.
        let sum = vertices
            .iter()
            .fold(Vector::zero(), |sum, v| sum + v.to_vector());
        return (sum / vertices.len() as f32).to_point();
    }
    (centroid / (3.0 * signed_area)).to_point()
}

/// Point-in-polygon by edge crossing counting.
pub(crate) fn point_in_polygon(vertices: &[Point], point: Point) -> bool {
    let count = vertices.len();
    let mut inside = false;
    let mut j = count - 1;
    for i in 0..count {
        let (vi, vj) = (vertices[i], vertices[j]);
        let crosses = (vi.y > point.y) != (vj.y > point.y);
        if crosses && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Whether every vertex of `inner` lies inside the polygon `outer`.
pub(crate) fn contains_all(outer: &[Point], inner: &[Point]) -> bool {
    inner.iter().all(|&p| point_in_polygon(outer, p))
}

/// Candidate separating axes of a polygon: the unit perpendicular of each
/// edge, with degenerate edges skipped and parallel duplicates removed.
pub(crate) fn separating_axes(vertices: &[Point]) -> Vec<Vector> {
    let mut axes: Vec<Vector> = Vec::with_capacity(vertices.len());
    for i in 0..vertices.len() {
        let j = if i + 1 == vertices.len() { 0 } else { i + 1 };
        let edge = vertices[i] - vertices[j];
        let length_squared = edge.square_length();
        if nearly_zero(length_squared) {
            // Coinciding points define no axis.
            continue;
        }
        let axis = perp(edge) / length_squared.sqrt();
        if !axes
            .iter()
            .any(|existing| nearly_zero(existing.cross(axis)))
        {
            axes.push(axis);
        }
    }
    axes
}

/// Projection of a vertex loop onto a unit axis, as a `(min, max)` interval.
pub(crate) fn project_onto(vertices: &[Point], axis: Vector) -> (f32, f32) {
    debug_assert!(!vertices.is_empty());
    debug_assert!(axis.square_length() <= 1.0 + crate::math::EPSILON);
    let mut min = axis.dot(vertices[0].to_vector());
    let mut max = min;
    for v in &vertices[1..] {
        let p = axis.dot(v.to_vector());
        if p < min {
            min = p;
        } else if p > max {
            max = p;
        }
    }
    (min, max)
}

/// Whether the intervals `[min1, max1]` and `[min2, max2]` overlap at all.
#[inline]
pub(crate) fn intervals_overlap(min1: f32, max1: f32, min2: f32, max2: f32) -> bool {
    !(min1 > max2 || min2 > max1)
}

/// Overlap amount between two intervals known to overlap.
///
/// When one projection is fully contained in the other (`contained`), the
/// amount is the contained span plus the distance to the nearer pair of
/// endpoints — the naive span difference degenerates toward zero for
/// containment. The returned flag asks the caller to flip the axis so the
/// separation still points the shorter way out.
pub(crate) fn interval_overlap_amount(
    min1: f32,
    max1: f32,
    min2: f32,
    max2: f32,
    contained: bool,
) -> (f32, bool) {
    if !intervals_overlap(min1, max1, min2, max2) {
        return (0.0, false);
    }

    let min_dist = min1 - min2;
    let max_dist = max1 - max2;

    if contained {
        let internal = f32::min(max1, max2) - f32::max(min1, min2);
        let min_endpoint = min_dist.abs();
        let max_endpoint = max_dist.abs();
        if max_endpoint > min_endpoint {
            return (internal + min_endpoint, true);
        }
        return (internal + max_endpoint, false);
    }

    let right_dist = (min1 - max2).abs();
    if max_dist > 0.0 {
        // Overlapping the interval from the right.
        return (right_dist, false);
    }
    let left_dist = (max1 - min2).abs();
    if min_dist < 0.0 {
        // Overlapping the interval from the left.
        return (left_dist, false);
    }
    // Entirely within the interval.
    (f32::min(right_dist, left_dist), false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{point2, vec2};

    fn square() -> Vec<Point> {
        vec![
            point2(0.0, 0.0),
            point2(2.0, 0.0),
            point2(2.0, 2.0),
            point2(0.0, 2.0),
        ]
    }

    #[test]
    fn construction_validates() {
        assert_eq!(
            Polygon::new(vec![point2(0.0, 0.0), point2(1.0, 0.0)]),
            Err(InvalidPolygon::TooFewVertices(2))
        );
        assert_eq!(
            Polygon::new(vec![
                point2(0.0, 0.0),
                point2(1.0, f32::NAN),
                point2(0.0, 1.0)
            ]),
            Err(InvalidPolygon::NotFinite)
        );
        assert_eq!(
            Polygon::new(vec![
                point2(0.0, 0.0),
                point2(1.0, 0.0),
                point2(2.0, 0.0)
            ]),
            Err(InvalidPolygon::Degenerate)
        );
        // An arrowhead is concave.
        assert_eq!(
            Polygon::new(vec![
                point2(0.0, 0.0),
                point2(4.0, 0.0),
                point2(1.0, 1.0),
                point2(0.0, 4.0),
            ]),
            Err(InvalidPolygon::NotConvex)
        );
        assert!(Polygon::new(square()).is_ok());
    }

    #[test]
    fn winding_is_normalized() {
        let ccw = Polygon::new(square()).unwrap();
        let mut reversed = square();
        reversed.reverse();
        let cw = Polygon::new(reversed).unwrap();
        assert!(signed_area(ccw.vertices()) > 0.0);
        assert!(signed_area(cw.vertices()) > 0.0);
    }

    #[test]
    fn centroid_of_square() {
        let polygon = Polygon::new(square()).unwrap();
        assert_eq!(polygon.centroid(), point2(1.0, 1.0));
    }

    #[test]
    fn point_containment() {
        let polygon = Polygon::new(square()).unwrap();
        assert!(polygon.contains_point(point2(1.0, 1.0)));
        assert!(!polygon.contains_point(point2(3.0, 1.0)));
        assert!(!polygon.contains_point(point2(-0.1, 1.0)));
    }

    #[test]
    fn axes_skip_parallel_duplicates() {
        // A square has four edges but only two distinct axis directions.
        let axes = separating_axes(&square());
        assert_eq!(axes.len(), 2);
        for axis in axes {
            assert!(nearly_zero(axis.square_length() - 1.0));
        }
    }

    #[test]
    fn projection_interval() {
        let (min, max) = project_onto(&square(), vec2(1.0, 0.0));
        assert_eq!((min, max), (0.0, 2.0));
    }

    #[test]
    fn containment_overlap_is_not_degenerate() {
        // [2, 3] inside [0, 10]: span 1 plus nearer-endpoint distance 2.
        let (amount, flip) = interval_overlap_amount(0.0, 10.0, 2.0, 3.0, true);
        assert_eq!(amount, 3.0);
        assert!(flip);
        // The plain formula would report the bare span.
        let (amount, _) = interval_overlap_amount(0.0, 10.0, 2.0, 3.0, false);
        assert_eq!(amount, 1.0);
    }
}

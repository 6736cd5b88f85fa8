use core::fmt;

use crate::geometry::{Capsule, Circle, Polygon, Rect, Segment};
use crate::math::{Point, Vector};

/// The closed set of shapes the kernel can dispatch on.
///
/// Collision queries match exhaustively over this enum, so adding or removing
/// a shape kind is compile-time checked at every dispatch site, and the
/// complete supported-shape set is documented here in one place.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// See [`Circle`].
    Circle(Circle),
    /// See [`Rect`].
    Rect(Rect),
    /// See [`Polygon`].
    Polygon(Polygon),
    /// See [`Segment`].
    Segment(Segment),
    /// See [`Capsule`].
    Capsule(Capsule),
}

impl Shape {
    /// The kind tag of this shape.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Segment(_) => ShapeKind::Segment,
            Shape::Capsule(_) => ShapeKind::Capsule,
        }
    }

    /// A representative center point, used for distance tie-breaking.
    #[must_use]
    pub fn center(&self) -> Point {
        match self {
            Shape::Circle(circle) => circle.center,
            Shape::Rect(rect) => rect.center(),
            Shape::Polygon(polygon) => polygon.centroid(),
            Shape::Segment(segment) => segment.midpoint(),
            Shape::Capsule(capsule) => capsule.segment.midpoint(),
        }
    }

    /// The shape translated by `offset`.
    #[must_use]
    pub fn translate(&self, offset: Vector) -> Shape {
        match self {
            Shape::Circle(circle) => Shape::Circle(Circle::new(circle.center + offset, circle.radius)),
            Shape::Rect(rect) => Shape::Rect(rect.translate(offset)),
            Shape::Polygon(polygon) => Shape::Polygon(polygon.translated(offset)),
            Shape::Segment(segment) => Shape::Segment(segment.translate(offset)),
            Shape::Capsule(capsule) => {
                Shape::Capsule(Capsule::new(capsule.segment.translate(offset), capsule.radius))
            }
        }
    }

    /// A conservative axis-aligned bound of the shape.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        match self {
            Shape::Circle(circle) => circle.bounding_box(),
            Shape::Rect(rect) => rect.bounding_box(),
            Shape::Polygon(polygon) => polygon.bounding_box(),
            Shape::Segment(segment) => segment.bounding_box(),
            Shape::Capsule(capsule) => capsule.bounding_box(),
        }
    }

    /// A conservative axis-aligned bound covering the shape across a step of
    /// motion: the union of the bounds at the start and end positions.
    ///
    /// This is the cheap per-candidate extent a broadphase wants for
    /// pre-filtering sweep candidates.
    #[must_use]
    pub fn swept_bounding_box(&self, velocity: Vector) -> Rect {
        let at_start = self.bounding_box();
        at_start.union(at_start.translate(velocity))
    }
}

impl From<Circle> for Shape {
    #[inline]
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}
impl From<Rect> for Shape {
    #[inline]
    fn from(rect: Rect) -> Self {
        Shape::Rect(rect)
    }
}
impl From<Polygon> for Shape {
    #[inline]
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}
impl From<Segment> for Shape {
    #[inline]
    fn from(segment: Segment) -> Self {
        Shape::Segment(segment)
    }
}
impl From<Capsule> for Shape {
    #[inline]
    fn from(capsule: Capsule) -> Self {
        Shape::Capsule(capsule)
    }
}

/// Kind tags for [`Shape`], used in dispatch-failure errors.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[allow(missing_docs)]
pub enum ShapeKind {
    Circle,
    Rect,
    Polygon,
    Segment,
    Capsule,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rect => "rect",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Segment => "segment",
            ShapeKind::Capsule => "capsule",
        })
    }
}

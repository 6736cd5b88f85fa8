use core::fmt;

use crate::math::{Angle, Point, Vector, point2};

/// Fractional position within a [`Rect`]: `(0, 0)` is the `min` corner,
/// `(1, 1)` is the `max` corner.
pub type RectFraction = euclid::default::Point2D<f32>;

/// An axis-aligned or rotated rectangle.
///
/// `min`/`max` are the corners of the unrotated rectangle; a nonzero
/// `rotation` spins it about a pivot given as a [`RectFraction`]
/// (`(0.5, 0.5)`, the default, is the geometric center).
///
/// Queries that require an axis-aligned rectangle route rotated ones through
/// the convex-polygon path via [`Rect::corners`].
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    min: Point,
    max: Point,
    rotation: Angle,
    rotation_center: RectFraction,
}

impl Rect {
    /// Constructs an axis-aligned rectangle from its most-negative and
    /// most-positive corners.
    ///
    /// Panics if the corners are misordered or NaN.
    #[inline]
    #[track_caller]
    pub fn new(min: Point, max: Point) -> Self {
        match Self::checked_new(min, max) {
            Some(rect) => rect,
            None => panic!("invalid Rect corners that are misordered or NaN: min {min:?} max {max:?}"),
        }
    }

    /// Constructs an axis-aligned rectangle, returning [`None`] if the
    /// corners are misordered or NaN.
    pub(crate) fn checked_new(min: Point, max: Point) -> Option<Self> {
        if min.x <= max.x && min.y <= max.y {
            Some(Self {
                min,
                max,
                rotation: Angle::zero(),
                rotation_center: point2(0.5, 0.5),
            })
        } else {
            None
        }
    }

    /// Constructs an axis-aligned rectangle from its center and full size.
    #[inline]
    #[track_caller]
    pub fn from_center_size(center: Point, size: Vector) -> Self {
        Self::new(center - size * 0.5, center + size * 0.5)
    }

    /// Returns this rectangle rotated by `rotation` about its center.
    #[inline]
    #[must_use]
    pub fn rotated(self, rotation: Angle) -> Self {
        Self { rotation, ..self }
    }

    /// Returns this rectangle rotated by `rotation` about the given
    /// fractional pivot.
    #[inline]
    #[must_use]
    pub fn rotated_about(self, rotation: Angle, rotation_center: RectFraction) -> Self {
        Self {
            rotation,
            rotation_center,
            ..self
        }
    }

    /// The most-negative corner of the unrotated rectangle.
    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    /// The most-positive corner of the unrotated rectangle.
    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    /// The rotation applied about [`Rect::rotation_center`].
    #[inline]
    pub fn rotation(&self) -> Angle {
        self.rotation
    }

    /// The fractional pivot of [`Rect::rotation`].
    #[inline]
    pub fn rotation_center(&self) -> RectFraction {
        self.rotation_center
    }

    /// Whether no rotation is applied, so the axis-aligned fast paths apply.
    #[inline]
    #[must_use]
    pub fn is_axis_aligned(&self) -> bool {
        self.rotation.radians == 0.0
    }

    /// Full size of the rectangle.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    /// Half the size of the rectangle, as used by the separating-axis and
    /// Minkowski arithmetic.
    #[inline]
    #[must_use]
    pub fn half_size(&self) -> Vector {
        self.size() * 0.5
    }

    /// The center of the rectangle, accounting for rotation.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        self.rotate_about_pivot(self.min + self.size() * 0.5)
    }

    /// The pivot point the rotation is applied about.
    fn pivot(&self) -> Point {
        let size = self.size();
        self.min
            + Vector::new(
                size.x * self.rotation_center.x,
                size.y * self.rotation_center.y,
            )
    }

    fn rotate_about_pivot(&self, p: Point) -> Point {
        if self.is_axis_aligned() {
            return p;
        }
        let pivot = self.pivot();
        let d = p - pivot;
        let (sin, cos) = self.rotation.radians.sin_cos();
        pivot + Vector::new(cos * d.x - sin * d.y, sin * d.x + cos * d.y)
    }

    /// The rectangle's four corners in cyclic order, with rotation applied.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            point2(self.max.x, self.min.y),
            self.max,
            point2(self.min.x, self.max.y),
        ]
        .map(|p| self.rotate_about_pivot(p))
    }

    /// Translates the rectangle by `offset`, preserving rotation.
    #[inline]
    #[must_use]
    pub fn translate(self, offset: Vector) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
            ..self
        }
    }

    /// Moves each edge of an axis-aligned rectangle outward by `amount`.
    #[inline]
    #[must_use]
    pub fn expand(self, amount: f32) -> Self {
        debug_assert!(amount >= 0.0 && self.is_axis_aligned());
        let d = Vector::splat(amount);
        Self {
            min: self.min - d,
            max: self.max + d,
            ..self
        }
    }

    /// The smallest axis-aligned rectangle containing both `self` and
    /// `other`. Both inputs must be axis-aligned.
    #[inline]
    #[must_use]
    pub fn union(self, other: Rect) -> Rect {
        debug_assert!(self.is_axis_aligned() && other.is_axis_aligned());
        Rect::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// The axis-aligned box covering this rectangle, rotation included.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        if self.is_axis_aligned() {
            return *self;
        }
        let corners = self.corners();
        let mut min = corners[0];
        let mut max = corners[0];
        for &corner in &corners[1..] {
            min = min.min(corner);
            max = max.max(corner);
        }
        Rect::new(min, max)
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rect {
            min,
            max,
            rotation,
            rotation_center,
        } = *self;
        let mut out = f.debug_tuple("Rect");
        out.field(&(min.x..=max.x)).field(&(min.y..=max.y));
        if rotation.radians != 0.0 {
            out.field(&rotation).field(&rotation_center);
        }
        out.finish()
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Rect {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let a: Point = u.arbitrary()?;
        let b: Point = u.arbitrary()?;
        let rect = Rect::checked_new(a.min(b), a.max(b))
            .ok_or(arbitrary::Error::IncorrectFormat)?;
        Ok(rect.rotated_about(
            Angle::radians(u.arbitrary()?),
            RectFraction::new(u.arbitrary()?, u.arbitrary()?),
        ))
    }
}

use crate::geometry::Rect;
use crate::math::{Point, vec2};

/// A circle: a center point and a radius.
#[derive(Clone, Copy, Debug, PartialEq)]
#[expect(clippy::exhaustive_structs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    /// Center position.
    pub center: Point,
    /// Radius. Must be finite and non-negative for queries to be meaningful.
    pub radius: f32,
}

impl Circle {
    /// Constructs a circle from its center and radius.
    #[inline]
    pub fn new(center: Point, radius: f32) -> Self {
        Self { center, radius }
    }

    /// `radius²`, the form most distance comparisons want.
    #[inline]
    #[must_use]
    pub fn radius_squared(&self) -> f32 {
        self.radius * self.radius
    }

    /// Grows the radius by `amount`. Used by the swept solvers' Minkowski
    /// reductions.
    #[inline]
    #[must_use]
    pub fn inflate(self, amount: f32) -> Self {
        Self {
            center: self.center,
            radius: self.radius + amount,
        }
    }

    /// The axis-aligned box covering the circle.
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        let r = vec2(self.radius, self.radius);
        Rect::new(self.center - r, self.center + r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point2;

    #[test]
    fn bounding_box() {
        let c = Circle::new(point2(1.0, 2.0), 3.0);
        assert_eq!(
            c.bounding_box(),
            Rect::new(point2(-2.0, -1.0), point2(4.0, 5.0))
        );
    }
}

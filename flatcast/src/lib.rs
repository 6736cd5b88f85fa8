//! 2D collision detection and resolution kernel.
//!
//! Given geometric shapes — [`Circle`](geometry::Circle),
//! [`Rect`](geometry::Rect) (axis-aligned or rotated), convex
//! [`Polygon`](geometry::Polygon), [`Segment`](geometry::Segment), and
//! [`Capsule`](geometry::Capsule) — this library answers three questions:
//!
//! * [`collision::overlap`] — do two shapes overlap right now?
//!   (boolean only; cheap enough to cull candidate pairs with)
//! * [`collision::intersect`] — by how much, and in which direction?
//!   (minimum separating normal and penetration depth)
//! * [`collision::raycast`] — will a moving shape touch a static one during
//!   this step, and when? (time of impact and contact normal)
//!
//! [`collision::sweep`] composes the last of these into a resolution loop:
//! given a mover, its velocity over the step, a pre-filtered list of candidate
//! obstacles, and a [`Response`](collision::sweep::Response) policy, it
//! returns the velocity the mover should actually end the step with, without
//! tunneling through any obstacle.
//!
//! The kernel is a pure library. Every function is a bounded numeric
//! computation over value inputs: no entity storage, no I/O, no global
//! mutable state. Calls for disjoint inputs may run concurrently; see
//! [`collision::sweep`] for the details of that guarantee. Broadphase
//! filtering is the caller's job — [`Shape::bounding_box`] and
//! [`Shape::swept_bounding_box`](geometry::Shape::swept_bounding_box)
//! provide the conservative bounds to build one from.
//!
//! [`Shape::bounding_box`]: geometry::Shape::bounding_box
//!
//! # Example
//!
//! ```
//! use flatcast::collision::sweep::{self, Obstacle, Response};
//! use flatcast::geometry::{Circle, Rect, Shape};
//! use flatcast::math::{point2, vec2};
//!
//! // A ball of radius 0.5 heading toward a wall whose near face is at x = 4.5.
//! let ball = Shape::from(Circle::new(point2(0.0, 0.0), 0.5));
//! let wall = Obstacle::fixed(Rect::new(point2(4.5, -10.0), point2(6.0, 10.0)));
//!
//! let resolved = sweep::sweep(&ball, vec2(8.0, 0.0), &[wall], Response::Slide).unwrap();
//!
//! // The ball's surface meets the wall at x = 4.5, so its center stops at 4.0;
//! // the wall face is vertical, so sliding leaves no tangential motion.
//! assert_eq!(resolved.velocity, vec2(4.0, 0.0));
//! ```
//!
//! # Crate features
//!
//! * `arbitrary` — `impl arbitrary::Arbitrary` for shape and policy types.
//! * `serde` — serialization support for shape and policy types.

pub mod collision;
pub mod geometry;
pub mod math;

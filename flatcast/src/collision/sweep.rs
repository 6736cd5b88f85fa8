//! Sweep resolution: turning "mover + velocity + candidate obstacles +
//! response policy" into a final, tunneling-free velocity.
//!
//! The orchestrator is a small state machine — scan, resolve, rescan —
//! bounded by an iteration cap equal to the candidate count. It is pure
//! with respect to world state: it never moves anything, it only returns
//! the velocity the caller should apply. That makes it trivially testable
//! without a live entity store, and means calls for disjoint inputs are
//! safe to run in parallel.
//!
//! The obstacle slice is treated as an immutable snapshot for the duration
//! of one [`sweep`] call; candidates are expected to be pre-filtered by the
//! caller (e.g. against
//! [`Shape::swept_bounding_box`](crate::geometry::Shape::swept_bounding_box)).

use core::cmp::Ordering;

use ordered_float::NotNan;

use crate::collision::{UnsupportedQuery, raycast};
use crate::geometry::Shape;
use crate::math::{Vector, nearly_eq, nearly_zero};

/// After resolving a contact the rescan position is backed off the surface
/// by this much, so floating-point error cannot re-report the surface just
/// left.
const CONTACT_SLOP: f32 = 0.0005;

/// How the velocity is altered at each impact found during a [`sweep`].
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Response {
    /// Remove the velocity component into the surface; keep tangential
    /// motion. `v' = v − (v·n)n`
    Slide,
    /// Reflect the velocity off the surface. `v' = v − 2(v·n)n`
    Bounce,
    /// Stop dead at the time of impact.
    Push,
}

impl Response {
    /// The remaining velocity direction after a contact with unit normal
    /// `normal`.
    fn apply(self, velocity: Vector, normal: Vector) -> Vector {
        match self {
            Response::Slide => velocity - normal * velocity.dot(normal),
            Response::Bounce => velocity - normal * (2.0 * velocity.dot(normal)),
            Response::Push => Vector::zero(),
        }
    }
}

/// A sweep candidate: an obstacle shape and its own velocity over the step.
#[derive(Clone, Debug, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct Obstacle {
    /// The obstacle's shape.
    pub shape: Shape,
    /// The obstacle's displacement over the step; zero for static geometry.
    /// The solvers work in the mover's frame, so this is subtracted from
    /// the mover's velocity when scanning against this obstacle.
    pub velocity: Vector,
}

impl Obstacle {
    /// A static obstacle.
    #[inline]
    pub fn fixed(shape: impl Into<Shape>) -> Self {
        Obstacle {
            shape: shape.into(),
            velocity: Vector::zero(),
        }
    }

    /// An obstacle moving by `velocity` over the step.
    #[inline]
    pub fn moving(shape: impl Into<Shape>, velocity: Vector) -> Self {
        Obstacle {
            shape: shape.into(),
            velocity,
        }
    }
}

/// Result of a [`sweep`], with resolution diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct Resolved {
    /// The velocity the mover should end the step with. Applying it cannot
    /// tunnel through any of the scanned obstacles.
    pub velocity: Vector,
    /// How many contacts were resolved.
    pub iterations: usize,
    /// Whether the iteration cap cut resolution short. The returned
    /// velocity is then the accumulated collision-free travel — a defined
    /// best-effort fallback, not a failure.
    pub truncated: bool,
}

/// One scan hit, carrying its sort keys.
#[derive(Clone, Copy, Debug)]
struct SweepContact {
    hit: raycast::Raycast,
    t: NotNan<f32>,
    /// Squared distance between the mover's and obstacle's centers,
    /// breaking ties between equal impact times.
    dist2: NotNan<f32>,
}

/// Resolves `mover`'s `velocity` against `obstacles`, returning the velocity
/// it should actually end the step with.
///
/// Scans every obstacle with the continuous solver, resolves the earliest
/// impact by `response`, then rescans with the new velocity from the
/// advanced position — resolving one contact can expose or remove others.
/// Iteration is capped at `obstacles.len()`; hitting the cap degrades
/// gracefully (see [`Resolved::truncated`]).
///
/// Ties between impacts at (epsilon-)equal times resolve the physically
/// nearer contact first, which avoids oscillating between equally-timed
/// collisions.
pub fn sweep(
    mover: &Shape,
    velocity: Vector,
    obstacles: &[Obstacle],
    response: Response,
) -> Result<Resolved, UnsupportedQuery> {
    let cap = obstacles.len();
    let mut travelled = Vector::zero();
    let mut offset = Vector::zero();
    let mut v = velocity;
    let mut iterations = 0;

    loop {
        if nearly_zero(v.square_length()) {
            return Ok(done(travelled + v, iterations));
        }

        let contacts = scan(mover, offset, v, obstacles)?;
        let Some(first) = contacts.first() else {
            // The remaining motion is unobstructed.
            return Ok(done(travelled + v, iterations));
        };

        if iterations >= cap {
            // Still colliding with the cap spent: keep the travel known to
            // be collision-free and drop the contested remainder.
            log::trace!(
                "sweep iteration cap ({cap}) reached with contacts remaining; truncating"
            );
            debug_assert!(travelled.square_length().is_finite());
            return Ok(Resolved {
                velocity: travelled,
                iterations,
                truncated: true,
            });
        }

        let t = first.hit.t;
        let normal = first.hit.normal;
        travelled += v * t;
        // Rescan from just short of the surface.
        offset += v * t + normal * CONTACT_SLOP;
        v = response.apply(v, normal) * (1.0 - t);
        iterations += 1;
    }
}

fn done(velocity: Vector, iterations: usize) -> Resolved {
    debug_assert!(velocity.square_length().is_finite());
    Resolved {
        velocity,
        iterations,
        truncated: false,
    }
}

/// Runs the continuous solver against every obstacle and returns the hits,
/// earliest first.
fn scan(
    mover: &Shape,
    offset: Vector,
    v: Vector,
    obstacles: &[Obstacle],
) -> Result<Vec<SweepContact>, UnsupportedQuery> {
    let moved = mover.translate(offset);
    let mut contacts = Vec::new();
    for obstacle in obstacles {
        let relative = v - obstacle.velocity;
        let hit = raycast::shapes(&moved, relative, &obstacle.shape)?;
        if !hit.occurred() {
            continue;
        }
        let dist2 = (moved.center() - obstacle.shape.center()).square_length();
        // A non-finite key means degenerate input; treat as no collision.
        let (Ok(t), Ok(dist2)) = (NotNan::new(hit.t), NotNan::new(dist2)) else {
            continue;
        };
        contacts.push(SweepContact { hit, t, dist2 });
    }
    sort_contacts(&mut contacts);
    Ok(contacts)
}

/// Sorts by ascending impact time; times within epsilon of each other are
/// ordered by ascending center distance, so the physically nearer contact
/// resolves first.
fn sort_contacts(contacts: &mut [SweepContact]) {
    contacts.sort_by_key(|c| c.dist2);
    // Stable, so epsilon-ties keep the distance order.
    contacts.sort_by(|a, b| {
        if nearly_eq(a.t.into_inner(), b.t.into_inner()) {
            Ordering::Equal
        } else {
            a.t.cmp(&b.t)
        }
    });
}

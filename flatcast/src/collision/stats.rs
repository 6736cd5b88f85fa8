//! Diagnostic counters for collision queries.
//!
//! The counters are thread-local, so they never couple concurrent kernel
//! calls; results of queries are unaffected by them. Tests use
//! [`take_sat_axes_evaluated`] to assert that the separating-axis test
//! stops at the first separating axis.

use core::cell::Cell;

thread_local! {
    static SAT_AXES_EVALUATED: Cell<u64> = const { Cell::new(0) };
}

/// Number of candidate separating axes projected on this thread since the
/// last [`take_sat_axes_evaluated`] call.
#[must_use]
pub fn sat_axes_evaluated() -> u64 {
    SAT_AXES_EVALUATED.with(Cell::get)
}

/// Reads and resets the counter of [`sat_axes_evaluated`].
pub fn take_sat_axes_evaluated() -> u64 {
    SAT_AXES_EVALUATED.with(|c| c.replace(0))
}

pub(crate) fn record_sat_axis() {
    SAT_AXES_EVALUATED.with(|c| c.set(c.get() + 1));
}

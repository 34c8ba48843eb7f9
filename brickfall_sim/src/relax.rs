// Relaxation to a fixed point.
//
// Both the settler and the cascade simulation have the same shape: apply a
// full sweep of a monotone update, and repeat until a sweep changes nothing.
// `until_stable()` is that loop, written once.
//
// The sweep closure returns how many changes it made. Termination is the
// caller's responsibility: every caller here has a quantity that only moves
// one way and is bounded (block heights for settling, fallen-set size for
// cascades), so a quiet sweep always arrives.

/// What a relaxation did before reaching its fixed point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Relaxation {
    /// Sweeps run, including the final sweep that changed nothing.
    pub sweeps: usize,
    /// Total changes reported across all sweeps.
    pub changes: usize,
}

/// Run `sweep` until it reports zero changes.
pub fn until_stable<F>(mut sweep: F) -> Relaxation
where
    F: FnMut() -> usize,
{
    let mut outcome = Relaxation::default();
    loop {
        let changed = sweep();
        outcome.sweeps += 1;
        outcome.changes += changed;
        if changed == 0 {
            return outcome;
        }
    }
}

//! Index arithmetic for the playback queue.
//!
//! Everything here is a pure function of the queue length, the current index and the
//! shuffle flag, so the store can stay a thin layer of state over it.

use rand::Rng;

/// Whether moving forward is allowed from `index` in a queue of `len` episodes.
pub fn has_next(len: usize, index: Option<usize>, shuffling: bool) -> bool {
    match index {
        Some(index) if index < len => shuffling || index + 1 < len,
        _ => false,
    }
}

/// Whether moving backward is allowed from `index` in a queue of `len` episodes.
pub fn has_previous(len: usize, index: Option<usize>, shuffling: bool) -> bool {
    match index {
        Some(index) if index < len => shuffling || index > 0,
        _ => false,
    }
}

/// Index played after `index`, or `None` when there is nothing to move to.
///
/// Shuffling picks any position of the queue uniformly, the current one included.
pub fn next_index<R: Rng + ?Sized>(
    len: usize,
    index: Option<usize>,
    shuffling: bool,
    rng: &mut R,
) -> Option<usize> {
    if !has_next(len, index, shuffling) {
        return None;
    }

    if shuffling {
        Some(rng.gen_range(0..len))
    } else {
        index.map(|index| index + 1)
    }
}

/// Index played before `index`, or `None` when there is nothing to move to.
///
/// Shuffle keeps no history: going back draws a fresh random position.
pub fn previous_index<R: Rng + ?Sized>(
    len: usize,
    index: Option<usize>,
    shuffling: bool,
    rng: &mut R,
) -> Option<usize> {
    if !has_previous(len, index, shuffling) {
        return None;
    }

    if shuffling {
        Some(rng.gen_range(0..len))
    } else {
        index.map(|index| index - 1)
    }
}

use alloc::vec;
use alloc::vec::Vec;

use crate::*;

/// Leading-edge per-hole debounce: only the first click in each window is
/// admitted, later ones inside the window are dropped without extending it.
///
/// This is purely a spacing filter; the once-per-appearance idempotence is
/// the arm token owned by [`Round`].
#[derive(Clone, Debug, PartialEq)]
pub struct ClickGate {
    window: Millis,
    last_admitted: Vec<Option<Millis>>,
}

impl ClickGate {
    pub fn new(hole_count: HoleCount) -> Self {
        Self::with_window(hole_count, DEBOUNCE_WINDOW_MS)
    }

    pub fn with_window(hole_count: HoleCount, window: Millis) -> Self {
        Self {
            window,
            last_admitted: vec![None; hole_count as usize],
        }
    }

    /// Whether the click on `index` at wall-clock `now` should reach the round.
    pub fn admit(&mut self, index: HoleIndex, now: Millis) -> bool {
        let Some(slot) = self.last_admitted.get_mut(index as usize) else {
            log::warn!("click on unknown hole {}", index);
            return false;
        };

        if let Some(last) = *slot
            && now.saturating_sub(last) < self.window
        {
            log::trace!("debounced click on hole {} at {}", index, now);
            return false;
        }

        *slot = Some(now);
        true
    }
}

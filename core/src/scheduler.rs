use crate::*;

/// Source of mole appearances: where the next mole shows up and how long to
/// wait before moving it again. Kept as a trait so tests can script the
/// sequence instead of depending on entropy.
pub trait MoleSource {
    /// Picks the hole for the next mole appearance, in `[0, hole_count)`.
    fn pick_hole(&mut self, hole_count: HoleCount) -> HoleIndex;

    /// Wait before the mole moves again, in milliseconds.
    fn next_delay(&mut self) -> Millis;
}

/// Uniformly random moles and delays, deterministic by seed.
#[derive(Clone, Debug)]
pub struct RandomMoleSource {
    rng: rand::rngs::SmallRng,
}

impl RandomMoleSource {
    pub fn new(seed: u64) -> Self {
        use rand::prelude::*;
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MoleSource for RandomMoleSource {
    fn pick_hole(&mut self, hole_count: HoleCount) -> HoleIndex {
        use rand::prelude::*;
        if hole_count == 0 {
            log::warn!("mole requested for an empty grid, returning hole 0");
            return 0;
        }
        self.rng.random_range(0..hole_count)
    }

    fn next_delay(&mut self) -> Millis {
        use rand::prelude::*;
        self.rng.random_range(MIN_MOLE_DELAY_MS..=MAX_MOLE_DELAY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picked_holes_stay_in_range_for_every_difficulty() {
        let mut source = RandomMoleSource::new(7);

        for difficulty in Difficulty::ALL {
            let hole_count = difficulty.hole_count();
            for _ in 0..1000 {
                assert!(source.pick_hole(hole_count) < hole_count);
            }
        }
    }

    #[test]
    fn delays_stay_within_the_configured_band() {
        let mut source = RandomMoleSource::new(7);

        for _ in 0..1000 {
            let delay = source.next_delay();
            assert!((MIN_MOLE_DELAY_MS..=MAX_MOLE_DELAY_MS).contains(&delay));
        }
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let mut a = RandomMoleSource::new(42);
        let mut b = RandomMoleSource::new(42);

        for _ in 0..100 {
            assert_eq!(a.pick_hole(9), b.pick_hole(9));
            assert_eq!(a.next_delay(), b.next_delay());
        }
    }

    #[test]
    fn every_hole_is_eventually_picked() {
        let mut source = RandomMoleSource::new(0);
        let mut seen = [false; 9];

        for _ in 0..1000 {
            seen[source.pick_hole(9) as usize] = true;
        }

        assert!(seen.iter().all(|&hit| hit));
    }
}

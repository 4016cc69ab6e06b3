use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Active (first mole placed)
/// - Active -> Won (armed click on the mole)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundState {
    /// No mole has been shown yet
    Ready,
    /// Mole visible, clicks are being scored
    Active,
    /// Round ended with a successful hit
    Won,
}

impl RoundState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Outcome of a click on a hole
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Click was swallowed by a guard (idle round, spent arm token, bad index)
    Ignored,
    Miss,
    Hit,
}

impl ClickOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Miss => true,
            Self::Hit => true,
        }
    }
}

/// Represents a round from start to the winning hit.
///
/// The hole count is fixed at construction, so the mole index stays in range
/// for the whole round no matter when the player changes difficulty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    hole_count: HoleCount,
    mole: Option<HoleIndex>,
    miss_count: MissCount,
    armed: bool,
    state: RoundState,
}

impl Round {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            hole_count: difficulty.hole_count(),
            mole: None,
            miss_count: 0,
            armed: false,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn hole_count(&self) -> HoleCount {
        self.hole_count
    }

    pub fn mole(&self) -> Option<HoleIndex> {
        self.mole
    }

    pub fn miss_count(&self) -> MissCount {
        self.miss_count
    }

    /// Whether the current mole appearance can still register a hit or miss
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Shows the mole at `index` and re-arms the appearance token.
    ///
    /// The first placement moves the round from Ready to Active.
    pub fn place_mole(&mut self, index: HoleIndex) -> Result<()> {
        if self.state.is_finished() {
            return Err(GameError::RoundOver);
        }
        if index >= self.hole_count {
            return Err(GameError::InvalidHole);
        }

        if self.state.is_ready() {
            self.state = RoundState::Active;
        }
        self.mole = Some(index);
        self.armed = true;
        log::debug!("mole placed at hole {}", index);
        Ok(())
    }

    /// Scores a click on `index`.
    ///
    /// Total over any state: guarded preconditions (idle round, disarmed
    /// appearance, out-of-range index) come back as `Ignored` rather than
    /// errors. The first scored click per appearance spends the arm token,
    /// whether it hits or misses.
    pub fn click(&mut self, index: HoleIndex) -> ClickOutcome {
        use ClickOutcome::*;

        if self.state != RoundState::Active || !self.armed {
            return Ignored;
        }
        if index >= self.hole_count {
            return Ignored;
        }

        self.armed = false;
        if Some(index) == self.mole {
            self.state = RoundState::Won;
            log::debug!("hit at hole {} after {} misses", index, self.miss_count);
            Hit
        } else {
            self.miss_count += 1;
            log::debug!("miss at hole {}, total {}", index, self.miss_count);
            Miss
        }
    }
}

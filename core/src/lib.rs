#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use error::*;
pub use gate::*;
pub use round::*;
pub use scheduler::*;
pub use types::*;

mod error;
mod gate;
mod round;
mod scheduler;
mod types;

/// How many holes the grid has, fixed for the whole round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn hole_count(self) -> HoleCount {
        match self {
            Self::Easy => 3,
            Self::Medium => 6,
            Self::Hard => 9,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

/// Index of a single hole in the grid.
pub type HoleIndex = u8;

/// Count type used for grid sizes.
pub type HoleCount = u8;

/// Count type used for missed clicks.
pub type MissCount = u32;

/// Milliseconds of wall-clock time, as handed in by the embedding layer.
pub type Millis = u64;

/// Shortest wait before the mole moves to another hole.
pub const MIN_MOLE_DELAY_MS: Millis = 200;

/// Longest wait before the mole moves to another hole.
pub const MAX_MOLE_DELAY_MS: Millis = 400;

/// Minimum spacing enforced between processed clicks on the same hole.
pub const DEBOUNCE_WINDOW_MS: Millis = 200;

// Lottery machine
pub const BALL_COUNT: u8 = 14;
pub const BALLS_TO_DRAW: u8 = 4;

// Largest pool a machine may hold. Combinations are tracked as bitmasks.
pub const MAX_BALL_COUNT: u8 = 64;

// Resolution tables are dense arenas; keep them at a sane size
pub const MAX_COMBINATION_TABLE_SIZE: u64 = 10_000_000;

// Draft order
pub const MAX_RANKING_JUMP: u32 = 10;

// Rounds and simulations
pub const MIN_ROUNDS: u32 = 1;
pub const MAX_ROUNDS: u32 = 3;
pub const DEFAULT_ROUNDS: u32 = 2;
pub const MIN_SIMULATIONS: u64 = 1;
pub const DEFAULT_SIMULATIONS: u64 = 1;

// Redraw guard (a valid configuration never comes close)
pub const MAX_DRAWS_PER_ROUND: u64 = 100_000;
pub const MIN_DRAWS_PER_ROUND: u64 = 1_000;
pub const REDRAW_WARN_THRESHOLD: u64 = 25;

// Percentages are stored in hundredths of a percent
pub const PERCENTAGE_SCALE: u32 = 100;
pub const FULL_PERCENTAGE: u32 = 100 * PERCENTAGE_SCALE;

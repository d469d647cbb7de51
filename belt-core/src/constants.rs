pub const DEFAULT_FIELD_WIDTH: i32 = 80;
pub const DEFAULT_FIELD_HEIGHT: i32 = 24;
pub const DEFAULT_SHIP_WIDTH: i32 = 3;

/// Per-mille chance that a freshly spawned far-edge cell holds an asteroid.
pub const DEFAULT_SPAWN_DENSITY_PER_MILLE: u32 = 180;
/// Contiguous rows kept clear in every spawned column.
pub const DEFAULT_MIN_GAP_ROWS: i32 = 4;

pub const DEFAULT_SEED: u32 = 0xDEAD_BEEF;

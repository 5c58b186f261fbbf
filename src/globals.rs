pub const SCREEN_W: f32 = 800.0;
pub const SCREEN_H: f32 = 600.0;

pub const GRID_COLS: usize = 20;
pub const GRID_ROWS: usize = 13;
pub const TILE_SIZE: f32 = 40.0;

pub const HUD_Y: f32 = GRID_ROWS as f32 * TILE_SIZE + 12.0;

pub const CHANNEL_MAX: f32 = 255.0;
pub const SEED_MAX: f32 = 256.0;

pub const MAX_SPEED: f32 = 1.5;
pub const MAX_FORCE: f32 = 0.01;

pub const SEPARATION_WEIGHT: f32 = 1.2;
pub const ALIGNMENT_WEIGHT: f32 = 1.0;
pub const COHESION_WEIGHT: f32 = 2.0;

pub const GAIN_MIN: f32 = 0.0;
pub const GAIN_MAX: f32 = 5.0;
pub const GAIN_STEP: f32 = 0.1;

pub const DORMANT_DIM: f32 = 0.25;

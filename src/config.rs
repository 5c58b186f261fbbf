use crate::error::FlockError;
use crate::flock::Gains;
use crate::globals::*;
use crate::grid::Grid;

#[derive(Copy, Clone, Debug)]
pub struct FlockConfig {
	pub grid: Grid,
	pub max_speed: f32,
	pub max_force: f32,
	pub gains: Gains,
	/// Size of a dedicated rayon pool for the dispatcher. `None` uses rayon's default.
	pub worker_threads: Option<usize>,
}

impl Default for FlockConfig {
	fn default() -> Self {
		Self {
			grid: Grid::new(GRID_COLS, GRID_ROWS, TILE_SIZE),
			max_speed: MAX_SPEED,
			max_force: MAX_FORCE,
			gains: Gains::default(),
			worker_threads: None,
		}
	}
}

impl FlockConfig {
	pub fn validate(&self) -> Result<(), FlockError> {
		if self.grid.len() == 0 {
			return Err(FlockError::EmptyGrid { cols: self.grid.cols, rows: self.grid.rows });
		}
		self.gains.validate()
	}
}

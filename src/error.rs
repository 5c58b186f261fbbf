use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlockError {
	#[error("{rule} gain must be finite, got {value}")]
	NonFiniteGain { rule: &'static str, value: f32 },

	#[error("a {cols}x{rows} grid holds no blocks")]
	EmptyGrid { cols: usize, rows: usize },

	#[error("could not update block: {0}")]
	Storage(#[from] specs::error::Error),

	#[error("failed to build worker pool: {0}")]
	Pool(#[from] rayon::ThreadPoolBuildError),
}

impl From<FlockError> for ggez::GameError {
	fn from(e: FlockError) -> Self {
		ggez::GameError::ConfigError(e.to_string())
	}
}

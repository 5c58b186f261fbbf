use ggez::graphics::Rect;

/// Row-major layout of square tiles starting at the top-left of the screen.
#[derive(Copy, Clone, Debug)]
pub struct Grid {
	pub cols: usize,
	pub rows: usize,
	pub tile_size: f32,
}

impl Grid {
	pub fn new(cols: usize, rows: usize, tile_size: f32) -> Self {
		Self { cols, rows, tile_size }
	}

	pub fn len(&self) -> usize {
		self.cols * self.rows
	}

	pub fn rect(&self, slot: usize) -> Rect {
		let x = (slot % self.cols) as f32 * self.tile_size;
		let y = (slot / self.cols) as f32 * self.tile_size;
		Rect::new(x, y, self.tile_size, self.tile_size)
	}

	pub fn slot_at(&self, x: f32, y: f32) -> Option<usize> {
		if x < 0.0 || y < 0.0 || self.tile_size <= 0.0 {
			return None;
		}
		let col = (x / self.tile_size) as usize;
		let row = (y / self.tile_size) as usize;
		if col >= self.cols || row >= self.rows {
			return None;
		}
		Some(row * self.cols + col)
	}
}

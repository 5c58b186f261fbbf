use rand::Rng;
use specs::{Component, storage::*, world::Index};
use crate::color::{ColorVector, ColorVectorExt};
use crate::flock::Gains;
use crate::globals::*;

/// One color particle. `color` plays the part a position plays in spatial boids.
#[derive(Copy, Clone, Debug, PartialEq, Component)]
#[storage(DenseVecStorage)]
pub struct Block {
	pub color: ColorVector,
	pub velocity: ColorVector,
	pub acceleration: ColorVector,
	pub max_speed: f32,
	pub max_force: f32,
}

/// Start-of-frame view of a block, as seen by its peers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Peer {
	pub id: Index,
	pub color: ColorVector,
	pub velocity: ColorVector,
}

impl Block {
	/// Negative or NaN limits are clamped to zero.
	pub fn new(color: ColorVector, velocity: ColorVector, max_speed: f32, max_force: f32) -> Self {
		let max_speed = max_speed.max(0.0);
		Self {
			color,
			velocity: velocity.limit(max_speed),
			acceleration: ColorVector::zeros(),
			max_speed,
			max_force: max_force.max(0.0),
		}
	}

	pub fn random<R: Rng + ?Sized>(rng: &mut R, max_speed: f32, max_force: f32) -> Self {
		let color = ColorVector::new(
			rng.gen_range(0.0f32, SEED_MAX),
			rng.gen_range(0.0f32, SEED_MAX),
			rng.gen_range(0.0f32, SEED_MAX),
		);
		let heading = ColorVector::new(
			rng.gen_range(-1.0f32, 1.0f32),
			rng.gen_range(-1.0f32, 1.0f32),
			rng.gen_range(-1.0f32, 1.0f32),
		).normalize_or_zero();
		let velocity = heading * rng.gen_range(0.0f32, max_speed.max(f32::EPSILON));
		Self::new(color, velocity, max_speed, max_force)
	}

	pub fn as_peer(&self, id: Index) -> Peer {
		Peer { id, color: self.color, velocity: self.velocity }
	}

	pub fn apply_force(&mut self, force: ColorVector) {
		self.acceleration += force;
	}

	fn steer(&self, desired: ColorVector) -> ColorVector {
		let desired = desired.normalize_or_zero() * self.max_speed;
		(desired - self.velocity).limit(self.max_force)
	}

	/// Steers away from the mean direction of every peer, regardless of distance.
	pub fn separate<'a, I>(&self, peers: I) -> ColorVector
	where I: IntoIterator<Item = &'a Peer>
	{
		let mut total = ColorVector::zeros();
		let mut count = 0;
		for peer in peers {
			total += (self.color - peer.color).normalize_or_zero();
			count += 1;
		}
		if count == 0 {
			return ColorVector::zeros();
		}
		self.steer(total / count as f32)
	}

	pub fn align<'a, I>(&self, peers: I) -> ColorVector
	where I: IntoIterator<Item = &'a Peer>
	{
		let mut total = ColorVector::zeros();
		let mut count = 0;
		for peer in peers {
			total += peer.velocity;
			count += 1;
		}
		if count == 0 {
			return ColorVector::zeros();
		}
		self.steer(total / count as f32)
	}

	pub fn cohesion<'a, I>(&self, peers: I) -> ColorVector
	where I: IntoIterator<Item = &'a Peer>
	{
		let mut total = ColorVector::zeros();
		let mut count = 0;
		for peer in peers {
			total += peer.color;
			count += 1;
		}
		if count == 0 {
			return ColorVector::zeros();
		}
		self.seek(total / count as f32)
	}

	/// Zero when `target` is the current color.
	pub fn seek(&self, target: ColorVector) -> ColorVector {
		let offset = target - self.color;
		if offset == ColorVector::zeros() {
			return ColorVector::zeros();
		}
		self.steer(offset)
	}

	pub fn flock<'a, I>(&mut self, peers: I, gains: &Gains)
	where I: IntoIterator<Item = &'a Peer> + Clone
	{
		let separation = self.separate(peers.clone()) * gains.separation;
		let alignment = self.align(peers.clone()) * gains.alignment;
		let cohesion = self.cohesion(peers) * gains.cohesion;
		self.apply_force(separation);
		self.apply_force(alignment);
		self.apply_force(cohesion);
	}

	pub fn update(&mut self) {
		self.velocity = (self.velocity + self.acceleration).limit(self.max_speed);
		self.color += self.velocity;
		self.edges();
		self.acceleration = ColorVector::zeros();
	}

	/// Elastic bounce, each channel on its own.
	pub fn edges(&mut self) {
		for i in 0..3 {
			if self.color[i] > CHANNEL_MAX {
				self.color[i] = CHANNEL_MAX;
				self.velocity[i] = -self.velocity[i];
			} else if self.color[i] < 0.0 {
				self.color[i] = 0.0;
				self.velocity[i] = -self.velocity[i];
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use rand::{SeedableRng, rngs::StdRng};

	fn still(r: f32, g: f32, b: f32) -> Block {
		Block::new(ColorVector::new(r, g, b), ColorVector::zeros(), MAX_SPEED, MAX_FORCE)
	}

	fn peer(id: Index, block: &Block) -> Peer {
		block.as_peer(id)
	}

	#[test]
	fn seek_own_color_is_zero() {
		let block = still(10.0, 20.0, 30.0);
		let force = block.seek(block.color);
		assert_eq!(force, ColorVector::zeros());
	}

	#[test]
	fn no_peers_no_steering() {
		let block = Block::new(ColorVector::new(50.0, 50.0, 50.0), ColorVector::new(0.5, 0.0, 0.0), MAX_SPEED, MAX_FORCE);
		let none: [Peer; 0] = [];
		assert_eq!(block.separate(&none), ColorVector::zeros());
		assert_eq!(block.align(&none), ColorVector::zeros());
		assert_eq!(block.cohesion(&none), ColorVector::zeros());
	}

	#[test]
	fn steering_forces_never_exceed_max_force() {
		let mut rng = StdRng::seed_from_u64(7);
		let blocks: Vec<Block> = (0..40).map(|_| Block::random(&mut rng, MAX_SPEED, MAX_FORCE)).collect();
		let peers: Vec<Peer> = blocks.iter().enumerate().map(|(i, b)| peer(i as Index, b)).collect();
		for (i, block) in blocks.iter().enumerate() {
			let others: Vec<Peer> = peers.iter().filter(|p| p.id != i as Index).cloned().collect();
			let target = ColorVector::new(rng.gen_range(0.0f32, CHANNEL_MAX), 0.0, 255.0);
			for force in &[block.separate(&others), block.align(&others), block.cohesion(&others), block.seek(target)] {
				assert!(force.norm() <= MAX_FORCE + 1e-6, "{} > {}", force.norm(), MAX_FORCE);
			}
		}
	}

	#[test]
	fn separation_ignores_distance() {
		let block = still(100.0, 100.0, 100.0);
		let near = still(99.0, 100.0, 100.0);
		let far = still(0.0, 100.0, 100.0);
		let a = block.separate(&[peer(1, &near)]);
		let b = block.separate(&[peer(1, &far)]);
		assert_relative_eq!(a.x, b.x, epsilon = 1e-6);
		assert!(a.x > 0.0);
	}

	#[test]
	fn alignment_matches_peer_heading() {
		let block = still(100.0, 100.0, 100.0);
		let mover = Block::new(ColorVector::new(0.0, 0.0, 0.0), ColorVector::new(0.0, 1.0, 0.0), MAX_SPEED, MAX_FORCE);
		let force = block.align(&[peer(1, &mover)]);
		assert_relative_eq!(force.y, MAX_FORCE, epsilon = 1e-6);
		assert_relative_eq!(force.x, 0.0);
	}

	#[test]
	fn alignment_with_resting_peers_brakes() {
		let block = Block::new(ColorVector::new(100.0, 100.0, 100.0), ColorVector::new(1.0, 0.0, 0.0), MAX_SPEED, MAX_FORCE);
		let rest = still(0.0, 0.0, 0.0);
		let force = block.align(&[peer(1, &rest)]);
		assert_relative_eq!(force.x, -MAX_FORCE, epsilon = 1e-6);
	}

	#[test]
	fn update_keeps_speed_and_clears_acceleration() {
		let mut block = still(100.0, 100.0, 100.0);
		block.apply_force(ColorVector::new(40.0, -30.0, 0.0));
		block.update();
		assert_relative_eq!(block.velocity.norm(), MAX_SPEED, epsilon = 1e-5);
		assert_eq!(block.acceleration, ColorVector::zeros());
		assert_relative_eq!(block.color.x, 100.0 + 1.2, epsilon = 1e-4);
		assert_relative_eq!(block.color.y, 100.0 - 0.9, epsilon = 1e-4);
	}

	#[test]
	fn reflects_at_top_of_channel() {
		let mut block = Block::new(ColorVector::new(254.8, 10.0, 10.0), ColorVector::new(1.0, 0.0, 0.0), MAX_SPEED, MAX_FORCE);
		block.update();
		assert_eq!(block.color.x, 255.0);
		assert_eq!(block.velocity.x, -1.0);
		assert_eq!(block.color.y, 10.0);
	}

	#[test]
	fn reflects_at_bottom_of_channel() {
		let mut block = Block::new(ColorVector::new(10.0, 10.0, 0.5), ColorVector::new(0.0, 0.0, -1.0), MAX_SPEED, MAX_FORCE);
		block.update();
		assert_eq!(block.color.z, 0.0);
		assert_eq!(block.velocity.z, 1.0);
		assert_eq!(block.velocity.x, 0.0);
	}

	#[test]
	fn opposite_corners_push_apart_and_pull_together() {
		let mut dark = still(0.0, 0.0, 0.0);
		let light = still(255.0, 255.0, 255.0);
		let peers = [peer(1, &light)];

		let separation = dark.separate(&peers);
		let cohesion = dark.cohesion(&peers);
		assert!(separation.iter().all(|c| *c < 0.0));
		assert!(cohesion.iter().all(|c| *c > 0.0));
		assert_eq!(dark.align(&peers), ColorVector::zeros());

		dark.flock(&peers, &Gains::default());
		let per_channel = MAX_FORCE / 3f32.sqrt();
		let expected = (COHESION_WEIGHT - SEPARATION_WEIGHT) * per_channel;
		for c in dark.acceleration.iter() {
			assert_relative_eq!(*c, expected, epsilon = 1e-6);
		}
		assert!(dark.acceleration.norm() > 0.0);
	}

	#[test]
	fn negative_limits_are_clamped() {
		let block = Block::new(ColorVector::zeros(), ColorVector::new(1.0, 1.0, 1.0), -2.0, -1.0);
		assert_eq!(block.max_speed, 0.0);
		assert_eq!(block.max_force, 0.0);
		assert_eq!(block.velocity, ColorVector::zeros());
	}

	#[test]
	fn random_blocks_start_in_range() {
		let mut rng = StdRng::seed_from_u64(42);
		for _ in 0..200 {
			let block = Block::random(&mut rng, MAX_SPEED, MAX_FORCE);
			assert!(block.color.iter().all(|c| *c >= 0.0 && *c < SEED_MAX));
			assert!(block.velocity.norm() <= MAX_SPEED + 1e-6);
		}
	}
}
